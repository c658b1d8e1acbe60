//! Table-name normalization.
//!
//! A raw table name is reduced to its maximal letter runs; the runs drive
//! the normalized token, the generated type identifier, and the output
//! file stem. The stem is always re-derived from the identifier (never
//! from the raw name) so the two stay consistent even when a caller
//! substitutes its own identifier.

use thiserror::Error;

/// Malformed table-name input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidNameError {
    #[error("table name is empty")]
    Empty,
    #[error("table name '{0}' contains invalid characters")]
    Malformed(String),
}

/// The three names derived from one raw table name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    /// Letter runs concatenated verbatim, e.g. "tbl_user" -> "tbluser".
    pub token: String,
    /// Upper-camel type identifier, e.g. "tbl_user" -> "TblUser".
    pub type_ident: String,
    /// Snake-case file stem derived from the identifier, e.g. "tbl_user".
    pub file_stem: String,
}

/// Derive the normalized token, type identifier, and file stem for a raw
/// table name.
///
/// Valid names are one or more letter runs optionally separated by `-` or
/// `_`, optionally followed by trailing digits, and must start with a
/// letter.
pub fn table_names(raw: &str) -> Result<TableNames, InvalidNameError> {
    if raw.is_empty() {
        return Err(InvalidNameError::Empty);
    }
    if !is_valid_table_name(raw) {
        return Err(InvalidNameError::Malformed(raw.to_string()));
    }
    let runs = letter_runs(raw);
    let token = runs.concat();
    let type_ident: String = runs.iter().map(|run| capitalize_first(run)).collect();
    let file_stem = file_stem(&type_ident);
    Ok(TableNames {
        token,
        type_ident,
        file_stem,
    })
}

/// Derive the file stem from a type identifier by segmenting it into
/// uppercase-run-plus-lowercase-tail pieces and joining them lowercased
/// with `_`.
///
/// An identifier with no uppercase letters yields an empty stem; callers
/// must reject that.
pub fn file_stem(identifier: &str) -> String {
    let chars: Vec<char> = identifier.chars().collect();
    let mut segments: Vec<String> = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_uppercase() {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i].is_ascii_uppercase() {
            i += 1;
        }
        while i < chars.len() && chars[i].is_ascii_lowercase() {
            i += 1;
        }
        segments.push(chars[start..i].iter().collect::<String>().to_ascii_lowercase());
    }
    segments.join("_")
}

fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars().peekable();
    let mut seen_letter = false;
    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphabetic() {
            seen_letter = true;
            chars.next();
        } else if (c == '-' || c == '_') && seen_letter {
            chars.next();
        } else {
            break;
        }
    }
    if !seen_letter {
        return false;
    }
    // Only trailing digits may remain.
    chars.all(|c| c.is_ascii_digit())
}

fn letter_runs(raw: &str) -> Vec<String> {
    let mut runs = Vec::new();
    let mut current = String::new();
    for c in raw.chars() {
        if c.is_ascii_alphabetic() {
            current.push(c);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn capitalize_first(run: &str) -> String {
    let mut chars = run.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_ascii_uppercase().to_string() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names_basic() {
        let names = table_names("tbl_user").unwrap();
        assert_eq!(names.token, "tbluser");
        assert_eq!(names.type_ident, "TblUser");
        assert_eq!(names.file_stem, "tbl_user");
    }

    #[test]
    fn test_table_names_dashes_and_trailing_digits() {
        let names = table_names("tbl-User-1").unwrap();
        assert_eq!(names.token, "tblUser");
        assert_eq!(names.type_ident, "TblUser");
        assert_eq!(names.file_stem, "tbl_user");
    }

    #[test]
    fn test_table_names_case_preserved_in_token() {
        let names = table_names("order_ITEMS").unwrap();
        assert_eq!(names.token, "orderITEMS");
        assert_eq!(names.type_ident, "OrderITEMS");
        assert_eq!(names.file_stem, "order_items");
    }

    #[test]
    fn test_table_names_rejects_empty() {
        assert_eq!(table_names(""), Err(InvalidNameError::Empty));
    }

    #[test]
    fn test_table_names_rejects_digits_only() {
        assert_eq!(
            table_names("999"),
            Err(InvalidNameError::Malformed("999".to_string()))
        );
    }

    #[test]
    fn test_table_names_rejects_leading_separator() {
        assert!(table_names("_user").is_err());
        assert!(table_names("-user").is_err());
    }

    #[test]
    fn test_table_names_rejects_interior_digits() {
        assert!(table_names("a1b").is_err());
        assert!(table_names("user2name3").is_err());
    }

    #[test]
    fn test_table_names_rejects_invalid_characters() {
        assert!(table_names("user!").is_err());
        assert!(table_names("user name").is_err());
    }

    #[test]
    fn test_table_names_allows_digits_after_separator() {
        let names = table_names("order_2024").unwrap();
        assert_eq!(names.type_ident, "Order");
        assert_eq!(names.file_stem, "order");
    }

    #[test]
    fn test_file_stem_segments_uppercase_runs() {
        assert_eq!(file_stem("TblUser"), "tbl_user");
        assert_eq!(file_stem("ABCdef"), "abcdef");
        assert_eq!(file_stem("HTTPServer"), "httpserver");
    }

    #[test]
    fn test_file_stem_skips_lowercase_prefix() {
        assert_eq!(file_stem("myIdent"), "ident");
    }

    #[test]
    fn test_file_stem_empty_for_no_uppercase() {
        assert_eq!(file_stem("lowercase"), "");
        assert_eq!(file_stem(""), "");
    }

    #[test]
    fn test_stem_rederivation_matches_identifier_segmentation() {
        for raw in ["tbl_user", "order_item_detail", "a-b-c", "shop7"] {
            let names = table_names(raw).unwrap();
            assert_eq!(names.file_stem, file_stem(&names.type_ident));
        }
    }
}
