//! Rendering and normalization seams.
//!
//! The scheduler treats both as black boxes: a [`Renderer`] turns a
//! [`StructMeta`] into source text, a [`Normalizer`] post-processes the
//! written text. The built-in [`ModelRenderer`] emits a Rust model
//! file; swap in another implementation to target a different template
//! engine or formatter.

use std::fmt::Write;
use std::path::Path;

use thiserror::Error;

use crate::StructMeta;
use crate::type_mapper::{SOFT_DELETE_TYPE, TIMESTAMP_TYPE};

/// Template-rendering failure, fatal for its unit only.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RenderError {
    message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Normalization failure at a specific line of the rendered text.
#[derive(Debug, Error)]
#[error("{message} (line {line})")]
pub struct NormalizeError {
    pub line: usize,
    pub message: String,
}

impl NormalizeError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Renders one aggregated model to source text.
pub trait Renderer {
    fn render(&self, meta: &StructMeta) -> Result<String, RenderError>;
}

/// Post-processes rendered text after it has been written.
pub trait Normalizer {
    fn normalize(&self, path: &Path, text: &str) -> Result<String, NormalizeError>;
}

/// Built-in renderer producing a Rust model file: header, imports,
/// struct with tagged fields, table-name helper, and shard helpers when
/// the model aggregates more than one table.
pub struct ModelRenderer;

impl Renderer for ModelRenderer {
    fn render(&self, meta: &StructMeta) -> Result<String, RenderError> {
        let uses_soft_delete = meta
            .fields
            .iter()
            .any(|field| field.rust_type.contains(SOFT_DELETE_TYPE));
        let uses_timestamp = uses_soft_delete
            || meta
                .fields
                .iter()
                .any(|field| field.rust_type.contains(TIMESTAMP_TYPE));

        let mut out = String::from("// Code generated by modelgen. DO NOT EDIT.\n");
        if uses_timestamp {
            out.push_str("\nuse chrono::NaiveDateTime;\n");
        }
        if uses_soft_delete {
            out.push_str("\n/// Soft-delete timestamp; `None` while the row is live.\n");
            out.push_str("pub type DeletedAt = Option<NaiveDateTime>;\n");
        }

        let _ = write!(out, "\n/// Generated from table `{}`", meta.tables.join("`, `"));
        out.push_str(".\n#[derive(Debug, Clone)]\n");
        let _ = writeln!(out, "pub struct {} {{", meta.type_ident);
        for field in &meta.fields {
            if field.multiline_comment {
                for line in field.comment.lines() {
                    let _ = writeln!(out, "    /// {line}");
                }
            }
            let _ = writeln!(out, "    #[model(\"{}\")]", field.model_tag);
            if let Some(serde_tag) = &field.serde_tag {
                let _ = writeln!(out, "    #[serde(rename = \"{serde_tag}\")]");
            }
            if let Some(extra_tag) = &field.extra_tag {
                let _ = writeln!(out, "    #[{extra_tag}]");
            }
            let _ = write!(out, "    pub {}: {},", field.name, field.rust_type);
            if !field.multiline_comment && !field.comment.is_empty() {
                let _ = write!(out, " // {}", field.comment);
            }
            out.push('\n');
        }
        out.push_str("}\n");

        let _ = writeln!(out, "\nimpl {} {{", meta.type_ident);
        let _ = writeln!(
            out,
            "    pub const TABLE_NAME: &'static str = \"{}\";",
            meta.tables.first().map(String::as_str).unwrap_or_default()
        );
        if meta.shard_count() > 1 {
            let _ = writeln!(out, "    pub const SHARD_COUNT: i64 = {};", meta.shard_count());
        }
        out.push_str("\n    pub fn table_name() -> &'static str {\n        Self::TABLE_NAME\n    }\n");
        if meta.shard_count() > 1 {
            out.push_str("\n    /// Physical table for a shard key.\n");
            out.push_str("    pub fn shard_table_name(shard_key: i64) -> String {\n");
            out.push_str(
                "        format!(\"{}{}\", Self::TABLE_NAME, shard_key % Self::SHARD_COUNT)\n",
            );
            out.push_str("    }\n");
        }
        out.push_str("}\n");

        Ok(out)
    }
}

/// Built-in normalizer: strips trailing whitespace per line and
/// guarantees a single trailing newline.
pub struct WhitespaceNormalizer;

impl Normalizer for WhitespaceNormalizer {
    fn normalize(&self, _path: &Path, text: &str) -> Result<String, NormalizeError> {
        let mut normalized = text
            .lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n");
        normalized.push('\n');
        Ok(normalized)
    }
}

/// Numbered source lines around `line` (1-based), five on each side,
/// for normalization diagnostics.
pub fn line_context(text: &str, line: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    if lines.is_empty() {
        return String::new();
    }
    let line = line.clamp(1, lines.len());
    let start = line.saturating_sub(6);
    let end = (line + 5).min(lines.len());
    lines[start..end]
        .iter()
        .enumerate()
        .map(|(offset, text)| format!("{:>4} | {}", start + offset + 1, text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use crate::testing::assert_content_eq;
    use crate::{Field, StructMeta};

    use super::*;

    fn field(name: &str, rust_type: &str, tag: &str) -> Field {
        Field {
            name: name.to_string(),
            rust_type: rust_type.to_string(),
            comment: String::new(),
            multiline_comment: false,
            model_tag: tag.to_string(),
            serde_tag: None,
            extra_tag: None,
        }
    }

    #[test]
    fn test_render_single_table_model() {
        let meta = StructMeta {
            file_stem: "tbl_user".to_string(),
            type_ident: "TblUser".to_string(),
            fields: vec![
                field("user_id", "i64", "column:user_id;primaryKey;autoIncrement:true"),
                field("email", "String", "column:email;not null"),
            ],
            tables: vec!["tbl_user".to_string()],
        };

        let rendered = ModelRenderer.render(&meta).unwrap();
        assert_content_eq(
            "// Code generated by modelgen. DO NOT EDIT.\n\
             \n\
             /// Generated from table `tbl_user`.\n\
             #[derive(Debug, Clone)]\n\
             pub struct TblUser {\n\
             \x20   #[model(\"column:user_id;primaryKey;autoIncrement:true\")]\n\
             \x20   pub user_id: i64,\n\
             \x20   #[model(\"column:email;not null\")]\n\
             \x20   pub email: String,\n\
             }\n\
             \n\
             impl TblUser {\n\
             \x20   pub const TABLE_NAME: &'static str = \"tbl_user\";\n\
             \n\
             \x20   pub fn table_name() -> &'static str {\n\
             \x20       Self::TABLE_NAME\n\
             \x20   }\n\
             }\n",
            &rendered,
        );
    }

    #[test]
    fn test_render_sharded_model_has_shard_helpers() {
        let meta = StructMeta {
            file_stem: "order".to_string(),
            type_ident: "Order".to_string(),
            fields: vec![field("order_id", "i64", "column:order_id;primaryKey")],
            tables: vec!["order_2024".to_string(), "order_2025".to_string()],
        };

        let rendered = ModelRenderer.render(&meta).unwrap();
        assert!(rendered.contains("pub const SHARD_COUNT: i64 = 2;"));
        assert!(rendered.contains("pub fn shard_table_name(shard_key: i64) -> String {"));
        assert!(rendered.contains("Generated from table `order_2024`, `order_2025`."));
    }

    #[test]
    fn test_render_imports_chrono_for_timestamps() {
        let meta = StructMeta {
            file_stem: "t".to_string(),
            type_ident: "T".to_string(),
            fields: vec![field("created_at", "NaiveDateTime", "column:created_at;not null")],
            tables: vec!["t".to_string()],
        };

        let rendered = ModelRenderer.render(&meta).unwrap();
        assert!(rendered.contains("use chrono::NaiveDateTime;"));
        assert!(!rendered.contains("pub type DeletedAt"));
    }

    #[test]
    fn test_render_soft_delete_alias() {
        let meta = StructMeta {
            file_stem: "t".to_string(),
            type_ident: "T".to_string(),
            fields: vec![field("deleted_at", "DeletedAt", "column:deleted_at")],
            tables: vec!["t".to_string()],
        };

        let rendered = ModelRenderer.render(&meta).unwrap();
        assert!(rendered.contains("use chrono::NaiveDateTime;"));
        assert!(rendered.contains("pub type DeletedAt = Option<NaiveDateTime>;"));
    }

    #[test]
    fn test_render_comments() {
        let mut single = field("a", "i32", "column:a");
        single.comment = "status code".to_string();
        let mut multi = field("b", "i32", "column:b");
        multi.comment = "first\nsecond".to_string();
        multi.multiline_comment = true;

        let meta = StructMeta {
            file_stem: "t".to_string(),
            type_ident: "T".to_string(),
            fields: vec![single, multi],
            tables: vec!["t".to_string()],
        };

        let rendered = ModelRenderer.render(&meta).unwrap();
        assert!(rendered.contains("pub a: i32, // status code\n"));
        assert!(rendered.contains("    /// first\n    /// second\n    #[model(\"column:b\")]\n"));
    }

    #[test]
    fn test_render_secondary_tags() {
        let mut tagged = field("user_id", "i64", "column:user_id");
        tagged.serde_tag = Some("userId".to_string());
        tagged.extra_tag = Some("index".to_string());

        let meta = StructMeta {
            file_stem: "t".to_string(),
            type_ident: "T".to_string(),
            fields: vec![tagged],
            tables: vec!["t".to_string()],
        };

        let rendered = ModelRenderer.render(&meta).unwrap();
        assert!(rendered.contains("    #[serde(rename = \"userId\")]\n"));
        assert!(rendered.contains("    #[index]\n"));
    }

    #[test]
    fn test_whitespace_normalizer() {
        let normalized = WhitespaceNormalizer
            .normalize(Path::new("t.rs"), "line one   \nline two\t\n\n")
            .unwrap();
        assert_eq!(normalized, "line one\nline two\n\n");
    }

    #[test]
    fn test_whitespace_normalizer_adds_trailing_newline() {
        let normalized = WhitespaceNormalizer
            .normalize(Path::new("t.rs"), "no newline")
            .unwrap();
        assert_eq!(normalized, "no newline\n");
    }

    #[test]
    fn test_line_context_window() {
        let text = (1..=20).map(|i| format!("line{i}")).collect::<Vec<_>>().join("\n");
        let context = line_context(&text, 10);

        assert!(context.contains("   5 | line5"));
        assert!(context.contains("  10 | line10"));
        assert!(context.contains("  15 | line15"));
        assert!(!context.contains("line4\n"));
        assert!(!context.contains("line16"));
    }

    #[test]
    fn test_line_context_clamps_to_bounds() {
        let context = line_context("only", 99);
        assert_eq!(context, "   1 | only");
        assert_eq!(line_context("", 1), "");
    }
}
