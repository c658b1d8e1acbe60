//! Persistence-tag construction.
//!
//! Tags serialize a column's persistence metadata into the annotation
//! attached to the generated field, e.g.
//! `column:user_id;type:bigint(20);primaryKey;autoIncrement:true`.

use std::fmt::Write;

use modelgen_schema::Column;

/// Build the full tag string for a column.
///
/// The tag always starts with the column and detail-type fragments;
/// exactly one of primaryKey(+autoIncrement) / not null / neither
/// follows, then index clauses, then an optional quoted default. A
/// primary key never carries a default clause.
pub fn build_tag(column: &Column) -> String {
    let mut tag = format!("column:{};type:{}", column.name, column.detail_type);
    if column.primary_key {
        tag.push_str(";primaryKey");
        if let Some(auto) = column.auto_increment {
            let _ = write!(tag, ";autoIncrement:{auto}");
        }
    } else if !column.nullable {
        tag.push_str(";not null");
    }
    for index in &column.indexes {
        // Primary indexes are already covered by the primaryKey clause.
        if index.primary {
            continue;
        }
        let clause = if index.unique { "uniqueIndex" } else { "index" };
        let _ = write!(tag, ";{clause}:{},priority:{}", index.name, index.priority);
    }
    if !column.primary_key && !column.default_value.trim().is_empty() {
        let _ = write!(tag, ";default:'{}'", column.default_value);
    }
    tag
}

/// Remove the `;type:<detail>` fragment from a finished tag.
///
/// Runs as a final pass so the removed text matches exactly what
/// [`build_tag`] wrote, including the original detail string.
pub fn strip_type_fragment(tag: &str, detail_type: &str) -> String {
    tag.replace(&format!(";type:{detail_type}"), "")
}
