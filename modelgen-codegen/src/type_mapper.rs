//! Column-to-field type resolution.
//!
//! Resolution is a total function: unknown declared types fall back to
//! [`DEFAULT_TYPE`]. The stages run in a fixed order and each may
//! override the previous one: base keyword lookup, unsigned promotion,
//! structural overrides (soft-delete marker, Option boxing), then the
//! user's per-declared-type override.

use modelgen_schema::{Column, ValueKind};

use crate::FieldConfig;

/// Fallback for unknown declared types.
pub const DEFAULT_TYPE: &str = "String";

/// Rust type emitted for temporal columns.
pub const TIMESTAMP_TYPE: &str = "NaiveDateTime";

/// Type emitted for the soft-delete marker column.
pub const SOFT_DELETE_TYPE: &str = "DeletedAt";

/// Conventionally named timestamp column indicating logical deletion.
pub const SOFT_DELETE_COLUMN: &str = "deleted_at";

/// Resolve a column to its Rust field type under `config`.
pub fn resolve_type(column: &Column, config: &FieldConfig) -> String {
    let mut resolved = base_type(&column.declared_type, &column.detail_type).to_string();

    if config.signed && column.detail_type.contains("unsigned") {
        resolved = match resolved.as_str() {
            "i32" => "u32".to_string(),
            "i64" => "u64".to_string(),
            _ => resolved,
        };
    }

    if column.name == SOFT_DELETE_COLUMN && resolved == TIMESTAMP_TYPE {
        resolved = SOFT_DELETE_TYPE.to_string();
    } else if config.coverable && significant_default(column.kind, &column.default_value) {
        resolved = format!("Option<{resolved}>");
    } else if config.nullable && column.nullable {
        resolved = format!("Option<{resolved}>");
    }

    if let Some(mapping) = config.type_override(&column.declared_type) {
        // The override receives the detail string and wins outright.
        if !column.detail_type.is_empty() {
            resolved = mapping(&column.detail_type);
        }
    }

    resolved
}

fn base_type(declared_type: &str, detail_type: &str) -> &'static str {
    match declared_type.to_ascii_lowercase().as_str() {
        "numeric" | "integer" | "int" | "smallint" | "mediumint" | "year" => "i32",
        "bigint" => "i64",
        "float" => "f32",
        "real" | "double" | "decimal" => "f64",
        "char" | "varchar" | "text" | "tinytext" | "mediumtext" | "longtext" | "json"
        | "enum" => "String",
        "binary" | "varbinary" | "tinyblob" | "blob" | "mediumblob" | "longblob" | "bit" => {
            "Vec<u8>"
        }
        "time" | "date" | "datetime" | "timestamp" => TIMESTAMP_TYPE,
        "boolean" => "bool",
        "tinyint" => {
            if detail_type.trim_start().starts_with("tinyint(1)") {
                "bool"
            } else {
                "i32"
            }
        }
        _ => DEFAULT_TYPE,
    }
}

/// Whether a raw default value is meaningful enough to warrant boxing
/// or a default tag.
///
/// Temporal/structural defaults tolerate common zero-date sentinels
/// like `'0000-00-00 00:00:00'`.
pub fn significant_default(kind: ValueKind, default_value: &str) -> bool {
    if default_value.is_empty() {
        return false;
    }
    match kind {
        ValueKind::Bool => default_value != "false",
        ValueKind::Int | ValueKind::Float => default_value != "0",
        ValueKind::String => !default_value.is_empty(),
        ValueKind::Struct => !default_value.trim_matches(['\'', '0', ':', '-', ' ']).is_empty(),
    }
}
