use modelgen_schema::Column;

use crate::{FieldConfig, tag, type_mapper};

/// The generated representation of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field identifier; the column name is kept verbatim.
    pub name: String,
    /// Resolved Rust type.
    pub rust_type: String,
    pub comment: String,
    pub multiline_comment: bool,
    /// Serialized persistence tag, e.g. `column:id;primaryKey`.
    pub model_tag: String,
    /// Serde rename produced by the configured strategy, if any.
    pub serde_tag: Option<String>,
    /// Fully formed extra attribute body produced by the configured
    /// strategy, if any.
    pub extra_tag: Option<String>,
}

/// Derive a field from a column under the active configuration.
/// Deterministic; the field has no identity of its own.
pub fn field_from_column(column: &Column, config: &FieldConfig) -> Field {
    let rust_type = type_mapper::resolve_type(column, config);
    let mut model_tag = tag::build_tag(column);
    if !config.with_type_tag {
        model_tag = tag::strip_type_fragment(&model_tag, &column.detail_type);
    }
    Field {
        name: column.name.clone(),
        rust_type,
        comment: column.comment.clone(),
        multiline_comment: column.comment.contains('\n'),
        model_tag,
        serde_tag: config.serde_tag_strategy().map(|strategy| strategy(&column.name)),
        extra_tag: config.extra_tag_strategy().map(|strategy| strategy(&column.name)),
    }
}

pub(crate) fn fields_from_columns(columns: &[Column], config: &FieldConfig) -> Vec<Field> {
    columns
        .iter()
        .map(|column| field_from_column(column, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use modelgen_schema::Column;

    use super::*;

    #[test]
    fn test_field_keeps_column_name() {
        let column = Column::new("tbl_user", "user_id", "bigint").detail("bigint(20)");
        let field = field_from_column(&column, &FieldConfig::default());

        assert_eq!(field.name, "user_id");
        assert_eq!(field.rust_type, "i64");
    }

    #[test]
    fn test_type_tag_stripped_by_default() {
        let column = Column::new("tbl_user", "email", "varchar").detail("varchar(255)");

        let field = field_from_column(&column, &FieldConfig::default());
        assert_eq!(field.model_tag, "column:email;not null");

        let with_type = FieldConfig {
            with_type_tag: true,
            ..FieldConfig::default()
        };
        let field = field_from_column(&column, &with_type);
        assert_eq!(field.model_tag, "column:email;type:varchar(255);not null");
    }

    #[test]
    fn test_multiline_comment_flag() {
        let column = Column::new("t", "a", "int").comment("first\nsecond");
        let field = field_from_column(&column, &FieldConfig::default());
        assert!(field.multiline_comment);

        let column = Column::new("t", "a", "int").comment("single");
        let field = field_from_column(&column, &FieldConfig::default());
        assert!(!field.multiline_comment);
    }

    #[test]
    fn test_secondary_tag_strategies() {
        let config = FieldConfig::default()
            .with_serde_tag_strategy(|name| name.replace('_', ""))
            .with_extra_tag_strategy(|name| format!("column({name})"));

        let column = Column::new("t", "user_id", "bigint");
        let field = field_from_column(&column, &config);

        assert_eq!(field.serde_tag.as_deref(), Some("userid"));
        assert_eq!(field.extra_tag.as_deref(), Some("column(user_id)"));
    }

    #[test]
    fn test_no_strategies_no_secondary_tags() {
        let column = Column::new("t", "user_id", "bigint");
        let field = field_from_column(&column, &FieldConfig::default());

        assert_eq!(field.serde_tag, None);
        assert_eq!(field.extra_tag, None);
    }
}
