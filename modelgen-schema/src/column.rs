use serde::Deserialize;

/// Coarse classification of a column's value space, used to decide
/// whether a default value is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    String,
    /// Struct-like values: temporal and other composite column types.
    Struct,
}

/// One index membership for a column.
///
/// A multi-column index yields one `Index` per participating column,
/// each carrying the 1-based position of that column in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub name: String,
    pub unique: bool,
    pub primary: bool,
    pub priority: u32,
}

/// One database column's introspected facts. Immutable once built.
#[derive(Debug, Clone)]
pub struct Column {
    /// Raw table name this column belongs to.
    pub table: String,
    pub name: String,
    pub kind: ValueKind,
    /// Declared type keyword, e.g. `varchar`.
    pub declared_type: String,
    /// Full type expression, e.g. `varchar(255)`.
    pub detail_type: String,
    /// Raw default value text; empty when the column has none.
    pub default_value: String,
    pub comment: String,
    pub nullable: bool,
    pub primary_key: bool,
    /// `None` when the adapter does not report the flag.
    pub auto_increment: Option<bool>,
    /// Indexes this column participates in, in adapter order.
    pub indexes: Vec<Index>,
}

impl Column {
    /// Create a column with the given identity and sensible defaults:
    /// string kind, non-nullable, no default, no indexes.
    pub fn new(
        table: impl Into<String>,
        name: impl Into<String>,
        declared_type: impl Into<String>,
    ) -> Self {
        let declared_type = declared_type.into();
        Self {
            table: table.into(),
            name: name.into(),
            kind: ValueKind::String,
            detail_type: declared_type.clone(),
            declared_type,
            default_value: String::new(),
            comment: String::new(),
            nullable: false,
            primary_key: false,
            auto_increment: None,
            indexes: Vec::new(),
        }
    }

    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn detail(mut self, detail_type: impl Into<String>) -> Self {
        self.detail_type = detail_type.into();
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn auto_increment(mut self, auto: bool) -> Self {
        self.auto_increment = Some(auto);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_builder_defaults() {
        let column = Column::new("tbl_user", "email", "varchar");
        assert_eq!(column.detail_type, "varchar");
        assert_eq!(column.kind, ValueKind::String);
        assert!(!column.nullable);
        assert!(!column.primary_key);
        assert_eq!(column.auto_increment, None);
        assert!(column.indexes.is_empty());
    }

    #[test]
    fn test_column_builder_chains() {
        let column = Column::new("tbl_user", "id", "bigint")
            .kind(ValueKind::Int)
            .detail("bigint(20) unsigned")
            .primary_key()
            .auto_increment(true);
        assert_eq!(column.detail_type, "bigint(20) unsigned");
        assert!(column.primary_key);
        assert_eq!(column.auto_increment, Some(true));
    }
}
