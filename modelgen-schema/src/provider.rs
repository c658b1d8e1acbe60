use std::collections::HashMap;

use crate::{Column, Index, IntrospectionError};

/// An index as reported by the catalog: one record per index, carrying
/// the ordered list of participating columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableIndex {
    pub name: String,
    pub unique: bool,
    pub primary: bool,
    /// Participating column names in index order.
    pub columns: Vec<String>,
}

/// Capability the code-generation core consumes to read a schema.
///
/// Implementations live outside the core (a live-database adapter, the
/// TOML [`snapshot`](crate::snapshot) provider, the in-memory test
/// provider). Any failure surfaces as an [`IntrospectionError`].
pub trait SchemaProvider {
    fn table_exists(&self, table: &str) -> Result<bool, IntrospectionError>;

    /// Columns of `table` in catalog order, without index attachments.
    fn list_columns(&self, table: &str) -> Result<Vec<Column>, IntrospectionError>;

    fn list_indexes(&self, table: &str) -> Result<Vec<TableIndex>, IntrospectionError>;

    fn list_table_names(&self) -> Result<Vec<String>, IntrospectionError>;
}

/// Introspect `table` and return its columns with per-column index
/// memberships attached.
pub fn table_columns(
    provider: &dyn SchemaProvider,
    table: &str,
) -> Result<Vec<Column>, IntrospectionError> {
    let mut columns = provider.list_columns(table)?;
    let by_column = group_indexes_by_column(&provider.list_indexes(table)?);
    for column in &mut columns {
        if let Some(indexes) = by_column.get(&column.name) {
            column.indexes = indexes.clone();
        }
    }
    Ok(columns)
}

/// Explode index records into per-column memberships with 1-based
/// priorities.
fn group_indexes_by_column(indexes: &[TableIndex]) -> HashMap<String, Vec<Index>> {
    let mut by_column: HashMap<String, Vec<Index>> = HashMap::with_capacity(indexes.len());
    for index in indexes {
        for (position, column) in index.columns.iter().enumerate() {
            by_column.entry(column.clone()).or_default().push(Index {
                name: index.name.clone(),
                unique: index.unique,
                primary: index.primary,
                priority: position as u32 + 1,
            });
        }
    }
    by_column
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryProvider;

    fn composite_index() -> TableIndex {
        TableIndex {
            name: "idx_shop_user".to_string(),
            unique: false,
            primary: false,
            columns: vec!["shop_id".to_string(), "user_id".to_string()],
        }
    }

    #[test]
    fn test_group_indexes_assigns_priorities() {
        let by_column = group_indexes_by_column(&[composite_index()]);

        assert_eq!(by_column["shop_id"][0].priority, 1);
        assert_eq!(by_column["user_id"][0].priority, 2);
    }

    #[test]
    fn test_group_indexes_multiple_memberships() {
        let unique = TableIndex {
            name: "uniq_user".to_string(),
            unique: true,
            primary: false,
            columns: vec!["user_id".to_string()],
        };
        let by_column = group_indexes_by_column(&[composite_index(), unique]);

        let memberships = &by_column["user_id"];
        assert_eq!(memberships.len(), 2);
        assert_eq!(memberships[0].name, "idx_shop_user");
        assert!(memberships[1].unique);
        assert_eq!(memberships[1].priority, 1);
    }

    #[test]
    fn test_table_columns_attaches_indexes() {
        let provider = MemoryProvider::new().table(
            "tbl_order",
            vec![
                Column::new("tbl_order", "shop_id", "bigint"),
                Column::new("tbl_order", "user_id", "bigint"),
                Column::new("tbl_order", "note", "varchar"),
            ],
            vec![composite_index()],
        );

        let columns = table_columns(&provider, "tbl_order").unwrap();

        assert_eq!(columns[0].indexes.len(), 1);
        assert_eq!(columns[1].indexes[0].priority, 2);
        assert!(columns[2].indexes.is_empty());
    }
}
