//! Offline schema snapshots.
//!
//! A snapshot is a TOML description of a schema (`[[table]]` entries
//! with columns and indexes) that stands in for a live database
//! connection. The CLI consumes schemas through snapshots; live
//! adapters implement [`SchemaProvider`] elsewhere.
//!
//! ```toml
//! [[table]]
//! name = "tbl_user"
//!
//! [[table.column]]
//! name = "user_id"
//! type = "bigint"
//! detail = "bigint(20)"
//! kind = "int"
//! primary_key = true
//! auto_increment = true
//!
//! [[table.index]]
//! name = "uniq_email"
//! unique = true
//! columns = ["email"]
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Deserialize;
use thiserror::Error;

use crate::{Column, IntrospectionError, SchemaProvider, TableIndex, ValueKind};

#[derive(Debug, Error, Diagnostic)]
pub enum SnapshotError {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass the snapshot path with --schema"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema snapshot")]
    #[diagnostic(code(modelgen::snapshot_parse))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

/// A parsed schema snapshot, usable as a [`SchemaProvider`].
#[derive(Debug)]
pub struct Snapshot {
    tables: IndexMap<String, TableDef>,
}

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default, rename = "table")]
    tables: Vec<TableDef>,
}

#[derive(Debug, Deserialize)]
struct TableDef {
    name: String,
    #[serde(default, rename = "column")]
    columns: Vec<ColumnDef>,
    #[serde(default, rename = "index")]
    indexes: Vec<IndexDef>,
}

#[derive(Debug, Deserialize)]
struct ColumnDef {
    name: String,
    #[serde(rename = "type")]
    declared_type: String,
    /// Full type expression; defaults to the declared type keyword.
    detail: Option<String>,
    #[serde(default = "default_kind")]
    kind: ValueKind,
    #[serde(default)]
    default: String,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    nullable: bool,
    #[serde(default)]
    primary_key: bool,
    auto_increment: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct IndexDef {
    name: String,
    #[serde(default)]
    unique: bool,
    #[serde(default)]
    primary: bool,
    #[serde(default)]
    columns: Vec<String>,
}

fn default_kind() -> ValueKind {
    ValueKind::String
}

impl Snapshot {
    /// Load a snapshot from the given path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<SnapshotError>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            Box::new(SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        let filename = path.display().to_string();
        Self::from_str_named(&content, &filename)
    }

    /// Parse a snapshot from a string (uses "schema.toml" as the
    /// filename in diagnostics).
    pub fn from_str(content: &str) -> Result<Self, Box<SnapshotError>> {
        Self::from_str_named(content, "schema.toml")
    }

    /// Parse a snapshot with a custom filename for error reporting.
    pub fn from_str_named(content: &str, filename: &str) -> Result<Self, Box<SnapshotError>> {
        let file: SnapshotFile = toml::from_str(content).map_err(|source| {
            let span = source.span().map(SourceSpan::from);
            Box::new(SnapshotError::Parse {
                src: NamedSource::new(filename, content.to_string()),
                span,
                source,
            })
        })?;
        let tables = file
            .tables
            .into_iter()
            .map(|table| (table.name.clone(), table))
            .collect();
        Ok(Self { tables })
    }

    fn table(&self, name: &str) -> Result<&TableDef, IntrospectionError> {
        self.tables
            .get(name)
            .ok_or_else(|| IntrospectionError::new(format!("snapshot has no table '{name}'")))
    }
}

impl SchemaProvider for Snapshot {
    fn table_exists(&self, table: &str) -> Result<bool, IntrospectionError> {
        Ok(self.tables.contains_key(table))
    }

    fn list_columns(&self, table: &str) -> Result<Vec<Column>, IntrospectionError> {
        let def = self.table(table)?;
        Ok(def
            .columns
            .iter()
            .map(|column| {
                let mut built = Column::new(&def.name, &column.name, &column.declared_type)
                    .kind(column.kind)
                    .default_value(&column.default)
                    .comment(&column.comment)
                    .nullable(column.nullable);
                if let Some(detail) = &column.detail {
                    built = built.detail(detail);
                }
                if column.primary_key {
                    built = built.primary_key();
                }
                if let Some(auto) = column.auto_increment {
                    built = built.auto_increment(auto);
                }
                built
            })
            .collect())
    }

    fn list_indexes(&self, table: &str) -> Result<Vec<TableIndex>, IntrospectionError> {
        let def = self.table(table)?;
        Ok(def
            .indexes
            .iter()
            .map(|index| TableIndex {
                name: index.name.clone(),
                unique: index.unique,
                primary: index.primary,
                columns: index.columns.clone(),
            })
            .collect())
    }

    fn list_table_names(&self) -> Result<Vec<String>, IntrospectionError> {
        Ok(self.tables.keys().cloned().collect())
    }
}
