//! Test utilities for schema consumers.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use indexmap::IndexMap;

use crate::{Column, IntrospectionError, SchemaProvider, TableIndex};

/// An in-memory [`SchemaProvider`] for tests.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    tables: IndexMap<String, Fixture>,
    fail_with: Option<String>,
}

#[derive(Debug)]
struct Fixture {
    columns: Vec<Column>,
    indexes: Vec<TableIndex>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table fixture.
    pub fn table(
        mut self,
        name: impl Into<String>,
        columns: Vec<Column>,
        indexes: Vec<TableIndex>,
    ) -> Self {
        self.tables.insert(name.into(), Fixture { columns, indexes });
        self
    }

    /// Make every provider call fail, simulating a lost connection.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.fail_with = Some(message.into());
        self
    }

    fn check_connected(&self) -> Result<(), IntrospectionError> {
        match &self.fail_with {
            Some(message) => Err(IntrospectionError::new(message.clone())),
            None => Ok(()),
        }
    }

    fn fixture(&self, table: &str) -> Result<&Fixture, IntrospectionError> {
        self.tables
            .get(table)
            .ok_or_else(|| IntrospectionError::new(format!("no fixture for table '{table}'")))
    }
}

impl SchemaProvider for MemoryProvider {
    fn table_exists(&self, table: &str) -> Result<bool, IntrospectionError> {
        self.check_connected()?;
        Ok(self.tables.contains_key(table))
    }

    fn list_columns(&self, table: &str) -> Result<Vec<Column>, IntrospectionError> {
        self.check_connected()?;
        Ok(self.fixture(table)?.columns.clone())
    }

    fn list_indexes(&self, table: &str) -> Result<Vec<TableIndex>, IntrospectionError> {
        self.check_connected()?;
        Ok(self.fixture(table)?.indexes.clone())
    }

    fn list_table_names(&self) -> Result<Vec<String>, IntrospectionError> {
        self.check_connected()?;
        Ok(self.tables.keys().cloned().collect())
    }
}
