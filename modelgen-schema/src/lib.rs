//! Schema introspection for the modelgen code generator.
//!
//! The core pipeline consumes schemas through the [`SchemaProvider`]
//! trait; a live-database adapter lives outside this workspace. This
//! crate ships the introspected data model ([`Column`], [`Index`],
//! [`ValueKind`]), an offline TOML [`snapshot`] provider for the CLI,
//! and an in-memory provider for tests.

mod column;
mod error;
mod provider;
pub mod snapshot;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use column::{Column, Index, ValueKind};
pub use error::IntrospectionError;
pub use provider::{SchemaProvider, TableIndex, table_columns};
