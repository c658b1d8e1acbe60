//! Core utilities for the modelgen code generator.
//!
//! This crate provides the table-name transformation rules and the
//! file-writing helpers shared by the rest of the workspace.

mod file;
mod naming;

pub use file::write_file;
pub use naming::{InvalidNameError, TableNames, file_stem, table_names};
