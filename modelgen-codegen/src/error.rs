use std::path::PathBuf;

use miette::Diagnostic;
use modelgen_core::InvalidNameError;
use modelgen_schema::IntrospectionError;
use thiserror::Error;

use crate::render::{NormalizeError, RenderError};

/// Result type for code-generation operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("invalid table name '{name}'")]
    #[diagnostic(
        code(modelgen::invalid_name),
        help(
            "table names are letter runs separated by '-' or '_' with optional trailing digits, starting with a letter"
        )
    )]
    InvalidName {
        name: String,
        #[source]
        source: InvalidNameError,
    },

    #[error("invalid model identifier '{ident}'")]
    #[diagnostic(code(modelgen::invalid_identifier), help("{reason}"))]
    InvalidIdentifier { ident: String, reason: String },

    #[error("table '{table}' does not exist")]
    #[diagnostic(
        code(modelgen::table_not_found),
        help("run 'modelgen tables' to list the tables the schema provider reports")
    )]
    TableNotFound { table: String },

    #[error("schema introspection failed")]
    #[diagnostic(code(modelgen::introspection))]
    Introspection(#[from] IntrospectionError),

    #[error("failed to render model '{ident}'")]
    #[diagnostic(code(modelgen::render))]
    Render {
        ident: String,
        #[source]
        source: RenderError,
    },

    #[error("failed to write '{path}'")]
    #[diagnostic(code(modelgen::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to normalize '{path}'")]
    #[diagnostic(code(modelgen::normalize), help("{context}"))]
    Normalize {
        path: PathBuf,
        /// Numbered source lines around the reported failure.
        context: String,
        #[source]
        source: NormalizeError,
    },

    #[error("failed to create output directory '{path}'")]
    #[diagnostic(code(modelgen::output_dir))]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
