//! Schema-to-model code generation pipeline.
//!
//! The pipeline turns introspected tables into rendered Rust model
//! files:
//!
//! 1. naming: raw table name to type identifier and file stem
//!    (`modelgen-core`),
//! 2. [`type_mapper`]: column type to Rust field type,
//! 3. [`tag`]: persistence-metadata tag strings per column,
//! 4. [`Generator`]: shard-aware aggregation of tables into
//!    [`StructMeta`] entries,
//! 5. [`scheduler`]: bounded-parallel render and write of one file per
//!    model.

mod config;
mod error;
mod field;
mod generator;
pub mod render;
pub mod scheduler;
pub mod tag;
pub mod type_mapper;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{FieldConfig, NamingStrategy, StructConfig, TypeOverride};
pub use error::{Error, Result};
pub use field::{Field, field_from_column};
pub use generator::{Generator, StructMeta};
pub use render::{ModelRenderer, Normalizer, Renderer, WhitespaceNormalizer};
