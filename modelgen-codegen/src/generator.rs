use std::path::Path;

use indexmap::IndexMap;
use indexmap::map::Entry;
use modelgen_core::{file_stem, table_names};
use modelgen_schema::{SchemaProvider, table_columns};

use crate::{
    Error, Field, ModelRenderer, Normalizer, Renderer, Result, StructConfig, WhitespaceNormalizer,
    field::fields_from_columns, scheduler,
};

/// One generated model: output file stem, type identifier, fields in
/// column order, and every raw table that contributed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructMeta {
    pub file_stem: String,
    pub type_ident: String,
    pub fields: Vec<Field>,
    /// Contributing raw table names; length is greater than one only
    /// when several sharded tables map to this one logical type.
    pub tables: Vec<String>,
}

impl StructMeta {
    pub fn shard_count(&self) -> usize {
        self.tables.len()
    }
}

/// Schema-to-model generator.
///
/// Owns the registry of resolved models for one generation run, keyed
/// by type identifier. Two resolutions that produce the same identifier
/// merge: the fields of the first stay, the second only appends its
/// table name (sharding).
pub struct Generator<P> {
    provider: P,
    registry: IndexMap<String, StructMeta>,
}

impl<P: SchemaProvider> Generator<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            registry: IndexMap::new(),
        }
    }

    /// Resolve one table with the default configuration.
    pub fn generate_model(&mut self, table: &str) -> Result<&StructMeta> {
        self.generate_model_with(table, None, StructConfig::default())
    }

    /// Resolve one table, optionally overriding the type identifier.
    ///
    /// Identifier precedence: explicit `ident`, then the configured
    /// struct-name strategy, then the name computed from the table. The
    /// file stem is re-derived from whichever identifier wins, unless a
    /// file-name strategy is configured.
    pub fn generate_model_with(
        &mut self,
        table: &str,
        ident: Option<&str>,
        config: StructConfig,
    ) -> Result<&StructMeta> {
        if !self.provider.table_exists(table)? {
            return Err(Error::TableNotFound {
                table: table.to_string(),
            });
        }

        let names = table_names(table).map_err(|source| Error::InvalidName {
            name: table.to_string(),
            source,
        })?;
        let mut type_ident = names.type_ident;
        let mut stem = names.file_stem;
        if let Some(explicit) = ident {
            type_ident = explicit.to_string();
            stem = file_stem(&type_ident);
        } else if let Some(strategy) = config.struct_name_strategy() {
            type_ident = strategy(table);
            stem = file_stem(&type_ident);
        }
        if let Some(strategy) = config.file_name_strategy() {
            stem = strategy(table);
        }

        if type_ident.is_empty() {
            return Err(Error::InvalidIdentifier {
                ident: type_ident,
                reason: "identifier is empty".to_string(),
            });
        }
        if !type_ident.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(Error::InvalidIdentifier {
                ident: type_ident,
                reason: "identifier has no upper-camel segment".to_string(),
            });
        }
        if stem.is_empty() {
            return Err(Error::InvalidIdentifier {
                ident: type_ident,
                reason: "derived file stem is empty".to_string(),
            });
        }

        match self.registry.entry(type_ident.clone()) {
            Entry::Occupied(entry) => {
                // Merge policy: keep the first resolution's fields, only
                // record the additional shard table.
                let meta = entry.into_mut();
                meta.tables.push(table.to_string());
                Ok(meta)
            }
            Entry::Vacant(entry) => {
                let columns = table_columns(&self.provider, table)?;
                let fields = fields_from_columns(&columns, &config.field);
                Ok(entry.insert(StructMeta {
                    file_stem: stem,
                    type_ident,
                    fields,
                    tables: vec![table.to_string()],
                }))
            }
        }
    }

    /// Resolve every table the provider reports.
    pub fn generate_all_tables(&mut self) -> Result<()> {
        for table in self.provider.list_table_names()? {
            self.generate_model(&table)?;
        }
        Ok(())
    }

    /// Resolved models in registration order.
    pub fn models(&self) -> impl Iterator<Item = &StructMeta> {
        self.registry.values()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Render and write every resolved model with the built-in renderer
    /// and normalizer.
    pub fn execute(&self, out_dir: &Path) -> Result<()> {
        self.execute_with(&ModelRenderer, &WhitespaceNormalizer, out_dir)
    }

    /// Render and write every resolved model through the given
    /// collaborators, in parallel.
    pub fn execute_with(
        &self,
        renderer: &(dyn Renderer + Sync),
        normalizer: &(dyn Normalizer + Sync),
        out_dir: &Path,
    ) -> Result<()> {
        let metas: Vec<&StructMeta> = self.registry.values().collect();
        scheduler::run(&metas, renderer, normalizer, out_dir)
    }
}
