use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use modelgen_codegen::{FieldConfig, Generator, ModelRenderer, Renderer, StructConfig};
use modelgen_schema::SchemaProvider;
use modelgen_schema::snapshot::Snapshot;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to the schema snapshot (defaults to ./schema.toml)
    #[arg(short, long, default_value = "schema.toml")]
    pub schema: PathBuf,

    /// Output directory for generated model files
    #[arg(short, long, default_value = "models")]
    pub output: PathBuf,

    /// Only generate these tables (comma-separated); defaults to every
    /// table in the snapshot
    #[arg(short, long, value_delimiter = ',')]
    pub tables: Vec<String>,

    /// Wrap nullable columns in Option
    #[arg(long)]
    pub nullable: bool,

    /// Wrap columns with a meaningful default in Option
    #[arg(long)]
    pub coverable: bool,

    /// Upgrade integer types for columns declared unsigned
    #[arg(long)]
    pub signed: bool,

    /// Keep the type fragment in generated persistence tags
    #[arg(long)]
    pub type_tag: bool,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let snapshot = Snapshot::from_path(&self.schema).unwrap_or_exit();

        let tables = if self.tables.is_empty() {
            match snapshot.list_table_names() {
                Ok(tables) => tables,
                Err(e) => {
                    eprintln!("{:?}", miette::Report::new(modelgen_codegen::Error::from(e)));
                    std::process::exit(1);
                }
            }
        } else {
            self.tables.clone()
        };

        let mut generator = Generator::new(snapshot);
        for table in &tables {
            if let Err(e) = generator.generate_model_with(table, None, self.config()) {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }

        if self.dry_run {
            self.run_preview(&generator)
        } else {
            self.run_generation(&generator)
        }
    }

    fn config(&self) -> StructConfig {
        let mut field = FieldConfig::default();
        field.nullable = self.nullable;
        field.coverable = self.coverable;
        field.signed = self.signed;
        field.with_type_tag = self.type_tag;

        let mut config = StructConfig::default();
        config.field = field;
        config
    }

    fn run_generation(&self, generator: &Generator<Snapshot>) -> Result<()> {
        if let Err(e) = generator.execute(&self.output) {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(1);
        }

        let total = generator.models().count();
        println!("Generated {} model(s) into {}/", total, self.output.display());
        for meta in generator.models() {
            if meta.shard_count() > 1 {
                println!(
                    "  {} ({} shards) -> {}.gen.rs",
                    meta.type_ident,
                    meta.shard_count(),
                    meta.file_stem
                );
            } else {
                println!("  {} -> {}.gen.rs", meta.type_ident, meta.file_stem);
            }
        }

        Ok(())
    }

    fn run_preview(&self, generator: &Generator<Snapshot>) -> Result<()> {
        for meta in generator.models() {
            let rendered = match ModelRenderer.render(meta) {
                Ok(rendered) => rendered,
                Err(e) => {
                    eprintln!("failed to render '{}': {}", meta.type_ident, e);
                    std::process::exit(1);
                }
            };
            println!("── {}.gen.rs ──", meta.file_stem);
            println!("{}", rendered);
        }

        println!("── Summary ──");
        println!("{} files would be generated", generator.models().count());

        Ok(())
    }
}
