use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use modelgen_schema::SchemaProvider;
use modelgen_schema::snapshot::Snapshot;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct TablesCommand {
    /// Path to the schema snapshot (defaults to ./schema.toml)
    #[arg(short, long, default_value = "schema.toml")]
    pub schema: PathBuf,
}

impl TablesCommand {
    /// Run the tables command
    pub fn run(&self) -> Result<()> {
        let snapshot = Snapshot::from_path(&self.schema).unwrap_or_exit();

        let tables = match snapshot.list_table_names() {
            Ok(tables) => tables,
            Err(e) => {
                eprintln!("Failed to list tables: {}", e);
                std::process::exit(1);
            }
        };

        if tables.is_empty() {
            println!("No tables declared in {}", self.schema.display());
            return Ok(());
        }

        println!("Tables ({}):", tables.len());
        for table in tables {
            println!("  {}", table);
        }

        Ok(())
    }
}
