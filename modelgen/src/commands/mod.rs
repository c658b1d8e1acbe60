mod generate;
mod tables;

use clap::{Parser, Subcommand};
use eyre::Result;
use generate::GenerateCommand;
use tables::TablesCommand;

/// Extension trait for exiting on snapshot errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for Result<T, Box<modelgen_schema::snapshot::SnapshotError>> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "modelgen")]
#[command(version)]
#[command(about = "Generate Rust model types from a relational schema")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Tables(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate model files from a schema snapshot
    Generate(GenerateCommand),

    /// List the tables a schema snapshot declares
    Tables(TablesCommand),
}
