//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Seafood market data API server and maintenance tools
#[derive(Parser, Debug)]
#[command(name = "seafood-api")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (defaults to ./config.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API until Ctrl-C
    Serve,

    /// Apply or revert schema migrations
    #[command(subcommand)]
    Migrate(MigrateCommand),

    /// Load a spreadsheet export into the database
    #[command(subcommand)]
    Import(ImportCommand),
}

/// Subcommands for `seafood-api migrate`.
#[derive(Subcommand, Debug)]
pub enum MigrateCommand {
    /// Apply all pending migrations.
    Up,
    /// Revert the most recently applied migration.
    Rollback,
}

/// Subcommands for `seafood-api import`.
#[derive(Subcommand, Debug)]
pub enum ImportCommand {
    /// Import a market price CSV.
    Prices(ImportArgs),
    /// Import an annual landings CSV.
    Landings(ImportArgs),
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// CSV file to read
    pub file: PathBuf,
}
