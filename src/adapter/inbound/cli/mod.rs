//! CLI module graph and dispatch.

pub mod command;
pub mod import;
pub mod migrate;
pub mod serve;

use crate::error::Result;
use crate::infrastructure::config::Config;

pub use command::{Cli, Commands, ImportCommand, MigrateCommand};

/// Run the parsed command against a loaded configuration.
pub async fn execute(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Serve => serve::execute(config).await,
        Commands::Migrate(MigrateCommand::Up) => migrate::execute_up(config),
        Commands::Migrate(MigrateCommand::Rollback) => migrate::execute_rollback(config),
        Commands::Import(ImportCommand::Prices(args)) => import::execute_prices(config, &args.file),
        Commands::Import(ImportCommand::Landings(args)) => {
            import::execute_landings(config, &args.file)
        }
    }
}
