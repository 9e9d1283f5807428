//! Handlers for the `migrate` command group.

use crate::adapter::outbound::sqlite::{create_pool, revert_last_migration, run_migrations};
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Execute `migrate up`.
pub fn execute_up(config: &Config) -> Result<()> {
    let pool = create_pool(&config.database)?;
    run_migrations(&pool)?;
    println!("Migrations up to date ({})", config.database.url);
    Ok(())
}

/// Execute `migrate rollback`.
pub fn execute_rollback(config: &Config) -> Result<()> {
    let pool = create_pool(&config.database)?;
    let reverted = revert_last_migration(&pool)?;
    println!("Reverted migration {reverted}");
    Ok(())
}
