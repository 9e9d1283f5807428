//! Handler for the `serve` command.

use tracing::info;

use crate::adapter::inbound::http;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;

/// Open the database, wire the services and serve HTTP until Ctrl-C.
pub async fn execute(config: &Config) -> Result<()> {
    let pool = bootstrap::open_database(config)?;
    let state = bootstrap::build_app_state(config, pool)?;
    info!(version = env!("CARGO_PKG_VERSION"), "seafood-api starting");
    http::serve(&config.server, state).await
}
