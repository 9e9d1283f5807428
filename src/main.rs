use anyhow::Context;
use clap::Parser;
use seafood_api::adapter::inbound::cli::{self, Cli};
use seafood_api::infrastructure::config::Config;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    let config =
        Config::load_or_default(args.config.as_deref()).context("failed to load config")?;
    config.init_logging();

    if let Err(e) = cli::execute(args.command, &config).await {
        error!(error = %e, "command failed");
        return Err(e.into());
    }
    info!("seafood-api finished");
    Ok(())
}
