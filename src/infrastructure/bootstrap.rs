//! Runtime wiring: pool, stores, services and notifier registry.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::inbound::http::AppState;
use crate::adapter::outbound::notifier::{EmailNotifier, LogNotifier};
use crate::adapter::outbound::sqlite::{
    create_pool, run_migrations, DbPool, SqliteAccountStore, SqliteImportStore,
    SqliteReportReader,
};
use crate::application::{AccountService, Importer};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::smtp::SmtpConfig;
use crate::port::{Notifier, NotifierRegistry};

fn log_registry() -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier));
    registry
}

/// Build the notifier registry. Every event is at least logged; reset
/// links are also mailed when an SMTP relay is configured.
///
/// Must be called from inside a Tokio runtime when SMTP is enabled.
pub fn build_notifier_registry(smtp: &SmtpConfig) -> NotifierRegistry {
    let mut registry = log_registry();
    if smtp.is_enabled() {
        match EmailNotifier::new(smtp) {
            Ok(notifier) => {
                registry.register(Box::new(notifier));
                info!(host = ?smtp.host, port = smtp.port, "email notifier enabled");
            }
            Err(e) => {
                warn!(error = %e, "SMTP configured but unusable, reset links are only logged");
            }
        }
    }
    registry
}

/// Open the pool and, when configured, apply pending migrations.
///
/// # Errors
///
/// Returns an error if the pool cannot be built or a migration fails.
pub fn open_database(config: &Config) -> Result<DbPool> {
    let pool = create_pool(&config.database)?;
    if config.database.run_migrations {
        run_migrations(&pool)?;
    }
    info!(url = %config.database.url, "database ready");
    Ok(pool)
}

/// Assemble the HTTP handler state over an open pool.
///
/// # Errors
///
/// Returns an error if the token secret is not configured.
pub fn build_app_state(config: &Config, pool: DbPool) -> Result<AppState> {
    let notifier: Arc<dyn Notifier> = Arc::new(build_notifier_registry(&config.smtp));
    let accounts = AccountService::new(
        Arc::new(SqliteAccountStore::new(pool.clone())),
        notifier,
        &config.auth,
        config.token_secret()?,
    );
    let reports = Arc::new(SqliteReportReader::new(pool));

    Ok(AppState {
        accounts: Arc::new(accounts),
        market_prices: reports.clone(),
        landings: reports.clone(),
        feeds: reports,
    })
}

/// Build the spreadsheet importer over an open pool.
#[must_use]
pub fn build_importer(pool: DbPool) -> Importer {
    Importer::new(
        Arc::new(SqliteImportStore::new(pool)),
        Arc::new(log_registry()),
    )
}
