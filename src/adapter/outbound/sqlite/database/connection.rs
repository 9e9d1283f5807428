//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, migration support, and connection
//! configuration for SQLite databases.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sql_types::Text;
use diesel::{define_sql_function, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::infrastructure::config::database::DatabaseConfig;

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

// SQLite's LOWER() only folds ASCII.
define_sql_function!(fn fold_case(value: Text) -> Text);

/// Applies per-connection pragmas and registers `fold_case` whenever the
/// pool opens a connection.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas {
    busy_timeout_ms: u64,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            self.busy_timeout_ms
        ))
        .map_err(diesel::r2d2::Error::QueryError)?;
        fold_case_utils::register_impl(conn, |value: String| value.to_lowercase())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a connection pool from the `[database]` settings.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(config: &DatabaseConfig) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(&config.url);
    let min_idle = config.min_idle.min(config.max_connections);
    let pool = Pool::builder()
        .max_size(config.max_connections)
        .min_idle(Some(min_idle))
        .idle_timeout(Some(Duration::from_secs(config.idle_timeout_secs)))
        .max_lifetime(Some(Duration::from_secs(config.max_lifetime_secs)))
        .connection_customizer(Box::new(SqlitePragmas {
            busy_timeout_ms: config.busy_timeout_ms,
        }))
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))?;
    debug!(
        url = %config.url,
        max_connections = config.max_connections,
        min_idle,
        "database pool ready"
    );
    Ok(pool)
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Migration(e.to_string()))?;
    for version in &applied {
        info!(%version, "applied migration");
    }
    Ok(())
}

/// Revert the most recently applied migration.
///
/// # Errors
/// Returns an error if nothing has been applied or the down script fails.
pub fn revert_last_migration(pool: &DbPool) -> Result<String> {
    let mut conn = pool.get()?;
    let version = conn
        .revert_last_migration(MIGRATIONS)
        .map_err(|e| Error::Migration(e.to_string()))?;
    info!(%version, "reverted migration");
    Ok(version.to_string())
}
