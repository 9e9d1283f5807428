//! Database connection pool configuration.

use serde::Deserialize;

/// SQLite location and pool limits.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path. `DATABASE_URL` overrides it.
    #[serde(default = "default_url")]
    pub url: String,
    /// Upper bound on open connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connections kept warm while idle.
    #[serde(default = "default_min_idle")]
    pub min_idle: u32,
    /// Idle connections above `min_idle` are closed after this long.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    /// Connections are recycled after this long.
    #[serde(default = "default_max_lifetime_secs")]
    pub max_lifetime_secs: u64,
    /// SQLite `busy_timeout` applied to every connection.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// Apply pending migrations when the server starts.
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_url() -> String {
    "seafood.db".to_string()
}

fn default_max_connections() -> u32 {
    25
}

fn default_min_idle() -> u32 {
    5
}

fn default_idle_timeout_secs() -> u64 {
    300 // 5 minutes
}

fn default_max_lifetime_secs() -> u64 {
    300 // 5 minutes
}

fn default_busy_timeout_ms() -> u64 {
    5000
}

fn default_run_migrations() -> bool {
    true
}

impl DatabaseConfig {
    /// Config pointing at `url` with every other field defaulted.
    #[must_use]
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
            min_idle: default_min_idle(),
            idle_timeout_secs: default_idle_timeout_secs(),
            max_lifetime_secs: default_max_lifetime_secs(),
            busy_timeout_ms: default_busy_timeout_ms(),
            run_migrations: default_run_migrations(),
        }
    }
}
