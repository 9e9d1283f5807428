use tempfile::TempDir;

use seafood_api::adapter::outbound::sqlite::{create_pool, run_migrations, DbPool};
use seafood_api::infrastructure::config::database::DatabaseConfig;

/// Migrated SQLite database in a scratch directory, removed on drop.
pub struct TempDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TempDb {
    pub fn create() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("seafood.db");
        let config = DatabaseConfig {
            max_connections: 4,
            min_idle: 1,
            ..DatabaseConfig::with_url(path.to_string_lossy())
        };
        let pool = create_pool(&config).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}
