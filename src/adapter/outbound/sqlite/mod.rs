//! SQLite persistence adapters.
//!
//! Provides SQLite-backed implementations for the market-data reports,
//! account storage and spreadsheet imports using Diesel ORM.

pub mod account;
pub mod database;
pub mod feed;
pub mod filter;
pub mod import;
pub mod landing;
pub mod market_price;
pub mod report;

pub use account::SqliteAccountStore;
pub use database::connection::{create_pool, revert_last_migration, run_migrations, DbPool};
pub use import::SqliteImportStore;
pub use report::SqliteReportReader;
