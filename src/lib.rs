//! Seafood market data API.
//!
//! Serves latest market prices with weekly and year-over-year change,
//! annual landings, market signals and remaining quotas behind bearer-token
//! authentication, and loads spreadsheet exports into SQLite.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Report rows, filters, pagination and account types
//! - [`port`] - Store, reader and notifier traits
//! - [`application`] - Account and import use cases
//! - [`adapter`] - HTTP and CLI on the inbound side, SQLite and notifiers outbound
//! - [`infrastructure`] - Configuration, security primitives and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use seafood_api::domain::{MarketPriceFilter, PageRequest};
//! use seafood_api::infrastructure::bootstrap;
//! use seafood_api::infrastructure::config::Config;
//! use seafood_api::port::MarketPriceReader;
//! use seafood_api::adapter::outbound::sqlite::SqliteReportReader;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_or_default(None)?;
//!     let pool = bootstrap::open_database(&config)?;
//!     let reader = SqliteReportReader::new(pool);
//!     let page = reader.market_prices(&MarketPriceFilter::default(), PageRequest::new(1, 20))?;
//!     println!("{} groups", page.total_count);
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
