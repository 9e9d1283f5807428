//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod account;
pub mod import;

pub use account::{AccountError, AccountService, Session};
pub use import::Importer;
