//! Infrastructure configuration modules.

pub mod auth;
pub mod database;
pub mod logging;
pub mod server;
pub mod settings;
pub mod smtp;

pub use settings::Config;
