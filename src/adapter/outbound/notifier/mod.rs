//! Notification adapters.
//!
//! Implements the `port::Notifier` trait for the available notification
//! backends.

mod email;
mod log;

pub use email::{reset_message, EmailError, EmailNotifier};
pub use log::LogNotifier;
