//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies such as the
//! relational store and notification delivery.

pub mod account;
pub mod import;
pub mod notifier;
pub mod report;
