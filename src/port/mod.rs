//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`MarketPriceReader`], [`LandingReader`], [`FeedReader`] - Read-side reports
//! - [`AccountStore`] - Users and password-reset tokens
//! - [`ImportStore`] - Spreadsheet bulk loads
//! - [`Notifier`] - Event notifications

pub mod outbound;

pub use outbound::account::AccountStore;
pub use outbound::import::ImportStore;
pub use outbound::notifier::{
    AccountEvent, Event, ImportEvent, Notifier, NotifierRegistry, NullNotifier,
    ResetRequestedEvent,
};
pub use outbound::report::{FeedReader, LandingReader, MarketPriceReader};
