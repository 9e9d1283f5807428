//! Storage-agnostic domain types and pure calculations.

pub mod account;
pub mod change;
pub mod import;
pub mod market;
pub mod pagination;

pub use account::{NewUser, PasswordResetToken, User};
pub use change::change;
pub use import::{ImportReport, LandingRecord, PriceRecord};
pub use market::{
    Landing, LandingFilter, MarketPrice, MarketPriceFilter, MarketSignal, PriceUnit, QuotaEntry,
};
pub use pagination::{list_limit, Page, PageRequest};
