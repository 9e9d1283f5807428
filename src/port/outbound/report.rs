//! Read-side reporting/query ports.

use crate::domain::{
    Landing, LandingFilter, MarketPrice, MarketPriceFilter, MarketSignal, Page, PageRequest,
    QuotaEntry,
};
use crate::error::Result;

/// Latest-price-per-group snapshot.
pub trait MarketPriceReader: Send + Sync {
    /// One page of (species, region) groups, newest first.
    fn market_prices(
        &self,
        filter: &MarketPriceFilter,
        page: PageRequest,
    ) -> Result<Page<MarketPrice>>;
}

/// Flat landings listing.
pub trait LandingReader: Send + Sync {
    fn landings(&self, filter: &LandingFilter, page: PageRequest) -> Result<Page<Landing>>;
}

/// Short unpaginated feeds shown alongside the reports.
pub trait FeedReader: Send + Sync {
    /// Newest signals first, at most `limit`.
    fn market_signals(&self, limit: i64) -> Result<Vec<MarketSignal>>;

    /// Quotas of the most recent report date, at most `limit`.
    fn quotas(&self, limit: i64) -> Result<Vec<QuotaEntry>>;
}
