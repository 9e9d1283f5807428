//! Shared handler state.

use std::sync::Arc;

use crate::application::AccountService;
use crate::port::{FeedReader, LandingReader, MarketPriceReader};

/// Everything the handlers need, constructed once at start-up.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService>,
    pub market_prices: Arc<dyn MarketPriceReader>,
    pub landings: Arc<dyn LandingReader>,
    pub feeds: Arc<dyn FeedReader>,
}
