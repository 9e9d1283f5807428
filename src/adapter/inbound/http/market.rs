//! Market-data handlers.
//!
//! Query parameters are taken as raw strings so that junk values fall back
//! to defaults instead of failing extraction.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::response::{blocking, ApiError};
use super::state::AppState;
use crate::domain::{
    list_limit, Landing, LandingFilter, MarketPrice, MarketPriceFilter, MarketSignal, Page,
    PageRequest, QuotaEntry,
};

#[derive(Debug, Default, Deserialize)]
pub struct MarketPriceParams {
    pub species: Option<String>,
    pub region: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LandingParams {
    pub year: Option<String>,
    pub region: Option<String>,
    pub name: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<String>,
}

pub async fn welcome() -> &'static str {
    "Welcome to Seafood AI!"
}

pub async fn market_prices(
    State(state): State<AppState>,
    Query(params): Query<MarketPriceParams>,
) -> Result<Json<Page<MarketPrice>>, ApiError> {
    let page = PageRequest::from_raw(params.page.as_deref(), params.page_size.as_deref());
    let filter = MarketPriceFilter {
        species: params.species,
        region: params.region,
    };
    let reader = Arc::clone(&state.market_prices);
    let result = blocking(move || reader.market_prices(&filter, page)).await?;
    Ok(Json(result))
}

pub async fn landings(
    State(state): State<AppState>,
    Query(params): Query<LandingParams>,
) -> Result<Json<Page<Landing>>, ApiError> {
    let page = PageRequest::from_raw(params.page.as_deref(), params.page_size.as_deref());
    let filter = LandingFilter {
        year: params.year,
        region: params.region,
        name: params.name,
    };
    let reader = Arc::clone(&state.landings);
    let result = blocking(move || reader.landings(&filter, page)).await?;
    Ok(Json(result))
}

pub async fn market_signals(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<MarketSignal>>, ApiError> {
    let limit = list_limit(params.limit.as_deref());
    let reader = Arc::clone(&state.feeds);
    let signals = blocking(move || reader.market_signals(limit)).await?;
    Ok(Json(signals))
}

pub async fn quotas(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<QuotaEntry>>, ApiError> {
    let limit = list_limit(params.limit.as_deref());
    let reader = Arc::clone(&state.feeds);
    let quotas = blocking(move || reader.quotas(limit)).await?;
    Ok(Json(quotas))
}
