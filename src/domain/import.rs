//! Rows accepted from spreadsheet exports and the per-batch outcome.

use chrono::NaiveDate;
use serde::Serialize;

use super::market::PriceUnit;

/// One accepted row of a market-price export.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub country: String,
    pub category: String,
    pub size_range: String,
    pub product: String,
    /// Rounded to two decimals.
    pub price: f64,
    pub unit: PriceUnit,
}

/// One accepted row of a landings export.
#[derive(Debug, Clone, PartialEq)]
pub struct LandingRecord {
    pub year: i32,
    pub region: String,
    pub nmfs_name: String,
    pub scientific_name: String,
    pub pounds: f64,
    pub dollars: f64,
    pub metric_tons: f64,
}

/// Outcome of one import batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Data rows read, excluding the header.
    pub rows_read: usize,
    pub inserted: usize,
    /// Rows rejected as malformed or incomplete.
    pub skipped: usize,
    /// Rows dropped as repeats of an earlier row in the same file.
    pub duplicates: usize,
}
