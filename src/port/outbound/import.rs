//! Bulk-load port used by the spreadsheet importers.

use crate::domain::{LandingRecord, PriceRecord};
use crate::error::Result;

/// Writes one import batch. Reference rows are get-or-created by natural key.
pub trait ImportStore: Send + Sync {
    /// Insert one seafood and one price per record. Returns rows inserted.
    fn insert_prices(&self, records: &[PriceRecord]) -> Result<usize>;

    /// Insert one landing per record in a single transaction. Returns rows
    /// inserted.
    fn insert_landings(&self, records: &[LandingRecord]) -> Result<usize>;
}
