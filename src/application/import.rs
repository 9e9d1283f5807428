//! Spreadsheet importers for market prices and landings.
//!
//! Prices come from CSV exports. Landings come from CSV exports or from the
//! first sheet of an `.xlsx` workbook. Parsing and row validation happen
//! here; the [`ImportStore`] only sees accepted records.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use calamine::{Data, Reader, Xlsx};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::{ImportReport, LandingRecord, PriceRecord, PriceUnit};
use crate::error::{ImportError, Result};
use crate::port::{Event, ImportEvent, ImportStore, Notifier};

/// Records accepted from one file plus the read-side counters.
#[derive(Debug, Clone)]
pub struct ParsedBatch<T> {
    pub records: Vec<T>,
    pub report: ImportReport,
}

impl<T> Default for ParsedBatch<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            report: ImportReport::default(),
        }
    }
}

/// Header-addressed row of the daily retail price export.
#[derive(Debug, Deserialize)]
struct PriceCsvRow {
    #[serde(rename = "YEAR")]
    year: i32,
    #[serde(rename = "MONTH")]
    month: u32,
    #[serde(rename = "DAY")]
    day: u32,
    #[serde(rename = "COUNTRY")]
    country: String,
    #[serde(rename = "CATEGORY", default)]
    category: String,
    #[serde(rename = "SIZE/WEIGHT RANGE", default)]
    size_range: String,
    #[serde(rename = "PRODUCT")]
    product: String,
    #[serde(rename = "PRICE PER UNIT (EUR)", default)]
    price_per_unit: Option<String>,
    #[serde(rename = "PRICE PER KG (EUR)", default)]
    price_per_kg: Option<String>,
}

/// Parse a decimal amount, tolerating thousands separators, rounded to
/// two places.
fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).ok().map(|value| value.round_dp(2))
}

fn positive_amount(raw: Option<&str>) -> Option<Decimal> {
    raw.and_then(parse_amount).filter(|value| *value > Decimal::ZERO)
}

/// Per-kg price wins over per-unit; rows with neither are unusable.
fn pick_price(row: &PriceCsvRow) -> Option<(Decimal, PriceUnit)> {
    positive_amount(row.price_per_kg.as_deref())
        .map(|price| (price, PriceUnit::Kg))
        .or_else(|| {
            positive_amount(row.price_per_unit.as_deref()).map(|price| (price, PriceUnit::Unit))
        })
}

/// Parse a daily retail price export.
///
/// # Errors
/// Returns an error when the CSV header cannot be read or the file has no
/// data rows.
pub fn parse_prices<R: Read>(reader: R) -> Result<ParsedBatch<PriceRecord>> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    csv.headers().map_err(ImportError::Csv)?;

    let mut batch = ParsedBatch::default();
    let mut seen = HashSet::new();

    for (index, row) in csv.deserialize::<PriceCsvRow>().enumerate() {
        batch.report.rows_read += 1;
        let line = index + 2;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!(line, error = %e, "skipping malformed price row");
                batch.report.skipped += 1;
                continue;
            }
        };

        let Some(date) = NaiveDate::from_ymd_opt(row.year, row.month, row.day) else {
            warn!(line, year = row.year, month = row.month, day = row.day, "skipping row with invalid date");
            batch.report.skipped += 1;
            continue;
        };
        if row.product.is_empty() || row.country.is_empty() {
            warn!(line, "skipping row without product or country");
            batch.report.skipped += 1;
            continue;
        }
        let Some((price, unit)) = pick_price(&row) else {
            warn!(line, product = %row.product, "skipping row without a price");
            batch.report.skipped += 1;
            continue;
        };

        let key = format!(
            "{}|{}|{}|{}|{}|{:.2}|{}",
            row.product,
            row.category,
            row.country,
            unit.as_str(),
            date,
            price,
            row.size_range
        );
        if !seen.insert(key) {
            batch.report.duplicates += 1;
            continue;
        }

        batch.records.push(PriceRecord {
            date,
            country: row.country,
            category: row.category,
            size_range: row.size_range,
            product: row.product,
            price: price.to_f64().unwrap_or_default(),
            unit,
        });
    }

    if batch.report.rows_read == 0 {
        return Err(ImportError::Empty.into());
    }
    Ok(batch)
}

/// Column positions in the landings export.
mod landing_column {
    pub const YEAR: usize = 0;
    pub const REGION: usize = 1;
    pub const NMFS_NAME: usize = 2;
    pub const POUNDS: usize = 3;
    pub const DOLLARS: usize = 4;
    pub const SCIENTIFIC_NAME: usize = 8;
    pub const METRIC_TONS: usize = 9;
    pub const MIN_WIDTH: usize = 10;
}

/// Validate one landings row and add it to the batch.
fn accept_landing(batch: &mut ParsedBatch<LandingRecord>, line: usize, fields: &[&str]) {
    batch.report.rows_read += 1;
    if fields.len() < landing_column::MIN_WIDTH {
        warn!(line, columns = fields.len(), "landing row is too short, skipping");
        batch.report.skipped += 1;
        return;
    }
    let field = |column: usize| fields.get(column).copied().unwrap_or_default();

    let year = field(landing_column::YEAR).parse::<i32>().ok();
    let pounds = positive_amount(Some(field(landing_column::POUNDS)));
    let dollars = positive_amount(Some(field(landing_column::DOLLARS)));
    let metric_tons = positive_amount(Some(field(landing_column::METRIC_TONS)));
    let region = field(landing_column::REGION);
    let nmfs_name = field(landing_column::NMFS_NAME);

    let (Some(year), Some(pounds), Some(dollars), Some(metric_tons)) =
        (year, pounds, dollars, metric_tons)
    else {
        batch.report.skipped += 1;
        return;
    };
    if region.is_empty() || nmfs_name.is_empty() {
        batch.report.skipped += 1;
        return;
    }

    batch.records.push(LandingRecord {
        year,
        region: region.to_string(),
        nmfs_name: nmfs_name.to_string(),
        scientific_name: field(landing_column::SCIENTIFIC_NAME).to_string(),
        pounds: pounds.to_f64().unwrap_or_default(),
        dollars: dollars.to_f64().unwrap_or_default(),
        metric_tons: metric_tons.to_f64().unwrap_or_default(),
    });
}

/// Parse a landings CSV export (first row is a header).
///
/// Records the CSV reader cannot decode are counted as skipped.
///
/// # Errors
/// Returns an error when the file has no data rows.
pub fn parse_landings<R: Read>(reader: R) -> Result<ParsedBatch<LandingRecord>> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut batch = ParsedBatch::default();
    for (index, record) in csv.records().enumerate() {
        let line = index + 2;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(line, error = %e, "skipping malformed landing row");
                batch.report.rows_read += 1;
                batch.report.skipped += 1;
                continue;
            }
        };
        let fields: Vec<&str> = record.iter().collect();
        accept_landing(&mut batch, line, &fields);
    }

    if batch.report.rows_read == 0 {
        return Err(ImportError::Empty.into());
    }
    Ok(batch)
}

/// Text of a workbook cell as it would appear in the CSV export.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.trim().to_string(),
        Data::Float(value) => value.to_string(),
        Data::Int(value) => value.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

/// Parse the first sheet of a landings workbook (first row is a header).
///
/// # Errors
/// Returns an error when the workbook or its first sheet cannot be read, or
/// the sheet has no data rows.
pub fn parse_landings_xlsx<R: Read + Seek>(reader: R) -> Result<ParsedBatch<LandingRecord>> {
    let mut workbook = Xlsx::new(reader).map_err(ImportError::Workbook)?;
    let sheet = workbook
        .worksheet_range_at(0)
        .ok_or(ImportError::NoSheet)?
        .map_err(ImportError::Workbook)?;

    let mut batch = ParsedBatch::default();
    for (index, row) in sheet.rows().skip(1).enumerate() {
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        if cells.iter().all(String::is_empty) {
            continue;
        }
        let fields: Vec<&str> = cells.iter().map(String::as_str).collect();
        accept_landing(&mut batch, index + 2, &fields);
    }

    if batch.report.rows_read == 0 {
        return Err(ImportError::Empty.into());
    }
    Ok(batch)
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
}

/// Reads export files, hands accepted rows to the store and reports the
/// outcome.
pub struct Importer {
    store: Arc<dyn ImportStore>,
    notifier: Arc<dyn Notifier>,
}

impl Importer {
    #[must_use]
    pub fn new(store: Arc<dyn ImportStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Import a daily retail price export.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or the store
    /// rejects the batch.
    pub fn import_prices(&self, path: &Path) -> Result<ImportReport> {
        let batch = parse_prices(open(path)?)?;
        let inserted = self.store.insert_prices(&batch.records)?;
        Ok(self.finish("prices", path, batch.report, inserted))
    }

    /// Import a landings export. `.xlsx` files are read as workbooks,
    /// anything else as CSV.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or the store
    /// rejects the batch.
    pub fn import_landings(&self, path: &Path) -> Result<ImportReport> {
        let batch = if is_workbook(path) {
            parse_landings_xlsx(BufReader::new(open(path)?))?
        } else {
            parse_landings(open(path)?)?
        };
        let inserted = self.store.insert_landings(&batch.records)?;
        Ok(self.finish("landings", path, batch.report, inserted))
    }

    fn finish(
        &self,
        kind: &'static str,
        path: &Path,
        mut report: ImportReport,
        inserted: usize,
    ) -> ImportReport {
        report.inserted = inserted;
        info!(
            kind,
            source = %path.display(),
            rows_read = report.rows_read,
            inserted = report.inserted,
            skipped = report.skipped,
            duplicates = report.duplicates,
            "import finished"
        );
        self.notifier.notify(Event::ImportCompleted(ImportEvent {
            kind,
            source: path.display().to_string(),
            report,
        }));
        report
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| {
        ImportError::Open {
            path: path.display().to_string(),
            source,
        }
        .into()
    })
}
