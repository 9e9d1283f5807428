//! SQLite read-side report adapter.
//!
//! Provides implementations of the market-price, landings and feed reader
//! traits. The paginated reports are raw SQL built around a shared
//! [`Predicate`](super::filter::Predicate) so the count query and the data
//! query always filter identically.

use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sqlite::Sqlite;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::CountRow;
use crate::adapter::outbound::sqlite::filter::Predicate;
use crate::error::{Error, Result};

/// SQLite report reader for the market-data endpoints.
///
/// Implements [`MarketPriceReader`](crate::port::MarketPriceReader),
/// [`LandingReader`](crate::port::LandingReader) and
/// [`FeedReader`](crate::port::FeedReader).
#[derive(Clone)]
pub struct SqliteReportReader {
    pool: DbPool,
}

impl SqliteReportReader {
    /// Create a report reader backed by the given pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(super) fn conn(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>>
    {
        Ok(self.pool.get()?)
    }
}

/// Start a boxed raw query with the predicate's arguments already bound.
pub(super) fn bound_query<'f>(sql: String, predicate: &Predicate) -> BoxedSqlQuery<'f, Sqlite, SqlQuery> {
    predicate.bind(diesel::sql_query(sql).into_boxed::<Sqlite>())
}

/// Run a `SELECT COUNT(*) AS total ...` query.
pub(super) fn count(
    conn: &mut SqliteConnection,
    sql: String,
    predicate: &Predicate,
) -> Result<i64> {
    let rows: Vec<CountRow> = bound_query(sql, predicate).load(conn)?;
    Ok(rows.first().map_or(0, |row| row.total))
}

/// Parse a stored `YYYY-MM-DD` date.
pub(super) fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| Error::Parse(format!("invalid stored date {value:?}: {e}")))
}
