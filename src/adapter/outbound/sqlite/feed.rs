//! Market signals and latest quotas.

use diesel::dsl::max;
use diesel::prelude::*;

use super::database::model::{MarketSignalRow, QuotaRow};
use super::database::schema::{market_signals, quotas};
use super::report::{parse_date, SqliteReportReader};
use crate::domain::{MarketSignal, QuotaEntry};
use crate::error::Result;
use crate::port::FeedReader;

impl FeedReader for SqliteReportReader {
    fn market_signals(&self, limit: i64) -> Result<Vec<MarketSignal>> {
        let mut conn = self.conn()?;
        let rows: Vec<MarketSignalRow> = market_signals::table
            .filter(market_signals::deleted_at.is_null())
            .order((
                market_signals::published_date.desc(),
                market_signals::title.asc(),
            ))
            .limit(limit)
            .select(MarketSignalRow::as_select())
            .load(&mut conn)?;

        rows.into_iter()
            .map(|row| {
                Ok(MarketSignal {
                    published_date: parse_date(&row.published_date)?,
                    title: row.title,
                })
            })
            .collect()
    }

    fn quotas(&self, limit: i64) -> Result<Vec<QuotaEntry>> {
        let mut conn = self.conn()?;
        let latest: Option<String> = quotas::table
            .filter(quotas::deleted_at.is_null())
            .select(max(quotas::date))
            .first(&mut conn)?;
        let Some(latest) = latest else {
            return Ok(Vec::new());
        };

        let rows: Vec<QuotaRow> = quotas::table
            .filter(quotas::deleted_at.is_null())
            .filter(quotas::date.eq(&latest))
            .order(quotas::product_name.asc())
            .limit(limit)
            .select(QuotaRow::as_select())
            .load(&mut conn)?;

        rows.into_iter()
            .map(|row| {
                Ok(QuotaEntry {
                    date: parse_date(&row.date)?,
                    product_name: row.product_name,
                    remaining_quota: row.remaining_quota,
                })
            })
            .collect()
    }
}
