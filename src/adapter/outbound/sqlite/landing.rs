//! Filtered landings listing.

use diesel::prelude::*;
use diesel::sql_types::BigInt;
use tracing::debug;

use super::database::model::LandingRow;
use super::filter::{FilterBuilder, Predicate};
use super::report::{bound_query, count, SqliteReportReader};
use crate::domain::{Landing, LandingFilter, Page, PageRequest};
use crate::error::Result;
use crate::port::LandingReader;

const BASE_CLAUSES: &[&str] = &[
    "l.deleted_at IS NULL",
    "lp.deleted_at IS NULL",
    "ln.deleted_at IS NULL",
];

const LANDING_JOINS: &str = "\
FROM landings l
JOIN landing_ports lp ON lp.id = l.landing_port_id
JOIN landing_names ln ON ln.id = l.landing_name_id";

fn predicate(filter: &LandingFilter) -> Predicate {
    FilterBuilder::new(BASE_CLAUSES)
        .int_eq("l.year", filter.year.as_deref())
        .contains("lp.region_name", filter.region.as_deref())
        .contains("ln.nmfs_name", filter.name.as_deref())
        .build()
}

fn count_sql(predicate: &Predicate) -> String {
    format!(
        "SELECT COUNT(*) AS total {LANDING_JOINS} WHERE {}",
        predicate.sql()
    )
}

fn data_sql(predicate: &Predicate) -> String {
    format!(
        "SELECT l.year, lp.region_name, ln.nmfs_name,
       COALESCE(l.pounds, 0.0) AS pounds,
       COALESCE(l.dollars, 0.0) AS dollars,
       COALESCE(l.metric_tons, 0.0) AS metric_tons
{LANDING_JOINS}
WHERE {}
ORDER BY l.year DESC, lp.region_name ASC, ln.nmfs_name ASC, l.id ASC
LIMIT ? OFFSET ?",
        predicate.sql()
    )
}

impl From<LandingRow> for Landing {
    fn from(row: LandingRow) -> Self {
        Self {
            year: row.year,
            region: row.region_name,
            nmfs_name: row.nmfs_name,
            pounds: row.pounds,
            dollars: row.dollars,
            metric_tons: row.metric_tons,
        }
    }
}

impl LandingReader for SqliteReportReader {
    fn landings(&self, filter: &LandingFilter, page: PageRequest) -> Result<Page<Landing>> {
        let predicate = predicate(filter);
        let mut conn = self.conn()?;

        let total = count(&mut conn, count_sql(&predicate), &predicate)?;
        let rows: Vec<LandingRow> = bound_query(data_sql(&predicate), &predicate)
            .bind::<BigInt, _>(page.limit())
            .bind::<BigInt, _>(page.offset())
            .load(&mut conn)?;

        debug!(total, returned = rows.len(), page = page.page(), "landings listing");
        Ok(Page::new(
            rows.into_iter().map(Landing::from).collect(),
            page,
            total,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_apply_in_year_region_name_order() {
        let filter = LandingFilter {
            year: Some("2020".into()),
            region: Some("Alaska".into()),
            name: Some("salmon".into()),
        };
        let sql = predicate(&filter).sql();
        let year = sql.find("l.year = ?").unwrap();
        let region = sql.find("lp.region_name").unwrap();
        let name = sql.find("ln.nmfs_name").unwrap();
        assert!(year < region && region < name);
    }

    #[test]
    fn empty_region_is_same_as_omitted() {
        let blank = LandingFilter {
            region: Some(String::new()),
            ..LandingFilter::default()
        };
        assert_eq!(predicate(&blank), predicate(&LandingFilter::default()));
    }

    #[test]
    fn data_query_orders_deterministically() {
        let sql = data_sql(&predicate(&LandingFilter::default()));
        assert!(sql.contains("ORDER BY l.year DESC, lp.region_name ASC, ln.nmfs_name ASC, l.id ASC"));
    }
}
