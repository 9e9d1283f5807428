//! Latest price per (species, region) with week-ago and year-ago comparisons.

use diesel::prelude::*;
use diesel::sql_types::BigInt;
use tracing::debug;

use super::database::model::MarketPriceRow;
use super::filter::{FilterBuilder, Predicate};
use super::report::{bound_query, count, SqliteReportReader};
use crate::domain::{change, MarketPrice, MarketPriceFilter, Page, PageRequest, PriceUnit};
use crate::error::Result;
use crate::port::MarketPriceReader;

/// Soft-delete guards for every table joined by the snapshot.
const BASE_CLAUSES: &[&str] = &[
    "p.deleted_at IS NULL",
    "s.deleted_at IS NULL",
    "sp.deleted_at IS NULL",
    "r.deleted_at IS NULL",
];

const PRICE_JOINS: &str = "\
FROM prices p
JOIN seafood s ON s.id = p.seafood_id
JOIN species sp ON sp.id = s.species_id
JOIN regions r ON r.id = s.region_id";

/// Comparison prices only consider live rows of the same group.
const SAME_GROUP: &str = "\
FROM prices p2
JOIN seafood s2 ON s2.id = p2.seafood_id
WHERE s2.species_id = l.species_id
  AND s2.region_id = l.region_id
  AND p2.deleted_at IS NULL
  AND s2.deleted_at IS NULL";

fn predicate(filter: &MarketPriceFilter) -> Predicate {
    FilterBuilder::new(BASE_CLAUSES)
        .contains("sp.name", filter.species.as_deref())
        .contains("r.region", filter.region.as_deref())
        .build()
}

fn count_sql(predicate: &Predicate) -> String {
    format!(
        "SELECT COUNT(*) AS total FROM (\
         SELECT DISTINCT s.species_id, s.region_id {PRICE_JOINS} WHERE {})",
        predicate.sql()
    )
}

fn data_sql(predicate: &Predicate) -> String {
    format!(
        "WITH priced AS (
    SELECT p.id AS price_id, p.date, p.price, s.price_unit,
           s.species_id, s.region_id,
           sp.name AS species_name, r.region AS region_name,
           ROW_NUMBER() OVER (
               PARTITION BY s.species_id, s.region_id
               ORDER BY p.date DESC, p.id DESC
           ) AS rn
    {PRICE_JOINS}
    WHERE {where_sql}
),
latest AS (
    SELECT * FROM priced
    WHERE rn = 1
    ORDER BY date DESC, species_id ASC, region_id ASC
    LIMIT ? OFFSET ?
)
SELECT l.species_name, l.region_name, l.price, l.price_unit,
    (SELECT p2.price {SAME_GROUP}
       AND p2.date < date(l.date, '-6 days')
     ORDER BY p2.date DESC, p2.id DESC
     LIMIT 1) AS week_ago_price,
    (SELECT p2.price {SAME_GROUP}
       AND p2.date >= printf('%04d-01-01', CAST(strftime('%Y', l.date) AS INTEGER) - 1)
       AND p2.date < printf('%04d-01-01', CAST(strftime('%Y', l.date) AS INTEGER))
     ORDER BY p2.date DESC, p2.id DESC
     LIMIT 1) AS year_ago_price
FROM latest l
ORDER BY l.date DESC, l.species_id ASC, l.region_id ASC",
        where_sql = predicate.sql()
    )
}

impl From<MarketPriceRow> for MarketPrice {
    fn from(row: MarketPriceRow) -> Self {
        Self {
            weekly_trend: change(row.price, row.week_ago_price),
            yoy: change(row.price, row.year_ago_price),
            species_sku: row.species_name,
            origin: row.region_name,
            price: row.price,
            price_unit: PriceUnit::from_db(&row.price_unit),
        }
    }
}

impl MarketPriceReader for SqliteReportReader {
    fn market_prices(
        &self,
        filter: &MarketPriceFilter,
        page: PageRequest,
    ) -> Result<Page<MarketPrice>> {
        let predicate = predicate(filter);
        let mut conn = self.conn()?;

        let total = count(&mut conn, count_sql(&predicate), &predicate)?;
        let rows: Vec<MarketPriceRow> = bound_query(data_sql(&predicate), &predicate)
            .bind::<BigInt, _>(page.limit())
            .bind::<BigInt, _>(page.offset())
            .load(&mut conn)?;

        debug!(
            groups = total,
            returned = rows.len(),
            page = page.page(),
            "market price snapshot"
        );
        Ok(Page::new(
            rows.into_iter().map(MarketPrice::from).collect(),
            page,
            total,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_and_data_share_the_predicate() {
        let filter = MarketPriceFilter {
            species: Some("hake".into()),
            region: None,
        };
        let predicate = predicate(&filter);
        let where_sql = predicate.sql();
        assert!(count_sql(&predicate).contains(&where_sql));
        assert!(data_sql(&predicate).contains(&where_sql));
        assert_eq!(predicate.args().len(), 1);
    }

    #[test]
    fn data_query_has_one_placeholder_per_arg_plus_paging() {
        let filter = MarketPriceFilter {
            species: Some("cod".into()),
            region: Some("norway".into()),
        };
        let predicate = predicate(&filter);
        let placeholders = data_sql(&predicate).matches('?').count();
        assert_eq!(placeholders, predicate.args().len() + 2);
    }

    #[test]
    fn row_conversion_derives_trends() {
        let row = MarketPriceRow {
            species_name: "Hake".into(),
            region_name: "Spain".into(),
            price: 15.0,
            price_unit: "kg".into(),
            week_ago_price: None,
            year_ago_price: Some(12.0),
        };
        let price = MarketPrice::from(row);
        assert_eq!(price.weekly_trend, None);
        assert!((price.yoy.unwrap() - 25.0).abs() < 1e-9);
        assert_eq!(price.price_unit, PriceUnit::Kg);
    }
}
