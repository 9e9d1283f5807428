//! SQLite bulk loader for spreadsheet imports.
//!
//! Reference rows (species, categories, regions, landing names and ports)
//! are get-or-created by natural key. Each batch keeps a memo of keys it has
//! already resolved so a large file does not re-query the same names.
//!
//! A natural key that resolves to a soft-deleted row fails the whole batch:
//! rows attached to it would never show up in a report.

use std::collections::HashMap;
use std::hash::Hash;

use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel::sql_types::BigInt;
use tracing::debug;

use super::database::connection::DbPool;
use super::database::model::{
    NewCategoryRow, NewLandingNameRow, NewLandingPortRow, NewLandingRow, NewPriceRow,
    NewRegionRow, NewSeafoodRow, NewSpeciesRow,
};
use super::database::schema::{
    categories, landing_names, landing_ports, landings, prices, regions, seafood, species,
};
use crate::domain::{LandingRecord, PriceRecord};
use crate::error::{Error, ImportError, Result};
use crate::port::ImportStore;

/// SQLite-backed [`ImportStore`].
#[derive(Clone)]
pub struct SqliteImportStore {
    pool: DbPool,
}

impl SqliteImportStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(QueryableByName)]
struct LastInsertId {
    #[diesel(sql_type = BigInt)]
    id: i64,
}

fn last_insert_id(conn: &mut SqliteConnection) -> QueryResult<i32> {
    let row: LastInsertId =
        diesel::sql_query("SELECT last_insert_rowid() AS id").get_result(conn)?;
    i32::try_from(row.id).map_err(|e| DieselError::DeserializationError(Box::new(e)))
}

/// Natural key to row id, scoped to one batch.
#[derive(Debug)]
struct Memo<K> {
    ids: HashMap<K, i32>,
}

impl<K: Eq + Hash + Clone> Memo<K> {
    fn new() -> Self {
        Self {
            ids: HashMap::new(),
        }
    }

    fn get_or_create(&mut self, key: &K, create: impl FnOnce() -> Result<i32>) -> Result<i32> {
        if let Some(id) = self.ids.get(key) {
            return Ok(*id);
        }
        let id = create()?;
        self.ids.insert(key.clone(), id);
        Ok(id)
    }
}

/// Id of a live reference row, or an error naming the soft-deleted one.
fn live(
    kind: &'static str,
    name: &str,
    (id, deleted_at): (i32, Option<String>),
) -> Result<i32> {
    match deleted_at {
        None => Ok(id),
        Some(_) => Err(ImportError::DeletedReference {
            kind,
            name: name.to_string(),
        }
        .into()),
    }
}

fn species_id(conn: &mut SqliteConnection, name: &str) -> Result<i32> {
    diesel::insert_into(species::table)
        .values(NewSpeciesRow { name })
        .on_conflict(species::name)
        .do_nothing()
        .execute(conn)?;
    let row = species::table
        .filter(species::name.eq(name))
        .select((species::id, species::deleted_at))
        .first(conn)?;
    live("species", name, row)
}

fn category_id(conn: &mut SqliteConnection, name: &str) -> Result<i32> {
    diesel::insert_into(categories::table)
        .values(NewCategoryRow { name })
        .on_conflict(categories::name)
        .do_nothing()
        .execute(conn)?;
    let row = categories::table
        .filter(categories::name.eq(name))
        .select((categories::id, categories::deleted_at))
        .first(conn)?;
    live("category", name, row)
}

fn region_id(conn: &mut SqliteConnection, region: &str) -> Result<i32> {
    diesel::insert_into(regions::table)
        .values(NewRegionRow { region })
        .on_conflict(regions::region)
        .do_nothing()
        .execute(conn)?;
    let row = regions::table
        .filter(regions::region.eq(region))
        .select((regions::id, regions::deleted_at))
        .first(conn)?;
    live("region", region, row)
}

fn landing_name_id(
    conn: &mut SqliteConnection,
    nmfs_name: &str,
    scientific_name: &str,
) -> Result<i32> {
    diesel::insert_into(landing_names::table)
        .values(NewLandingNameRow {
            nmfs_name,
            scientific_name,
        })
        .on_conflict((landing_names::nmfs_name, landing_names::scientific_name))
        .do_nothing()
        .execute(conn)?;
    let row = landing_names::table
        .filter(landing_names::nmfs_name.eq(nmfs_name))
        .filter(landing_names::scientific_name.eq(scientific_name))
        .select((landing_names::id, landing_names::deleted_at))
        .first(conn)?;
    live("landing name", nmfs_name, row)
}

fn landing_port_id(conn: &mut SqliteConnection, region_name: &str) -> Result<i32> {
    diesel::insert_into(landing_ports::table)
        .values(NewLandingPortRow { region_name })
        .on_conflict(landing_ports::region_name)
        .do_nothing()
        .execute(conn)?;
    let row = landing_ports::table
        .filter(landing_ports::region_name.eq(region_name))
        .select((landing_ports::id, landing_ports::deleted_at))
        .first(conn)?;
    live("landing port", region_name, row)
}

impl ImportStore for SqliteImportStore {
    fn insert_prices(&self, records: &[PriceRecord]) -> Result<usize> {
        let mut conn = self.pool.get()?;
        let inserted = conn.transaction::<_, Error, _>(|conn| {
            let mut species_memo = Memo::new();
            let mut category_memo = Memo::new();
            let mut region_memo = Memo::new();

            for record in records {
                let species = species_memo
                    .get_or_create(&record.product, || species_id(conn, &record.product))?;
                let region = region_memo
                    .get_or_create(&record.country, || region_id(conn, &record.country))?;
                let category = if record.category.is_empty() {
                    None
                } else {
                    Some(category_memo.get_or_create(&record.category, || {
                        category_id(conn, &record.category)
                    })?)
                };

                diesel::insert_into(seafood::table)
                    .values(NewSeafoodRow {
                        species_id: species,
                        region_id: region,
                        category_id: category,
                        price_unit: record.unit.as_str(),
                        size_range: &record.size_range,
                    })
                    .execute(conn)?;
                let seafood_id = last_insert_id(conn)?;

                let date = record.date.format("%Y-%m-%d").to_string();
                diesel::insert_into(prices::table)
                    .values(NewPriceRow {
                        seafood_id,
                        date: &date,
                        price: record.price,
                    })
                    .execute(conn)?;
            }
            debug!(
                species = species_memo.ids.len(),
                regions = region_memo.ids.len(),
                categories = category_memo.ids.len(),
                "price batch reference rows resolved"
            );
            Ok(records.len())
        })?;
        Ok(inserted)
    }

    fn insert_landings(&self, records: &[LandingRecord]) -> Result<usize> {
        let mut conn = self.pool.get()?;
        let inserted = conn.transaction::<_, Error, _>(|conn| {
            let mut name_memo: Memo<(String, String)> = Memo::new();
            let mut port_memo = Memo::new();

            let rows = records
                .iter()
                .map(|record| {
                    let name_key = (record.nmfs_name.clone(), record.scientific_name.clone());
                    let landing_name_id = name_memo.get_or_create(&name_key, || {
                        landing_name_id(conn, &record.nmfs_name, &record.scientific_name)
                    })?;
                    let landing_port_id = port_memo
                        .get_or_create(&record.region, || landing_port_id(conn, &record.region))?;
                    Ok(NewLandingRow {
                        year: record.year,
                        landing_port_id,
                        landing_name_id,
                        pounds: Some(record.pounds),
                        dollars: Some(record.dollars),
                        metric_tons: Some(record.metric_tons),
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let mut inserted = 0;
            for chunk in rows.chunks(500) {
                inserted += diesel::insert_into(landings::table)
                    .values(chunk)
                    .execute(conn)?;
            }
            Ok(inserted)
        })?;
        Ok(inserted)
    }
}
