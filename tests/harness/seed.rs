//! Direct inserts for report fixtures.

use diesel::prelude::*;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::sql_types::{Double, Integer, Nullable, Text};
use diesel::sqlite::Sqlite;

use seafood_api::adapter::outbound::sqlite::DbPool;

type Insert = BoxedSqlQuery<'static, Sqlite, SqlQuery>;

#[derive(QueryableByName)]
struct Id {
    #[diesel(sql_type = Integer)]
    id: i32,
}

fn conn(pool: &DbPool) -> PooledConnection<ConnectionManager<SqliteConnection>> {
    pool.get().expect("get sqlite connection")
}

fn insert(sql: &str) -> Insert {
    diesel::sql_query(sql.to_string()).into_boxed::<Sqlite>()
}

fn insert_returning_id(pool: &DbPool, query: Insert) -> i32 {
    let mut conn = conn(pool);
    query.execute(&mut conn).expect("insert fixture row");
    let row: Id = diesel::sql_query("SELECT last_insert_rowid() AS id")
        .get_result(&mut conn)
        .expect("read last insert id");
    row.id
}

pub fn species(pool: &DbPool, name: &str) -> i32 {
    insert_returning_id(
        pool,
        insert("INSERT INTO species (name) VALUES (?)")
            .bind::<Text, _>(name.to_string()),
    )
}

pub fn region(pool: &DbPool, name: &str) -> i32 {
    insert_returning_id(
        pool,
        insert("INSERT INTO regions (region) VALUES (?)")
            .bind::<Text, _>(name.to_string()),
    )
}

pub fn seafood(pool: &DbPool, species_id: i32, region_id: i32, unit: &str) -> i32 {
    insert_returning_id(
        pool,
        insert("INSERT INTO seafood (species_id, region_id, price_unit) VALUES (?, ?, ?)")
            .bind::<Integer, _>(species_id)
            .bind::<Integer, _>(region_id)
            .bind::<Text, _>(unit.to_string()),
    )
}

pub fn price(pool: &DbPool, seafood_id: i32, date: &str, price: f64) -> i32 {
    insert_returning_id(
        pool,
        insert("INSERT INTO prices (seafood_id, date, price) VALUES (?, ?, ?)")
            .bind::<Integer, _>(seafood_id)
            .bind::<Text, _>(date.to_string())
            .bind::<Double, _>(price),
    )
}

/// Species, region, seafood and prices in one call. Returns the seafood id.
pub fn priced_group(pool: &DbPool, species_name: &str, region_name: &str, rows: &[(&str, f64)]) -> i32 {
    let species_id = species(pool, species_name);
    let region_id = region(pool, region_name);
    let seafood_id = seafood(pool, species_id, region_id, "kg");
    for (date, value) in rows {
        price(pool, seafood_id, date, *value);
    }
    seafood_id
}

pub fn soft_delete(pool: &DbPool, table: &str, id: i32) {
    let mut conn = conn(pool);
    diesel::sql_query(format!(
        "UPDATE {table} SET deleted_at = CURRENT_TIMESTAMP WHERE id = ?"
    ))
    .bind::<Integer, _>(id)
    .execute(&mut conn)
    .expect("soft delete fixture row");
}

pub fn landing_port(pool: &DbPool, region_name: &str) -> i32 {
    insert_returning_id(
        pool,
        insert("INSERT INTO landing_ports (region_name) VALUES (?)")
            .bind::<Text, _>(region_name.to_string()),
    )
}

pub fn landing_name(pool: &DbPool, nmfs_name: &str) -> i32 {
    insert_returning_id(
        pool,
        insert("INSERT INTO landing_names (nmfs_name) VALUES (?)")
            .bind::<Text, _>(nmfs_name.to_string()),
    )
}

pub fn landing(
    pool: &DbPool,
    year: i32,
    port_id: i32,
    name_id: i32,
    amounts: (Option<f64>, Option<f64>, Option<f64>),
) -> i32 {
    insert_returning_id(
        pool,
        insert("INSERT INTO landings (year, landing_port_id, landing_name_id, pounds, dollars, metric_tons) \
             VALUES (?, ?, ?, ?, ?, ?)")
        .bind::<Integer, _>(year)
        .bind::<Integer, _>(port_id)
        .bind::<Integer, _>(name_id)
        .bind::<Nullable<Double>, _>(amounts.0)
        .bind::<Nullable<Double>, _>(amounts.1)
        .bind::<Nullable<Double>, _>(amounts.2),
    )
}

pub fn market_signal(pool: &DbPool, title: &str, published_date: &str) -> i32 {
    insert_returning_id(
        pool,
        insert("INSERT INTO market_signals (title, published_date) VALUES (?, ?)")
            .bind::<Text, _>(title.to_string())
            .bind::<Text, _>(published_date.to_string()),
    )
}

pub fn quota(pool: &DbPool, date: &str, product_name: &str, remaining: f64) -> i32 {
    insert_returning_id(
        pool,
        insert("INSERT INTO quotas (date, product_name, remaining_quota) VALUES (?, ?, ?)")
            .bind::<Text, _>(date.to_string())
            .bind::<Text, _>(product_name.to_string())
            .bind::<Double, _>(remaining),
    )
}
