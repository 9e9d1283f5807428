//! Database model types for Diesel ORM.

use diesel::prelude::*;
use diesel::sql_types::{BigInt, Double, Integer, Nullable, Text};

use super::schema::{
    categories, landing_names, landing_ports, landings, market_signals, password_reset_tokens,
    prices, quotas, regions, seafood, species, users,
};

/// Database row for a user (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: String,
}

/// Database row for a user (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub created_at: &'a str,
    pub updated_at: &'a str,
}

/// Database row for a password reset token (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = password_reset_tokens)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ResetTokenRow {
    pub id: i32,
    pub user_id: i32,
    pub token: String,
    pub expires_at: String,
    pub used: bool,
}

/// Database row for a password reset token (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = password_reset_tokens)]
pub struct NewResetTokenRow<'a> {
    pub user_id: i32,
    pub token: &'a str,
    pub expires_at: &'a str,
    pub used: bool,
    pub created_at: &'a str,
}

/// Database row for a market signal.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = market_signals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MarketSignalRow {
    pub title: String,
    pub published_date: String,
}

/// Database row for a quota entry.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = quotas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QuotaRow {
    pub date: String,
    pub product_name: String,
    pub remaining_quota: f64,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = species)]
pub struct NewSpeciesRow<'a> {
    pub name: &'a str,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = regions)]
pub struct NewRegionRow<'a> {
    pub region: &'a str,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = categories)]
pub struct NewCategoryRow<'a> {
    pub name: &'a str,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = seafood)]
pub struct NewSeafoodRow<'a> {
    pub species_id: i32,
    pub region_id: i32,
    pub category_id: Option<i32>,
    pub price_unit: &'a str,
    pub size_range: &'a str,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = prices)]
pub struct NewPriceRow<'a> {
    pub seafood_id: i32,
    pub date: &'a str,
    pub price: f64,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = landing_names)]
pub struct NewLandingNameRow<'a> {
    pub nmfs_name: &'a str,
    pub scientific_name: &'a str,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = landing_ports)]
pub struct NewLandingPortRow<'a> {
    pub region_name: &'a str,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = landings)]
pub struct NewLandingRow {
    pub year: i32,
    pub landing_port_id: i32,
    pub landing_name_id: i32,
    pub pounds: Option<f64>,
    pub dollars: Option<f64>,
    pub metric_tons: Option<f64>,
}

/// Result of a `SELECT COUNT(*) AS total` report query.
#[derive(QueryableByName, Debug, Clone, Copy)]
pub struct CountRow {
    #[diesel(sql_type = BigInt)]
    pub total: i64,
}

/// One row of the market-price snapshot query.
#[derive(QueryableByName, Debug, Clone)]
pub struct MarketPriceRow {
    #[diesel(sql_type = Text)]
    pub species_name: String,
    #[diesel(sql_type = Text)]
    pub region_name: String,
    #[diesel(sql_type = Double)]
    pub price: f64,
    #[diesel(sql_type = Text)]
    pub price_unit: String,
    #[diesel(sql_type = Nullable<Double>)]
    pub week_ago_price: Option<f64>,
    #[diesel(sql_type = Nullable<Double>)]
    pub year_ago_price: Option<f64>,
}

/// One row of the landings listing query.
#[derive(QueryableByName, Debug, Clone)]
pub struct LandingRow {
    #[diesel(sql_type = Integer)]
    pub year: i32,
    #[diesel(sql_type = Text)]
    pub region_name: String,
    #[diesel(sql_type = Text)]
    pub nmfs_name: String,
    #[diesel(sql_type = Double)]
    pub pounds: f64,
    #[diesel(sql_type = Double)]
    pub dollars: f64,
    #[diesel(sql_type = Double)]
    pub metric_tons: f64,
}
