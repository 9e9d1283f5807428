//! Market data records returned by the read side.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Unit a seafood price is quoted in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PriceUnit {
    /// Price per kilogram.
    Kg,
    /// Price per item.
    Unit,
    /// Source row did not say.
    #[default]
    Unspecified,
}

impl PriceUnit {
    /// Storage/wire representation: `"kg"`, `"unit"` or `""`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kg => "kg",
            Self::Unit => "unit",
            Self::Unspecified => "",
        }
    }

    /// Parse a stored value; anything unrecognized is [`Self::Unspecified`].
    #[must_use]
    pub fn from_db(value: &str) -> Self {
        match value {
            "kg" => Self::Kg,
            "unit" => Self::Unit,
            _ => Self::Unspecified,
        }
    }
}

impl Serialize for PriceUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Raw market-price filters as they arrive on the query string.
#[derive(Debug, Clone, Default)]
pub struct MarketPriceFilter {
    /// Species name substring.
    pub species: Option<String>,
    /// Region name substring.
    pub region: Option<String>,
}

/// Latest price of one (species, region) group with its trend figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketPrice {
    pub species_sku: String,
    pub origin: String,
    pub price: f64,
    pub price_unit: PriceUnit,
    /// Percent change against the price from more than six days earlier.
    pub weekly_trend: Option<f64>,
    /// Percent change against the previous calendar year's last price.
    pub yoy: Option<f64>,
}

/// Raw landings filters as they arrive on the query string.
#[derive(Debug, Clone, Default)]
pub struct LandingFilter {
    /// Exact year; ignored when it is not an integer.
    pub year: Option<String>,
    /// Landing region substring.
    pub region: Option<String>,
    /// NMFS species name substring.
    pub name: Option<String>,
}

/// One landings fact joined to its port and species name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Landing {
    pub year: i32,
    pub region: String,
    pub nmfs_name: String,
    pub pounds: f64,
    pub dollars: f64,
    pub metric_tons: f64,
}

/// Published market commentary headline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSignal {
    pub title: String,
    #[serde(serialize_with = "long_date")]
    pub published_date: NaiveDate,
}

/// Remaining quota for one product on the most recent report date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotaEntry {
    pub date: NaiveDate,
    pub product_name: String,
    #[serde(serialize_with = "percent")]
    pub remaining_quota: f64,
}

/// `"October 16, 2025"`
fn long_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format("%B %-d, %Y"))
}

/// `"42.50%"`
fn percent<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("{value:.2}%"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn price_unit_round_trips_storage_values() {
        for unit in [PriceUnit::Kg, PriceUnit::Unit, PriceUnit::Unspecified] {
            assert_eq!(PriceUnit::from_db(unit.as_str()), unit);
        }
        assert_eq!(PriceUnit::from_db("lb"), PriceUnit::Unspecified);
    }

    #[test]
    fn market_price_serializes_null_trends() {
        let price = MarketPrice {
            species_sku: "Hake".into(),
            origin: "Spain".into(),
            price: 12.5,
            price_unit: PriceUnit::Kg,
            weekly_trend: None,
            yoy: Some(25.0),
        };
        assert_eq!(
            serde_json::to_value(&price).unwrap(),
            json!({
                "species_sku": "Hake",
                "origin": "Spain",
                "price": 12.5,
                "price_unit": "kg",
                "weekly_trend": null,
                "yoy": 25.0
            })
        );
    }

    #[test]
    fn market_signal_date_is_spelled_out() {
        let signal = MarketSignal {
            title: "Cod prices firm".into(),
            published_date: NaiveDate::from_ymd_opt(2025, 10, 6).unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&signal).unwrap(),
            json!({"title": "Cod prices firm", "published_date": "October 6, 2025"})
        );
    }

    #[test]
    fn quota_is_rendered_as_percentage_string() {
        let quota = QuotaEntry {
            date: NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            product_name: "Bluefin tuna".into(),
            remaining_quota: 42.5,
        };
        assert_eq!(
            serde_json::to_value(&quota).unwrap(),
            json!({"date": "2025-03-09", "product_name": "Bluefin tuna", "remaining_quota": "42.50%"})
        );
    }
}
