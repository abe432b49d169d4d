//! Time-series points and the dataset delivered by a data source.

use std::borrow::Borrow;
use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One observation of the US/JP 10Y spread together with its legs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadPoint {
    /// Observation date as delivered by the source.
    pub date: String,
    /// `us10y - jp10y`, pre-computed upstream.
    pub spread: f64,
    /// US 10Y yield.
    pub us10y: f64,
    /// JP 10Y yield.
    pub jp10y: f64,
}

/// One FX observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxPoint {
    /// Observation date as delivered by the source (may carry a time of day).
    pub date: String,
    /// Exchange rate.
    pub rate: f64,
}

/// One commodity observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommodityPoint {
    /// Observation date as delivered by the source.
    pub date: String,
    /// Price level.
    pub price: f64,
    /// Change pre-computed upstream, if the source provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
}

/// Commodity series tracked by the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Commodities {
    /// Gold prices.
    #[serde(default)]
    pub gold: Vec<CommodityPoint>,
    /// Crude oil prices.
    #[serde(default)]
    pub oil: Vec<CommodityPoint>,
}

/// Full payload of one successful fetch.
///
/// Series keep the order delivered by the source; nothing is re-sorted locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// US/JP 10Y spread series.
    #[serde(rename = "bondSpread", default)]
    pub bond_spread: Vec<SpreadPoint>,
    /// FX series.
    #[serde(default)]
    pub fx: Vec<FxPoint>,
    /// Commodity series.
    #[serde(default)]
    pub commodities: Commodities,
}

impl Dataset {
    /// True when every series is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bond_spread.is_empty()
            && self.fx.is_empty()
            && self.commodities.gold.is_empty()
            && self.commodities.oil.is_empty()
    }
}

/// Calendar-day key used to align series sampled at different times of day.
///
/// A raw date starting with an ISO `YYYY-MM-DD` keeps just that prefix, so
/// `2024-01-01`, `2024-01-01 09:00` and `2024-01-01T09:00:00Z` all map to
/// `2024-01-01`. Other formats only lose a trailing `HH:MM[:SS]` token and are
/// otherwise kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    /// Normalize a raw date string into a key.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Some(prefix) = trimmed.get(..10)
            && NaiveDate::parse_from_str(prefix, "%Y-%m-%d").is_ok()
            && trimmed[10..]
                .chars()
                .next()
                .is_none_or(|c| c == 'T' || c.is_whitespace())
        {
            return Self(prefix.to_string());
        }
        let date = match trimmed.rsplit_once(char::is_whitespace) {
            Some((head, tail)) if is_time_of_day(tail) => head.trim_end(),
            _ => trimmed,
        };
        Self(date.to_string())
    }

    /// Key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the key as an ISO calendar date, if it is one.
    #[must_use]
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").ok()
    }
}

fn is_time_of_day(s: &str) -> bool {
    ["%H:%M", "%H:%M:%S", "%H:%M:%S%.f"]
        .iter()
        .any(|fmt| NaiveTime::parse_from_str(s, fmt).is_ok())
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for DateKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for DateKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One row of the FX-driven join of spread and FX series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedPoint {
    /// Normalized date of the driving FX point.
    pub date: DateKey,
    /// Spread on that date, or `0.0` when the spread series has no such date.
    pub spread: f64,
    /// FX rate.
    pub rate: f64,
    /// US 10Y yield, or `0.0` when unmatched.
    pub us10y: f64,
    /// JP 10Y yield, or `0.0` when unmatched.
    pub jp10y: f64,
}
