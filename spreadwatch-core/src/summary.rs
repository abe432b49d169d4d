//! Point-in-time summaries of the tracked series.
//!
//! All functions here are pure and read series in the order delivered by the
//! source. Nothing is sorted; "latest" means "last element".

use serde::{Deserialize, Serialize};

use crate::{CommodityPoint, Dataset, FxPoint, SpreadPoint};

/// A dated observation with one headline value.
pub trait SeriesValue {
    /// Raw date as delivered by the source.
    fn date(&self) -> &str;
    /// Headline value used for summaries and deltas.
    fn value(&self) -> f64;
}

impl SeriesValue for SpreadPoint {
    fn date(&self) -> &str {
        &self.date
    }
    fn value(&self) -> f64 {
        self.spread
    }
}

impl SeriesValue for FxPoint {
    fn date(&self) -> &str {
        &self.date
    }
    fn value(&self) -> f64 {
        self.rate
    }
}

impl SeriesValue for CommodityPoint {
    fn date(&self) -> &str {
        &self.date
    }
    fn value(&self) -> f64 {
        self.price
    }
}

/// Last element of `series` by insertion order.
#[must_use]
pub fn latest<T>(series: &[T]) -> Option<&T> {
    series.last()
}

/// `latest.value - first.value`, or `None` with fewer than two points.
#[must_use]
pub fn delta<T: SeriesValue>(series: &[T]) -> Option<f64> {
    match series {
        [first, .., last] => Some(last.value() - first.value()),
        _ => None,
    }
}

/// Headline figures for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    /// Raw date of the latest point.
    pub date: String,
    /// Headline value of the latest point.
    pub value: f64,
    /// Change figure; its meaning depends on the series (see [`summarize`]).
    pub change: Option<f64>,
}

/// Summaries of every tracked series; `None` where the series is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summaries {
    /// US/JP 10Y spread.
    pub spread: Option<SeriesSummary>,
    /// FX rate.
    pub fx: Option<SeriesSummary>,
    /// Gold.
    pub gold: Option<SeriesSummary>,
    /// Crude oil.
    pub oil: Option<SeriesSummary>,
}

fn headline<T: SeriesValue>(
    series: &[T],
    change: impl FnOnce(&T) -> Option<f64>,
) -> Option<SeriesSummary> {
    latest(series).map(|p| SeriesSummary {
        date: p.date().to_string(),
        value: p.value(),
        change: change(p),
    })
}

/// Summarize every series of `dataset`.
///
/// - spread: `change` is the latest spread itself, not a difference
/// - fx: `change` is [`delta`] over the whole FX series
/// - gold/oil: `change` is the upstream value carried by the latest point
#[must_use]
pub fn summarize(dataset: &Dataset) -> Summaries {
    Summaries {
        spread: headline(&dataset.bond_spread, |p| Some(p.spread)),
        fx: headline(&dataset.fx, |_| delta(&dataset.fx)),
        gold: headline(&dataset.commodities.gold, |p| p.change),
        oil: headline(&dataset.commodities.oil, |p| p.change),
    }
}
