//! Deterministic market data generated from a fixed calendar.
//!
//! The spread series skips every seventh business day and the FX series
//! carries a time of day, so joins over fixture data exercise both date
//! normalization and zero-filling.

mod calendar;

use spreadwatch_core::{Commodities, CommodityPoint, Dataset, FxPoint, Period, SpreadPoint};

pub use calendar::business_days;

/// Number of business days delivered for `period`.
#[must_use]
pub const fn points_for(period: Period) -> usize {
    match period {
        Period::D1 => 2,
        Period::D5 => 5,
        Period::M1 => 21,
        Period::M3 => 63,
        Period::M6 => 126,
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn wave(i: usize, period: f64, amplitude: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let x = i as f64;
    (x / period).sin() * amplitude
}

/// Full fixture dataset for `period`.
#[must_use]
pub fn dataset(period: Period) -> Dataset {
    let days = business_days(points_for(period));

    let mut bond_spread = Vec::with_capacity(days.len());
    let mut fx = Vec::with_capacity(days.len());
    let mut gold = Vec::with_capacity(days.len());
    let mut oil = Vec::with_capacity(days.len());

    let mut prev_gold: Option<f64> = None;
    let mut prev_oil: Option<f64> = None;

    for (i, day) in days.iter().enumerate() {
        let date = day.format("%Y-%m-%d").to_string();

        if i % 7 != 6 {
            let us10y = round2(4.20 + wave(i, 9.0, 0.15));
            let jp10y = round2(0.95 + wave(i, 13.0, 0.05));
            bond_spread.push(SpreadPoint {
                date: date.clone(),
                spread: round2(us10y - jp10y),
                us10y,
                jp10y,
            });
        }

        fx.push(FxPoint {
            date: format!("{date} 09:00"),
            rate: round2(150.0 + wave(i, 7.0, 2.5)),
        });

        let g = round2(2_300.0 + wave(i, 11.0, 40.0));
        gold.push(CommodityPoint {
            date: date.clone(),
            price: g,
            change: prev_gold.map(|p| round2(g - p)),
        });
        prev_gold = Some(g);

        let o = round2(78.0 + wave(i, 5.0, 3.0));
        oil.push(CommodityPoint {
            date,
            price: o,
            change: prev_oil.map(|p| round2(o - p)),
        });
        prev_oil = Some(o);
    }

    Dataset {
        bond_spread,
        fx,
        commodities: Commodities { gold, oil },
    }
}
