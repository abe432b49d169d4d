use std::collections::HashMap;

use crate::{CombinedPoint, DateKey, FxPoint, SpreadPoint};

/// Join the spread series onto the FX series by normalized date.
///
/// - FX drives the output: one `CombinedPoint` per FX point, in FX order.
/// - Spread points are looked up by `DateKey`; on duplicate keys the last one wins.
/// - FX dates without a spread counterpart are zero-filled (`spread`, `us10y`,
///   `jp10y` all `0.0`), never omitted.
/// - Spread dates without an FX counterpart are dropped.
/// - If either input is empty the result is empty.
///
/// The join is deliberately asymmetric: the FX axis is the reference axis of
/// the dual-axis chart. See [`unmatched_dates`] to detect zero-filled rows.
#[must_use]
pub fn combine(spread: &[SpreadPoint], fx: &[FxPoint]) -> Vec<CombinedPoint> {
    if spread.is_empty() || fx.is_empty() {
        return Vec::new();
    }

    let by_date: HashMap<DateKey, &SpreadPoint> = spread
        .iter()
        .map(|p| (DateKey::normalize(&p.date), p))
        .collect();

    fx.iter()
        .map(|f| {
            let date = DateKey::normalize(&f.date);
            match by_date.get(&date) {
                Some(s) => CombinedPoint {
                    date,
                    spread: s.spread,
                    rate: f.rate,
                    us10y: s.us10y,
                    jp10y: s.jp10y,
                },
                None => CombinedPoint {
                    date,
                    spread: 0.0,
                    rate: f.rate,
                    us10y: 0.0,
                    jp10y: 0.0,
                },
            }
        })
        .collect()
}

/// FX dates (normalized, in FX order) that have no spread counterpart.
///
/// These are exactly the rows [`combine`] zero-fills. Returns an empty vector
/// whenever `combine` would.
#[must_use]
pub fn unmatched_dates(spread: &[SpreadPoint], fx: &[FxPoint]) -> Vec<DateKey> {
    if spread.is_empty() || fx.is_empty() {
        return Vec::new();
    }
    let known: std::collections::HashSet<DateKey> =
        spread.iter().map(|p| DateKey::normalize(&p.date)).collect();
    fx.iter()
        .map(|f| DateKey::normalize(&f.date))
        .filter(|d| !known.contains(d))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp(date: &str, spread: f64) -> SpreadPoint {
        SpreadPoint {
            date: date.to_string(),
            spread,
            us10y: spread + 1.0,
            jp10y: 1.0,
        }
    }

    fn fx(date: &str, rate: f64) -> FxPoint {
        FxPoint {
            date: date.to_string(),
            rate,
        }
    }

    #[test]
    fn duplicate_spread_dates_keep_the_last() {
        let spread = vec![sp("2024-01-01", 1.0), sp("2024-01-01 16:00", 2.0)];
        let out = combine(&spread, &[fx("2024-01-01", 150.0)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].spread, 2.0);
    }

    #[test]
    fn spread_only_dates_are_dropped() {
        let spread = vec![sp("2024-01-01", 1.0), sp("2024-01-05", 3.0)];
        let out = combine(&spread, &[fx("2024-01-05", 151.0)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].date, "2024-01-05");
        assert_eq!(out[0].spread, 3.0);
    }

    #[test]
    fn unmatched_lists_zero_filled_rows() {
        let spread = vec![sp("2024-01-02", 1.0)];
        let fxs = vec![fx("2024-01-01 09:00", 1.0), fx("2024-01-02 09:00", 2.0), fx("2024-01-03", 3.0)];
        let missing = unmatched_dates(&spread, &fxs);
        let missing: Vec<&str> = missing.iter().map(DateKey::as_str).collect();
        assert_eq!(missing, ["2024-01-01", "2024-01-03"]);
    }
}
