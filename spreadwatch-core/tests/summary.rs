use proptest::prelude::*;
use spreadwatch_core::{
    Commodities, CommodityPoint, Dataset, FxPoint, SpreadPoint, delta, latest, summarize,
};

fn fx(date: &str, rate: f64) -> FxPoint {
    FxPoint {
        date: date.to_string(),
        rate,
    }
}

fn commodity(date: &str, price: f64, change: Option<f64>) -> CommodityPoint {
    CommodityPoint {
        date: date.to_string(),
        price,
        change,
    }
}

#[test]
fn latest_and_delta_need_enough_points() {
    let empty: Vec<FxPoint> = Vec::new();
    assert!(latest(&empty).is_none());
    assert!(delta(&empty).is_none());

    let one = vec![fx("2024-01-01", 150.0)];
    assert_eq!(latest(&one).map(|p| p.rate), Some(150.0));
    assert!(delta(&one).is_none());
}

#[test]
fn latest_is_last_not_max() {
    let series = vec![fx("2024-01-03", 3.0), fx("2024-01-01", 9.0), fx("2024-01-02", 1.0)];
    let last = latest(&series).expect("non-empty");
    assert_eq!(last.date, "2024-01-02");
    assert_eq!(delta(&series), Some(-2.0));
}

#[test]
fn summarize_applies_per_series_rules() {
    let dataset = Dataset {
        bond_spread: vec![
            SpreadPoint {
                date: "2024-01-01".into(),
                spread: 3.0,
                us10y: 4.0,
                jp10y: 1.0,
            },
            SpreadPoint {
                date: "2024-01-02".into(),
                spread: 3.25,
                us10y: 4.25,
                jp10y: 1.0,
            },
        ],
        fx: vec![fx("2024-01-01", 148.0), fx("2024-01-02", 149.5)],
        commodities: Commodities {
            gold: vec![commodity("2024-01-02", 2050.0, Some(12.5))],
            oil: vec![commodity("2024-01-02", 72.0, None)],
        },
    };

    let s = summarize(&dataset);

    let spread = s.spread.expect("spread summary");
    assert_eq!(spread.date, "2024-01-02");
    assert_eq!(spread.value, 3.25);
    assert_eq!(spread.change, Some(3.25));

    let fx = s.fx.expect("fx summary");
    assert_eq!(fx.value, 149.5);
    assert_eq!(fx.change, Some(1.5));

    let gold = s.gold.expect("gold summary");
    assert_eq!(gold.value, 2050.0);
    assert_eq!(gold.change, Some(12.5));

    let oil = s.oil.expect("oil summary");
    assert_eq!(oil.value, 72.0);
    assert_eq!(oil.change, None);
}

#[test]
fn summarize_empty_dataset_is_all_none() {
    let s = summarize(&Dataset::default());
    assert!(s.spread.is_none());
    assert!(s.fx.is_none());
    assert!(s.gold.is_none());
    assert!(s.oil.is_none());
}

#[test]
fn single_fx_point_has_no_change() {
    let dataset = Dataset {
        fx: vec![fx("2024-01-01", 150.0)],
        ..Dataset::default()
    };
    let s = summarize(&dataset);
    let fx = s.fx.expect("fx summary");
    assert_eq!(fx.value, 150.0);
    assert!(fx.change.is_none());
}

proptest! {
    #[test]
    fn latest_returns_last_element(rates in proptest::collection::vec(-1e6f64..1e6, 0..50)) {
        let series: Vec<FxPoint> = rates.iter().map(|r| fx("2024-01-01", *r)).collect();
        prop_assert_eq!(latest(&series).map(|p| p.rate), rates.last().copied());
        let expected = if rates.len() >= 2 { Some(rates[rates.len() - 1] - rates[0]) } else { None };
        prop_assert_eq!(delta(&series), expected);
    }
}
