use spreadwatch_types::{Dataset, Period};

#[test]
fn dataset_reads_wire_field_names() {
    let json = r#"{
        "bondSpread": [{"date": "2024-01-01", "spread": 1.5, "us10y": 4.0, "jp10y": 2.5}],
        "fx": [{"date": "2024-01-01 09:00", "rate": 148.2}],
        "commodities": {
            "gold": [{"date": "2024-01-01", "price": 2050.0, "change": 0.4}],
            "oil": [{"date": "2024-01-01", "price": 71.3}]
        }
    }"#;

    let ds: Dataset = serde_json::from_str(json).expect("decode dataset");
    assert_eq!(ds.bond_spread.len(), 1);
    assert_eq!(ds.bond_spread[0].jp10y, 2.5);
    assert_eq!(ds.fx[0].date, "2024-01-01 09:00");
    assert_eq!(ds.commodities.gold[0].change, Some(0.4));
    assert_eq!(ds.commodities.oil[0].change, None);
}

#[test]
fn missing_series_default_to_empty() {
    let ds: Dataset = serde_json::from_str(r#"{"fx": []}"#).expect("decode dataset");
    assert!(ds.is_empty());
    assert!(ds.commodities.gold.is_empty());
}

#[test]
fn dataset_keeps_delivered_order() {
    let json = r#"{"fx": [
        {"date": "2024-01-03", "rate": 1.0},
        {"date": "2024-01-01", "rate": 2.0},
        {"date": "2024-01-02", "rate": 3.0}
    ]}"#;
    let ds: Dataset = serde_json::from_str(json).expect("decode dataset");
    let dates: Vec<&str> = ds.fx.iter().map(|p| p.date.as_str()).collect();
    assert_eq!(dates, ["2024-01-03", "2024-01-01", "2024-01-02"]);
}

#[test]
fn period_uses_query_string_form() {
    assert_eq!(serde_json::to_string(&Period::M3).unwrap(), "\"3mo\"");
    let p: Period = serde_json::from_str("\"5d\"").unwrap();
    assert_eq!(p, Period::D5);
    assert_eq!("6MO".parse::<Period>().unwrap(), Period::M6);
    assert!("2w".parse::<Period>().is_err());
    assert_eq!(Period::default(), Period::M1);
}
