use spreadwatch_types::DateKey;

#[test]
fn strips_time_of_day() {
    assert_eq!(DateKey::normalize("2024-01-01 09:00"), "2024-01-01");
    assert_eq!(DateKey::normalize("2024-01-01T09:00:00Z"), "2024-01-01");
    assert_eq!(DateKey::normalize("  2024-01-01  "), "2024-01-01");
    assert_eq!(
        DateKey::normalize("2024-01-01 09:00"),
        DateKey::normalize("2024-01-01 17:30")
    );
}

#[test]
fn plain_dates_are_unchanged() {
    let k = DateKey::normalize("2024-02-29");
    assert_eq!(k.as_str(), "2024-02-29");
    assert_eq!(
        k.to_naive_date(),
        chrono::NaiveDate::from_ymd_opt(2024, 2, 29)
    );
}

#[test]
fn non_iso_keys_still_compare() {
    let k = DateKey::normalize("01/02/2024 10:00");
    assert_eq!(k.as_str(), "01/02/2024");
    assert!(k.to_naive_date().is_none());
}

#[test]
fn weekday_prefixed_dates_keep_their_day() {
    let tue = DateKey::normalize("Tue, 02 Jan 2024");
    let wed = DateKey::normalize("Wed, 03 Jan 2024");
    assert_eq!(tue.as_str(), "Tue, 02 Jan 2024");
    assert_ne!(tue, wed);
    assert_eq!(DateKey::normalize("Tue, 02 Jan 2024 09:30"), tue);
}

#[test]
fn t_only_splits_after_an_iso_date() {
    assert_eq!(DateKey::normalize("Thursday"), "Thursday");
    assert_eq!(DateKey::normalize("2024-01-01Tuesday").as_str(), "2024-01-01");
}
