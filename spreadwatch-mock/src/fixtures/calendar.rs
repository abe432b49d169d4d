use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Last business day of the fixture calendar.
const ANCHOR: NaiveDate = match NaiveDate::from_ymd_opt(2024, 6, 28) {
    Some(d) => d,
    None => NaiveDate::MIN,
};

/// The `n` business days ending at the anchor, oldest first.
#[must_use]
pub fn business_days(n: usize) -> Vec<NaiveDate> {
    let mut out = Vec::with_capacity(n);
    let mut day = ANCHOR;
    while out.len() < n {
        if !matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
            out.push(day);
        }
        day = day - Days::new(1);
    }
    out.reverse();
    out
}
