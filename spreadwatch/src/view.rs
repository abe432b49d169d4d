use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spreadwatch_core::{
    CombinedPoint, DateKey, Period, SessionSnapshot, Summaries, combine, summarize, unmatched_dates,
};

/// Everything a renderer needs, derived from one snapshot.
///
/// No display formatting happens here; dates and numbers are passed through raw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    /// FX-driven join of the spread and FX series.
    pub combined: Vec<CombinedPoint>,
    /// Headline figures per series.
    pub summaries: Summaries,
    /// Dates in `combined` whose spread values are zero-filled.
    pub unmatched: Vec<DateKey>,
    /// A fetch is in flight.
    pub loading: bool,
    /// Message of the last failed fetch, if it has not been superseded.
    pub error: Option<String>,
    /// When the dataset was last replaced.
    pub last_update: Option<DateTime<Utc>>,
    /// Period currently requested.
    pub period: Period,
}

impl View {
    /// Derive the view for `snapshot`.
    #[must_use]
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        let ds = &snapshot.dataset;
        Self {
            combined: combine(&ds.bond_spread, &ds.fx),
            summaries: summarize(ds),
            unmatched: unmatched_dates(&ds.bond_spread, &ds.fx),
            loading: snapshot.refresh.loading,
            error: snapshot.refresh.error.clone(),
            last_update: snapshot.refresh.last_update,
            period: snapshot.refresh.period,
        }
    }
}

impl From<&SessionSnapshot> for View {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self::from_snapshot(snapshot)
    }
}
