use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Dataset, Period};

/// Loading/error bookkeeping of a refresh session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshState {
    /// True while the most recently issued request is in flight.
    pub loading: bool,
    /// User-facing message of the last applied failure; cleared when a request is issued.
    pub error: Option<String>,
    /// When the dataset was last replaced.
    pub last_update: Option<DateTime<Utc>>,
    /// Period the session is currently fetching.
    pub period: Period,
}

impl RefreshState {
    /// Fresh state for a session starting on `period`.
    #[must_use]
    pub fn new(period: Period) -> Self {
        Self {
            period,
            ..Self::default()
        }
    }
}

/// Immutable view of a session published after every state change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Last applied dataset (empty until the first successful fetch).
    pub dataset: Arc<Dataset>,
    /// Loading/error bookkeeping.
    pub refresh: RefreshState,
    /// Incremented on every period change.
    pub generation: u64,
}
