//! Pure transition function of a refresh session.
//!
//! The driver feeds [`Event`]s in and executes the returned [`Action`]s; nothing
//! here touches the clock, the network, or the runtime.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use spreadwatch_core::{Dataset, FetchError, Period, RefreshState, SessionSnapshot};

/// Lifecycle of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Accepting events.
    Running,
    /// Shut down; every further event is ignored.
    Terminated,
}

/// Input of the transition function.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// The recurring timer fired.
    Tick,
    /// Manual refresh.
    Trigger,
    /// Switch to another period; ignored when it is already in effect.
    SetPeriod(Period),
    /// A request issued earlier has settled.
    Settled {
        /// Id assigned when the request was issued.
        request_id: u64,
        /// Generation captured when the request was issued.
        generation: u64,
        /// What the source returned.
        outcome: Result<Dataset, FetchError>,
        /// When the driver observed the completion.
        at: DateTime<Utc>,
    },
    /// Tear the session down.
    Shutdown,
}

/// Side effect requested from the driver.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Start fetching `period`; report back with the same id and generation.
    Issue {
        /// Monotonically increasing across the whole session.
        request_id: u64,
        /// Generation in effect at issue time.
        generation: u64,
        /// Period to request.
        period: Period,
    },
    /// Restart the recurring cadence from now.
    ResetTimer,
    /// Hand a new snapshot to observers.
    Publish(SessionSnapshot),
    /// Abandon every in-flight request.
    AbortAll,
    /// Stop the driver loop.
    Terminate,
}

/// What became of a settled request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// The outcome replaced the dataset or recorded the error.
    Applied,
    /// Issued under an older period.
    StaleGeneration,
    /// Overtaken by a newer request of the same generation.
    OutOfOrder,
    /// Unknown id, or the session is no longer running.
    Ignored,
}

/// Refresh scheduler state: the published snapshot plus request bookkeeping.
#[derive(Debug)]
pub struct Scheduler {
    snapshot: SessionSnapshot,
    next_request_id: u64,
    latest_issued: Option<u64>,
    last_applied: Option<u64>,
    /// request id -> generation it was issued under
    in_flight: BTreeMap<u64, u64>,
    last_disposition: Option<Disposition>,
    phase: Phase,
}

impl Scheduler {
    /// Empty session on `period`, generation 0, nothing issued yet.
    #[must_use]
    pub fn new(period: Period) -> Self {
        Self {
            snapshot: SessionSnapshot {
                dataset: Arc::new(Dataset::default()),
                refresh: RefreshState::new(period),
                generation: 0,
            },
            next_request_id: 1,
            latest_issued: None,
            last_applied: None,
            in_flight: BTreeMap::new(),
            last_disposition: None,
            phase: Phase::Running,
        }
    }

    /// Current snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of issued requests that have not settled yet.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// How the most recent `Settled` event was handled.
    #[must_use]
    pub const fn last_disposition(&self) -> Option<Disposition> {
        self.last_disposition
    }

    /// Apply `event`, returning the next state and the actions to execute in order.
    ///
    /// A `Publish` action is appended whenever the snapshot changed.
    #[must_use]
    pub fn handle(self, event: Event) -> (Self, Vec<Action>) {
        let before = self.snapshot.clone();
        let (next, mut actions) = self.transition_for_event(event);
        if !same_snapshot(&before, &next.snapshot) {
            let publish = Action::Publish(next.snapshot.clone());
            // Observers see the final state before the driver exits.
            match actions.iter().position(|a| matches!(a, Action::Terminate)) {
                Some(i) => actions.insert(i, publish),
                None => actions.push(publish),
            }
        }
        (next, actions)
    }

    fn transition_for_event(mut self, event: Event) -> (Self, Vec<Action>) {
        match (self.phase, event) {
            (Phase::Terminated, _) => (self, Vec::new()),
            (Phase::Running, Event::Tick | Event::Trigger) => {
                let issue = self.issue();
                (self, vec![issue])
            }
            (Phase::Running, Event::SetPeriod(period)) => {
                if period == self.snapshot.refresh.period {
                    return (self, Vec::new());
                }
                self.snapshot.generation += 1;
                self.snapshot.refresh.period = period;
                self.last_applied = None;
                let issue = self.issue();
                (self, vec![Action::ResetTimer, issue])
            }
            (
                Phase::Running,
                Event::Settled {
                    request_id,
                    generation,
                    outcome,
                    at,
                },
            ) => {
                self.settle(request_id, generation, outcome, at);
                (self, Vec::new())
            }
            (Phase::Running, Event::Shutdown) => {
                self.phase = Phase::Terminated;
                self.in_flight.clear();
                self.snapshot.refresh.loading = false;
                (self, vec![Action::AbortAll, Action::Terminate])
            }
        }
    }

    fn issue(&mut self) -> Action {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        let generation = self.snapshot.generation;
        self.in_flight.insert(request_id, generation);
        self.latest_issued = Some(request_id);
        self.snapshot.refresh.loading = true;
        self.snapshot.refresh.error = None;
        Action::Issue {
            request_id,
            generation,
            period: self.snapshot.refresh.period,
        }
    }

    fn settle(
        &mut self,
        request_id: u64,
        generation: u64,
        outcome: Result<Dataset, FetchError>,
        at: DateTime<Utc>,
    ) {
        if self.in_flight.remove(&request_id).is_none() {
            self.last_disposition = Some(Disposition::Ignored);
            return;
        }
        if self.latest_issued == Some(request_id) {
            self.snapshot.refresh.loading = false;
        }

        let disposition = if generation < self.snapshot.generation {
            Disposition::StaleGeneration
        } else if self.last_applied.is_some_and(|last| request_id < last) {
            Disposition::OutOfOrder
        } else {
            Disposition::Applied
        };
        self.last_disposition = Some(disposition);
        if disposition != Disposition::Applied {
            return;
        }

        self.last_applied = Some(request_id);
        match outcome {
            Ok(dataset) => {
                self.snapshot.dataset = Arc::new(dataset);
                self.snapshot.refresh.error = None;
                self.snapshot.refresh.last_update = Some(at);
            }
            Err(e) => {
                self.snapshot.refresh.error = Some(e.user_message());
            }
        }
    }
}

fn same_snapshot(a: &SessionSnapshot, b: &SessionSnapshot) -> bool {
    Arc::ptr_eq(&a.dataset, &b.dataset) && a.refresh == b.refresh && a.generation == b.generation
}
