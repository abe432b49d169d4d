use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use spreadwatch_core::{DataSource, Dataset, FetchError, Period};

/// Instruction for how a fetch should behave for a given period.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the provided dataset immediately.
    Return(Dataset),
    /// Fail immediately with the provided error.
    Fail(FetchError),
    /// Hang indefinitely (simulate a stalled request).
    Hang,
    /// Settle with `outcome` after sleeping for `after`.
    Delayed {
        /// Time until the fetch settles.
        after: Duration,
        /// Result delivered once the delay elapses.
        outcome: Result<Dataset, FetchError>,
    },
}

#[derive(Default)]
struct InternalState {
    sticky: HashMap<Period, MockBehavior>,
    queued: HashMap<Period, VecDeque<MockBehavior>>,
    calls: Vec<Period>,
}

/// Controller handle used by tests to drive the scripted source from the outside.
pub struct ScriptedController {
    state: Arc<Mutex<InternalState>>,
}

impl ScriptedController {
    /// Behavior used for every fetch of `period` once its queue is drained.
    pub async fn set_behavior(&self, period: Period, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.sticky.insert(period, behavior);
    }

    /// Behavior used by exactly one upcoming fetch of `period`, ahead of the sticky one.
    pub async fn enqueue(&self, period: Period, behavior: MockBehavior) {
        let mut guard = self.state.lock().await;
        guard.queued.entry(period).or_default().push_back(behavior);
    }

    /// Periods requested so far, in call order.
    pub async fn calls(&self) -> Vec<Period> {
        self.state.lock().await.calls.clone()
    }

    /// Number of fetches issued so far.
    pub async fn call_count(&self) -> usize {
        self.state.lock().await.calls.len()
    }

    /// Clear all configured behaviors and the call log.
    pub async fn clear_all(&self) {
        let mut guard = self.state.lock().await;
        guard.sticky.clear();
        guard.queued.clear();
        guard.calls.clear();
    }
}

/// A source that defers all behavior to an external controller.
pub struct ScriptedSource {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl ScriptedSource {
    /// Create a new scripted source and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<dyn DataSource>, ScriptedController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = ScriptedController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn DataSource>, controller)
    }
}

#[async_trait]
impl DataSource for ScriptedSource {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "ScriptedMock"
    }

    async fn fetch_all(&self, period: Period) -> Result<Dataset, FetchError> {
        // Snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push(period);
            let queued = guard.queued.get_mut(&period).and_then(VecDeque::pop_front);
            queued.or_else(|| guard.sticky.get(&period).cloned())
        };

        match behavior {
            Some(MockBehavior::Return(ds)) => Ok(ds),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            Some(MockBehavior::Delayed { after, outcome }) => {
                tokio::time::sleep(after).await;
                outcome
            }
            None => Err(FetchError::transport(format!(
                "no behavior scripted for period {period}"
            ))),
        }
    }
}
