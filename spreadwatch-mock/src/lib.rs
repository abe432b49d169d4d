//! spreadwatch-mock
//!
//! Data sources for CI-safe tests and demos:
//! - [`MockSource`] serves deterministic fixture datasets per period.
//! - [`ScriptedSource`] defers every call to a [`ScriptedController`], so tests
//!   can script successes, failures, hangs and delayed completions.
use std::time::Duration;

use async_trait::async_trait;
use spreadwatch_core::{DataSource, Dataset, FetchError, Period};

/// Scriptable source driven by an external controller.
pub mod dynamic;
/// Deterministic fixture data.
pub mod fixtures;

pub use dynamic::{MockBehavior, ScriptedController, ScriptedSource};

/// Mock source for CI-safe examples. Provides deterministic data from generated fixtures.
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    latency: Option<Duration>,
}

impl MockSource {
    /// Identifier reported through [`DataSource::name`].
    pub const NAME: &'static str = "spreadwatch-mock";

    /// Source answering immediately.
    #[must_use]
    pub const fn new() -> Self {
        Self { latency: None }
    }

    /// Delay every answer by `latency` (uses Tokio time, so it honors paused clocks).
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }
}

#[async_trait]
impl DataSource for MockSource {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    async fn fetch_all(&self, period: Period) -> Result<Dataset, FetchError> {
        if let Some(d) = self.latency {
            tokio::time::sleep(d).await;
        }
        Ok(fixtures::dataset(period))
    }
}
