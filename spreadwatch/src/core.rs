use std::sync::Arc;
use std::time::Duration;

use spreadwatch_core::{
    DataSource, Dataset, Error, FetchError, Period, RefreshConfig, SessionSnapshot, TaskHandle,
};
use tokio::sync::{mpsc, oneshot, watch};

use crate::scheduler::driver::{DriverParams, spawn_driver};
use crate::session::RefreshSession;

/// Entry point: a data source plus the refresh configuration applied to every session.
pub struct Spreadwatch {
    pub(crate) source: Arc<dyn DataSource>,
    pub(crate) cfg: RefreshConfig,
}

/// Builder for constructing a [`Spreadwatch`] with custom configuration.
pub struct SpreadwatchBuilder {
    source: Option<Arc<dyn DataSource>>,
    cfg: RefreshConfig,
}

impl Default for SpreadwatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SpreadwatchBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Defaults: 60 s refresh cadence, `1mo` period, no fetch deadline.
    /// A data source must be registered with [`with_source`](Self::with_source).
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            cfg: RefreshConfig::default(),
        }
    }

    /// Register the data source. A later call replaces an earlier one.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn DataSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Replace the whole configuration, e.g. one loaded with `RefreshConfig::from_env`.
    #[must_use]
    pub fn config(mut self, cfg: RefreshConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Cadence of the recurring fetch.
    #[must_use]
    pub const fn interval(mut self, every: Duration) -> Self {
        self.cfg.interval = every;
        self
    }

    /// Period used by [`Spreadwatch::start_default`].
    #[must_use]
    pub const fn period(mut self, period: Period) -> Self {
        self.cfg.period = period;
        self
    }

    /// Deadline for a single fetch. An elapsed deadline settles the fetch as a
    /// transport failure; the session keeps polling.
    #[must_use]
    pub const fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.fetch_timeout = Some(timeout);
        self
    }

    /// Build the `Spreadwatch` instance.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if no source was registered or the configuration
    /// is unusable (zero interval or zero fetch timeout).
    pub fn build(self) -> Result<Spreadwatch, Error> {
        let source = self.source.ok_or_else(|| {
            Error::invalid_config("no data source registered; add one via with_source(...)")
        })?;
        self.cfg.validate()?;
        Ok(Spreadwatch {
            source,
            cfg: self.cfg,
        })
    }
}

/// Run one fetch, mapping an elapsed deadline to a transport failure.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "spreadwatch::core::fetch_with_timeout",
        skip(source),
        fields(
            source = source.name(),
            timeout_ms = timeout.map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX)),
        ),
    )
)]
pub(crate) async fn fetch_with_timeout(
    source: &dyn DataSource,
    period: Period,
    timeout: Option<Duration>,
) -> Result<Dataset, FetchError> {
    match timeout {
        Some(t) => tokio::time::timeout(t, source.fetch_all(period))
            .await
            .unwrap_or_else(|_| Err(FetchError::timed_out(t))),
        None => source.fetch_all(period).await,
    }
}

impl Spreadwatch {
    /// Start building a new `Spreadwatch` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use spreadwatch::{Period, Spreadwatch};
    /// use spreadwatch_http::HttpSource;
    ///
    /// let sw = Spreadwatch::builder()
    ///     .with_source(Arc::new(HttpSource::new("http://localhost:3000")?))
    ///     .interval(std::time::Duration::from_secs(60))
    ///     .build()?;
    /// let session = sw.start(Period::M1);
    /// ```
    #[must_use]
    pub fn builder() -> SpreadwatchBuilder {
        SpreadwatchBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &RefreshConfig {
        &self.cfg
    }

    /// Name of the registered data source.
    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Fetch `period` once, outside any session, honoring the fetch deadline.
    ///
    /// # Errors
    /// Returns `Fetch` with the source's failure.
    pub async fn fetch_once(&self, period: Period) -> Result<Dataset, Error> {
        Ok(fetch_with_timeout(self.source.as_ref(), period, self.cfg.fetch_timeout).await?)
    }

    /// Start a refresh session on `period`: one fetch right away, then one per interval.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn start(&self, period: Period) -> RefreshSession {
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SessionSnapshot {
            refresh: spreadwatch_core::RefreshState::new(period),
            ..SessionSnapshot::default()
        });

        #[cfg(feature = "tracing")]
        tracing::info!(
            source = self.source.name(),
            %period,
            interval_ms = u64::try_from(self.cfg.interval.as_millis()).unwrap_or(u64::MAX),
            "starting refresh session"
        );

        let join = spawn_driver(
            DriverParams {
                source: Arc::clone(&self.source),
                interval: self.cfg.interval,
                fetch_timeout: self.cfg.fetch_timeout,
                period,
            },
            stop_rx,
            cmd_rx,
            state_tx,
        );
        RefreshSession::new(cmd_tx, state_rx, TaskHandle::new(join, stop_tx))
    }

    /// Start a refresh session on the configured default period.
    #[must_use]
    pub fn start_default(&self) -> RefreshSession {
        self.start(self.cfg.period)
    }
}
