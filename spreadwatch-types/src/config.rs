//! Configuration types shared across the scheduler and sources.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Error, Period};

/// Environment variable holding the refresh cadence in milliseconds.
pub const ENV_REFRESH_MS: &str = "SPREADWATCH_REFRESH_MS";
/// Environment variable holding the initial period (`1d`, `5d`, `1mo`, `3mo`, `6mo`).
pub const ENV_PERIOD: &str = "SPREADWATCH_PERIOD";

/// Configuration of a refresh session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Cadence of the recurring fetch.
    pub interval: Duration,
    /// Period requested when a session starts without an explicit one.
    pub period: Period,
    /// Optional deadline for a single fetch; an elapsed deadline counts as a transport failure.
    pub fetch_timeout: Option<Duration>,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(60_000),
            period: Period::default(),
            fetch_timeout: None,
        }
    }
}

impl RefreshConfig {
    /// Defaults overridden by `SPREADWATCH_REFRESH_MS` and `SPREADWATCH_PERIOD` when set.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if a variable is present but unparsable, or if the
    /// resulting configuration fails [`RefreshConfig::validate`].
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`RefreshConfig::from_env`] with an injectable variable lookup.
    ///
    /// # Errors
    /// See [`RefreshConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(raw) = lookup(ENV_REFRESH_MS) {
            let ms: u64 = raw.trim().parse().map_err(|e| {
                Error::invalid_config(format!("{ENV_REFRESH_MS}='{raw}' is not a number: {e}"))
            })?;
            cfg.interval = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup(ENV_PERIOD) {
            cfg.period = raw.parse()?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations the scheduler cannot run.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for a zero interval or a zero fetch timeout.
    pub fn validate(&self) -> Result<(), Error> {
        if self.interval.is_zero() {
            return Err(Error::invalid_config("refresh interval must be non-zero"));
        }
        if self.fetch_timeout.is_some_and(|t| t.is_zero()) {
            return Err(Error::invalid_config("fetch timeout must be non-zero"));
        }
        Ok(())
    }
}
