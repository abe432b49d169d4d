use std::time::Duration;

use spreadwatch_core::Error;
use url::Url;

use crate::{API_ALL_PATH, HttpSource};

/// Environment variable holding the API base URL (required by `from_env`).
pub const ENV_BASE_URL: &str = "SPREADWATCH_BASE_URL";
/// Environment variable holding the HTTP request timeout in milliseconds.
pub const ENV_HTTP_TIMEOUT_MS: &str = "SPREADWATCH_HTTP_TIMEOUT_MS";
/// Request timeout used when none is configured.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for [`HttpSource`].
///
/// A custom `reqwest::Client` takes precedence over `timeout` and `user_agent`.
#[derive(Debug, Default, Clone)]
pub struct HttpSourceBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    client: Option<reqwest::Client>,
}

impl HttpSourceBuilder {
    /// Builder seeded from `SPREADWATCH_BASE_URL` and `SPREADWATCH_HTTP_TIMEOUT_MS`.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the base URL is missing or the timeout is unparsable.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`HttpSourceBuilder::from_env`] with an injectable variable lookup.
    ///
    /// # Errors
    /// See [`HttpSourceBuilder::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = lookup(ENV_BASE_URL)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| Error::invalid_config(format!("{ENV_BASE_URL} is not set")))?;
        let mut b = Self::default().base_url(base.trim());
        if let Some(raw) = lookup(ENV_HTTP_TIMEOUT_MS) {
            let ms: u64 = raw.trim().parse().map_err(|e| {
                Error::invalid_config(format!("{ENV_HTTP_TIMEOUT_MS}='{raw}' is not a number: {e}"))
            })?;
            b = b.timeout(Duration::from_millis(ms));
        }
        Ok(b)
    }

    /// Base URL of the API; `/api/all` is resolved relative to it.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Per-request timeout enforced by the HTTP client. Defaults to [`DEFAULT_HTTP_TIMEOUT`].
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// `User-Agent` header sent with every request.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    fn effective_timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_HTTP_TIMEOUT)
    }

    /// Use a preconfigured client instead of building one.
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Validate the configuration and build the source.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the base URL is missing, not absolute http(s),
    /// the timeout is zero, or the HTTP client cannot be constructed.
    pub fn build(self) -> Result<HttpSource, Error> {
        let timeout = self.effective_timeout();
        let raw = self
            .base_url
            .ok_or_else(|| Error::invalid_config("base URL is required"))?;
        let endpoint = resolve_endpoint(&raw)?;

        if timeout.is_zero() {
            return Err(Error::invalid_config("HTTP timeout must be non-zero"));
        }

        let client = match self.client {
            Some(c) => c,
            None => {
                let ua = self
                    .user_agent
                    .unwrap_or_else(|| format!("spreadwatch/{}", env!("CARGO_PKG_VERSION")));
                reqwest::Client::builder()
                    .user_agent(ua)
                    .timeout(timeout)
                    .build()
                    .map_err(|e| Error::invalid_config(format!("cannot build HTTP client: {e}")))?
            }
        };

        Ok(HttpSource::from_parts(client, endpoint))
    }
}

/// Parse `raw` and resolve the `/api/all` endpoint beneath it.
///
/// The base path is treated as a directory, so `http://h/prefix` and
/// `http://h/prefix/` both resolve to `http://h/prefix/api/all`.
fn resolve_endpoint(raw: &str) -> Result<Url, Error> {
    let mut base = Url::parse(raw)
        .map_err(|e| Error::invalid_config(format!("invalid base URL '{raw}': {e}")))?;
    if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
        return Err(Error::invalid_config(format!(
            "base URL '{raw}' must be an absolute http(s) URL"
        )));
    }
    base.set_query(None);
    base.set_fragment(None);
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(API_ALL_PATH)
        .map_err(|e| Error::invalid_config(format!("invalid base URL '{raw}': {e}")))
}
