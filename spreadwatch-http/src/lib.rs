//! spreadwatch-http
//!
//! Production `DataSource` that fetches the full dashboard dataset with one
//! `GET <base-url>/api/all?period=<period>` per call.
//!
//! Failures are normalized into `FetchError`:
//! - connection errors, client timeouts, and non-2xx statuses become `Transport`
//! - `{"success": false}` becomes `ApiRejected`
//! - anything undecodable becomes `Malformed`
//!
//! The source never retries; the scheduler's cadence is the retry policy.
#![warn(missing_docs)]

/// Builder and environment loading for [`HttpSource`].
pub mod builder;
/// Response envelope decoding.
pub mod wire;

use async_trait::async_trait;
use spreadwatch_core::{DataSource, Dataset, FetchError, Period};
use url::Url;

pub use builder::{DEFAULT_HTTP_TIMEOUT, ENV_BASE_URL, ENV_HTTP_TIMEOUT_MS, HttpSourceBuilder};

/// Path of the aggregated endpoint, relative to the base URL.
pub const API_ALL_PATH: &str = "api/all";

/// HTTP-backed data source.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpSource {
    /// Identifier reported through [`DataSource::name`].
    pub const NAME: &'static str = "spreadwatch-http";

    /// Start configuring a source.
    #[must_use]
    pub fn builder() -> HttpSourceBuilder {
        HttpSourceBuilder::default()
    }

    /// Source against `base_url` with a default client and a
    /// [`DEFAULT_HTTP_TIMEOUT`] request timeout.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, spreadwatch_core::Error> {
        Self::builder().base_url(base_url).build()
    }

    /// Source configured from `SPREADWATCH_BASE_URL` and `SPREADWATCH_HTTP_TIMEOUT_MS`.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the base URL is missing or invalid, or the timeout is unparsable.
    pub fn from_env() -> Result<Self, spreadwatch_core::Error> {
        HttpSourceBuilder::from_env()?.build()
    }

    pub(crate) const fn from_parts(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    /// Resolved `/api/all` endpoint, without query string.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Full request URL for `period`.
    #[must_use]
    pub fn request_url(&self, period: Period) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("period", period.as_str());
        url
    }
}

fn transport_from(e: &reqwest::Error) -> FetchError {
    match e.status() {
        Some(status) => FetchError::status(status.as_u16(), e.to_string()),
        None => FetchError::transport(e.to_string()),
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "spreadwatch API"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "spreadwatch_http::fetch_all",
            skip_all,
            fields(period = %period),
        )
    )]
    async fn fetch_all(&self, period: Period) -> Result<Dataset, FetchError> {
        let resp = self
            .client
            .get(self.request_url(period))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| transport_from(&e))?;

        let status = resp.status();
        if !status.is_success() {
            #[cfg(feature = "tracing")]
            tracing::warn!(status = status.as_u16(), "non-success status from data source");
            let reason = status.canonical_reason().unwrap_or("unexpected status");
            return Err(FetchError::status(status.as_u16(), reason));
        }

        let body = resp.bytes().await.map_err(|e| transport_from(&e))?;
        let out = wire::decode(&body);
        #[cfg(feature = "tracing")]
        if let Err(e) = &out {
            tracing::warn!(error = %e, "data source payload rejected");
        }
        out
    }
}
