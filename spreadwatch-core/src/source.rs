use async_trait::async_trait;

use crate::{Dataset, FetchError, Period};

/// A client able to fetch the full dashboard dataset for a period.
///
/// Implementations perform exactly one request per call and never retry;
/// retrying is the scheduler's business (the next tick or a manual trigger).
#[async_trait]
pub trait DataSource: Send + Sync {
    /// A stable identifier used in logs (e.g., "spreadwatch-http", "spreadwatch-mock").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Fetch every tracked series for `period`.
    ///
    /// On success the dataset is returned exactly as delivered by the source.
    async fn fetch_all(&self, period: Period) -> Result<Dataset, FetchError>;
}
