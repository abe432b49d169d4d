//! Spreadwatch keeps a market dashboard's data fresh.
//!
//! Overview
//! - Polls a [`DataSource`] on a fixed cadence and on demand (manual refresh,
//!   period change).
//! - Keeps one session state (dataset plus loading/error bookkeeping) mutated on a
//!   single path and published read-only through a `watch` channel.
//! - Derives presentation-ready data ([`View`]): the FX-driven join of the spread
//!   and FX series, and per-series summaries.
//!
//! Key behaviors
//! - Overlapping fetches are never dropped: every tick or trigger issues a new
//!   request. `loading` stays true until the most recently issued one settles.
//! - Last settled wins, except that results issued under an older period, or
//!   overtaken by a newer applied request, are discarded.
//! - A failed fetch records a user-facing message and keeps the previous dataset.
//! - Dropping a [`RefreshSession`] cancels its timer and in-flight fetches.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use spreadwatch::{Period, Spreadwatch};
//! use spreadwatch_mock::MockSource;
//!
//! let sw = Spreadwatch::builder()
//!     .with_source(Arc::new(MockSource::new()))
//!     .build()?;
//! let mut session = sw.start(Period::M1);
//! session.wait_for(|s| !s.refresh.loading).await?;
//! let view = session.view();
//! session.set_period(Period::M3)?;
//! session.stop().await;
//! ```
//!
//! See the `demos` crate for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
/// Refresh scheduler: pure state machine and async driver.
pub mod scheduler;
mod session;
mod view;

pub use crate::core::{Spreadwatch, SpreadwatchBuilder};
pub use session::RefreshSession;
pub use view::View;

// Re-export core types for convenience
pub use spreadwatch_core::{
    CombinedPoint, Commodities, CommodityPoint, DataSource, Dataset, DateKey, Error, FetchError,
    FetchErrorKind, FxPoint, Period, RefreshConfig, RefreshState, SeriesSummary, SessionSnapshot,
    SpreadPoint, Summaries, combine, delta, latest, summarize, unmatched_dates,
};
