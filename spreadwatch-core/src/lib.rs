//! spreadwatch-core
//!
//! Core contracts and pure computations shared across the spreadwatch workspace.
//!
//! - `source`: the `DataSource` trait implemented by data-source clients.
//! - `timeseries`: date-keyed reconciliation of independently sampled series.
//! - `summary`: latest-point and change extraction per tracked series.
//! - `handle`: scoped ownership of background tasks.
//!
//! Async runtime (Tokio)
//! ---------------------
//! `handle::TaskHandle` wraps `tokio::task::JoinHandle<()>` and uses a
//! `tokio::sync::oneshot::Sender<()>` for cooperative shutdown, so code that
//! starts background work must run under a Tokio 1.x runtime. Everything in
//! `timeseries` and `summary` is synchronous and allocation-light.
//!
#![warn(missing_docs)]

/// Scoped ownership of spawned background tasks.
pub mod handle;
/// The data-source trait implemented by clients.
pub mod source;
/// Summary extraction over single series and whole datasets.
pub mod summary;
/// Time-series utilities for joining series on normalized dates.
pub mod timeseries;
pub mod types;

pub use handle::TaskHandle;
pub use source::DataSource;
pub use summary::{SeriesSummary, SeriesValue, Summaries, delta, latest, summarize};
pub use timeseries::reconcile::{combine, unmatched_dates};
pub use types::*;
