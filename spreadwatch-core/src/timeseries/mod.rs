//! Time-series utilities shared by the scheduler and presentation code.
//!
//! Modules include:
//! - `reconcile`: FX-driven join of the spread series on normalized date keys
/// Date-keyed join of the spread and FX series.
pub mod reconcile;
