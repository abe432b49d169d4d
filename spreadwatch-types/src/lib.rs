//! Spreadwatch data transfer objects, error taxonomy, and configuration primitives.
#![warn(missing_docs)]

mod config;
mod error;
mod period;
mod series;
mod state;

pub use config::{ENV_PERIOD, ENV_REFRESH_MS, RefreshConfig};
pub use error::{Error, FetchError, FetchErrorKind};
pub use period::Period;
pub use series::{
    CombinedPoint, Commodities, CommodityPoint, Dataset, DateKey, FxPoint, SpreadPoint,
};
pub use state::{RefreshState, SessionSnapshot};
