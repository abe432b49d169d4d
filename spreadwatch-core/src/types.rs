//! Re-export of foundational types from `spreadwatch-types`.
// Consolidated re-exports so downstream crates can depend on `spreadwatch-core` only

pub use spreadwatch_types::{
    CombinedPoint, Commodities, CommodityPoint, Dataset, DateKey, ENV_PERIOD, ENV_REFRESH_MS,
    Error, FetchError, FetchErrorKind, FxPoint, Period, RefreshConfig, RefreshState,
    SessionSnapshot, SpreadPoint,
};
