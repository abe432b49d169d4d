//! Refresh scheduling split into a pure state machine and the async driver
//! that executes its actions.

pub(crate) mod driver;
pub mod machine;

pub use machine::{Action, Disposition, Event, Phase, Scheduler};
