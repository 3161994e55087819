//! time-axis-rs: adaptive time-axis ticks and absolute/relative time labels.
//!
//! The crate picks a "nice" tick interval for a visible time range, walks the
//! range with calendar-aware steps and renders each tick either as wall-clock
//! time or as time elapsed since the first plotted sample.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use api::{TimeAxis, TimeAxisOptions};
pub use error::{TimeAxisError, TimeAxisResult};
