pub mod primitives;
pub mod time_basis;
pub mod time_unit;
pub mod time_zone;
pub mod types;

pub use time_basis::{CalendarFields, TimeBasis};
pub use time_unit::{TickInterval, TimeUnit, tick_spec_table};
pub use time_zone::{
    FixedOffsetZone, StaticTimeZoneProvider, TimeZoneProvider, TimeZoneResolver, ZonePolicy,
};
#[cfg(feature = "tz-database")]
pub use time_zone::{TzDatabaseProvider, TzDatabaseZone};
pub use types::{AxisDirection, AxisId, AxisRange, DataPoint, TickSizeSetting};
