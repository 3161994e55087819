use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TimeAxisError;

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 60.0 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: f64 = 24.0 * SECONDS_PER_HOUR;

/// Calendar unit used by tick intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Quarter,
    Year,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 8] = [
        TimeUnit::Millisecond,
        TimeUnit::Second,
        TimeUnit::Minute,
        TimeUnit::Hour,
        TimeUnit::Day,
        TimeUnit::Month,
        TimeUnit::Quarter,
        TimeUnit::Year,
    ];

    /// Nominal unit size in seconds. Months count 30 days, quarters 90 days
    /// and years 365.2425 days.
    #[must_use]
    pub const fn size_seconds(self) -> f64 {
        match self {
            Self::Millisecond => 0.001,
            Self::Second => 1.0,
            Self::Minute => SECONDS_PER_MINUTE,
            Self::Hour => SECONDS_PER_HOUR,
            Self::Day => SECONDS_PER_DAY,
            Self::Month => 30.0 * SECONDS_PER_DAY,
            Self::Quarter => 3.0 * 30.0 * SECONDS_PER_DAY,
            Self::Year => 365.2425 * SECONDS_PER_DAY,
        }
    }

    #[must_use]
    pub const fn size_millis(self) -> f64 {
        self.size_seconds() * 1_000.0
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Millisecond => "millisecond",
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }

    /// Units whose steps are applied as calendar-field moves rather than
    /// fixed durations.
    #[must_use]
    pub const fn is_calendar(self) -> bool {
        matches!(self, Self::Month | Self::Quarter | Self::Year)
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = TimeAxisError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|unit| unit.as_str() == value)
            .ok_or_else(|| TimeAxisError::UnknownTimeUnit(value.to_owned()))
    }
}

/// Tick spacing as a `(multiplier, unit)` pair, e.g. 5 minutes or 2 quarters.
///
/// Serialized as a two-element array: `[5, "minute"]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, TimeUnit)", into = "(f64, TimeUnit)")]
pub struct TickInterval {
    pub multiplier: f64,
    pub unit: TimeUnit,
}

impl TickInterval {
    #[must_use]
    pub const fn new(multiplier: f64, unit: TimeUnit) -> Self {
        Self { multiplier, unit }
    }

    /// Nominal interval size in seconds.
    #[must_use]
    pub fn size_seconds(self) -> f64 {
        self.multiplier * self.unit.size_seconds()
    }
}

impl From<(f64, TimeUnit)> for TickInterval {
    fn from((multiplier, unit): (f64, TimeUnit)) -> Self {
        Self::new(multiplier, unit)
    }
}

impl From<TickInterval> for (f64, TimeUnit) {
    fn from(interval: TickInterval) -> Self {
        (interval.multiplier, interval.unit)
    }
}

impl fmt::Display for TickInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.multiplier, self.unit)
    }
}

const fn tick(multiplier: f64, unit: TimeUnit) -> TickInterval {
    TickInterval::new(multiplier, unit)
}

// Candidates up to two months are shared; the tail switches between month
// and quarter granularity. Past one year the selector normalizes sizes itself.
macro_rules! tick_spec_table {
    ($($tail:expr),+ $(,)?) => {
        [
            tick(1.0, TimeUnit::Millisecond),
            tick(2.0, TimeUnit::Millisecond),
            tick(5.0, TimeUnit::Millisecond),
            tick(10.0, TimeUnit::Millisecond),
            tick(25.0, TimeUnit::Millisecond),
            tick(50.0, TimeUnit::Millisecond),
            tick(100.0, TimeUnit::Millisecond),
            tick(250.0, TimeUnit::Millisecond),
            tick(500.0, TimeUnit::Millisecond),
            tick(1.0, TimeUnit::Second),
            tick(2.0, TimeUnit::Second),
            tick(5.0, TimeUnit::Second),
            tick(10.0, TimeUnit::Second),
            tick(30.0, TimeUnit::Second),
            tick(1.0, TimeUnit::Minute),
            tick(2.0, TimeUnit::Minute),
            tick(5.0, TimeUnit::Minute),
            tick(10.0, TimeUnit::Minute),
            tick(30.0, TimeUnit::Minute),
            tick(1.0, TimeUnit::Hour),
            tick(2.0, TimeUnit::Hour),
            tick(4.0, TimeUnit::Hour),
            tick(8.0, TimeUnit::Hour),
            tick(12.0, TimeUnit::Hour),
            tick(1.0, TimeUnit::Day),
            tick(2.0, TimeUnit::Day),
            tick(3.0, TimeUnit::Day),
            tick(0.25, TimeUnit::Month),
            tick(0.5, TimeUnit::Month),
            tick(1.0, TimeUnit::Month),
            tick(2.0, TimeUnit::Month),
            $($tail),+
        ]
    };
}

static MONTH_TICK_SPEC: [TickInterval; 34] = tick_spec_table!(
    tick(3.0, TimeUnit::Month),
    tick(6.0, TimeUnit::Month),
    tick(1.0, TimeUnit::Year),
);

static QUARTER_TICK_SPEC: [TickInterval; 34] = tick_spec_table!(
    tick(1.0, TimeUnit::Quarter),
    tick(2.0, TimeUnit::Quarter),
    tick(1.0, TimeUnit::Year),
);

/// Ordered tick-interval candidates, ascending by nominal size.
#[must_use]
pub fn tick_spec_table(quarter_enabled: bool) -> &'static [TickInterval] {
    if quarter_enabled {
        &QUARTER_TICK_SPEC
    } else {
        &MONTH_TICK_SPEC
    }
}
