use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::datetime_to_unix_seconds;
use crate::core::time_unit::{TickInterval, TimeUnit};
use crate::error::{TimeAxisError, TimeAxisResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn from_datetime(time: DateTime<Utc>, value: f64) -> Self {
        Self {
            x: datetime_to_unix_seconds(time),
            y: value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisDirection {
    X,
    Y,
}

/// Axis identity: direction plus 1-based axis number (`x`, `x2`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisId {
    pub direction: AxisDirection,
    pub index: usize,
}

impl AxisId {
    #[must_use]
    pub fn x(index: usize) -> Self {
        Self {
            direction: AxisDirection::X,
            index,
        }
    }

    #[must_use]
    pub fn y(index: usize) -> Self {
        Self {
            direction: AxisDirection::Y,
            index,
        }
    }

    /// Coordinate of `point` along this axis.
    #[must_use]
    pub fn component(self, point: DataPoint) -> f64 {
        match self.direction {
            AxisDirection::X => point.x,
            AxisDirection::Y => point.y,
        }
    }
}

/// Tick size override: a bare number of seconds or an explicit interval.
///
/// Deserializes from either `300` or `[5, "minute"]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TickSizeSetting {
    Seconds(f64),
    Interval(TickInterval),
}

impl TickSizeSetting {
    #[must_use]
    pub fn unit(self) -> Option<TimeUnit> {
        match self {
            Self::Seconds(_) => None,
            Self::Interval(interval) => Some(interval.unit),
        }
    }

    #[must_use]
    pub fn size_seconds(self) -> f64 {
        match self {
            Self::Seconds(seconds) => seconds,
            Self::Interval(interval) => interval.size_seconds(),
        }
    }

    #[must_use]
    pub fn to_interval(self) -> TickInterval {
        match self {
            Self::Seconds(seconds) => TickInterval::new(seconds, TimeUnit::Second),
            Self::Interval(interval) => interval,
        }
    }

    pub(crate) fn validate(self, field_name: &str) -> TimeAxisResult<Self> {
        let multiplier = match self {
            Self::Seconds(seconds) => seconds,
            Self::Interval(interval) => interval.multiplier,
        };
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(TimeAxisError::InvalidConfig(format!(
                "{field_name} must be finite and > 0"
            )));
        }
        Ok(self)
    }
}

impl From<TickInterval> for TickSizeSetting {
    fn from(interval: TickInterval) -> Self {
        Self::Interval(interval)
    }
}

impl From<f64> for TickSizeSetting {
    fn from(seconds: f64) -> Self {
        Self::Seconds(seconds)
    }
}

/// Visible axis range in seconds together with its tick-size overrides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
    /// Number of ticks the range should be split into; `delta` is the
    /// span divided by this count.
    pub target_ticks: f64,
    pub min_tick_size: Option<TickSizeSetting>,
    pub tick_size: Option<TickSizeSetting>,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> TimeAxisResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(TimeAxisError::InvalidData(
                "axis range bounds must be finite".to_owned(),
            ));
        }
        if min > max {
            return Err(TimeAxisError::InvalidData(format!(
                "axis range min must be <= max, got {min} > {max}"
            )));
        }
        Ok(Self {
            min,
            max,
            target_ticks: 1.0,
            min_tick_size: None,
            tick_size: None,
        })
    }

    pub fn with_target_ticks(mut self, target_ticks: f64) -> TimeAxisResult<Self> {
        if !target_ticks.is_finite() || target_ticks <= 0.0 {
            return Err(TimeAxisError::InvalidData(
                "target tick count must be finite and > 0".to_owned(),
            ));
        }
        self.target_ticks = target_ticks;
        Ok(self)
    }

    #[must_use]
    pub fn with_min_tick_size(mut self, min_tick_size: Option<TickSizeSetting>) -> Self {
        self.min_tick_size = min_tick_size;
        self
    }

    #[must_use]
    pub fn with_tick_size(mut self, tick_size: Option<TickSizeSetting>) -> Self {
        self.tick_size = tick_size;
        self
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn delta(self) -> f64 {
        self.span() / self.target_ticks
    }
}
