use std::iter::FusedIterator;

use tracing::{trace, warn};

use crate::core::primitives::{floor_in_base, millis_to_seconds};
use crate::core::time_basis::TimeBasis;
use crate::core::time_unit::{TickInterval, TimeUnit};
use crate::core::time_zone::ZonePolicy;

/// Hard cap on emitted ticks per pass.
pub const MAX_TICK_ITERATIONS: usize = 100_000;

/// Generates calendar-aligned tick positions (seconds) covering
/// `axis_min..=axis_max`.
///
/// The last tick is the first one at or past `axis_max`.
#[must_use]
pub fn generate_ticks(
    axis_min: f64,
    axis_max: f64,
    interval: TickInterval,
    zone: ZonePolicy,
) -> Vec<f64> {
    let ticks: Vec<f64> = TimeTicks::new(axis_min, axis_max, interval, zone).collect();
    trace!(
        axis_min,
        axis_max,
        interval = %interval,
        count = ticks.len(),
        "generated time ticks"
    );
    ticks
}

/// Single-pass iterator over tick positions.
///
/// Stops after the first tick at or past the axis maximum, when a step fails
/// to move forward (the stalled value is not yielded), or after
/// [`MAX_TICK_ITERATIONS`] ticks.
#[derive(Debug, Clone)]
pub struct TimeTicks {
    cursor: TimeBasis,
    interval: TickInterval,
    axis_max: f64,
    single: bool,
    carry_millis: i64,
    previous_millis: Option<i64>,
    emitted: usize,
    finished: bool,
}

impl TimeTicks {
    #[must_use]
    pub fn new(axis_min: f64, axis_max: f64, interval: TickInterval, zone: ZonePolicy) -> Self {
        let mut cursor = TimeBasis::from_seconds(axis_min, zone);
        snap_to_interval(&mut cursor, interval);

        Self {
            cursor,
            interval,
            axis_max,
            single: axis_max <= axis_min,
            carry_millis: 0,
            previous_millis: None,
            emitted: 0,
            finished: !axis_min.is_finite() || !axis_max.is_finite(),
        }
    }

    #[must_use]
    pub fn interval(&self) -> TickInterval {
        self.interval
    }

    fn advance(&mut self) {
        let TickInterval { multiplier, unit } = self.interval;
        match unit {
            TimeUnit::Month | TimeUnit::Quarter if multiplier < 1.0 => {
                // Fractions of a month follow the real length of the month the
                // step starts in. The time of day left over after snapping to
                // midnight is carried into the next step.
                let months_per_unit = if unit == TimeUnit::Quarter { 3 } else { 1 };
                let start_millis = self.cursor.millis();

                let mut period = self.cursor.clone();
                period.set_day(1);
                let period_start = period.millis();
                period.set_month(i64::from(period.month()) + months_per_unit);
                let period_millis = period.millis() - period_start;

                let step = (period_millis as f64 * multiplier).round() as i64;
                self.cursor.set_millis(
                    start_millis
                        .saturating_add(self.carry_millis)
                        .saturating_add(step),
                );
                self.carry_millis = self.cursor.fields().millis_of_day();
                self.cursor.set_time_of_day_millis(0);
            }
            TimeUnit::Month | TimeUnit::Quarter => {
                let months_per_unit = if unit == TimeUnit::Quarter { 3.0 } else { 1.0 };
                let month = f64::from(self.cursor.month()) + multiplier * months_per_unit;
                self.cursor.set_month(month as i64);
            }
            TimeUnit::Year => {
                let year = f64::from(self.cursor.year()) + multiplier;
                self.cursor.set_year(year as i64);
            }
            _ => {
                let step = (multiplier * unit.size_millis()).round();
                let step = if step.is_finite() { step as i64 } else { 0 };
                self.cursor.add_millis(step);
            }
        }
    }
}

impl Iterator for TimeTicks {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let current = self.cursor.millis();
        if self
            .previous_millis
            .is_some_and(|previous| current <= previous)
        {
            trace!(interval = %self.interval, "tick step made no progress");
            self.finished = true;
            return None;
        }
        if self.emitted >= MAX_TICK_ITERATIONS {
            warn!(
                interval = %self.interval,
                max = MAX_TICK_ITERATIONS,
                "time tick generation hit iteration cap"
            );
            self.finished = true;
            return None;
        }

        self.previous_millis = Some(current);
        self.emitted += 1;
        let value = millis_to_seconds(current);
        if self.single || value >= self.axis_max {
            self.finished = true;
        } else {
            self.advance();
        }
        Some(value)
    }
}

impl FusedIterator for TimeTicks {}

/// Moves `cursor` down to an interval-aligned boundary and clears every
/// component finer than the step.
pub(crate) fn snap_to_interval(cursor: &mut TimeBasis, interval: TickInterval) {
    let TickInterval { multiplier, unit } = interval;
    let fields = cursor.fields();
    match unit {
        TimeUnit::Millisecond => {
            cursor.set_millisecond(floor_in_base(f64::from(fields.millisecond), multiplier) as i64);
        }
        TimeUnit::Second => {
            cursor.set_second(floor_in_base(f64::from(fields.second), multiplier) as i64);
        }
        TimeUnit::Minute => {
            cursor.set_minute(floor_in_base(f64::from(fields.minute), multiplier) as i64);
        }
        TimeUnit::Hour => {
            cursor.set_hour(floor_in_base(f64::from(fields.hour), multiplier) as i64);
        }
        TimeUnit::Day => {}
        TimeUnit::Month => {
            cursor.set_month(floor_in_base(f64::from(fields.month), multiplier) as i64);
        }
        TimeUnit::Quarter => {
            let quarter = floor_in_base(f64::from(fields.month) / 3.0, multiplier);
            cursor.set_month((3.0 * quarter) as i64);
        }
        TimeUnit::Year => {
            cursor.set_year(floor_in_base(f64::from(fields.year), multiplier) as i64);
        }
    }

    let step = interval.size_seconds();
    if step >= TimeUnit::Second.size_seconds() {
        cursor.set_millisecond(0);
    }
    if step >= TimeUnit::Minute.size_seconds() {
        cursor.set_second(0);
    }
    if step >= TimeUnit::Hour.size_seconds() {
        cursor.set_minute(0);
    }
    if step >= TimeUnit::Day.size_seconds() {
        cursor.set_hour(0);
    }
    if step >= TimeUnit::Day.size_seconds() * 4.0 {
        cursor.set_day(1);
    }
    if step >= TimeUnit::Month.size_seconds() * 2.0 {
        cursor.set_month(floor_in_base(f64::from(cursor.month()), 3.0) as i64);
    }
    if step >= TimeUnit::Quarter.size_seconds() * 2.0 {
        cursor.set_month(floor_in_base(f64::from(cursor.month()), 6.0) as i64);
    }
    if step >= TimeUnit::Year.size_seconds() {
        cursor.set_month(0);
    }
}
