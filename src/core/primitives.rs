use chrono::{DateTime, Datelike, NaiveDate, Utc};

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// `NaiveDate::num_days_from_ce` of 1970-01-01.
pub(crate) const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// Milliseconds between 0001-01-01T00:00:00Z and the Unix epoch.
pub const COMMON_ERA_TO_UNIX_MILLIS: i64 = 62_135_596_800_000;

#[must_use]
pub fn min_instant_millis() -> i64 {
    DateTime::<Utc>::MIN_UTC.timestamp_millis()
}

#[must_use]
pub fn max_instant_millis() -> i64 {
    DateTime::<Utc>::MAX_UTC.timestamp_millis()
}

#[must_use]
pub fn clamp_instant_millis(millis: i64) -> i64 {
    millis.clamp(min_instant_millis(), max_instant_millis())
}

/// Converts axis seconds into whole milliseconds, saturating at the
/// representable instant range. `NaN` maps to the epoch.
#[must_use]
pub fn seconds_to_millis(seconds: f64) -> i64 {
    if seconds.is_nan() {
        return 0;
    }
    let millis = (seconds * 1_000.0).round();
    if millis >= max_instant_millis() as f64 {
        max_instant_millis()
    } else if millis <= min_instant_millis() as f64 {
        min_instant_millis()
    } else {
        millis as i64
    }
}

/// Converts seconds into whole microseconds, saturating at the `i64` range.
/// `NaN` maps to zero.
#[must_use]
pub fn seconds_to_micros(seconds: f64) -> i64 {
    if seconds.is_nan() {
        return 0;
    }
    let micros = (seconds * 1_000_000.0).round();
    if micros >= i64::MAX as f64 {
        i64::MAX
    } else if micros <= i64::MIN as f64 {
        i64::MIN
    } else {
        micros as i64
    }
}

#[must_use]
pub fn millis_to_seconds(millis: i64) -> f64 {
    millis as f64 / 1_000.0
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    millis_to_seconds(time.timestamp_millis())
}

/// Rounds `value` down to the nearest multiple of `base`.
#[must_use]
pub fn floor_in_base(value: f64, base: f64) -> f64 {
    if !base.is_finite() || base <= 0.0 {
        return value;
    }
    base * (value / base).floor()
}

#[must_use]
pub(crate) fn days_from_unix_epoch(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE
}
