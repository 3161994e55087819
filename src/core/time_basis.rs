use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};

use crate::core::primitives::{
    MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND, clamp_instant_millis,
    days_from_unix_epoch, millis_to_seconds, seconds_to_millis,
};
use crate::core::time_zone::ZonePolicy;

// Keeps normalized years inside chrono's date range before composing.
const MAX_ABS_YEAR: i64 = 262_000;

/// Calendar components of an instant as seen through a zone policy.
///
/// `month` is 0-based and `weekday` counts from Sunday = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
    pub weekday: u32,
}

impl CalendarFields {
    /// Splits wall-clock milliseconds since the epoch into components.
    #[must_use]
    pub fn from_local_millis(local_millis: i64) -> Self {
        let local = DateTime::from_timestamp_millis(clamp_instant_millis(local_millis))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
            .naive_utc();
        Self::from(local)
    }

    /// Wall-clock date and time, or `None` when the fields do not name a
    /// valid calendar instant.
    #[must_use]
    pub fn naive_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month.checked_add(1)?, self.day)?.and_hms_milli_opt(
            self.hour,
            self.minute,
            self.second,
            self.millisecond,
        )
    }

    /// Milliseconds elapsed since local midnight.
    #[must_use]
    pub fn millis_of_day(&self) -> i64 {
        i64::from(self.hour) * MILLIS_PER_HOUR
            + i64::from(self.minute) * MILLIS_PER_MINUTE
            + i64::from(self.second) * MILLIS_PER_SECOND
            + i64::from(self.millisecond)
    }
}

impl From<NaiveDateTime> for CalendarFields {
    fn from(local: NaiveDateTime) -> Self {
        Self {
            year: local.year(),
            month: local.month0(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
            second: local.second(),
            // leap-second nanos run past 999 ms
            millisecond: (local.nanosecond() / 1_000_000).min(999),
            weekday: local.weekday().num_days_from_sunday(),
        }
    }
}

/// Unnormalized components; every field may over- or underflow and is
/// rolled into the neighbouring fields when composed.
#[derive(Debug, Clone, Copy)]
struct RawFields {
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    millisecond: i64,
}

impl From<CalendarFields> for RawFields {
    fn from(fields: CalendarFields) -> Self {
        Self {
            year: i64::from(fields.year),
            month: i64::from(fields.month),
            day: i64::from(fields.day),
            hour: i64::from(fields.hour),
            minute: i64::from(fields.minute),
            second: i64::from(fields.second),
            millisecond: i64::from(fields.millisecond),
        }
    }
}

impl RawFields {
    fn compose_local_millis(self) -> i64 {
        let year = self
            .year
            .saturating_add(self.month.div_euclid(12))
            .clamp(-MAX_ABS_YEAR, MAX_ABS_YEAR);
        let month0 = self.month.rem_euclid(12);
        let month_start = NaiveDate::from_ymd_opt(year as i32, month0 as u32 + 1, 1)
            .map_or(0, days_from_unix_epoch);

        let days = month_start.saturating_add(self.day.saturating_sub(1));
        days.saturating_mul(MILLIS_PER_DAY)
            .saturating_add(self.hour.saturating_mul(MILLIS_PER_HOUR))
            .saturating_add(self.minute.saturating_mul(MILLIS_PER_MINUTE))
            .saturating_add(self.second.saturating_mul(MILLIS_PER_SECOND))
            .saturating_add(self.millisecond)
    }
}

/// Instant with calendar accessors that never consult the process zone
/// unless the policy asks for it.
///
/// Setters take unnormalized values and roll over like a calendar: setting
/// month 12 moves to January of the next year and day 31 of a 30-day month
/// lands on the 1st of the next month.
#[derive(Debug, Clone)]
pub struct TimeBasis {
    utc_millis: i64,
    zone: ZonePolicy,
}

impl TimeBasis {
    #[must_use]
    pub fn from_millis(utc_millis: i64, zone: ZonePolicy) -> Self {
        Self {
            utc_millis: clamp_instant_millis(utc_millis),
            zone,
        }
    }

    #[must_use]
    pub fn from_seconds(seconds: f64, zone: ZonePolicy) -> Self {
        Self::from_millis(seconds_to_millis(seconds), zone)
    }

    #[must_use]
    pub fn millis(&self) -> i64 {
        self.utc_millis
    }

    #[must_use]
    pub fn seconds(&self) -> f64 {
        millis_to_seconds(self.utc_millis)
    }

    #[must_use]
    pub fn zone(&self) -> &ZonePolicy {
        &self.zone
    }

    pub fn set_millis(&mut self, utc_millis: i64) {
        self.utc_millis = clamp_instant_millis(utc_millis);
    }

    pub fn add_millis(&mut self, delta_millis: i64) {
        self.set_millis(self.utc_millis.saturating_add(delta_millis));
    }

    #[must_use]
    pub fn fields(&self) -> CalendarFields {
        CalendarFields::from_local_millis(self.zone.utc_to_local(self.utc_millis))
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.fields().year
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.fields().month
    }

    #[must_use]
    pub fn day(&self) -> u32 {
        self.fields().day
    }

    #[must_use]
    pub fn weekday(&self) -> u32 {
        self.fields().weekday
    }

    #[must_use]
    pub fn hour(&self) -> u32 {
        self.fields().hour
    }

    #[must_use]
    pub fn minute(&self) -> u32 {
        self.fields().minute
    }

    #[must_use]
    pub fn second(&self) -> u32 {
        self.fields().second
    }

    #[must_use]
    pub fn millisecond(&self) -> u32 {
        self.fields().millisecond
    }

    pub fn set_year(&mut self, year: i64) {
        self.update(|raw| raw.year = year);
    }

    pub fn set_month(&mut self, month: i64) {
        self.update(|raw| raw.month = month);
    }

    pub fn set_day(&mut self, day: i64) {
        self.update(|raw| raw.day = day);
    }

    pub fn set_hour(&mut self, hour: i64) {
        self.update(|raw| raw.hour = hour);
    }

    pub fn set_minute(&mut self, minute: i64) {
        self.update(|raw| raw.minute = minute);
    }

    pub fn set_second(&mut self, second: i64) {
        self.update(|raw| raw.second = second);
    }

    pub fn set_millisecond(&mut self, millisecond: i64) {
        self.update(|raw| raw.millisecond = millisecond);
    }

    /// Moves to local midnight of the current day, then forward by
    /// `millis_of_day`.
    pub fn set_time_of_day_millis(&mut self, millis_of_day: i64) {
        self.update(|raw| {
            raw.hour = 0;
            raw.minute = 0;
            raw.second = 0;
            raw.millisecond = millis_of_day;
        });
    }

    fn update(&mut self, apply: impl FnOnce(&mut RawFields)) {
        let mut raw = RawFields::from(self.fields());
        apply(&mut raw);
        self.utc_millis = self.zone.local_to_utc(raw.compose_local_millis());
    }
}

impl PartialEq for TimeBasis {
    fn eq(&self, other: &Self) -> bool {
        self.utc_millis == other.utc_millis && self.zone.label() == other.zone.label()
    }
}
