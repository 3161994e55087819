use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::time_basis::CalendarFields;
use crate::error::{TimeAxisError, TimeAxisResult};

const DEFAULT_MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const DEFAULT_DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Month and day names handed to locale formatters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleNames {
    month_names: Vec<String>,
    day_names: Vec<String>,
}

impl Default for LocaleNames {
    fn default() -> Self {
        Self {
            month_names: DEFAULT_MONTH_NAMES.map(str::to_owned).to_vec(),
            day_names: DEFAULT_DAY_NAMES.map(str::to_owned).to_vec(),
        }
    }
}

impl LocaleNames {
    /// Builds a name set; either list falls back to the English
    /// abbreviations when `None`.
    pub fn new(
        month_names: Option<Vec<String>>,
        day_names: Option<Vec<String>>,
    ) -> TimeAxisResult<Self> {
        let defaults = Self::default();
        let month_names = match month_names {
            Some(names) if names.len() != 12 => {
                return Err(TimeAxisError::InvalidConfig(format!(
                    "monthNames must have 12 entries, got {}",
                    names.len()
                )));
            }
            Some(names) => names,
            None => defaults.month_names,
        };
        let day_names = match day_names {
            Some(names) if names.len() != 7 => {
                return Err(TimeAxisError::InvalidConfig(format!(
                    "dayNames must have 7 entries, got {}",
                    names.len()
                )));
            }
            Some(names) => names,
            None => defaults.day_names,
        };

        Ok(Self {
            month_names,
            day_names,
        })
    }

    /// Name of the 0-based `month`.
    #[must_use]
    pub fn month_name(&self, month: u32) -> &str {
        self.month_names
            .get(month as usize)
            .map_or("", String::as_str)
    }

    /// Name of `weekday`, Sunday = 0.
    #[must_use]
    pub fn day_name(&self, weekday: u32) -> &str {
        self.day_names
            .get(weekday as usize)
            .map_or("", String::as_str)
    }
}

/// Locale capability producing the short time and short date strings used
/// by absolute labels.
pub trait LocaleFormatter: fmt::Debug + Send + Sync {
    fn short_time(
        &self,
        fields: &CalendarFields,
        names: &LocaleNames,
        twelve_hour_clock: bool,
    ) -> String;

    fn short_date(&self, fields: &CalendarFields, names: &LocaleNames) -> String;
}

/// Built-in locale presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AxisLabelLocale {
    /// `h:mm:ss AM` and `M/d/yyyy`; always a twelve-hour clock.
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    /// `H:mm:ss` and `d/M/yyyy`; twelve-hour clock on request.
    #[serde(rename = "es-ES")]
    EsEs,
}

impl AxisLabelLocale {
    /// strftime pattern of the short time for a wall-clock `hour`.
    #[must_use]
    pub fn time_pattern(self, hour: u32, twelve_hour_clock: bool) -> &'static str {
        match self {
            Self::EnUs => "%-I:%M:%S %p",
            Self::EsEs if twelve_hour_clock && hour < 12 => "%-I:%M:%S a. m.",
            Self::EsEs if twelve_hour_clock => "%-I:%M:%S p. m.",
            Self::EsEs => "%-H:%M:%S",
        }
    }

    /// strftime pattern of the short date.
    #[must_use]
    pub fn date_pattern(self) -> &'static str {
        match self {
            Self::EnUs => "%-m/%-d/%Y",
            Self::EsEs => "%-d/%-m/%Y",
        }
    }
}

impl LocaleFormatter for AxisLabelLocale {
    fn short_time(
        &self,
        fields: &CalendarFields,
        _names: &LocaleNames,
        twelve_hour_clock: bool,
    ) -> String {
        render(fields, self.time_pattern(fields.hour, twelve_hour_clock))
    }

    fn short_date(&self, fields: &CalendarFields, _names: &LocaleNames) -> String {
        render(fields, self.date_pattern())
    }
}

fn render(fields: &CalendarFields, pattern: &str) -> String {
    fields
        .naive_datetime()
        .map_or_else(String::new, |local| local.format(pattern).to_string())
}

/// Inserts `.mmm` right after the last digit of `time`, keeping any
/// trailing AM/PM designator in place.
pub(crate) fn insert_milliseconds(time: &mut String, millisecond: u32) {
    let position = time
        .char_indices()
        .filter(|(_, ch)| ch.is_ascii_digit())
        .last()
        .map_or(time.len(), |(index, ch)| index + ch.len_utf8());
    time.insert_str(position, &format!(".{millisecond:03}"));
}
