use serde::{Deserialize, Serialize};

use crate::core::types::TickSizeSetting;
use crate::error::{TimeAxisError, TimeAxisResult};

use super::locale_format::{AxisLabelLocale, LocaleNames};
use super::time_formatter::AbsoluteEpoch;

/// Per-axis configuration of a time axis.
///
/// Field names follow the JSON option surface (`timeformat`,
/// `twelveHourClock`, `minTickSize`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimeAxisOptions {
    /// `None`/`"utc"`, `"browser"` for host-local time, or a zone name.
    pub timezone: Option<String>,
    /// Label pattern; without one the axis produces no labels.
    pub timeformat: Option<String>,
    pub twelve_hour_clock: bool,
    pub month_names: Option<Vec<String>>,
    pub day_names: Option<Vec<String>>,
    pub tick_size: Option<TickSizeSetting>,
    pub min_tick_size: Option<TickSizeSetting>,
    /// Target tick count used to derive the per-tick delta.
    pub ticks: Option<f64>,
    pub epoch: AbsoluteEpoch,
    pub locale: AxisLabelLocale,
    pub date_line_separator: String,
}

impl Default for TimeAxisOptions {
    fn default() -> Self {
        Self {
            timezone: None,
            timeformat: None,
            twelve_hour_clock: false,
            month_names: None,
            day_names: None,
            tick_size: None,
            min_tick_size: None,
            ticks: None,
            epoch: AbsoluteEpoch::default(),
            locale: AxisLabelLocale::default(),
            date_line_separator: "\n".to_owned(),
        }
    }
}

impl TimeAxisOptions {
    #[must_use]
    pub fn with_timeformat(mut self, timeformat: impl Into<String>) -> Self {
        self.timeformat = Some(timeformat.into());
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    #[must_use]
    pub fn with_tick_size(mut self, tick_size: impl Into<TickSizeSetting>) -> Self {
        self.tick_size = Some(tick_size.into());
        self
    }

    #[must_use]
    pub fn with_min_tick_size(mut self, min_tick_size: impl Into<TickSizeSetting>) -> Self {
        self.min_tick_size = Some(min_tick_size.into());
        self
    }

    #[must_use]
    pub fn with_ticks(mut self, ticks: f64) -> Self {
        self.ticks = Some(ticks);
        self
    }

    #[must_use]
    pub fn with_epoch(mut self, epoch: AbsoluteEpoch) -> Self {
        self.epoch = epoch;
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: AxisLabelLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn from_json(json: &str) -> TimeAxisResult<Self> {
        let options: Self = serde_json::from_str(json)
            .map_err(|err| TimeAxisError::InvalidConfig(format!("time axis options: {err}")))?;
        options.validate()
    }

    pub fn validate(self) -> TimeAxisResult<Self> {
        if let Some(tick_size) = self.tick_size {
            tick_size.validate("tickSize")?;
        }
        if let Some(min_tick_size) = self.min_tick_size {
            min_tick_size.validate("minTickSize")?;
        }
        if let Some(ticks) = self.ticks {
            if !ticks.is_finite() || ticks <= 0.0 {
                return Err(TimeAxisError::InvalidConfig(
                    "ticks must be finite and > 0".to_owned(),
                ));
            }
        }
        self.locale_names()?;
        Ok(self)
    }

    pub fn locale_names(&self) -> TimeAxisResult<LocaleNames> {
        LocaleNames::new(self.month_names.clone(), self.day_names.clone())
    }
}
