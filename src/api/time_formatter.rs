use std::fmt::{self, Write as _};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::primitives::{
    COMMON_ERA_TO_UNIX_MILLIS, MILLIS_PER_SECOND, millis_to_seconds, seconds_to_millis,
    seconds_to_micros,
};
use crate::core::time_basis::TimeBasis;
use crate::core::time_zone::ZonePolicy;

use super::locale_format::{AxisLabelLocale, LocaleFormatter, LocaleNames, insert_milliseconds};

/// Origin of axis values in absolute mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum AbsoluteEpoch {
    /// Seconds since 1970-01-01T00:00:00Z.
    #[default]
    Unix,
    /// Seconds since 0001-01-01T00:00:00Z.
    CommonEra,
}

impl AbsoluteEpoch {
    #[must_use]
    pub fn to_unix_millis(self, millis: i64) -> i64 {
        match self {
            Self::Unix => millis,
            Self::CommonEra => millis.saturating_sub(COMMON_ERA_TO_UNIX_MILLIS),
        }
    }

    #[must_use]
    pub fn to_unix_seconds(self, seconds: f64) -> f64 {
        match self {
            Self::Unix => seconds,
            Self::CommonEra => seconds - millis_to_seconds(COMMON_ERA_TO_UNIX_MILLIS),
        }
    }

    #[must_use]
    pub fn from_unix_seconds(self, seconds: f64) -> f64 {
        match self {
            Self::Unix => seconds,
            Self::CommonEra => seconds + millis_to_seconds(COMMON_ERA_TO_UNIX_MILLIS),
        }
    }
}

/// Everything a tick label needs besides the value itself.
#[derive(Debug, Clone)]
pub struct FormatContext {
    pub zone: ZonePolicy,
    pub names: LocaleNames,
    pub twelve_hour_clock: bool,
    pub locale: Arc<dyn LocaleFormatter>,
    pub epoch: AbsoluteEpoch,
    /// Joins the time and date lines of `%A`.
    pub date_line_separator: String,
    /// Anchor for `%r`; `None` measures from zero.
    pub reference_instant: Option<f64>,
}

impl Default for FormatContext {
    fn default() -> Self {
        Self {
            zone: ZonePolicy::Utc,
            names: LocaleNames::default(),
            twelve_hour_clock: false,
            locale: Arc::new(AxisLabelLocale::default()),
            epoch: AbsoluteEpoch::default(),
            date_line_separator: "\n".to_owned(),
            reference_instant: None,
        }
    }
}

/// Two-line absolute label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AbsoluteTimeLabel {
    pub time: String,
    pub date: String,
}

impl AbsoluteTimeLabel {
    #[must_use]
    pub fn joined(&self, separator: &str) -> String {
        let mut text = String::with_capacity(self.time.len() + separator.len() + self.date.len());
        text.push_str(&self.time);
        text.push_str(separator);
        text.push_str(&self.date);
        text
    }
}

impl fmt::Display for AbsoluteTimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.time, self.date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternToken {
    Literal(char),
    Absolute,
    Relative,
}

/// Parsed `timeformat` pattern.
///
/// `%A` renders the absolute label and `%r` the relative one. Any other
/// character after `%` is emitted as-is and a trailing `%` is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimePattern {
    tokens: Vec<PatternToken>,
}

impl TimePattern {
    #[must_use]
    pub fn parse(pattern: &str) -> Self {
        let mut tokens = Vec::with_capacity(pattern.len());
        let mut chars = pattern.chars();
        while let Some(ch) = chars.next() {
            if ch != '%' {
                tokens.push(PatternToken::Literal(ch));
                continue;
            }
            match chars.next() {
                Some('A') => tokens.push(PatternToken::Absolute),
                Some('r') => tokens.push(PatternToken::Relative),
                Some(other) => tokens.push(PatternToken::Literal(other)),
                None => {}
            }
        }
        Self { tokens }
    }

    #[must_use]
    pub fn tokens(&self) -> &[PatternToken] {
        &self.tokens
    }

    #[must_use]
    pub fn uses_relative(&self) -> bool {
        self.tokens.contains(&PatternToken::Relative)
    }

    #[must_use]
    pub fn render(&self, instant: f64, context: &FormatContext, show_milliseconds: bool) -> String {
        let mut text = String::with_capacity(self.tokens.len() + 24);
        for token in &self.tokens {
            match token {
                PatternToken::Literal(ch) => text.push(*ch),
                PatternToken::Absolute => {
                    let label = format_absolute_time(instant, context, show_milliseconds);
                    text.push_str(&label.joined(&context.date_line_separator));
                }
                PatternToken::Relative => text.push_str(&format_relative_time(
                    instant,
                    context.reference_instant,
                    show_milliseconds,
                )),
            }
        }
        text
    }
}

/// Formats `instant` (seconds) with a `timeformat` pattern.
#[must_use]
pub fn format_time(
    instant: f64,
    pattern: &str,
    context: &FormatContext,
    show_milliseconds: bool,
) -> String {
    TimePattern::parse(pattern).render(instant, context, show_milliseconds)
}

/// Wall-clock label for `instant`, measured from `context.epoch` and read
/// through `context.zone`. Instants outside the calendar range are clamped.
#[must_use]
pub fn format_absolute_time(
    instant: f64,
    context: &FormatContext,
    show_milliseconds: bool,
) -> AbsoluteTimeLabel {
    let unix_millis = context.epoch.to_unix_millis(seconds_to_millis(instant));
    let basis = TimeBasis::from_millis(unix_millis, context.zone.clone());
    let fields = basis.fields();

    let mut time = context
        .locale
        .short_time(&fields, &context.names, context.twelve_hour_clock);
    if show_milliseconds {
        insert_milliseconds(&mut time, fields.millisecond);
    }
    let date = context.locale.short_date(&fields, &context.names);

    AbsoluteTimeLabel { time, date }
}

/// Elapsed time from `reference` (zero when unset) as
/// `[-][days.]HH:MM:SS[.mmm]`.
#[must_use]
pub fn format_relative_time(
    instant: f64,
    reference: Option<f64>,
    show_milliseconds: bool,
) -> String {
    let delta = seconds_to_micros(instant)
        .saturating_sub(seconds_to_micros(reference.unwrap_or(0.0)));
    // Partial milliseconds are truncated, never rounded up.
    let total_millis = delta.unsigned_abs() / 1_000;
    let per_second = MILLIS_PER_SECOND.unsigned_abs();

    let milliseconds = total_millis % per_second;
    let total_seconds = total_millis / per_second;
    let seconds = total_seconds % 60;
    let total_minutes = total_seconds / 60;
    let minutes = total_minutes % 60;
    let total_hours = total_minutes / 60;
    let hours = total_hours % 24;
    let days = total_hours / 24;

    let mut text = String::with_capacity(16);
    if delta < 0 {
        text.push('-');
    }
    if days > 0 {
        let _ = write!(text, "{days}.");
    }
    let _ = write!(text, "{hours:02}:{minutes:02}:{seconds:02}");
    if show_milliseconds {
        let _ = write!(text, ".{milliseconds:03}");
    }
    text
}
