use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::time_unit::{TickInterval, TimeUnit};
use crate::core::time_zone::{TimeZoneProvider, ZonePolicy};
use crate::core::types::{AxisId, AxisRange};
use crate::error::TimeAxisResult;

use super::axis_config::TimeAxisOptions;
use super::first_sample::{SeriesDataSource, resolve_first_sample};
use super::interval_selector::resolve_tick_interval;
use super::locale_format::LocaleFormatter;
use super::tick_density::{LabelExtent, time_axis_tick_target_count};
use super::tick_generator::TimeTicks;
use super::time_formatter::{FormatContext, TimePattern};

/// Time axis with its own tick generator, tick formatter and memoized
/// first-sample anchor.
///
/// Built once per axis from configuration; [`TimeAxis::reset`] is the
/// rebuild path that drops cached state.
#[derive(Debug, Clone)]
pub struct TimeAxis {
    id: AxisId,
    options: TimeAxisOptions,
    pattern: Option<TimePattern>,
    context: FormatContext,
    tick_interval: Option<TickInterval>,
}

impl TimeAxis {
    pub fn new(
        id: AxisId,
        options: TimeAxisOptions,
        provider: Option<&dyn TimeZoneProvider>,
    ) -> TimeAxisResult<Self> {
        let options = options.validate()?;
        let zone = ZonePolicy::from_setting(options.timezone.as_deref(), provider);
        let context = FormatContext {
            zone,
            names: options.locale_names()?,
            twelve_hour_clock: options.twelve_hour_clock,
            locale: Arc::new(options.locale),
            epoch: options.epoch,
            date_line_separator: options.date_line_separator.clone(),
            reference_instant: None,
        };
        let pattern = options.timeformat.as_deref().map(TimePattern::parse);
        debug!(
            axis = ?id,
            zone = context.zone.label(),
            has_pattern = pattern.is_some(),
            "configured time axis"
        );

        Ok(Self {
            id,
            options,
            pattern,
            context,
            tick_interval: None,
        })
    }

    /// Replaces the built-in locale preset with an injected formatter.
    #[must_use]
    pub fn with_locale_formatter(mut self, locale: Arc<dyn LocaleFormatter>) -> Self {
        self.context.locale = locale;
        self
    }

    #[must_use]
    pub fn id(&self) -> AxisId {
        self.id
    }

    #[must_use]
    pub fn options(&self) -> &TimeAxisOptions {
        &self.options
    }

    #[must_use]
    pub fn zone(&self) -> &ZonePolicy {
        &self.context.zone
    }

    #[must_use]
    pub fn format_context(&self) -> &FormatContext {
        &self.context
    }

    /// Interval chosen by the most recent tick generation.
    #[must_use]
    pub fn tick_interval(&self) -> Option<TickInterval> {
        self.tick_interval
    }

    #[must_use]
    pub fn reference_instant(&self) -> Option<f64> {
        self.context.reference_instant
    }

    /// Pins the relative-mode anchor instead of deriving it from data.
    pub fn set_reference_instant(&mut self, reference_instant: f64) {
        self.context.reference_instant = Some(reference_instant).filter(|value| value.is_finite());
    }

    /// Drops the memoized anchor and the last interval.
    pub fn reset(&mut self) {
        self.context.reference_instant = None;
        self.tick_interval = None;
    }

    /// Resolves the relative-mode anchor once; later calls keep the cached
    /// value until [`TimeAxis::reset`].
    pub fn ensure_reference_instant<S>(&mut self, data: &S) -> Option<f64>
    where
        S: SeriesDataSource + ?Sized,
    {
        if self.context.reference_instant.is_none() {
            self.context.reference_instant = resolve_first_sample(data, self.id);
            if let Some(reference) = self.context.reference_instant {
                debug!(axis = ?self.id, reference, "memoized first sample");
            }
        }
        self.context.reference_instant
    }

    /// Builds the range handed to interval selection, with the configured
    /// tick count or `target_ticks` when given.
    #[must_use]
    pub fn axis_range(&self, min: f64, max: f64, target_ticks: Option<f64>) -> AxisRange {
        let target_ticks = target_ticks
            .or(self.options.ticks)
            .filter(|ticks| ticks.is_finite() && *ticks > 0.0)
            .unwrap_or(1.0);
        AxisRange {
            min,
            max,
            target_ticks,
            min_tick_size: self.options.min_tick_size,
            tick_size: self.options.tick_size,
        }
    }

    /// Generates ticks for the visible range `min..=max`.
    pub fn generate_ticks<S>(&mut self, min: f64, max: f64, data: &S) -> Vec<f64>
    where
        S: SeriesDataSource + ?Sized,
    {
        self.generate_ticks_in(self.axis_range(min, max, None), data)
    }

    /// Generates ticks with a density derived from the axis length in pixels
    /// and the size of the labels at both ends of the range.
    pub fn generate_ticks_for_span_px<S>(
        &mut self,
        min: f64,
        max: f64,
        axis_span_px: f64,
        data: &S,
    ) -> Vec<f64>
    where
        S: SeriesDataSource + ?Sized,
    {
        self.ensure_reference_instant(data);
        let extent = self.label_extent(min, max);
        let target_ticks = time_axis_tick_target_count(axis_span_px, self.id.direction, extent);
        trace!(axis = ?self.id, ?extent, target_ticks, "time axis density");
        self.generate_ticks_in(self.axis_range(min, max, Some(target_ticks as f64)), data)
    }

    /// Footprint of the labels `min` and `max` would get.
    #[must_use]
    pub fn label_extent(&self, min: f64, max: f64) -> LabelExtent {
        let Some(pattern) = self.pattern.as_ref() else {
            return LabelExtent::default();
        };
        let labels: Vec<String> = [min, max]
            .into_iter()
            .filter(|value| value.is_finite())
            .map(|value| pattern.render(value, &self.context, false))
            .collect();
        LabelExtent::measure(
            labels.iter().map(String::as_str),
            &self.context.date_line_separator,
        )
    }

    fn generate_ticks_in<S>(&mut self, range: AxisRange, data: &S) -> Vec<f64>
    where
        S: SeriesDataSource + ?Sized,
    {
        self.ensure_reference_instant(data);
        if !range.min.is_finite() || !range.max.is_finite() {
            return Vec::new();
        }

        let interval = resolve_tick_interval(&range);
        self.tick_interval = Some(interval);

        let epoch = self.context.epoch;
        let ticks: Vec<f64> = TimeTicks::new(
            epoch.to_unix_seconds(range.min),
            epoch.to_unix_seconds(range.max),
            interval,
            self.context.zone.clone(),
        )
        .map(|tick| epoch.from_unix_seconds(tick))
        .collect();
        trace!(axis = ?self.id, interval = %interval, count = ticks.len(), "time axis ticks");
        ticks
    }

    /// Label for a tick value, or `None` when the axis has no `timeformat`.
    #[must_use]
    pub fn format_tick(&self, value: f64) -> Option<String> {
        let pattern = self.pattern.as_ref()?;
        let show_milliseconds = self
            .tick_interval
            .is_some_and(|interval| interval.unit == TimeUnit::Millisecond);
        Some(pattern.render(value, &self.context, show_milliseconds))
    }

    /// One render pass: interval selection, tick generation, then one label
    /// per tick. Ticks are unlabeled (empty) without a `timeformat`.
    pub fn tick_labels<S>(&mut self, min: f64, max: f64, data: &S) -> Vec<(f64, String)>
    where
        S: SeriesDataSource + ?Sized,
    {
        let ticks = self.generate_ticks(min, max, data);
        ticks
            .into_iter()
            .map(|tick| (tick, self.format_tick(tick).unwrap_or_default()))
            .collect()
    }
}
