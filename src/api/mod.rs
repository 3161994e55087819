//! Time-axis pipeline: interval selection, tick generation and labels.

pub mod axis_config;
pub mod first_sample;
pub mod interval_selector;
pub mod locale_format;
pub mod tick_density;
pub mod tick_generator;
pub mod time_axis;
pub mod time_formatter;

pub use axis_config::TimeAxisOptions;
pub use first_sample::{SeriesData, SeriesDataSource, SeriesView, resolve_first_sample};
pub use interval_selector::{resolve_tick_interval, select_interval};
pub use locale_format::{AxisLabelLocale, LocaleFormatter, LocaleNames};
pub use tick_density::{LabelExtent, time_axis_tick_target_count};
pub use tick_generator::{MAX_TICK_ITERATIONS, TimeTicks, generate_ticks};
pub use time_axis::TimeAxis;
pub use time_formatter::{
    AbsoluteEpoch, AbsoluteTimeLabel, FormatContext, PatternToken, TimePattern,
    format_absolute_time, format_relative_time, format_time,
};
