use tracing::debug;

use crate::core::time_unit::{TickInterval, TimeUnit, tick_spec_table};
use crate::core::types::{AxisRange, TickSizeSetting};

/// Picks the tick interval for a per-tick `delta` (seconds).
///
/// Candidates are walked in ascending order and the first one whose
/// midpoint with its successor exceeds `2 * delta` wins, as long as it is
/// not smaller than `min_tick_size`. When nothing qualifies the selection
/// falls through to years, sized with a 1-2-5 rule on the decade magnitude.
///
/// A zero, negative or non-finite `delta` selects the smallest acceptable
/// candidate.
#[must_use]
pub fn select_interval(
    delta: f64,
    min_tick_size: Option<TickSizeSetting>,
    quarter_enabled: bool,
) -> TickInterval {
    let delta = if delta.is_finite() && delta > 0.0 {
        delta
    } else {
        0.0
    };
    let candidates = tick_spec_table(quarter_enabled);
    let min_size = min_tick_size.map_or(0.0, TickSizeSetting::size_seconds);
    let target = 2.0 * delta;

    let index = candidates
        .windows(2)
        .position(|pair| {
            let size = pair[0].size_seconds();
            target < (size + pair[1].size_seconds()) / 2.0 && size >= min_size
        })
        .unwrap_or(candidates.len() - 1);
    let selected = candidates[index];

    if selected.unit != TimeUnit::Year {
        debug!(delta, interval = %selected, "selected time tick interval");
        return selected;
    }

    let multiplier = match min_tick_size {
        Some(TickSizeSetting::Interval(minimum)) if minimum.unit == TimeUnit::Year => {
            minimum.multiplier.floor()
        }
        _ => nice_year_multiplier(delta),
    };
    let selected = TickInterval::new(multiplier.max(1.0), TimeUnit::Year);
    debug!(delta, interval = %selected, "selected multi-year tick interval");
    selected
}

/// Applies axis configuration on top of [`select_interval`]: a fixed tick
/// size wins outright, and quarter candidates are enabled only when the
/// minimum tick size is expressed in quarters.
#[must_use]
pub fn resolve_tick_interval(range: &AxisRange) -> TickInterval {
    if let Some(fixed) = range.tick_size {
        return fixed.to_interval();
    }

    let quarter_enabled = range
        .min_tick_size
        .is_some_and(|minimum| minimum.unit() == Some(TimeUnit::Quarter));
    select_interval(range.delta(), range.min_tick_size, quarter_enabled)
}

fn nice_year_multiplier(delta: f64) -> f64 {
    let years = delta / TimeUnit::Year.size_seconds();
    if !years.is_finite() || years <= 0.0 {
        return 1.0;
    }

    let magnitude = 10.0_f64.powf(years.log10().floor());
    let normalized = years / magnitude;
    let nice = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.5 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}
