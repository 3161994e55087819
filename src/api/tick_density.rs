use crate::core::types::AxisDirection;

pub const TIME_LABEL_CHAR_WIDTH_PX: f64 = 7.0;
pub const TIME_LABEL_LINE_HEIGHT_PX: f64 = 14.0;
pub const TIME_LABEL_GAP_PX: f64 = 16.0;
pub const TIME_AXIS_MIN_TICKS: usize = 2;
pub const TIME_AXIS_MAX_TICKS: usize = 24;

/// Footprint of the widest tick label: characters on its longest line and
/// number of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelExtent {
    pub chars: usize,
    pub lines: usize,
}

impl Default for LabelExtent {
    /// One `HH:MM:SS` line.
    fn default() -> Self {
        Self { chars: 8, lines: 1 }
    }
}

impl LabelExtent {
    /// Widest footprint among `labels`, splitting lines on `line_separator`.
    /// Falls back to the default when `labels` is empty.
    pub fn measure<'a, I>(labels: I, line_separator: &str) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut widest: Option<Self> = None;
        for label in labels {
            let (chars, lines) = if line_separator.is_empty() {
                (label.chars().count(), 1)
            } else {
                label
                    .split(line_separator)
                    .fold((0, 0), |(chars, lines), line| {
                        (chars.max(line.chars().count()), lines + 1)
                    })
            };
            let current = widest.get_or_insert(Self { chars, lines });
            current.chars = current.chars.max(chars);
            current.lines = current.lines.max(lines);
        }
        widest.unwrap_or_default()
    }

    /// Distance between neighbouring ticks that keeps labels from touching
    /// along an axis running in `direction`.
    #[must_use]
    pub fn spacing_px(self, direction: AxisDirection) -> f64 {
        let along_axis = match direction {
            AxisDirection::X => self.chars.max(1) as f64 * TIME_LABEL_CHAR_WIDTH_PX,
            AxisDirection::Y => self.lines.max(1) as f64 * TIME_LABEL_LINE_HEIGHT_PX,
        };
        along_axis + TIME_LABEL_GAP_PX
    }
}

/// Number of ticks whose labels fit an axis `axis_span_px` long, clamped to
/// `TIME_AXIS_MIN_TICKS..=TIME_AXIS_MAX_TICKS`.
#[must_use]
pub fn time_axis_tick_target_count(
    axis_span_px: f64,
    direction: AxisDirection,
    extent: LabelExtent,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return TIME_AXIS_MIN_TICKS;
    }
    let fitting = (axis_span_px / extent.spacing_px(direction)).floor() as usize + 1;
    fitting.clamp(TIME_AXIS_MIN_TICKS, TIME_AXIS_MAX_TICKS)
}

#[cfg(test)]
mod tests {
    use super::{LabelExtent, time_axis_tick_target_count};
    use crate::core::types::AxisDirection;

    #[test]
    fn relative_labels_need_seventy_two_pixels() {
        let extent = LabelExtent::default();
        assert_eq!(extent.spacing_px(AxisDirection::X), 72.0);
        assert_eq!(time_axis_tick_target_count(720.0, AxisDirection::X, extent), 11);
        assert_eq!(time_axis_tick_target_count(10.0, AxisDirection::X, extent), 2);
        assert_eq!(time_axis_tick_target_count(100_000.0, AxisDirection::X, extent), 24);
    }

    #[test]
    fn two_line_labels_are_measured_by_their_longest_line() {
        let extent =
            LabelExtent::measure(["12:00:00 AM\n1/1/1970", "1:00:00 AM\n12/31/1969"], "\n");
        assert_eq!(extent, LabelExtent { chars: 11, lines: 2 });
        assert_eq!(extent.spacing_px(AxisDirection::X), 93.0);
        assert_eq!(extent.spacing_px(AxisDirection::Y), 44.0);

        let flat = LabelExtent::measure(["a<br>bcd"], "");
        assert_eq!(flat, LabelExtent { chars: 8, lines: 1 });
        assert_eq!(LabelExtent::measure(std::iter::empty(), "\n"), LabelExtent::default());
    }

    #[test]
    fn invalid_spans_fall_back_to_minimum() {
        let extent = LabelExtent::default();
        assert_eq!(time_axis_tick_target_count(f64::NAN, AxisDirection::X, extent), 2);
        assert_eq!(time_axis_tick_target_count(-5.0, AxisDirection::Y, extent), 2);
    }
}
