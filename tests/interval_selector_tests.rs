use time_axis::api::{resolve_tick_interval, select_interval};
use time_axis::core::{AxisRange, TickInterval, TickSizeSetting, TimeUnit};

const YEAR: f64 = 365.2425 * 86_400.0;

#[test]
fn five_minute_interval_for_two_and_a_half_minute_delta() {
    let interval = select_interval(150.0, None, false);
    assert_eq!(interval, TickInterval::new(5.0, TimeUnit::Minute));
}

#[test]
fn ten_day_delta_selects_half_month() {
    let interval = select_interval(10.0 * 86_400.0, None, false);
    assert_eq!(interval, TickInterval::new(0.5, TimeUnit::Month));
}

#[test]
fn degenerate_deltas_select_smallest_candidate() {
    for delta in [0.0, -5.0, f64::NAN, f64::NEG_INFINITY] {
        let interval = select_interval(delta, None, false);
        assert_eq!(interval, TickInterval::new(1.0, TimeUnit::Millisecond));
    }
}

#[test]
fn minimum_tick_size_skips_smaller_candidates() {
    let minimum = TickSizeSetting::Interval(TickInterval::new(1.0, TimeUnit::Hour));
    let interval = select_interval(150.0, Some(minimum), false);
    assert_eq!(interval, TickInterval::new(1.0, TimeUnit::Hour));

    let interval = select_interval(150.0, Some(TickSizeSetting::Seconds(900.0)), false);
    assert_eq!(interval, TickInterval::new(30.0, TimeUnit::Minute));
}

#[test]
fn twenty_five_year_span_uses_normalized_year_multiplier() {
    let interval = select_interval(25.0 * YEAR, None, false);
    assert_eq!(interval.unit, TimeUnit::Year);
    assert_eq!(interval.multiplier, 20.0);

    let mantissa = interval.multiplier / 10.0;
    assert!(mantissa == 2.0 || mantissa == 5.0);
}

#[test]
fn year_candidates_follow_one_two_five_rule() {
    let cases = [(1.2, 1.0), (2.0, 2.0), (4.0, 5.0), (9.0, 10.0), (60.0, 50.0)];
    for (years, expected) in cases {
        let interval = select_interval(years * YEAR, None, false);
        assert_eq!(interval, TickInterval::new(expected, TimeUnit::Year), "{years} years");
    }
}

#[test]
fn short_spans_forced_to_years_clamp_to_one_year() {
    let minimum = TickSizeSetting::Seconds(200.0 * 86_400.0);
    let interval = select_interval(86_400.0, Some(minimum), false);
    assert_eq!(interval, TickInterval::new(1.0, TimeUnit::Year));
}

#[test]
fn explicit_year_minimum_is_floored_and_used_directly() {
    let minimum = TickSizeSetting::Interval(TickInterval::new(2.7, TimeUnit::Year));
    let interval = select_interval(3_600.0, Some(minimum), false);
    assert_eq!(interval, TickInterval::new(2.0, TimeUnit::Year));
}

#[test]
fn quarter_minimum_enables_quarter_candidates() {
    let range = AxisRange::new(0.0, 3_000_000.0)
        .expect("valid range")
        .with_min_tick_size(Some(TickSizeSetting::Interval(TickInterval::new(
            1.0,
            TimeUnit::Quarter,
        ))));
    assert_eq!(
        resolve_tick_interval(&range),
        TickInterval::new(1.0, TimeUnit::Quarter)
    );
}

#[test]
fn month_minimum_keeps_month_candidates() {
    let range = AxisRange::new(0.0, 3_000_000.0)
        .expect("valid range")
        .with_min_tick_size(Some(TickSizeSetting::Interval(TickInterval::new(
            3.0,
            TimeUnit::Month,
        ))));
    assert_eq!(
        resolve_tick_interval(&range),
        TickInterval::new(3.0, TimeUnit::Month)
    );
}

#[test]
fn fixed_tick_size_overrides_selection() {
    let range = AxisRange::new(0.0, 1_000_000.0)
        .expect("valid range")
        .with_tick_size(Some(TickSizeSetting::Seconds(300.0)));
    assert_eq!(
        resolve_tick_interval(&range),
        TickInterval::new(300.0, TimeUnit::Second)
    );

    let range = range.with_tick_size(Some(TickSizeSetting::Interval(TickInterval::new(
        2.0,
        TimeUnit::Month,
    ))));
    assert_eq!(
        resolve_tick_interval(&range),
        TickInterval::new(2.0, TimeUnit::Month)
    );
}

#[test]
fn target_tick_count_divides_the_span() {
    let range = AxisRange::new(0.0, 3_000.0)
        .expect("valid range")
        .with_target_ticks(10.0)
        .expect("valid tick count");
    assert_eq!(range.delta(), 300.0);
    assert_eq!(
        resolve_tick_interval(&range),
        TickInterval::new(10.0, TimeUnit::Minute)
    );
}

#[test]
fn axis_range_rejects_inverted_or_non_finite_bounds() {
    assert!(AxisRange::new(10.0, 0.0).is_err());
    assert!(AxisRange::new(f64::NAN, 0.0).is_err());
    let range = AxisRange::new(0.0, 10.0).expect("valid range");
    assert!(range.with_target_ticks(0.0).is_err());
}
