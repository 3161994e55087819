use proptest::prelude::*;
use time_axis::api::{MAX_TICK_ITERATIONS, generate_ticks, select_interval};
use time_axis::core::{TimeUnit, ZonePolicy, tick_spec_table};

proptest! {
    #[test]
    fn ticks_are_increasing_and_bracket_the_range(
        axis_min in -2_000_000_000.0f64..4_000_000_000.0,
        axis_span in 0.01f64..500_000_000.0,
        target_ticks in 1.0f64..20.0
    ) {
        let axis_max = axis_min + axis_span;
        let interval = select_interval(axis_span / target_ticks, None, false);
        let ticks = generate_ticks(axis_min, axis_max, interval, ZonePolicy::Utc);

        prop_assert!(!ticks.is_empty());
        prop_assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(ticks[0] <= axis_min + 1e-3);
        if ticks.len() < MAX_TICK_ITERATIONS {
            let last = ticks[ticks.len() - 1];
            prop_assert!(last >= axis_max);
        }
    }

    #[test]
    fn tick_generation_is_idempotent(
        axis_min in -1_000_000_000.0f64..2_000_000_000.0,
        axis_span in 1.0f64..100_000_000.0,
        target_ticks in 1.0f64..12.0
    ) {
        let axis_max = axis_min + axis_span;
        let interval = select_interval(axis_span / target_ticks, None, false);
        let first = generate_ticks(axis_min, axis_max, interval, ZonePolicy::Utc);
        let second = generate_ticks(axis_min, axis_max, interval, ZonePolicy::Utc);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn fixed_duration_ticks_are_evenly_spaced(
        axis_min in -1_000_000.0f64..1_000_000.0,
        axis_span in 1.0f64..2_000_000.0,
        target_ticks in 2.0f64..20.0
    ) {
        let interval = select_interval(axis_span / target_ticks, None, false);
        prop_assume!(!interval.unit.is_calendar());

        let ticks = generate_ticks(axis_min, axis_min + axis_span, interval, ZonePolicy::Utc);
        let step = interval.size_seconds();
        for pair in ticks.windows(2) {
            prop_assert!(((pair[1] - pair[0]) - step).abs() <= 1e-6 * step.max(1.0));
        }
    }

    #[test]
    fn selected_interval_respects_midpoint_rule(
        delta in 0.0001f64..5_000_000_000.0,
        quarter_enabled in any::<bool>()
    ) {
        let interval = select_interval(delta, None, quarter_enabled);
        prop_assert!(interval.size_seconds() > 0.0);

        if interval.unit == TimeUnit::Year {
            prop_assert!(interval.multiplier >= 1.0);
            let magnitude = 10.0f64.powf(interval.multiplier.log10().floor());
            let mantissa = interval.multiplier / magnitude;
            prop_assert!(
                [1.0, 2.0, 5.0, 10.0].iter().any(|nice| (mantissa - nice).abs() < 1e-9),
                "mantissa {mantissa}"
            );
        } else {
            let table = tick_spec_table(quarter_enabled);
            let index = table
                .iter()
                .position(|candidate| *candidate == interval)
                .expect("selected interval comes from the table");
            let midpoint = (table[index].size_seconds() + table[index + 1].size_seconds()) / 2.0;
            prop_assert!(2.0 * delta < midpoint);
            if index > 0 {
                let previous =
                    (table[index - 1].size_seconds() + table[index].size_seconds()) / 2.0;
                prop_assert!(2.0 * delta >= previous);
            }
        }
    }
}
