use approx::assert_relative_eq;
use chrono::{Datelike, Local, TimeZone, Timelike};
use time_axis::core::{
    FixedOffsetZone, StaticTimeZoneProvider, TimeBasis, TimeZoneProvider, TimeZoneResolver,
    ZonePolicy,
};
use time_axis::core::primitives::{max_instant_millis, min_instant_millis};

#[test]
fn fixed_offset_zone_shifts_calendar_fields() {
    let zone = ZonePolicy::named(FixedOffsetZone::from_minutes("UTC+05:30", 330).expect("valid"));
    let basis = TimeBasis::from_seconds(0.0, zone);
    assert_eq!((basis.year(), basis.month(), basis.day()), (1970, 0, 1));
    assert_eq!((basis.hour(), basis.minute()), (5, 30));
    assert_eq!(basis.weekday(), 4);
}

#[test]
fn setters_compose_back_through_the_zone() {
    let zone = ZonePolicy::named(FixedOffsetZone::new("UTC-03", -3 * 3_600).expect("valid"));
    let mut basis = TimeBasis::from_seconds(0.0, zone);
    assert_eq!((basis.day(), basis.hour()), (31, 21));

    basis.set_hour(0);
    assert_relative_eq!(basis.seconds(), -21.0 * 3_600.0);
    basis.set_day(0);
    assert_eq!((basis.month(), basis.day()), (10, 30));
}

#[test]
fn fixed_offsets_of_a_day_or_more_are_rejected() {
    assert!(FixedOffsetZone::new("bad", 86_400).is_err());
    assert!(FixedOffsetZone::new("bad", -90_000).is_err());
    assert_eq!(
        FixedOffsetZone::new("edge", 86_399)
            .expect("valid")
            .offset_seconds(),
        86_399
    );
}

#[test]
fn out_of_range_instants_are_clamped() {
    let high = TimeBasis::from_seconds(1.0e20, ZonePolicy::Utc);
    assert_eq!(high.millis(), max_instant_millis());
    let low = TimeBasis::from_seconds(-1.0e20, ZonePolicy::Utc);
    assert_eq!(low.millis(), min_instant_millis());

    let mut year = TimeBasis::from_seconds(0.0, ZonePolicy::Utc);
    year.set_year(i64::MAX);
    assert!(year.millis() <= max_instant_millis());
}

#[test]
fn pre_epoch_instants_read_as_previous_day() {
    let basis = TimeBasis::from_seconds(-86_400.0, ZonePolicy::Utc);
    assert_eq!((basis.year(), basis.month(), basis.day()), (1969, 11, 31));
    assert_eq!(basis.weekday(), 3);
}

#[test]
fn local_policy_matches_host_wall_clock() {
    let seconds = 1_700_000_000_i64;
    let basis = TimeBasis::from_seconds(seconds as f64, ZonePolicy::Local);
    let host = Local
        .timestamp_opt(seconds, 0)
        .single()
        .expect("unambiguous instant");

    assert_eq!(basis.year(), host.year());
    assert_eq!(basis.month(), host.month0());
    assert_eq!(basis.day(), host.day());
    assert_eq!(basis.hour(), host.hour());
    assert_eq!(basis.minute(), host.minute());
}

#[test]
fn zone_settings_resolve_to_policies() {
    let provider = StaticTimeZoneProvider::new()
        .with_zone(FixedOffsetZone::from_minutes("Asia/Tokyo", 540).expect("valid"))
        .with_zone(FixedOffsetZone::from_minutes("America/Bogota", -300).expect("valid"));
    assert_eq!(
        provider.names().collect::<Vec<_>>(),
        vec!["Asia/Tokyo", "America/Bogota"]
    );

    assert!(matches!(ZonePolicy::from_setting(None, None), ZonePolicy::Utc));
    assert!(matches!(
        ZonePolicy::from_setting(Some("utc"), Some(&provider)),
        ZonePolicy::Utc
    ));
    assert!(matches!(
        ZonePolicy::from_setting(Some("browser"), None),
        ZonePolicy::Local
    ));

    let tokyo = ZonePolicy::from_setting(Some("Asia/Tokyo"), Some(&provider));
    assert_eq!(tokyo.label(), "Asia/Tokyo");
    assert_eq!(tokyo.utc_offset_millis(0), 9 * 3_600_000);

    let missing = ZonePolicy::from_setting(Some("Asia/Tokyo"), None);
    assert!(matches!(missing, ZonePolicy::Utc));
}

#[test]
fn provider_replaces_zone_registered_under_same_name() {
    let mut provider = StaticTimeZoneProvider::new()
        .with_zone(FixedOffsetZone::new("Custom", 3_600).expect("valid"));
    provider.insert(std::sync::Arc::new(
        FixedOffsetZone::new("Custom", 7_200).expect("valid"),
    ));

    let resolved = provider.resolve("Custom").expect("registered zone");
    assert_eq!(resolved.name(), "Custom");
    assert_eq!(resolved.utc_offset_seconds(0), 7_200);
    assert_eq!(provider.names().count(), 1);
}

#[derive(Debug)]
struct SummerTimeZone;

impl TimeZoneResolver for SummerTimeZone {
    fn name(&self) -> &str {
        "Summer"
    }

    // +1h before the transition at t = 1_000_000 s, +2h after.
    fn utc_offset_seconds(&self, utc_millis: i64) -> i32 {
        if utc_millis < 1_000_000_000 { 3_600 } else { 7_200 }
    }
}

#[test]
fn default_local_offset_resolution_uses_two_lookups() {
    let zone = SummerTimeZone;
    assert_eq!(zone.local_offset_seconds(0), 3_600);
    assert_eq!(zone.local_offset_seconds(2_000_000_000), 7_200);

    let policy = ZonePolicy::named(SummerTimeZone);
    let mut basis = TimeBasis::from_millis(1_500_000_000, policy);
    assert_eq!((basis.hour(), basis.minute()), (10, 40));
    basis.set_minute(0);
    assert_eq!(basis.hour(), 10);
    assert_eq!(basis.minute(), 0);
}

#[cfg(feature = "tz-database")]
#[test]
fn tz_database_provider_resolves_iana_names() {
    use time_axis::core::TzDatabaseProvider;

    let policy = ZonePolicy::from_setting(Some("America/New_York"), Some(&TzDatabaseProvider));
    assert_eq!(policy.label(), "America/New_York");

    // 2024-07-01T12:00:00Z is 08:00 EDT.
    let summer = TimeBasis::from_seconds(1_719_835_200.0, policy.clone());
    assert_eq!(summer.hour(), 8);
    // 2024-01-01T12:00:00Z is 07:00 EST.
    let winter = TimeBasis::from_seconds(1_704_110_400.0, policy);
    assert_eq!(winter.hour(), 7);

    assert!(matches!(
        ZonePolicy::from_setting(Some("Not/AZone"), Some(&TzDatabaseProvider)),
        ZonePolicy::Utc
    ));
}
