use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Local, Offset, TimeZone};
use indexmap::IndexMap;
use tracing::warn;

use crate::core::primitives::{MILLIS_PER_DAY, clamp_instant_millis};
use crate::error::{TimeAxisError, TimeAxisResult};

/// Injected timezone capability used to project instants into a named zone.
pub trait TimeZoneResolver: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Offset from UTC, in seconds, in effect at `utc_millis`.
    fn utc_offset_seconds(&self, utc_millis: i64) -> i32;

    /// Offset from UTC, in seconds, for a wall-clock time expressed as
    /// milliseconds since the local epoch.
    ///
    /// The default resolves through two UTC lookups, which settles on the
    /// earlier mapping around transitions.
    fn local_offset_seconds(&self, local_millis: i64) -> i32 {
        let first_guess = self.utc_offset_seconds(local_millis);
        let utc_guess = local_millis.saturating_sub(i64::from(first_guess) * 1_000);
        self.utc_offset_seconds(utc_guess)
    }
}

/// Lookup of named zones, e.g. a tz database.
pub trait TimeZoneProvider {
    fn resolve(&self, name: &str) -> Option<Arc<dyn TimeZoneResolver>>;
}

/// Zone with a constant UTC offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedOffsetZone {
    name: String,
    offset_seconds: i32,
}

impl FixedOffsetZone {
    pub fn new(name: impl Into<String>, offset_seconds: i32) -> TimeAxisResult<Self> {
        if i64::from(offset_seconds).abs() * 1_000 >= MILLIS_PER_DAY {
            return Err(TimeAxisError::InvalidConfig(format!(
                "fixed zone offset must be within one day, got {offset_seconds}s"
            )));
        }
        Ok(Self {
            name: name.into(),
            offset_seconds,
        })
    }

    pub fn from_minutes(name: impl Into<String>, minutes: i16) -> TimeAxisResult<Self> {
        Self::new(name, i32::from(minutes) * 60)
    }

    #[must_use]
    pub fn offset_seconds(&self) -> i32 {
        self.offset_seconds
    }
}

impl TimeZoneResolver for FixedOffsetZone {
    fn name(&self) -> &str {
        &self.name
    }

    fn utc_offset_seconds(&self, _utc_millis: i64) -> i32 {
        self.offset_seconds
    }

    fn local_offset_seconds(&self, _local_millis: i64) -> i32 {
        self.offset_seconds
    }
}

/// Ordered registry of named zones.
#[derive(Debug, Default, Clone)]
pub struct StaticTimeZoneProvider {
    zones: IndexMap<String, Arc<dyn TimeZoneResolver>>,
}

impl StaticTimeZoneProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_zone(mut self, zone: impl TimeZoneResolver + 'static) -> Self {
        self.insert(Arc::new(zone));
        self
    }

    /// Registers `zone` under its own name, replacing any previous entry.
    pub fn insert(&mut self, zone: Arc<dyn TimeZoneResolver>) {
        self.zones.insert(zone.name().to_owned(), zone);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.zones.keys().map(String::as_str)
    }
}

impl TimeZoneProvider for StaticTimeZoneProvider {
    fn resolve(&self, name: &str) -> Option<Arc<dyn TimeZoneResolver>> {
        self.zones.get(name).cloned()
    }
}

/// How calendar components of an instant are interpreted.
#[derive(Debug, Clone, Default)]
pub enum ZonePolicy {
    /// Host-local wall time.
    Local,
    /// UTC, independent of the host's zone.
    #[default]
    Utc,
    /// Zone backed by an injected resolver.
    Named(Arc<dyn TimeZoneResolver>),
}

impl ZonePolicy {
    /// Resolves the axis `timezone` setting: unset or `"utc"` selects UTC,
    /// `"browser"` selects host-local time, and any other name goes through
    /// `provider`, falling back to UTC when it cannot be resolved.
    #[must_use]
    pub fn from_setting(setting: Option<&str>, provider: Option<&dyn TimeZoneProvider>) -> Self {
        match setting {
            None | Some("utc") => Self::Utc,
            Some("browser") => Self::Local,
            Some(name) => match provider.and_then(|provider| provider.resolve(name)) {
                Some(resolver) => Self::Named(resolver),
                None => {
                    warn!(zone = name, "unresolved time zone, falling back to utc");
                    Self::Utc
                }
            },
        }
    }

    #[must_use]
    pub fn named(resolver: impl TimeZoneResolver + 'static) -> Self {
        Self::Named(Arc::new(resolver))
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Local => "browser",
            Self::Utc => "utc",
            Self::Named(resolver) => resolver.name(),
        }
    }

    /// Offset in milliseconds to add to a UTC instant to get local wall time.
    #[must_use]
    pub fn utc_offset_millis(&self, utc_millis: i64) -> i64 {
        match self {
            Self::Utc => 0,
            Self::Local => host_offset_seconds_at_utc(utc_millis) * 1_000,
            Self::Named(resolver) => i64::from(resolver.utc_offset_seconds(utc_millis)) * 1_000,
        }
    }

    #[must_use]
    pub fn utc_to_local(&self, utc_millis: i64) -> i64 {
        utc_millis.saturating_add(self.utc_offset_millis(utc_millis))
    }

    #[must_use]
    pub fn local_to_utc(&self, local_millis: i64) -> i64 {
        let offset_millis = match self {
            Self::Utc => 0,
            Self::Local => host_offset_seconds_at_local(local_millis) * 1_000,
            Self::Named(resolver) => i64::from(resolver.local_offset_seconds(local_millis)) * 1_000,
        };
        clamp_instant_millis(local_millis.saturating_sub(offset_millis))
    }
}

fn host_offset_seconds_at_utc(utc_millis: i64) -> i64 {
    Local
        .timestamp_millis_opt(utc_millis)
        .single()
        .map_or(0, |local| i64::from(local.offset().fix().local_minus_utc()))
}

fn host_offset_seconds_at_local(local_millis: i64) -> i64 {
    let Some(naive) = DateTime::from_timestamp_millis(local_millis).map(|dt| dt.naive_utc()) else {
        return 0;
    };
    // Wall times skipped by a transition borrow the offset in effect at the
    // same instant read as UTC.
    match Local.from_local_datetime(&naive).earliest() {
        Some(local) => i64::from(local.offset().fix().local_minus_utc()),
        None => host_offset_seconds_at_utc(local_millis),
    }
}

#[cfg(feature = "tz-database")]
pub use tz_database::{TzDatabaseProvider, TzDatabaseZone};

#[cfg(feature = "tz-database")]
mod tz_database {
    use std::sync::Arc;

    use chrono::{DateTime, Offset, TimeZone};
    use chrono_tz::Tz;

    use super::{TimeZoneProvider, TimeZoneResolver};

    /// IANA zone from the `chrono-tz` database.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TzDatabaseZone(pub Tz);

    impl TimeZoneResolver for TzDatabaseZone {
        fn name(&self) -> &str {
            self.0.name()
        }

        fn utc_offset_seconds(&self, utc_millis: i64) -> i32 {
            DateTime::from_timestamp_millis(utc_millis).map_or(0, |utc| {
                self.0
                    .offset_from_utc_datetime(&utc.naive_utc())
                    .fix()
                    .local_minus_utc()
            })
        }

        fn local_offset_seconds(&self, local_millis: i64) -> i32 {
            let Some(naive) = DateTime::from_timestamp_millis(local_millis).map(|dt| dt.naive_utc())
            else {
                return 0;
            };
            self.0
                .offset_from_local_datetime(&naive)
                .earliest()
                .map_or_else(
                    || self.utc_offset_seconds(local_millis),
                    |offset| offset.fix().local_minus_utc(),
                )
        }
    }

    /// Resolves any IANA zone name known to `chrono-tz`.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct TzDatabaseProvider;

    impl TimeZoneProvider for TzDatabaseProvider {
        fn resolve(&self, name: &str) -> Option<Arc<dyn TimeZoneResolver>> {
            name.parse::<Tz>()
                .ok()
                .map(|tz| Arc::new(TzDatabaseZone(tz)) as Arc<dyn TimeZoneResolver>)
        }
    }
}
