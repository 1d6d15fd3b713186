//! Host hooks backed by the operating system.
//!
//! The clock is read with [`web_time::SystemTime`] and the zone with
//! [`iana_time_zone`].

use crate::{
    builtins::core::{Instant, Now, ZoneId, ZoneOffset},
    host::{HostClock, HostHooks, HostTimeZone},
    provider::ZoneRulesProvider,
    TemporalError, TemporalResult,
};
use web_time::{SystemTime, UNIX_EPOCH};

/// The system clock in the system time zone.
///
/// When the system zone cannot be determined, or is unknown to the provider,
/// the zone falls back to UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemClock;

impl HostClock for SystemClock {
    fn get_host_instant(&self) -> TemporalResult<Instant> {
        get_system_instant()
    }
}

impl HostTimeZone for SystemClock {
    fn get_host_time_zone<P: ZoneRulesProvider + ?Sized>(
        &self,
        provider: &P,
    ) -> TemporalResult<ZoneId> {
        Ok(get_system_zone(provider))
    }
}

impl HostHooks for SystemClock {}

/// The system clock in UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UtcSystemClock;

impl HostClock for UtcSystemClock {
    fn get_host_instant(&self) -> TemporalResult<Instant> {
        get_system_instant()
    }
}

impl HostTimeZone for UtcSystemClock {
    fn get_host_time_zone<P: ZoneRulesProvider + ?Sized>(&self, _: &P) -> TemporalResult<ZoneId> {
        Ok(ZoneId::Offset(ZoneOffset::UTC))
    }
}

impl HostHooks for UtcSystemClock {}

impl Now<SystemClock> {
    /// A `Now` reading the system clock in the system time zone.
    #[must_use]
    pub const fn local() -> Self {
        Self::new(SystemClock)
    }
}

impl Now<UtcSystemClock> {
    /// A `Now` reading the system clock in UTC.
    #[must_use]
    pub const fn utc() -> Self {
        Self::new(UtcSystemClock)
    }
}

/// Returns the current system time as an instant.
pub(crate) fn get_system_instant() -> TemporalResult<Instant> {
    let (seconds, nanos) = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(after) => (
            i64::try_from(after.as_secs()).map_err(|_| clock_error())?,
            i64::from(after.subsec_nanos()),
        ),
        Err(before) => {
            let before = before.duration();
            (
                -i64::try_from(before.as_secs()).map_err(|_| clock_error())?,
                -i64::from(before.subsec_nanos()),
            )
        }
    };
    Instant::of_epoch_second_adjusted(seconds, nanos)
}

/// Returns the system time zone, or UTC when it cannot be resolved.
pub(crate) fn get_system_zone<P: ZoneRulesProvider + ?Sized>(provider: &P) -> ZoneId {
    let resolved = iana_time_zone::get_timezone()
        .map_err(|_| TemporalError::general("Error fetching the system time zone"))
        .and_then(|id| ZoneId::of_with_provider(&id, provider));
    match resolved {
        Ok(zone) => zone,
        Err(_e) => {
            #[cfg(feature = "log")]
            log::warn!("falling back to UTC: {_e}");
            ZoneId::Offset(ZoneOffset::UTC)
        }
    }
}

#[inline]
fn clock_error() -> TemporalError {
    TemporalError::general("Error fetching system time")
}

#[cfg(test)]
mod tests {
    use super::{SystemClock, UtcSystemClock};
    use crate::{provider::NeverProvider, tzdb::TzdbProvider, Instant, Now, ZoneId, ZoneOffset};

    #[test]
    fn system_clock_is_after_2020() {
        let instant = Now::local().instant().unwrap();
        assert!(instant > Instant::of_epoch_second(1_577_836_800).unwrap());
    }

    #[test]
    fn utc_clock_zone() {
        let now = Now::new(UtcSystemClock);
        assert_eq!(
            now.zone_id_with_provider(&NeverProvider).unwrap(),
            ZoneId::Offset(ZoneOffset::UTC)
        );
    }

    #[test]
    fn local_zone_always_resolves() {
        // Every outcome, including the UTC fallback, is a usable zone.
        let zone = Now::new(SystemClock)
            .zone_id_with_provider(&TzdbProvider::default())
            .unwrap();
        assert!(!zone.id().is_empty());
    }
}
