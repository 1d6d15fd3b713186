//! The `Now` facade for reading the current date and time from a host.

use crate::{
    builtins::core::{Instant, LocalDate, LocalDateTime, LocalTime, ZoneId, ZonedDateTime},
    host::HostHooks,
    provider::ZoneRulesProvider,
    TemporalResult,
};

/// Reads the current instant and time zone from a set of [`HostHooks`].
///
/// ## Order of operations
///
/// When no zone is given, the host zone is resolved before the host instant
/// is read, so a slow zone lookup never makes the reported time stale.
///
/// ```rust
/// use tempora_rs::{host::FixedClock, provider::NeverProvider, Instant, Now, ZoneId, ZoneOffset};
///
/// let zone = ZoneId::Offset(ZoneOffset::of_hours(9).unwrap());
/// let now = Now::new(FixedClock::new(Instant::of_epoch_second(0).unwrap(), zone));
/// let local = now.local_date_time_with_provider(None, &NeverProvider).unwrap();
/// assert_eq!(local.to_string(), "1970-01-01T09:00");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Now<H: HostHooks> {
    host: H,
}

impl<H: HostHooks> Now<H> {
    pub const fn new(host: H) -> Self {
        Self { host }
    }

    /// Returns the host hooks.
    #[inline]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Returns the current instant.
    pub fn instant(&self) -> TemporalResult<Instant> {
        self.host.get_host_instant()
    }

    /// Returns the host time zone.
    pub fn zone_id_with_provider<P: ZoneRulesProvider + ?Sized>(
        &self,
        provider: &P,
    ) -> TemporalResult<ZoneId> {
        self.host.get_host_time_zone(provider)
    }

    /// Returns the current date-time in `zone`, or in the host zone.
    pub fn zoned_date_time_with_provider<P: ZoneRulesProvider + ?Sized>(
        &self,
        zone: Option<ZoneId>,
        provider: &P,
    ) -> TemporalResult<ZonedDateTime> {
        let zone = match zone {
            Some(zone) => zone,
            None => self.host.get_host_time_zone(provider)?,
        };
        ZonedDateTime::now(&self.host, zone)
    }

    /// Returns the current local date-time in `zone`, or in the host zone.
    pub fn local_date_time_with_provider<P: ZoneRulesProvider + ?Sized>(
        &self,
        zone: Option<ZoneId>,
        provider: &P,
    ) -> TemporalResult<LocalDateTime> {
        Ok(self
            .zoned_date_time_with_provider(zone, provider)?
            .to_local_date_time())
    }

    /// Returns the current local date in `zone`, or in the host zone.
    pub fn local_date_with_provider<P: ZoneRulesProvider + ?Sized>(
        &self,
        zone: Option<ZoneId>,
        provider: &P,
    ) -> TemporalResult<LocalDate> {
        Ok(self
            .local_date_time_with_provider(zone, provider)?
            .to_local_date())
    }

    /// Returns the current local time in `zone`, or in the host zone.
    pub fn local_time_with_provider<P: ZoneRulesProvider + ?Sized>(
        &self,
        zone: Option<ZoneId>,
        provider: &P,
    ) -> TemporalResult<LocalTime> {
        Ok(self
            .local_date_time_with_provider(zone, provider)?
            .to_local_time())
    }
}

#[cfg(test)]
mod tests {
    use super::Now;
    use crate::{
        host::FixedClock, provider::NeverProvider, Instant, LocalDate, LocalTime, ZoneId,
        ZoneOffset,
    };

    #[test]
    fn unit_host_is_epoch_utc() {
        let now = Now::new(());
        assert_eq!(now.instant().unwrap(), Instant::EPOCH);
        let zoned = now.zoned_date_time_with_provider(None, &NeverProvider).unwrap();
        assert_eq!(zoned.to_string(), "1970-01-01T00:00Z");
    }

    #[test]
    fn explicit_zone_wins() {
        let host_zone = ZoneId::Offset(ZoneOffset::of_hours(-3).unwrap());
        let instant = Instant::of_epoch_second(1_000_000_000).unwrap();
        let now = Now::new(FixedClock::new(instant, host_zone.clone()));

        assert_eq!(now.zone_id_with_provider(&NeverProvider).unwrap(), host_zone);
        assert_eq!(
            now.local_time_with_provider(None, &NeverProvider).unwrap(),
            LocalTime::of_hms(22, 46, 40).unwrap()
        );
        let tokyo = ZoneId::of_with_provider("+09:00", &NeverProvider).unwrap();
        assert_eq!(
            now.local_date_with_provider(Some(tokyo.clone()), &NeverProvider)
                .unwrap(),
            LocalDate::of(2001, 9, 9).unwrap()
        );
        let zoned = now
            .zoned_date_time_with_provider(Some(tokyo.clone()), &NeverProvider)
            .unwrap();
        assert_eq!(zoned.zone(), &tokyo);
        assert_eq!(zoned.to_instant().unwrap(), instant);
    }
}
