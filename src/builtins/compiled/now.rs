use crate::{
    builtins::{
        core::{LocalDate, LocalDateTime, LocalTime, Now, ZoneId, ZonedDateTime},
        TZ_PROVIDER,
    },
    host::HostHooks,
    TemporalResult,
};

/// The following [`Now`] methods resolve the host zone with the bundled time
/// zone database and are feature gated behind the `tzdb` feature.
impl<H: HostHooks> Now<H> {
    pub fn zone_id(&self) -> TemporalResult<ZoneId> {
        self.zone_id_with_provider(&*TZ_PROVIDER)
    }

    pub fn zoned_date_time(&self, zone: Option<ZoneId>) -> TemporalResult<ZonedDateTime> {
        self.zoned_date_time_with_provider(zone, &*TZ_PROVIDER)
    }

    pub fn local_date_time(&self, zone: Option<ZoneId>) -> TemporalResult<LocalDateTime> {
        self.local_date_time_with_provider(zone, &*TZ_PROVIDER)
    }

    pub fn local_date(&self, zone: Option<ZoneId>) -> TemporalResult<LocalDate> {
        self.local_date_with_provider(zone, &*TZ_PROVIDER)
    }

    pub fn local_time(&self, zone: Option<ZoneId>) -> TemporalResult<LocalTime> {
        self.local_time_with_provider(zone, &*TZ_PROVIDER)
    }
}
