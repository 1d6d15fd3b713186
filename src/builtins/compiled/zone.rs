use alloc::{string::String, vec::Vec};

use crate::{builtins::TZ_PROVIDER, provider::ZoneRulesProvider, TemporalResult, ZoneId};

impl ZoneId {
    /// Resolves `id` against the bundled time zone database.
    ///
    /// ```rust
    /// use tempora_rs::ZoneId;
    ///
    /// assert_eq!(ZoneId::of("Europe/Paris").unwrap().id(), "Europe/Paris");
    /// assert_eq!(ZoneId::of("UTC+01:00").unwrap().id(), "UTC+01:00");
    /// assert!(ZoneId::of("Not/A_Zone").is_err());
    /// ```
    pub fn of(id: &str) -> TemporalResult<Self> {
        Self::of_with_provider(id, &*TZ_PROVIDER)
    }

    /// Returns every region id in the bundled database, sorted.
    #[must_use]
    pub fn available_zone_ids() -> Vec<String> {
        TZ_PROVIDER.available_zone_ids()
    }

    /// Returns the system time zone, falling back to UTC.
    #[cfg(feature = "sys")]
    #[must_use]
    pub fn system_default() -> Self {
        crate::sys::get_system_zone(&*TZ_PROVIDER)
    }
}
