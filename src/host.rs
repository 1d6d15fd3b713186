//! Trait definitions for accessing values from the host environment.
//!
//! NOTE: This is a power user API.
//!
//! Nothing in this crate reads a hardware clock on its own. Every "now"
//! constructor takes a [`HostClock`], and the [`Now`][crate::Now] facade
//! takes a full set of [`HostHooks`].

use crate::{
    builtins::core::{Instant, ZoneId},
    provider::ZoneRulesProvider,
    TemporalResult,
};

/// The `HostClock` trait defines an accessor to the host's clock.
pub trait HostClock {
    fn get_host_instant(&self) -> TemporalResult<Instant>;
}

/// The `HostTimeZone` trait defines the host's time zone.
pub trait HostTimeZone {
    fn get_host_time_zone<P: ZoneRulesProvider + ?Sized>(
        &self,
        provider: &P,
    ) -> TemporalResult<ZoneId>;
}

/// `HostHooks` marks whether a trait implements the required host hooks with some
/// system methods.
pub trait HostHooks: HostClock + HostTimeZone {}

/// The empty hooks: a clock stopped at the epoch in UTC.
impl HostClock for () {
    fn get_host_instant(&self) -> TemporalResult<Instant> {
        Ok(Instant::EPOCH)
    }
}

impl HostTimeZone for () {
    fn get_host_time_zone<P: ZoneRulesProvider + ?Sized>(&self, _: &P) -> TemporalResult<ZoneId> {
        Ok(ZoneId::Offset(crate::ZoneOffset::UTC))
    }
}

impl HostHooks for () {}

/// A clock that always reports the same instant in the same zone.
///
/// ```rust
/// use tempora_rs::{host::FixedClock, Instant, LocalDate, ZoneId, ZoneOffset};
///
/// let zone = ZoneId::Offset(ZoneOffset::of_hours(-5).unwrap());
/// let clock = FixedClock::new(Instant::of_epoch_second(0).unwrap(), zone.clone());
/// let today = LocalDate::now(&clock, &zone).unwrap();
/// assert_eq!(today, LocalDate::of(1969, 12, 31).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock {
    instant: Instant,
    zone: ZoneId,
}

impl FixedClock {
    #[must_use]
    pub const fn new(instant: Instant, zone: ZoneId) -> Self {
        Self { instant, zone }
    }

    #[inline]
    #[must_use]
    pub const fn instant(&self) -> Instant {
        self.instant
    }

    #[inline]
    #[must_use]
    pub const fn zone(&self) -> &ZoneId {
        &self.zone
    }
}

impl HostClock for FixedClock {
    fn get_host_instant(&self) -> TemporalResult<Instant> {
        Ok(self.instant)
    }
}

impl HostTimeZone for FixedClock {
    fn get_host_time_zone<P: ZoneRulesProvider + ?Sized>(&self, _: &P) -> TemporalResult<ZoneId> {
        Ok(self.zone.clone())
    }
}

impl HostHooks for FixedClock {}
