//! This module implements `ZonedDateTime`, a date-time resolved in a time zone.

use alloc::format;

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    builtins::core::{
        rules::LocalResolution, Duration, Instant, LocalDate, LocalDateTime, LocalTime, Period,
        ZoneId, ZoneOffset,
    },
    fields::{ChronoField, TemporalField, ValueRange},
    host::HostClock,
    iso::{DayOfWeek, Month},
    parsers,
    provider::ZoneRulesProvider,
    temporal::{unsupported_unit, Temporal, TemporalAccessor},
    units::{ChronoUnit, TemporalUnit},
    TemporalError, TemporalResult,
};

#[cfg(test)]
mod tests;

/// A date-time with an offset and a time zone, such as
/// `2007-12-03T10:15:30+01:00[Europe/Paris]`.
///
/// The offset is always one of the offsets the zone's rules allow for the
/// local date-time. The only ways to build a value are the resolution
/// algorithms below, so that invariant cannot be bypassed:
///
/// - [`ZonedDateTime::of_local`] resolves a local date-time, moving it
///   forward over a gap and choosing an offset in an overlap;
/// - [`ZonedDateTime::of_strict`] accepts an offset only if it is valid;
/// - [`ZonedDateTime::of_instant`] derives the offset from an instant.
///
/// Calendar arithmetic (days and longer) operates on the local date-time and
/// re-resolves it, keeping the wall-clock reading. Time arithmetic operates
/// on the instant, keeping the elapsed time exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZonedDateTime {
    dt: LocalDateTime,
    offset: ZoneOffset,
    zone: ZoneId,
}

// ==== Private API ====

impl ZonedDateTime {
    /// Creates a value from an instant given in epoch seconds.
    fn create(epoch_second: i64, nano_of_second: u32, zone: ZoneId) -> TemporalResult<Self> {
        let instant = Instant::of_epoch_second_adjusted(epoch_second, i64::from(nano_of_second))?;
        let offset = zone.rules().offset(&instant)?;
        let dt = LocalDateTime::of_epoch_second(epoch_second, nano_of_second as i32, offset)?;
        Ok(Self { dt, offset, zone })
    }

    /// Re-resolves a new local date-time, preferring the current offset.
    fn resolve_local(&self, dt: LocalDateTime) -> TemporalResult<Self> {
        Self::of_local(dt, self.zone.clone(), Some(self.offset))
    }

    /// Resolves a new local date-time as an instant in the current offset.
    fn resolve_instant(&self, dt: LocalDateTime) -> TemporalResult<Self> {
        Self::of_instant_with_offset(dt, self.offset, self.zone.clone())
    }

    /// Changes the offset if it is valid for the local date-time.
    fn resolve_offset(&self, offset: ZoneOffset) -> TemporalResult<Self> {
        if offset != self.offset && self.zone.rules().is_valid_offset(&self.dt, offset)? {
            return Ok(Self {
                dt: self.dt,
                offset,
                zone: self.zone.clone(),
            });
        }
        Ok(self.clone())
    }
}

// ==== Public API ====

impl ZonedDateTime {
    /// Resolves a local date-time in `zone`.
    ///
    /// - When exactly one offset is valid, it is used.
    /// - In a gap, the local date-time moves forward by the length of the gap
    ///   and takes the offset after the transition.
    /// - In an overlap, `preferred_offset` is used when it is one of the two
    ///   valid offsets, otherwise the earlier offset is.
    pub fn of_local(
        local: LocalDateTime,
        zone: ZoneId,
        preferred_offset: Option<ZoneOffset>,
    ) -> TemporalResult<Self> {
        if let ZoneId::Offset(offset) = zone {
            return Ok(Self {
                dt: local,
                offset,
                zone,
            });
        }
        let resolution = zone.rules().classify(&local)?;
        let (dt, offset) = match resolution {
            LocalResolution::Normal(offset) => (local, offset),
            LocalResolution::Gap(transition) => (
                local.plus_seconds(transition.duration().seconds())?,
                transition.offset_after(),
            ),
            LocalResolution::Overlap(transition) => {
                let offset = preferred_offset
                    .filter(|o| transition.is_valid_offset(*o))
                    .unwrap_or(transition.offset_before());
                (local, offset)
            }
        };
        Ok(Self { dt, offset, zone })
    }

    /// Resolves a local date-time in `zone` without an offset preference.
    pub fn of(local: LocalDateTime, zone: ZoneId) -> TemporalResult<Self> {
        Self::of_local(local, zone, None)
    }

    /// Creates a value from a local date-time and an offset that must be
    /// valid for it in `zone`.
    ///
    /// Fails with a [`ErrorKind::ZoneResolution`][crate::error::ErrorKind::ZoneResolution]
    /// error if the local date-time falls in a gap, or if `offset` is not
    /// one of the valid offsets.
    pub fn of_strict(local: LocalDateTime, offset: ZoneOffset, zone: ZoneId) -> TemporalResult<Self> {
        let rules = zone.rules();
        if !rules.is_valid_offset(&local, offset)? {
            let in_gap = rules
                .transition(&local)?
                .is_some_and(|transition| transition.is_gap());
            let message = if in_gap {
                format!("LocalDateTime '{local}' falls in a gap in zone '{zone}'")
            } else {
                format!("ZoneOffset '{offset}' is not valid for LocalDateTime '{local}' in zone '{zone}'")
            };
            return Err(TemporalError::zone().with_message(message));
        }
        drop(rules);
        Ok(Self {
            dt: local,
            offset,
            zone,
        })
    }

    /// Creates a value at `instant` in `zone`.
    pub fn of_instant(instant: Instant, zone: ZoneId) -> TemporalResult<Self> {
        Self::create(instant.epoch_second(), instant.nano(), zone)
    }

    /// Creates a value at the instant given by `local` at `offset`, expressed
    /// in `zone`.
    pub fn of_instant_with_offset(
        local: LocalDateTime,
        offset: ZoneOffset,
        zone: ZoneId,
    ) -> TemporalResult<Self> {
        Self::create(local.to_epoch_second(offset), local.nano(), zone)
    }

    /// Obtains the current date-time from `clock` in `zone`.
    pub fn now<C: HostClock + ?Sized>(clock: &C, zone: ZoneId) -> TemporalResult<Self> {
        Self::of_instant(Instant::now(clock)?, zone)
    }

    /// Parses text such as `2007-12-03T10:15:30+01:00[Europe/Paris]`,
    /// resolving the bracketed zone with `provider`.
    ///
    /// An offset, a bracketed zone or both must be present. With both, the
    /// instant given by the offset is expressed in the zone.
    pub fn parse_with_provider<P: ZoneRulesProvider + ?Sized>(
        text: &str,
        provider: &P,
    ) -> TemporalResult<Self> {
        let parsed = parsers::parse_zoned_date_time(text)?;
        match (parsed.offset, parsed.zone) {
            (Some(offset), None) => Self::of_local(parsed.date_time, ZoneId::Offset(offset), None),
            (None, Some(id)) => {
                Self::of_local(parsed.date_time, ZoneId::of_with_provider(id, provider)?, None)
            }
            (Some(offset), Some(id)) => Self::of_instant_with_offset(
                parsed.date_time,
                offset,
                ZoneId::of_with_provider(id, provider)?,
            ),
            (None, None) => Err(TemporalError::parse()
                .with_message("A zoned date-time requires an offset or a zone")),
        }
    }

    #[inline]
    #[must_use]
    pub const fn offset(&self) -> ZoneOffset {
        self.offset
    }

    #[inline]
    #[must_use]
    pub const fn zone(&self) -> &ZoneId {
        &self.zone
    }

    #[inline]
    #[must_use]
    pub const fn to_local_date_time(&self) -> LocalDateTime {
        self.dt
    }

    #[inline]
    #[must_use]
    pub const fn to_local_date(&self) -> LocalDate {
        self.dt.to_local_date()
    }

    #[inline]
    #[must_use]
    pub const fn to_local_time(&self) -> LocalTime {
        self.dt.to_local_time()
    }

    #[inline]
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.dt.year()
    }

    #[inline]
    #[must_use]
    pub const fn month_value(&self) -> u8 {
        self.dt.month_value()
    }

    #[inline]
    #[must_use]
    pub const fn month(&self) -> Month {
        self.dt.month()
    }

    #[inline]
    #[must_use]
    pub const fn day_of_month(&self) -> u8 {
        self.dt.day_of_month()
    }

    #[inline]
    #[must_use]
    pub const fn day_of_year(&self) -> u16 {
        self.dt.day_of_year()
    }

    #[inline]
    #[must_use]
    pub const fn day_of_week(&self) -> DayOfWeek {
        self.dt.day_of_week()
    }

    #[inline]
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.dt.hour()
    }

    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.dt.minute()
    }

    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.dt.second()
    }

    #[inline]
    #[must_use]
    pub const fn nano(&self) -> u32 {
        self.dt.nano()
    }

    /// Returns the number of seconds from 1970-01-01T00:00Z.
    #[inline]
    #[must_use]
    pub const fn to_epoch_second(&self) -> i64 {
        self.dt.to_epoch_second(self.offset)
    }

    /// Returns the instant this value represents.
    pub fn to_instant(&self) -> TemporalResult<Instant> {
        Instant::of_epoch_second_adjusted(self.to_epoch_second(), i64::from(self.nano()))
    }

    // ==== Zone and offset changes ====

    /// Returns this local date-time in `zone`, keeping the current offset if
    /// it is still valid.
    pub fn with_zone_same_local(&self, zone: ZoneId) -> TemporalResult<Self> {
        if self.zone == zone {
            return Ok(self.clone());
        }
        Self::of_local(self.dt, zone, Some(self.offset))
    }

    /// Returns this instant in `zone`.
    pub fn with_zone_same_instant(&self, zone: ZoneId) -> TemporalResult<Self> {
        if self.zone == zone {
            return Ok(self.clone());
        }
        Self::create(self.to_epoch_second(), self.nano(), zone)
    }

    /// Returns a copy using the earlier offset if this value is in an overlap.
    pub fn with_earlier_offset_at_overlap(&self) -> TemporalResult<Self> {
        match self.zone.rules().classify(&self.dt)? {
            LocalResolution::Overlap(transition) => self.resolve_offset(transition.offset_before()),
            _ => Ok(self.clone()),
        }
    }

    /// Returns a copy using the later offset if this value is in an overlap.
    pub fn with_later_offset_at_overlap(&self) -> TemporalResult<Self> {
        match self.zone.rules().classify(&self.dt)? {
            LocalResolution::Overlap(transition) => self.resolve_offset(transition.offset_after()),
            _ => Ok(self.clone()),
        }
    }

    /// Returns a copy whose zone is the fixed current offset.
    #[must_use]
    pub fn with_fixed_offset_zone(&self) -> Self {
        Self {
            dt: self.dt,
            offset: self.offset,
            zone: ZoneId::Offset(self.offset),
        }
    }

    // ==== Field helpers ====

    pub fn with_year(&self, year: i64) -> TemporalResult<Self> {
        self.resolve_local(self.dt.with_year(year)?)
    }

    pub fn with_month(&self, month: i32) -> TemporalResult<Self> {
        self.resolve_local(self.dt.with_month(month)?)
    }

    pub fn with_day_of_month(&self, day: i32) -> TemporalResult<Self> {
        self.resolve_local(self.dt.with_day_of_month(day)?)
    }

    pub fn with_day_of_year(&self, day_of_year: i32) -> TemporalResult<Self> {
        self.resolve_local(self.dt.with_day_of_year(day_of_year)?)
    }

    pub fn with_hour(&self, hour: i32) -> TemporalResult<Self> {
        self.resolve_local(self.dt.with_hour(hour)?)
    }

    pub fn with_minute(&self, minute: i32) -> TemporalResult<Self> {
        self.resolve_local(self.dt.with_minute(minute)?)
    }

    pub fn with_second(&self, second: i32) -> TemporalResult<Self> {
        self.resolve_local(self.dt.with_second(second)?)
    }

    pub fn with_nano(&self, nano: i32) -> TemporalResult<Self> {
        self.resolve_local(self.dt.with_nano(nano)?)
    }

    // ==== Arithmetic ====

    /// Adds years to the local date-time and re-resolves it.
    pub fn plus_years(&self, years: i64) -> TemporalResult<Self> {
        self.resolve_local(self.dt.plus_years(years)?)
    }

    pub fn plus_months(&self, months: i64) -> TemporalResult<Self> {
        self.resolve_local(self.dt.plus_months(months)?)
    }

    pub fn plus_weeks(&self, weeks: i64) -> TemporalResult<Self> {
        self.resolve_local(self.dt.plus_weeks(weeks)?)
    }

    /// Adds days to the local date-time and re-resolves it, so the
    /// wall-clock time is kept even if a transition is crossed.
    pub fn plus_days(&self, days: i64) -> TemporalResult<Self> {
        self.resolve_local(self.dt.plus_days(days)?)
    }

    /// Adds hours along the instant time-line, so exactly that much time
    /// elapses even if a transition is crossed.
    pub fn plus_hours(&self, hours: i64) -> TemporalResult<Self> {
        self.resolve_instant(self.dt.plus_hours(hours)?)
    }

    pub fn plus_minutes(&self, minutes: i64) -> TemporalResult<Self> {
        self.resolve_instant(self.dt.plus_minutes(minutes)?)
    }

    pub fn plus_seconds(&self, seconds: i64) -> TemporalResult<Self> {
        self.resolve_instant(self.dt.plus_seconds(seconds)?)
    }

    pub fn plus_nanos(&self, nanos: i64) -> TemporalResult<Self> {
        self.resolve_instant(self.dt.plus_nanos(nanos)?)
    }

    pub fn minus_years(&self, years: i64) -> TemporalResult<Self> {
        self.resolve_local(self.dt.minus_years(years)?)
    }

    pub fn minus_months(&self, months: i64) -> TemporalResult<Self> {
        self.resolve_local(self.dt.minus_months(months)?)
    }

    pub fn minus_weeks(&self, weeks: i64) -> TemporalResult<Self> {
        self.resolve_local(self.dt.minus_weeks(weeks)?)
    }

    pub fn minus_days(&self, days: i64) -> TemporalResult<Self> {
        self.resolve_local(self.dt.minus_days(days)?)
    }

    pub fn minus_hours(&self, hours: i64) -> TemporalResult<Self> {
        self.resolve_instant(self.dt.minus_hours(hours)?)
    }

    pub fn minus_minutes(&self, minutes: i64) -> TemporalResult<Self> {
        self.resolve_instant(self.dt.minus_minutes(minutes)?)
    }

    pub fn minus_seconds(&self, seconds: i64) -> TemporalResult<Self> {
        self.resolve_instant(self.dt.minus_seconds(seconds)?)
    }

    pub fn minus_nanos(&self, nanos: i64) -> TemporalResult<Self> {
        self.resolve_instant(self.dt.minus_nanos(nanos)?)
    }

    /// Adds an exact duration along the instant time-line.
    pub fn plus_duration(&self, duration: &Duration) -> TemporalResult<Self> {
        let dt = self
            .dt
            .plus_seconds(duration.seconds())?
            .plus_nanos(i64::from(duration.nanos()))?;
        self.resolve_instant(dt)
    }

    /// Subtracts an exact duration along the instant time-line.
    pub fn minus_duration(&self, duration: &Duration) -> TemporalResult<Self> {
        let dt = self
            .dt
            .minus_seconds(duration.seconds())?
            .minus_nanos(i64::from(duration.nanos()))?;
        self.resolve_instant(dt)
    }

    /// Adds a calendar period to the local date-time and re-resolves it.
    pub fn plus_period(&self, period: &Period) -> TemporalResult<Self> {
        self.resolve_local(self.dt.plus_amount(period)?)
    }

    /// Subtracts a calendar period from the local date-time and re-resolves it.
    pub fn minus_period(&self, period: &Period) -> TemporalResult<Self> {
        self.resolve_local(self.dt.minus_amount(period)?)
    }

    /// Returns a copy with the local time truncated to `unit`.
    pub fn truncated_to<U: TemporalUnit + ?Sized>(&self, unit: &U) -> TemporalResult<Self> {
        self.resolve_local(self.dt.truncated_to(unit)?)
    }
}

// ==== Trait impls ====

impl TemporalAccessor for ZonedDateTime {
    fn is_supported_field<F: TemporalField + ?Sized>(&self, field: &F) -> bool {
        match field.as_chrono_field() {
            Some(_) => true,
            None => field.is_supported_by(self),
        }
    }

    fn range<F: TemporalField + ?Sized>(&self, field: &F) -> TemporalResult<ValueRange> {
        match field.as_chrono_field() {
            Some(f @ (ChronoField::InstantSeconds | ChronoField::OffsetSeconds)) => {
                Ok(f.value_range())
            }
            Some(f) => self.dt.range(&f),
            None => field.range_refined_by(self),
        }
    }

    fn get_long<F: TemporalField + ?Sized>(&self, field: &F) -> TemporalResult<i64> {
        match field.as_chrono_field() {
            Some(ChronoField::InstantSeconds) => Ok(self.to_epoch_second()),
            Some(ChronoField::OffsetSeconds) => Ok(i64::from(self.offset.total_seconds())),
            Some(f) => self.dt.get_long(&f),
            None => field.get_from(self),
        }
    }
}

impl Temporal for ZonedDateTime {
    fn is_supported_unit<U: TemporalUnit + ?Sized>(&self, unit: &U) -> bool {
        match unit.as_chrono_unit() {
            Some(u) => u != ChronoUnit::Forever,
            None => unit.is_supported_by(self),
        }
    }

    /// Sets a field.
    ///
    /// `InstantSeconds` moves along the instant time-line. `OffsetSeconds`
    /// is lenient: an offset that is not valid for the local date-time is
    /// ignored. Every other field changes the local date-time, which is then
    /// re-resolved preferring the current offset.
    fn with_field<F: TemporalField + ?Sized>(
        &self,
        field: &F,
        new_value: i64,
    ) -> TemporalResult<Self> {
        match field.as_chrono_field() {
            Some(ChronoField::InstantSeconds) => {
                let epoch_second = ChronoField::InstantSeconds.check_valid_value(new_value)?;
                Self::create(epoch_second, self.nano(), self.zone.clone())
            }
            Some(ChronoField::OffsetSeconds) => {
                let seconds = ChronoField::OffsetSeconds.check_valid_int_value(new_value)?;
                self.resolve_offset(ZoneOffset::of_total_seconds(seconds)?)
            }
            Some(f) => self.resolve_local(self.dt.with_field(&f, new_value)?),
            None => field.adjust_into(self, new_value),
        }
    }

    fn plus_unit<U: TemporalUnit + ?Sized>(&self, amount: i64, unit: &U) -> TemporalResult<Self> {
        let Some(u) = unit.as_chrono_unit() else {
            return unit.add_to(self, amount);
        };
        if u.is_date_unit() {
            return self.resolve_local(self.dt.plus_unit(amount, &u)?);
        }
        self.resolve_instant(self.dt.plus_unit(amount, &u)?)
    }

    /// Calculates the amount of `unit` until `end`.
    ///
    /// `end` is first converted to this zone, then its local date-time is
    /// shifted by the difference between the two offsets. Both date and time
    /// units compare this date-time with the aligned one, so a day across a
    /// transition that shortens it is not yet a whole day.
    fn until<U: TemporalUnit + ?Sized>(&self, end: &Self, unit: &U) -> TemporalResult<i64> {
        let Some(u) = unit.as_chrono_unit() else {
            return unit.between(self, end);
        };
        let end = end.with_zone_same_instant(self.zone.clone())?;
        let offset_difference = i64::from(self.offset.total_seconds())
            - i64::from(end.offset.total_seconds());
        let aligned = end.dt.plus_seconds(offset_difference)?;
        self.dt.until(&aligned, &u)
    }
}

impl PartialOrd for ZonedDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ZonedDateTime {
    /// Compares the instant, then the local date-time, then the zone id.
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.to_epoch_second()
            .cmp(&other.to_epoch_second())
            .then(self.nano().cmp(&other.nano()))
            .then(self.dt.cmp(&other.dt))
            .then_with(|| self.zone.cmp(&other.zone))
    }
}

impl Writeable for ZonedDateTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        self.dt.write_to(sink)?;
        self.offset.write_to(sink)?;
        if let ZoneId::Region { id, .. } = &self.zone {
            sink.write_char('[')?;
            sink.write_str(id)?;
            sink.write_char(']')?;
        }
        Ok(())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let zone = match &self.zone {
            ZoneId::Region { id, .. } => id.len() + 2,
            ZoneId::Offset(_) => 0,
        };
        self.dt.writeable_length_hint() + self.offset.writeable_length_hint() + zone
    }
}

impl_display_with_writeable!(ZonedDateTime);
