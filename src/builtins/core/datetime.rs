//! This module implements `LocalDateTime`, a date and wall-clock time without a zone.

use core::{fmt::Write, str::FromStr};

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    builtins::core::{LocalDate, LocalTime, ZoneId, ZoneOffset, ZonedDateTime},
    fields::{ChronoField, TemporalField, ValueRange},
    host::HostClock,
    iso::{DayOfWeek, Month},
    parsers,
    temporal::{unsupported_unit, Temporal, TemporalAccessor, TemporalAdjuster},
    units::{ChronoUnit, TemporalUnit},
    utils, TemporalError, TemporalResult, HOURS_PER_DAY, MINUTES_PER_DAY, NANOS_PER_DAY,
    NANOS_PER_HOUR, NANOS_PER_MICRO, NANOS_PER_MILLI, NANOS_PER_MINUTE, NANOS_PER_SECOND,
    SECONDS_PER_DAY,
};

/// A date and time without a time zone, such as `2007-12-03T10:15:30`.
///
/// `LocalDateTime` is the composition of a [`LocalDate`] and a [`LocalTime`].
/// Time arithmetic that crosses midnight carries into the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalDateTime {
    date: LocalDate,
    time: LocalTime,
}

// ==== Private API ====

impl LocalDateTime {
    #[inline]
    fn with(&self, date: LocalDate, time: LocalTime) -> Self {
        Self::of(date, time)
    }

    /// Adds a time amount to this date-time, carrying whole days into `date`.
    fn plus_with_overflow(
        &self,
        hours: i64,
        minutes: i64,
        seconds: i64,
        nanos: i64,
        sign: i64,
    ) -> TemporalResult<Self> {
        let (days, time) = self.time.add_with_carry(hours, minutes, seconds, nanos, sign);
        Ok(self.with(self.date.plus_days(days)?, time))
    }
}

// ==== Public API ====

impl LocalDateTime {
    /// The minimum supported date-time, `-999999999-01-01T00:00`.
    pub const MIN: Self = Self::of(LocalDate::MIN, LocalTime::MIN);
    /// The maximum supported date-time, `+999999999-12-31T23:59:59.999999999`.
    pub const MAX: Self = Self::of(LocalDate::MAX, LocalTime::MAX);

    /// Combines a date and a time.
    #[inline]
    #[must_use]
    pub const fn of(date: LocalDate, time: LocalTime) -> Self {
        Self { date, time }
    }

    /// Creates a date-time from its components.
    pub fn try_new(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        nano: i32,
    ) -> TemporalResult<Self> {
        Ok(Self::of(
            LocalDate::of(year, month, day)?,
            LocalTime::of_hmsn(hour, minute, second, nano)?,
        ))
    }

    /// Creates a date-time from seconds since 1970-01-01T00:00Z as seen at `offset`.
    pub fn of_epoch_second(
        epoch_second: i64,
        nano_of_second: i32,
        offset: ZoneOffset,
    ) -> TemporalResult<Self> {
        let nano = ChronoField::NanoOfSecond.check_valid_value(i64::from(nano_of_second))?;
        let local_second = utils::checked_add(epoch_second, i64::from(offset.total_seconds()))?;
        let epoch_day = utils::floor_div(local_second, SECONDS_PER_DAY);
        let second_of_day = utils::floor_mod(local_second, SECONDS_PER_DAY);
        let date = LocalDate::of_epoch_day(epoch_day)?;
        let time = LocalTime::new_unchecked(second_of_day * NANOS_PER_SECOND + nano);
        Ok(Self::of(date, time))
    }

    /// Obtains a date-time from any value supporting both date and time fields.
    pub fn from<A: TemporalAccessor + ?Sized>(temporal: &A) -> TemporalResult<Self> {
        Ok(Self::of(LocalDate::from(temporal)?, LocalTime::from(temporal)?))
    }

    /// Obtains the current date-time from `clock` as seen in `zone`.
    pub fn now<C: HostClock + ?Sized>(clock: &C, zone: &ZoneId) -> TemporalResult<Self> {
        let instant = clock.get_host_instant()?;
        let offset = zone.rules().offset(&instant)?;
        Self::of_epoch_second(instant.epoch_second(), instant.nano() as i32, offset)
    }

    /// Parses a date-time such as `2007-12-03T10:15:30`.
    pub fn parse(text: &str) -> TemporalResult<Self> {
        parsers::parse_local_date_time(text)
    }

    /// Returns the date part.
    #[inline]
    #[must_use]
    pub const fn to_local_date(&self) -> LocalDate {
        self.date
    }

    /// Returns the time part.
    #[inline]
    #[must_use]
    pub const fn to_local_time(&self) -> LocalTime {
        self.time
    }

    #[inline]
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.date.year()
    }

    #[inline]
    #[must_use]
    pub const fn month_value(&self) -> u8 {
        self.date.month_value()
    }

    #[inline]
    #[must_use]
    pub const fn month(&self) -> Month {
        self.date.month()
    }

    #[inline]
    #[must_use]
    pub const fn day_of_month(&self) -> u8 {
        self.date.day_of_month()
    }

    #[inline]
    #[must_use]
    pub const fn day_of_year(&self) -> u16 {
        self.date.day_of_year()
    }

    #[inline]
    #[must_use]
    pub const fn day_of_week(&self) -> DayOfWeek {
        self.date.day_of_week()
    }

    #[inline]
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.time.hour()
    }

    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.time.minute()
    }

    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.time.second()
    }

    #[inline]
    #[must_use]
    pub const fn nano(&self) -> u32 {
        self.time.nano()
    }

    /// Returns the seconds since 1970-01-01T00:00Z of this date-time at `offset`.
    #[must_use]
    pub const fn to_epoch_second(&self, offset: ZoneOffset) -> i64 {
        self.date.to_epoch_day() * SECONDS_PER_DAY + self.time.to_second_of_day() as i64
            - offset.total_seconds() as i64
    }

    pub fn with_year(&self, year: i64) -> TemporalResult<Self> {
        Ok(self.with(self.date.with_year(year)?, self.time))
    }

    pub fn with_month(&self, month: i32) -> TemporalResult<Self> {
        Ok(self.with(self.date.with_month(month)?, self.time))
    }

    pub fn with_day_of_month(&self, day: i32) -> TemporalResult<Self> {
        Ok(self.with(self.date.with_day_of_month(day)?, self.time))
    }

    pub fn with_day_of_year(&self, day_of_year: i32) -> TemporalResult<Self> {
        Ok(self.with(self.date.with_day_of_year(day_of_year)?, self.time))
    }

    pub fn with_hour(&self, hour: i32) -> TemporalResult<Self> {
        Ok(self.with(self.date, self.time.with_hour(hour)?))
    }

    pub fn with_minute(&self, minute: i32) -> TemporalResult<Self> {
        Ok(self.with(self.date, self.time.with_minute(minute)?))
    }

    pub fn with_second(&self, second: i32) -> TemporalResult<Self> {
        Ok(self.with(self.date, self.time.with_second(second)?))
    }

    pub fn with_nano(&self, nano: i32) -> TemporalResult<Self> {
        Ok(self.with(self.date, self.time.with_nano(nano)?))
    }

    /// Returns a copy with years added, clamping the day-of-month.
    pub fn plus_years(&self, years: i64) -> TemporalResult<Self> {
        Ok(self.with(self.date.plus_years(years)?, self.time))
    }

    /// Returns a copy with months added, clamping the day-of-month.
    pub fn plus_months(&self, months: i64) -> TemporalResult<Self> {
        Ok(self.with(self.date.plus_months(months)?, self.time))
    }

    pub fn plus_weeks(&self, weeks: i64) -> TemporalResult<Self> {
        Ok(self.with(self.date.plus_weeks(weeks)?, self.time))
    }

    pub fn plus_days(&self, days: i64) -> TemporalResult<Self> {
        Ok(self.with(self.date.plus_days(days)?, self.time))
    }

    pub fn plus_hours(&self, hours: i64) -> TemporalResult<Self> {
        self.plus_with_overflow(hours, 0, 0, 0, 1)
    }

    pub fn plus_minutes(&self, minutes: i64) -> TemporalResult<Self> {
        self.plus_with_overflow(0, minutes, 0, 0, 1)
    }

    pub fn plus_seconds(&self, seconds: i64) -> TemporalResult<Self> {
        self.plus_with_overflow(0, 0, seconds, 0, 1)
    }

    pub fn plus_nanos(&self, nanos: i64) -> TemporalResult<Self> {
        self.plus_with_overflow(0, 0, 0, nanos, 1)
    }

    pub fn minus_years(&self, years: i64) -> TemporalResult<Self> {
        Ok(self.with(self.date.minus_years(years)?, self.time))
    }

    pub fn minus_months(&self, months: i64) -> TemporalResult<Self> {
        Ok(self.with(self.date.minus_months(months)?, self.time))
    }

    pub fn minus_weeks(&self, weeks: i64) -> TemporalResult<Self> {
        Ok(self.with(self.date.minus_weeks(weeks)?, self.time))
    }

    pub fn minus_days(&self, days: i64) -> TemporalResult<Self> {
        Ok(self.with(self.date.minus_days(days)?, self.time))
    }

    pub fn minus_hours(&self, hours: i64) -> TemporalResult<Self> {
        self.plus_with_overflow(hours, 0, 0, 0, -1)
    }

    pub fn minus_minutes(&self, minutes: i64) -> TemporalResult<Self> {
        self.plus_with_overflow(0, minutes, 0, 0, -1)
    }

    pub fn minus_seconds(&self, seconds: i64) -> TemporalResult<Self> {
        self.plus_with_overflow(0, 0, seconds, 0, -1)
    }

    pub fn minus_nanos(&self, nanos: i64) -> TemporalResult<Self> {
        self.plus_with_overflow(0, 0, 0, nanos, -1)
    }

    /// Returns a copy with the time truncated to `unit`.
    pub fn truncated_to<U: TemporalUnit + ?Sized>(&self, unit: &U) -> TemporalResult<Self> {
        Ok(self.with(self.date, self.time.truncated_to(unit)?))
    }

    /// Resolves this date-time in `zone`.
    ///
    /// Times in a gap are moved forward by the length of the gap. Times in an
    /// overlap use the earlier offset.
    pub fn at_zone(&self, zone: ZoneId) -> TemporalResult<ZonedDateTime> {
        ZonedDateTime::of_local(*self, zone, None)
    }
}

// ==== Trait impls ====

impl TemporalAccessor for LocalDateTime {
    fn is_supported_field<F: TemporalField + ?Sized>(&self, field: &F) -> bool {
        match field.as_chrono_field() {
            Some(f) => f.is_date_field() || f.is_time_field(),
            None => field.is_supported_by(self),
        }
    }

    fn range<F: TemporalField + ?Sized>(&self, field: &F) -> TemporalResult<ValueRange> {
        match field.as_chrono_field() {
            Some(f) if f.is_time_field() => self.time.range(&f),
            Some(f) => self.date.range(&f),
            None => field.range_refined_by(self),
        }
    }

    fn get_long<F: TemporalField + ?Sized>(&self, field: &F) -> TemporalResult<i64> {
        match field.as_chrono_field() {
            Some(f) if f.is_time_field() => self.time.get_long(&f),
            Some(f) => self.date.get_long(&f),
            None => field.get_from(self),
        }
    }
}

impl Temporal for LocalDateTime {
    fn is_supported_unit<U: TemporalUnit + ?Sized>(&self, unit: &U) -> bool {
        match unit.as_chrono_unit() {
            Some(u) => u != ChronoUnit::Forever,
            None => unit.is_supported_by(self),
        }
    }

    fn with_field<F: TemporalField + ?Sized>(
        &self,
        field: &F,
        new_value: i64,
    ) -> TemporalResult<Self> {
        match field.as_chrono_field() {
            Some(f) if f.is_time_field() => {
                Ok(self.with(self.date, self.time.with_field(&f, new_value)?))
            }
            Some(f) => Ok(self.with(self.date.with_field(&f, new_value)?, self.time)),
            None => field.adjust_into(self, new_value),
        }
    }

    fn plus_unit<U: TemporalUnit + ?Sized>(&self, amount: i64, unit: &U) -> TemporalResult<Self> {
        let Some(u) = unit.as_chrono_unit() else {
            return unit.add_to(self, amount);
        };
        const MICROS_PER_DAY: i64 = NANOS_PER_DAY / NANOS_PER_MICRO;
        const MILLIS_PER_DAY: i64 = NANOS_PER_DAY / NANOS_PER_MILLI;
        match u {
            ChronoUnit::Nanos => self.plus_nanos(amount),
            ChronoUnit::Micros => self
                .plus_days(amount / MICROS_PER_DAY)?
                .plus_nanos((amount % MICROS_PER_DAY) * NANOS_PER_MICRO),
            ChronoUnit::Millis => self
                .plus_days(amount / MILLIS_PER_DAY)?
                .plus_nanos((amount % MILLIS_PER_DAY) * NANOS_PER_MILLI),
            ChronoUnit::Seconds => self.plus_seconds(amount),
            ChronoUnit::Minutes => self.plus_minutes(amount),
            ChronoUnit::Hours => self.plus_hours(amount),
            ChronoUnit::HalfDays => self
                .plus_days(amount / 256)?
                .plus_hours((amount % 256) * 12),
            _ => Ok(self.with(self.date.plus_unit(amount, &u)?, self.time)),
        }
    }

    fn until<U: TemporalUnit + ?Sized>(&self, end: &Self, unit: &U) -> TemporalResult<i64> {
        let Some(u) = unit.as_chrono_unit() else {
            return unit.between(self, end);
        };
        if u.is_time_unit() {
            let mut days = end.date.to_epoch_day() - self.date.to_epoch_day();
            if days == 0 {
                return self.time.until(&end.time, &u);
            }
            let mut time_part = end.time.to_nano_of_day() - self.time.to_nano_of_day();
            if days > 0 {
                days -= 1;
                time_part += NANOS_PER_DAY;
            } else {
                days += 1;
                time_part -= NANOS_PER_DAY;
            }
            let (per_day, nanos_per_unit) = match u {
                ChronoUnit::Nanos => (NANOS_PER_DAY, 1),
                ChronoUnit::Micros => (NANOS_PER_DAY / NANOS_PER_MICRO, NANOS_PER_MICRO),
                ChronoUnit::Millis => (NANOS_PER_DAY / NANOS_PER_MILLI, NANOS_PER_MILLI),
                ChronoUnit::Seconds => (SECONDS_PER_DAY, NANOS_PER_SECOND),
                ChronoUnit::Minutes => (MINUTES_PER_DAY, NANOS_PER_MINUTE),
                ChronoUnit::Hours => (HOURS_PER_DAY, NANOS_PER_HOUR),
                _ => (2, 12 * NANOS_PER_HOUR),
            };
            let amount = utils::checked_mul(days, per_day)?;
            return utils::checked_add(amount, time_part / nanos_per_unit);
        }
        if !u.is_date_unit() {
            return Err(unsupported_unit(unit));
        }
        let mut end_date = end.date;
        if end_date > self.date && end.time < self.time {
            end_date = end_date.minus_days(1)?;
        } else if end_date < self.date && end.time > self.time {
            end_date = end_date.plus_days(1)?;
        }
        self.date.until(&end_date, &u)
    }
}

impl TemporalAdjuster for LocalDateTime {
    fn adjust_into<T: Temporal>(&self, temporal: &T) -> TemporalResult<T> {
        temporal
            .with_field(&ChronoField::EpochDay, self.date.to_epoch_day())?
            .with_field(&ChronoField::NanoOfDay, self.time.to_nano_of_day())
    }
}

impl Writeable for LocalDateTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        self.date.write_to(sink)?;
        sink.write_char('T')?;
        self.time.write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.date.writeable_length_hint() + 1 + self.time.writeable_length_hint()
    }
}

impl_display_with_writeable!(LocalDateTime);

impl FromStr for LocalDateTime {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsers::parse_local_date_time(s)
    }
}

#[cfg(test)]
mod tests {
    use super::LocalDateTime;
    use crate::{
        error::ErrorKind, ChronoField, ChronoUnit, Duration, LocalDate, LocalTime, Temporal,
        TemporalAccessor, ZoneOffset,
    };
    use alloc::string::ToString;
    use core::str::FromStr;

    fn dt(y: i32, mo: i32, d: i32, h: i32, mi: i32) -> LocalDateTime {
        LocalDateTime::try_new(y, mo, d, h, mi, 0, 0).unwrap()
    }

    #[test]
    fn time_arithmetic_carries_into_date() {
        let start = dt(2007, 12, 31, 23, 30);
        assert_eq!(start.plus_hours(1), Ok(dt(2008, 1, 1, 0, 30)));
        assert_eq!(start.plus_minutes(-1_440 * 366), Ok(dt(2006, 12, 30, 23, 30)));
        assert_eq!(start.minus_hours(48), Ok(dt(2007, 12, 29, 23, 30)));
        assert_eq!(start.plus_unit(3, &ChronoUnit::HalfDays), Ok(dt(2008, 1, 2, 11, 30)));
        assert_eq!(start.plus_unit(1, &ChronoUnit::Months), Ok(dt(2008, 1, 31, 23, 30)));
        assert_eq!(
            start.plus_unit(86_400_001, &ChronoUnit::Millis),
            LocalDateTime::try_new(2008, 1, 1, 23, 30, 0, 1_000_000)
        );
        assert!(LocalDateTime::MAX.plus_nanos(1).is_err());
        assert!(LocalDateTime::MIN.minus_seconds(1).is_err());
        assert_eq!(
            LocalDateTime::MIN.minus_nanos(i64::MIN),
            LocalDateTime::MIN.plus_nanos(i64::MAX).unwrap().plus_nanos(1)
        );
    }

    #[test]
    fn until_adjusts_for_time_of_day() {
        let start = dt(2008, 1, 1, 12, 0);
        let end = dt(2008, 1, 3, 11, 0);
        assert_eq!(start.until(&end, &ChronoUnit::Days), Ok(1));
        assert_eq!(start.until(&end, &ChronoUnit::Hours), Ok(47));
        assert_eq!(end.until(&start, &ChronoUnit::Days), Ok(-1));
        assert_eq!(end.until(&start, &ChronoUnit::Minutes), Ok(-47 * 60));
        assert_eq!(start.until(&end, &ChronoUnit::HalfDays), Ok(3));
        assert_eq!(
            Duration::between(&start, &end),
            Ok(Duration::of_hours(47).unwrap())
        );
        assert!(LocalDateTime::MIN.until(&LocalDateTime::MAX, &ChronoUnit::Nanos).is_err());
        assert_eq!(
            start.until(&end, &ChronoUnit::Forever).unwrap_err().kind(),
            ErrorKind::Unsupported
        );
    }

    #[test]
    fn epoch_seconds() {
        let offset = ZoneOffset::of_hours(2).unwrap();
        let local = LocalDateTime::of_epoch_second(0, 0, offset).unwrap();
        assert_eq!(local, dt(1970, 1, 1, 2, 0));
        assert_eq!(local.to_epoch_second(offset), 0);
        let local = LocalDateTime::of_epoch_second(-1, 5, ZoneOffset::UTC).unwrap();
        assert_eq!(local.to_local_date(), LocalDate::of(1969, 12, 31).unwrap());
        assert_eq!(local.to_local_time(), LocalTime::of_hmsn(23, 59, 59, 5).unwrap());
        assert!(LocalDateTime::of_epoch_second(0, 1_000_000_000, offset).is_err());
    }

    #[test]
    fn fields_merge_date_and_time() {
        let local = dt(2008, 3, 30, 14, 5);
        assert_eq!(local.get(&ChronoField::DayOfYear), Ok(90));
        assert_eq!(local.get(&ChronoField::HourOfAmPm), Ok(2));
        assert!(!local.is_supported_field(&ChronoField::InstantSeconds));
        assert_eq!(
            local.with_field(&ChronoField::HourOfDay, 1),
            Ok(dt(2008, 3, 30, 1, 5))
        );
        assert_eq!(
            local.with_field(&ChronoField::MonthOfYear, 2),
            Ok(dt(2008, 2, 29, 14, 5))
        );
        assert_eq!(
            local.with_field(&ChronoField::OffsetSeconds, 0).unwrap_err().kind(),
            ErrorKind::Unsupported
        );
    }

    #[test]
    fn text_form() {
        let local = LocalDateTime::try_new(2007, 12, 3, 10, 15, 30, 0).unwrap();
        assert_eq!(local.to_string(), "2007-12-03T10:15:30");
        assert_eq!(dt(2007, 12, 3, 10, 15).to_string(), "2007-12-03T10:15");
        assert_eq!(LocalDateTime::from_str("2007-12-03T10:15:30"), Ok(local));
        assert_eq!(LocalDateTime::from_str("2007-12-03t10:15:30"), Ok(local));
        assert_eq!(LocalDateTime::MAX.to_string(), "+999999999-12-31T23:59:59.999999999");
        assert_eq!(LocalDateTime::from_str(&LocalDateTime::MAX.to_string()), Ok(LocalDateTime::MAX));
        assert_eq!(
            LocalDateTime::from_str("2007-12-03").unwrap_err().kind(),
            ErrorKind::Parse
        );
    }
}
