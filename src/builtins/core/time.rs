//! This module implements `LocalTime`, a wall-clock time without a date.

use core::str::FromStr;

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    builtins::core::{duration::unit_nanos_within_day, LocalDate, LocalDateTime, ZoneId},
    fields::{ChronoField, TemporalField, ValueRange},
    host::HostClock,
    parsers::{self, FormattableTime},
    temporal::{unsupported_unit, Temporal, TemporalAccessor, TemporalAdjuster},
    units::{ChronoUnit, TemporalUnit},
    utils, TemporalError, TemporalResult, HOURS_PER_DAY, MINUTES_PER_DAY, NANOS_PER_DAY,
    NANOS_PER_HOUR, NANOS_PER_MICRO, NANOS_PER_MILLI, NANOS_PER_MINUTE, NANOS_PER_SECOND,
    SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};

const MICROS_PER_DAY: i64 = NANOS_PER_DAY / NANOS_PER_MICRO;
const MILLIS_PER_DAY: i64 = NANOS_PER_DAY / NANOS_PER_MILLI;

/// A time without a time zone, such as `10:15:30`.
///
/// A `LocalTime` is stored as a nanosecond-of-day and has nanosecond
/// precision. Time arithmetic wraps around midnight; the number of days
/// crossed is only visible through [`LocalDateTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalTime {
    nano_of_day: i64,
}

// ==== Private API ====

impl LocalTime {
    #[inline]
    pub(crate) const fn new_unchecked(nano_of_day: i64) -> Self {
        Self { nano_of_day }
    }

    #[inline]
    const fn from_parts(hour: i64, minute: i64, second: i64, nano: i64) -> Self {
        Self::new_unchecked(
            hour * NANOS_PER_HOUR + minute * NANOS_PER_MINUTE + second * NANOS_PER_SECOND + nano,
        )
    }

    /// Adds hours, minutes, seconds and nanoseconds scaled by `sign`, wrapping
    /// around midnight.
    ///
    /// Returns the number of whole days crossed along with the new time. Each
    /// component may be any value; the day count is carried separately so that
    /// the intermediate nanosecond total never overflows.
    pub(crate) fn add_with_carry(
        &self,
        hours: i64,
        minutes: i64,
        seconds: i64,
        nanos: i64,
        sign: i64,
    ) -> (i64, Self) {
        if (hours | minutes | seconds | nanos) == 0 {
            return (0, *self);
        }
        // Each quotient is bounded well below i64::MAX / 4, so the sum cannot overflow.
        let days = (nanos / NANOS_PER_DAY
            + seconds / SECONDS_PER_DAY
            + minutes / MINUTES_PER_DAY
            + hours / HOURS_PER_DAY)
            * sign;
        let remainder = (nanos % NANOS_PER_DAY)
            + (seconds % SECONDS_PER_DAY) * NANOS_PER_SECOND
            + (minutes % MINUTES_PER_DAY) * NANOS_PER_MINUTE
            + (hours % HOURS_PER_DAY) * NANOS_PER_HOUR;
        let total = remainder * sign + self.nano_of_day;
        let days = days + utils::floor_div(total, NANOS_PER_DAY);
        let nano_of_day = utils::floor_mod(total, NANOS_PER_DAY);
        (days, Self::new_unchecked(nano_of_day))
    }

    fn get_chrono_field(&self, field: ChronoField) -> TemporalResult<i64> {
        let hour = i64::from(self.hour());
        let value = match field {
            ChronoField::NanoOfSecond => i64::from(self.nano()),
            ChronoField::NanoOfDay => self.nano_of_day,
            ChronoField::MicroOfSecond => i64::from(self.nano()) / NANOS_PER_MICRO,
            ChronoField::MicroOfDay => self.nano_of_day / NANOS_PER_MICRO,
            ChronoField::MilliOfSecond => i64::from(self.nano()) / NANOS_PER_MILLI,
            ChronoField::MilliOfDay => self.nano_of_day / NANOS_PER_MILLI,
            ChronoField::SecondOfMinute => i64::from(self.second()),
            ChronoField::SecondOfDay => i64::from(self.to_second_of_day()),
            ChronoField::MinuteOfHour => i64::from(self.minute()),
            ChronoField::MinuteOfDay => hour * 60 + i64::from(self.minute()),
            ChronoField::HourOfAmPm => hour % 12,
            ChronoField::ClockHourOfAmPm if hour % 12 == 0 => 12,
            ChronoField::ClockHourOfAmPm => hour % 12,
            ChronoField::HourOfDay => hour,
            ChronoField::ClockHourOfDay if hour == 0 => 24,
            ChronoField::ClockHourOfDay => hour,
            ChronoField::AmPmOfDay => hour / 12,
            _ => return Err(field.unsupported()),
        };
        Ok(value)
    }

    fn with_chrono_field(&self, field: ChronoField, new_value: i64) -> TemporalResult<Self> {
        if !field.is_time_field() {
            return Err(field.unsupported());
        }
        field.check_valid_value(new_value)?;
        let hour = i64::from(self.hour());
        match field {
            ChronoField::NanoOfSecond => self.with_nano(new_value as i32),
            ChronoField::NanoOfDay => Self::of_nano_of_day(new_value),
            ChronoField::MicroOfSecond => self.with_nano((new_value * NANOS_PER_MICRO) as i32),
            ChronoField::MicroOfDay => Self::of_nano_of_day(new_value * NANOS_PER_MICRO),
            ChronoField::MilliOfSecond => self.with_nano((new_value * NANOS_PER_MILLI) as i32),
            ChronoField::MilliOfDay => Self::of_nano_of_day(new_value * NANOS_PER_MILLI),
            ChronoField::SecondOfMinute => self.with_second(new_value as i32),
            ChronoField::SecondOfDay => {
                Ok(self.plus_seconds(new_value - i64::from(self.to_second_of_day())))
            }
            ChronoField::MinuteOfHour => self.with_minute(new_value as i32),
            ChronoField::MinuteOfDay => {
                Ok(self.plus_minutes(new_value - (hour * 60 + i64::from(self.minute()))))
            }
            ChronoField::HourOfAmPm => Ok(self.plus_hours(new_value - hour % 12)),
            ChronoField::ClockHourOfAmPm => {
                let new_value = if new_value == 12 { 0 } else { new_value };
                Ok(self.plus_hours(new_value - hour % 12))
            }
            ChronoField::HourOfDay => self.with_hour(new_value as i32),
            ChronoField::ClockHourOfDay => {
                self.with_hour(if new_value == 24 { 0 } else { new_value as i32 })
            }
            ChronoField::AmPmOfDay => Ok(self.plus_hours((new_value - hour / 12) * 12)),
            _ => Err(field.unsupported()),
        }
    }
}

// ==== Public API ====

impl LocalTime {
    /// The minimum supported time, `00:00`.
    pub const MIN: Self = Self::new_unchecked(0);
    /// The maximum supported time, `23:59:59.999999999`.
    pub const MAX: Self = Self::new_unchecked(NANOS_PER_DAY - 1);
    /// Midnight at the start of the day, `00:00`.
    pub const MIDNIGHT: Self = Self::new_unchecked(0);
    /// Noon in the middle of the day, `12:00`.
    pub const NOON: Self = Self::new_unchecked(12 * NANOS_PER_HOUR);

    /// Creates a time from an hour and minute.
    pub fn of(hour: i32, minute: i32) -> TemporalResult<Self> {
        Self::of_hmsn(hour, minute, 0, 0)
    }

    /// Creates a time from an hour, minute and second.
    pub fn of_hms(hour: i32, minute: i32, second: i32) -> TemporalResult<Self> {
        Self::of_hmsn(hour, minute, second, 0)
    }

    /// Creates a time from an hour, minute, second and nanosecond.
    pub fn of_hmsn(hour: i32, minute: i32, second: i32, nano: i32) -> TemporalResult<Self> {
        let hour = ChronoField::HourOfDay.check_valid_value(i64::from(hour))?;
        let minute = ChronoField::MinuteOfHour.check_valid_value(i64::from(minute))?;
        let second = ChronoField::SecondOfMinute.check_valid_value(i64::from(second))?;
        let nano = ChronoField::NanoOfSecond.check_valid_value(i64::from(nano))?;
        Ok(Self::from_parts(hour, minute, second, nano))
    }

    /// Creates a time from a second-of-day.
    pub fn of_second_of_day(second_of_day: i64) -> TemporalResult<Self> {
        let second_of_day = ChronoField::SecondOfDay.check_valid_value(second_of_day)?;
        Ok(Self::new_unchecked(second_of_day * NANOS_PER_SECOND))
    }

    /// Creates a time from a nanosecond-of-day.
    pub fn of_nano_of_day(nano_of_day: i64) -> TemporalResult<Self> {
        let nano_of_day = ChronoField::NanoOfDay.check_valid_value(nano_of_day)?;
        Ok(Self::new_unchecked(nano_of_day))
    }

    /// Obtains a time from any value that supports `NanoOfDay`.
    pub fn from<A: TemporalAccessor + ?Sized>(temporal: &A) -> TemporalResult<Self> {
        Self::of_nano_of_day(temporal.get_long(&ChronoField::NanoOfDay)?)
    }

    /// Obtains the current time from `clock` as seen in `zone`.
    pub fn now<C: HostClock + ?Sized>(clock: &C, zone: &ZoneId) -> TemporalResult<Self> {
        Ok(LocalDateTime::now(clock, zone)?.to_local_time())
    }

    /// Parses a time such as `10:15` or `10:15:30.5`.
    pub fn parse(text: &str) -> TemporalResult<Self> {
        parsers::parse_local_time(text)
    }

    /// Returns the hour-of-day, from 0 to 23.
    #[inline]
    #[must_use]
    pub const fn hour(&self) -> u8 {
        (self.nano_of_day / NANOS_PER_HOUR) as u8
    }

    /// Returns the minute-of-hour, from 0 to 59.
    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        ((self.nano_of_day / NANOS_PER_MINUTE) % 60) as u8
    }

    /// Returns the second-of-minute, from 0 to 59.
    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        ((self.nano_of_day / NANOS_PER_SECOND) % 60) as u8
    }

    /// Returns the nano-of-second, from 0 to 999,999,999.
    #[inline]
    #[must_use]
    pub const fn nano(&self) -> u32 {
        (self.nano_of_day % NANOS_PER_SECOND) as u32
    }

    /// Returns the time as seconds of day, from `0` to `86_399`.
    #[inline]
    #[must_use]
    pub const fn to_second_of_day(&self) -> u32 {
        (self.nano_of_day / NANOS_PER_SECOND) as u32
    }

    /// Returns the time as nanoseconds of day.
    #[inline]
    #[must_use]
    pub const fn to_nano_of_day(&self) -> i64 {
        self.nano_of_day
    }

    /// Returns a copy with the hour-of-day altered.
    pub fn with_hour(&self, hour: i32) -> TemporalResult<Self> {
        let hour = ChronoField::HourOfDay.check_valid_value(i64::from(hour))?;
        Ok(Self::new_unchecked(
            self.nano_of_day % NANOS_PER_HOUR + hour * NANOS_PER_HOUR,
        ))
    }

    /// Returns a copy with the minute-of-hour altered.
    pub fn with_minute(&self, minute: i32) -> TemporalResult<Self> {
        let minute = ChronoField::MinuteOfHour.check_valid_value(i64::from(minute))?;
        Ok(Self::from_parts(
            i64::from(self.hour()),
            minute,
            i64::from(self.second()),
            i64::from(self.nano()),
        ))
    }

    /// Returns a copy with the second-of-minute altered.
    pub fn with_second(&self, second: i32) -> TemporalResult<Self> {
        let second = ChronoField::SecondOfMinute.check_valid_value(i64::from(second))?;
        Ok(Self::from_parts(
            i64::from(self.hour()),
            i64::from(self.minute()),
            second,
            i64::from(self.nano()),
        ))
    }

    /// Returns a copy with the nano-of-second altered.
    pub fn with_nano(&self, nano: i32) -> TemporalResult<Self> {
        let nano = ChronoField::NanoOfSecond.check_valid_value(i64::from(nano))?;
        Ok(Self::new_unchecked(
            self.nano_of_day - i64::from(self.nano()) + nano,
        ))
    }

    /// Returns a copy with hours added, wrapping around midnight.
    #[must_use]
    pub fn plus_hours(&self, hours: i64) -> Self {
        self.add_with_carry(hours, 0, 0, 0, 1).1
    }

    /// Returns a copy with minutes added, wrapping around midnight.
    #[must_use]
    pub fn plus_minutes(&self, minutes: i64) -> Self {
        self.add_with_carry(0, minutes, 0, 0, 1).1
    }

    /// Returns a copy with seconds added, wrapping around midnight.
    #[must_use]
    pub fn plus_seconds(&self, seconds: i64) -> Self {
        self.add_with_carry(0, 0, seconds, 0, 1).1
    }

    /// Returns a copy with nanoseconds added, wrapping around midnight.
    #[must_use]
    pub fn plus_nanos(&self, nanos: i64) -> Self {
        self.add_with_carry(0, 0, 0, nanos, 1).1
    }

    /// Returns a copy with hours subtracted, wrapping around midnight.
    #[must_use]
    pub fn minus_hours(&self, hours: i64) -> Self {
        self.add_with_carry(hours, 0, 0, 0, -1).1
    }

    /// Returns a copy with minutes subtracted, wrapping around midnight.
    #[must_use]
    pub fn minus_minutes(&self, minutes: i64) -> Self {
        self.add_with_carry(0, minutes, 0, 0, -1).1
    }

    /// Returns a copy with seconds subtracted, wrapping around midnight.
    #[must_use]
    pub fn minus_seconds(&self, seconds: i64) -> Self {
        self.add_with_carry(0, 0, seconds, 0, -1).1
    }

    /// Returns a copy with nanoseconds subtracted, wrapping around midnight.
    #[must_use]
    pub fn minus_nanos(&self, nanos: i64) -> Self {
        self.add_with_carry(0, 0, 0, nanos, -1).1
    }

    /// Returns a copy truncated to `unit`.
    ///
    /// `unit` must divide a standard day without remainder, so hours and
    /// minutes are accepted but a 7 minute unit is not.
    pub fn truncated_to<U: TemporalUnit + ?Sized>(&self, unit: &U) -> TemporalResult<Self> {
        if unit.as_chrono_unit() == Some(ChronoUnit::Nanos) {
            return Ok(*self);
        }
        let unit_nanos = unit_nanos_within_day(unit)?;
        Ok(Self::new_unchecked(
            (self.nano_of_day / unit_nanos) * unit_nanos,
        ))
    }

    /// Combines this time with a date.
    #[inline]
    #[must_use]
    pub const fn at_date(&self, date: LocalDate) -> LocalDateTime {
        LocalDateTime::of(date, *self)
    }
}

// ==== Trait impls ====

impl TemporalAccessor for LocalTime {
    fn is_supported_field<F: TemporalField + ?Sized>(&self, field: &F) -> bool {
        match field.as_chrono_field() {
            Some(f) => f.is_time_field(),
            None => field.is_supported_by(self),
        }
    }

    fn range<F: TemporalField + ?Sized>(&self, field: &F) -> TemporalResult<ValueRange> {
        match field.as_chrono_field() {
            Some(f) if f.is_time_field() => Ok(f.value_range()),
            Some(f) => Err(f.unsupported()),
            None => field.range_refined_by(self),
        }
    }

    fn get_long<F: TemporalField + ?Sized>(&self, field: &F) -> TemporalResult<i64> {
        match field.as_chrono_field() {
            Some(f) => self.get_chrono_field(f),
            None => field.get_from(self),
        }
    }
}

impl Temporal for LocalTime {
    fn is_supported_unit<U: TemporalUnit + ?Sized>(&self, unit: &U) -> bool {
        match unit.as_chrono_unit() {
            Some(u) => u.is_time_unit(),
            None => unit.is_supported_by(self),
        }
    }

    fn with_field<F: TemporalField + ?Sized>(
        &self,
        field: &F,
        new_value: i64,
    ) -> TemporalResult<Self> {
        match field.as_chrono_field() {
            Some(f) => self.with_chrono_field(f, new_value),
            None => field.adjust_into(self, new_value),
        }
    }

    fn plus_unit<U: TemporalUnit + ?Sized>(&self, amount: i64, unit: &U) -> TemporalResult<Self> {
        let Some(u) = unit.as_chrono_unit() else {
            return unit.add_to(self, amount);
        };
        let time = match u {
            ChronoUnit::Nanos => self.plus_nanos(amount),
            ChronoUnit::Micros => self.plus_nanos((amount % MICROS_PER_DAY) * NANOS_PER_MICRO),
            ChronoUnit::Millis => self.plus_nanos((amount % MILLIS_PER_DAY) * NANOS_PER_MILLI),
            ChronoUnit::Seconds => self.plus_seconds(amount),
            ChronoUnit::Minutes => self.plus_minutes(amount),
            ChronoUnit::Hours => self.plus_hours(amount),
            ChronoUnit::HalfDays => self.plus_hours((amount % 2) * 12),
            _ => return Err(u.unsupported()),
        };
        Ok(time)
    }

    fn until<U: TemporalUnit + ?Sized>(&self, end: &Self, unit: &U) -> TemporalResult<i64> {
        let Some(u) = unit.as_chrono_unit() else {
            return unit.between(self, end);
        };
        let nanos_until = end.nano_of_day - self.nano_of_day;
        let amount = match u {
            ChronoUnit::Nanos => nanos_until,
            ChronoUnit::Micros => nanos_until / NANOS_PER_MICRO,
            ChronoUnit::Millis => nanos_until / NANOS_PER_MILLI,
            ChronoUnit::Seconds => nanos_until / NANOS_PER_SECOND,
            ChronoUnit::Minutes => nanos_until / NANOS_PER_MINUTE,
            ChronoUnit::Hours => nanos_until / NANOS_PER_HOUR,
            ChronoUnit::HalfDays => nanos_until / (12 * NANOS_PER_HOUR),
            _ => return Err(unsupported_unit(unit)),
        };
        Ok(amount)
    }
}

impl TemporalAdjuster for LocalTime {
    fn adjust_into<T: Temporal>(&self, temporal: &T) -> TemporalResult<T> {
        temporal.with_field(&ChronoField::NanoOfDay, self.nano_of_day)
    }
}

impl LocalTime {
    #[inline]
    pub(crate) fn formattable(&self) -> FormattableTime {
        FormattableTime {
            hour: self.hour(),
            minute: self.minute(),
            second: self.second(),
            nano: self.nano(),
            include_seconds: false,
        }
    }
}

impl Writeable for LocalTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        self.formattable().write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.formattable().writeable_length_hint()
    }
}

impl_display_with_writeable!(LocalTime);

impl FromStr for LocalTime {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsers::parse_local_time(s)
    }
}

#[cfg(test)]
mod tests {
    use super::LocalTime;
    use crate::{error::ErrorKind, ChronoField, ChronoUnit, Temporal, TemporalAccessor};
    use alloc::string::ToString;
    use core::str::FromStr;

    #[test]
    fn wraps_around_midnight() {
        let time = LocalTime::of(23, 30).unwrap();
        assert_eq!(time.plus_hours(1), LocalTime::of(0, 30).unwrap());
        assert_eq!(time.plus_minutes(-1_470), LocalTime::of(23, 0).unwrap());
        assert_eq!(time.minus_hours(24), time);
        assert_eq!(LocalTime::MIDNIGHT.minus_nanos(1), LocalTime::MAX);
        assert_eq!(LocalTime::MAX.plus_nanos(1), LocalTime::MIDNIGHT);
        assert!(time.plus_seconds(i64::MAX).to_second_of_day() < 86_400);
        assert!(time.minus_nanos(i64::MIN).to_nano_of_day() >= 0);
    }

    #[test]
    fn carry_reports_days() {
        let time = LocalTime::of(22, 0).unwrap();
        assert_eq!(time.add_with_carry(3, 0, 0, 0, 1), (1, LocalTime::of(1, 0).unwrap()));
        assert_eq!(time.add_with_carry(0, 0, 0, 0, 1), (0, time));
        assert_eq!(time.add_with_carry(47, 0, 0, 0, -1), (-2, LocalTime::of(23, 0).unwrap()));
        assert_eq!(
            LocalTime::MIDNIGHT.add_with_carry(0, 0, 86_400 * 3 + 1, 0, 1),
            (3, LocalTime::of_hms(0, 0, 1).unwrap())
        );
    }

    #[test]
    fn construction_is_range_checked() {
        assert_eq!(LocalTime::of(24, 0).unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(LocalTime::of_hms(1, 60, 0).unwrap_err().kind(), ErrorKind::Range);
        assert!(LocalTime::of_hmsn(1, 1, 1, 1_000_000_000).is_err());
        assert!(LocalTime::of_nano_of_day(-1).is_err());
        assert_eq!(LocalTime::of_second_of_day(3_661), LocalTime::of_hms(1, 1, 1));
    }

    #[test]
    fn fields() {
        let time = LocalTime::of_hmsn(13, 45, 10, 123_456_789).unwrap();
        assert_eq!(time.get(&ChronoField::HourOfAmPm), Ok(1));
        assert_eq!(time.get(&ChronoField::ClockHourOfAmPm), Ok(1));
        assert_eq!(time.get(&ChronoField::AmPmOfDay), Ok(1));
        assert_eq!(time.get(&ChronoField::MilliOfSecond), Ok(123));
        assert_eq!(time.get(&ChronoField::MinuteOfDay), Ok(13 * 60 + 45));
        assert_eq!(LocalTime::MIDNIGHT.get(&ChronoField::ClockHourOfDay), Ok(24));
        assert_eq!(
            time.get(&ChronoField::DayOfMonth).unwrap_err().kind(),
            ErrorKind::Unsupported
        );

        assert_eq!(
            time.with_field(&ChronoField::AmPmOfDay, 0),
            LocalTime::of_hmsn(1, 45, 10, 123_456_789)
        );
        assert_eq!(
            time.with_field(&ChronoField::ClockHourOfAmPm, 12),
            LocalTime::of_hmsn(12, 45, 10, 123_456_789)
        );
        assert_eq!(
            time.with_field(&ChronoField::MilliOfSecond, 5),
            LocalTime::of_hmsn(13, 45, 10, 5_000_000)
        );
        assert_eq!(
            time.with_field(&ChronoField::Year, 2000).unwrap_err().kind(),
            ErrorKind::Unsupported
        );
    }

    #[test]
    fn truncation() {
        let time = LocalTime::of_hmsn(13, 45, 10, 123_456_789).unwrap();
        assert_eq!(time.truncated_to(&ChronoUnit::Hours), LocalTime::of(13, 0));
        assert_eq!(time.truncated_to(&ChronoUnit::Millis), LocalTime::of_hmsn(13, 45, 10, 123_000_000));
        assert_eq!(time.truncated_to(&ChronoUnit::Days), Ok(LocalTime::MIDNIGHT));
        assert_eq!(
            time.truncated_to(&ChronoUnit::Weeks).unwrap_err().kind(),
            ErrorKind::Unsupported
        );
    }

    #[test]
    fn until_in_units() {
        let start = LocalTime::of(10, 30).unwrap();
        let end = LocalTime::of(8, 0).unwrap();
        assert_eq!(start.until(&end, &ChronoUnit::Hours), Ok(-2));
        assert_eq!(start.until(&end, &ChronoUnit::Minutes), Ok(-150));
        assert_eq!(end.until(&start, &ChronoUnit::HalfDays), Ok(0));
        assert!(start.until(&end, &ChronoUnit::Days).is_err());
        assert_eq!(start.plus_unit(3, &ChronoUnit::HalfDays), LocalTime::of(22, 30));
    }

    #[test]
    fn text_form() {
        assert_eq!(LocalTime::of(9, 5).unwrap().to_string(), "09:05");
        assert_eq!(LocalTime::of_hms(9, 5, 1).unwrap().to_string(), "09:05:01");
        assert_eq!(LocalTime::of_hmsn(9, 5, 0, 500_000_000).unwrap().to_string(), "09:05:00.500");
        assert_eq!(LocalTime::of_hmsn(9, 5, 0, 1_000).unwrap().to_string(), "09:05:00.000001");
        assert_eq!(LocalTime::MAX.to_string(), "23:59:59.999999999");

        for time in [LocalTime::NOON, LocalTime::MAX, LocalTime::of_hmsn(1, 2, 3, 40).unwrap()] {
            assert_eq!(LocalTime::from_str(&time.to_string()), Ok(time));
        }
        assert_eq!(LocalTime::from_str("10:15:30,5"), LocalTime::of_hmsn(10, 15, 30, 500_000_000));
        assert_eq!(LocalTime::from_str("24:00").unwrap_err().kind(), ErrorKind::Parse);
        assert!(LocalTime::from_str("10").is_err());
    }
}
