//! This module implements `Instant`, a point on the UTC time-line.

use core::{fmt::Write, str::FromStr};

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    builtins::core::{duration::unit_nanos_within_day, Duration, ZoneId, ZonedDateTime},
    fields::{ChronoField, TemporalField, ValueRange},
    host::HostClock,
    iso,
    parsers::{self, FormattableDate, FormattableTime},
    temporal::{unsupported_unit, Temporal, TemporalAccessor, TemporalAdjuster},
    units::{ChronoUnit, TemporalUnit},
    utils, TemporalError, TemporalResult, NANOS_PER_MICRO, NANOS_PER_MILLI, NANOS_PER_SECOND,
    SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};

/// `-999999999-01-01T00:00:00Z`
const MIN_SECOND: i64 = -31_557_014_135_596_800;
/// `+999999999-12-31T23:59:59Z`
const MAX_SECOND: i64 = 31_556_889_832_780_799;

/// An instantaneous point on the time-line, such as `2007-12-03T10:15:30Z`.
///
/// An `Instant` is a count of seconds from 1970-01-01T00:00Z plus a
/// nanosecond-of-second. The supported range is exactly the range of
/// [`LocalDateTime`][crate::LocalDateTime] in UTC, so every instant can be
/// printed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    seconds: i64,
    nanos: i32,
}

// ==== Private API ====

impl Instant {
    fn create(seconds: i64, nanos: i32) -> TemporalResult<Self> {
        if !(MIN_SECOND..=MAX_SECOND).contains(&seconds) {
            return Err(
                TemporalError::range().with_message("Instant exceeds minimum or maximum instant")
            );
        }
        Ok(Self { seconds, nanos })
    }

    fn plus_parts(&self, seconds_to_add: i64, nanos_to_add: i64) -> TemporalResult<Self> {
        if (seconds_to_add | nanos_to_add) == 0 {
            return Ok(*self);
        }
        let mut seconds = utils::checked_add(self.seconds, seconds_to_add)?;
        seconds = utils::checked_add(seconds, nanos_to_add / NANOS_PER_SECOND)?;
        let nanos = i64::from(self.nanos) + nanos_to_add % NANOS_PER_SECOND;
        Self::of_epoch_second_adjusted(seconds, nanos)
    }

    fn seconds_until(&self, end: &Self) -> TemporalResult<i64> {
        let mut seconds = utils::checked_sub(end.seconds, self.seconds)?;
        let nanos = end.nanos - self.nanos;
        if seconds > 0 && nanos < 0 {
            seconds -= 1;
        } else if seconds < 0 && nanos > 0 {
            seconds += 1;
        }
        Ok(seconds)
    }

    fn nanos_until(&self, end: &Self) -> TemporalResult<i64> {
        let seconds = utils::checked_sub(end.seconds, self.seconds)?;
        let nanos = utils::checked_mul(seconds, NANOS_PER_SECOND)?;
        utils::checked_add(nanos, i64::from(end.nanos - self.nanos))
    }

    fn with_nanos(&self, nanos: i64) -> TemporalResult<Self> {
        if nanos == i64::from(self.nanos) {
            return Ok(*self);
        }
        Self::create(self.seconds, nanos as i32)
    }
}

// ==== Public API ====

impl Instant {
    /// The epoch instant, `1970-01-01T00:00:00Z`.
    pub const EPOCH: Self = Self {
        seconds: 0,
        nanos: 0,
    };
    /// The minimum supported instant, `-999999999-01-01T00:00:00Z`.
    pub const MIN: Self = Self {
        seconds: MIN_SECOND,
        nanos: 0,
    };
    /// The maximum supported instant, `+999999999-12-31T23:59:59.999999999Z`.
    pub const MAX: Self = Self {
        seconds: MAX_SECOND,
        nanos: 999_999_999,
    };

    /// Creates an instant from seconds since the epoch.
    pub fn of_epoch_second(epoch_second: i64) -> TemporalResult<Self> {
        Self::create(epoch_second, 0)
    }

    /// Creates an instant from seconds since the epoch and a nanosecond
    /// adjustment, which may be any value.
    pub fn of_epoch_second_adjusted(epoch_second: i64, nano_adjustment: i64) -> TemporalResult<Self> {
        let seconds = utils::checked_add(
            epoch_second,
            utils::floor_div(nano_adjustment, NANOS_PER_SECOND),
        )?;
        let nanos = utils::floor_mod(nano_adjustment, NANOS_PER_SECOND) as i32;
        Self::create(seconds, nanos)
    }

    /// Creates an instant from milliseconds since the epoch.
    pub fn of_epoch_milli(epoch_milli: i64) -> TemporalResult<Self> {
        let seconds = utils::floor_div(epoch_milli, 1_000);
        let millis = utils::floor_mod(epoch_milli, 1_000);
        Self::create(seconds, (millis * NANOS_PER_MILLI) as i32)
    }

    /// Obtains an instant from any value supporting `InstantSeconds`.
    pub fn from<A: TemporalAccessor + ?Sized>(temporal: &A) -> TemporalResult<Self> {
        let seconds = temporal.get_long(&ChronoField::InstantSeconds)?;
        let nanos = temporal.get(&ChronoField::NanoOfSecond)?;
        Self::of_epoch_second_adjusted(seconds, i64::from(nanos))
    }

    /// Obtains the current instant from `clock`.
    pub fn now<C: HostClock + ?Sized>(clock: &C) -> TemporalResult<Self> {
        clock.get_host_instant()
    }

    /// Parses an instant such as `2007-12-03T10:15:30.00Z`.
    ///
    /// Any offset is accepted and converted to UTC.
    pub fn parse(text: &str) -> TemporalResult<Self> {
        parsers::parse_instant(text)
    }

    /// Returns the seconds since the epoch.
    #[inline]
    #[must_use]
    pub const fn epoch_second(&self) -> i64 {
        self.seconds
    }

    /// Returns the nanosecond-of-second.
    #[inline]
    #[must_use]
    pub const fn nano(&self) -> u32 {
        self.nanos as u32
    }

    /// Returns the milliseconds since the epoch, truncating any finer precision.
    pub fn to_epoch_milli(&self) -> TemporalResult<i64> {
        let nanos = i64::from(self.nanos);
        if self.seconds < 0 && nanos > 0 {
            let millis = utils::checked_mul(self.seconds + 1, 1_000)?;
            utils::checked_add(millis, nanos / NANOS_PER_MILLI - 1_000)
        } else {
            let millis = utils::checked_mul(self.seconds, 1_000)?;
            utils::checked_add(millis, nanos / NANOS_PER_MILLI)
        }
    }

    pub fn plus(&self, duration: &Duration) -> TemporalResult<Self> {
        self.plus_parts(duration.seconds(), i64::from(duration.nanos()))
    }

    pub fn minus(&self, duration: &Duration) -> TemporalResult<Self> {
        self.plus_parts(
            utils::checked_neg(duration.seconds())?,
            -i64::from(duration.nanos()),
        )
    }

    pub fn plus_seconds(&self, seconds: i64) -> TemporalResult<Self> {
        self.plus_parts(seconds, 0)
    }

    pub fn plus_millis(&self, millis: i64) -> TemporalResult<Self> {
        self.plus_parts(millis / 1_000, (millis % 1_000) * NANOS_PER_MILLI)
    }

    pub fn plus_nanos(&self, nanos: i64) -> TemporalResult<Self> {
        self.plus_parts(0, nanos)
    }

    pub fn minus_seconds(&self, seconds: i64) -> TemporalResult<Self> {
        self.minus_unit(seconds, &ChronoUnit::Seconds)
    }

    pub fn minus_millis(&self, millis: i64) -> TemporalResult<Self> {
        self.minus_unit(millis, &ChronoUnit::Millis)
    }

    pub fn minus_nanos(&self, nanos: i64) -> TemporalResult<Self> {
        self.minus_unit(nanos, &ChronoUnit::Nanos)
    }

    /// Returns a copy truncated to `unit`, which must divide a standard day.
    pub fn truncated_to<U: TemporalUnit + ?Sized>(&self, unit: &U) -> TemporalResult<Self> {
        if unit.as_chrono_unit() == Some(ChronoUnit::Nanos) {
            return Ok(*self);
        }
        let unit_nanos = unit_nanos_within_day(unit)?;
        let nano_of_day = (self.seconds % SECONDS_PER_DAY) * NANOS_PER_SECOND + i64::from(self.nanos);
        let result = utils::floor_div(nano_of_day, unit_nanos) * unit_nanos;
        self.plus_nanos(result - nano_of_day)
    }

    /// Returns this instant as seen in `zone`.
    pub fn at_zone(&self, zone: ZoneId) -> TemporalResult<ZonedDateTime> {
        ZonedDateTime::of_instant(*self, zone)
    }
}

// ==== Trait impls ====

impl TemporalAccessor for Instant {
    fn is_supported_field<F: TemporalField + ?Sized>(&self, field: &F) -> bool {
        match field.as_chrono_field() {
            Some(f) => matches!(
                f,
                ChronoField::NanoOfSecond
                    | ChronoField::MicroOfSecond
                    | ChronoField::MilliOfSecond
                    | ChronoField::InstantSeconds
            ),
            None => field.is_supported_by(self),
        }
    }

    fn range<F: TemporalField + ?Sized>(&self, field: &F) -> TemporalResult<ValueRange> {
        match field.as_chrono_field() {
            Some(f) if self.is_supported_field(&f) => Ok(f.value_range()),
            Some(f) => Err(f.unsupported()),
            None => field.range_refined_by(self),
        }
    }

    fn get_long<F: TemporalField + ?Sized>(&self, field: &F) -> TemporalResult<i64> {
        let nanos = i64::from(self.nanos);
        match field.as_chrono_field() {
            Some(ChronoField::NanoOfSecond) => Ok(nanos),
            Some(ChronoField::MicroOfSecond) => Ok(nanos / NANOS_PER_MICRO),
            Some(ChronoField::MilliOfSecond) => Ok(nanos / NANOS_PER_MILLI),
            Some(ChronoField::InstantSeconds) => Ok(self.seconds),
            Some(f) => Err(f.unsupported()),
            None => field.get_from(self),
        }
    }
}

impl Temporal for Instant {
    fn is_supported_unit<U: TemporalUnit + ?Sized>(&self, unit: &U) -> bool {
        match unit.as_chrono_unit() {
            Some(u) => u.is_time_unit() || u == ChronoUnit::Days,
            None => unit.is_supported_by(self),
        }
    }

    fn with_field<F: TemporalField + ?Sized>(
        &self,
        field: &F,
        new_value: i64,
    ) -> TemporalResult<Self> {
        let Some(f) = field.as_chrono_field() else {
            return field.adjust_into(self, new_value);
        };
        match f {
            ChronoField::MilliOfSecond => {
                self.with_nanos(f.check_valid_value(new_value)? * NANOS_PER_MILLI)
            }
            ChronoField::MicroOfSecond => {
                self.with_nanos(f.check_valid_value(new_value)? * NANOS_PER_MICRO)
            }
            ChronoField::NanoOfSecond => self.with_nanos(f.check_valid_value(new_value)?),
            ChronoField::InstantSeconds if new_value == self.seconds => Ok(*self),
            ChronoField::InstantSeconds => Self::create(new_value, self.nanos),
            _ => Err(f.unsupported()),
        }
    }

    fn plus_unit<U: TemporalUnit + ?Sized>(&self, amount: i64, unit: &U) -> TemporalResult<Self> {
        let Some(u) = unit.as_chrono_unit() else {
            return unit.add_to(self, amount);
        };
        match u {
            ChronoUnit::Nanos => self.plus_nanos(amount),
            ChronoUnit::Micros => {
                self.plus_parts(amount / 1_000_000, (amount % 1_000_000) * NANOS_PER_MICRO)
            }
            ChronoUnit::Millis => self.plus_millis(amount),
            ChronoUnit::Seconds => self.plus_seconds(amount),
            ChronoUnit::Minutes => self.plus_seconds(utils::checked_mul(amount, SECONDS_PER_MINUTE)?),
            ChronoUnit::Hours => self.plus_seconds(utils::checked_mul(amount, SECONDS_PER_HOUR)?),
            ChronoUnit::HalfDays => {
                self.plus_seconds(utils::checked_mul(amount, SECONDS_PER_DAY / 2)?)
            }
            ChronoUnit::Days => self.plus_seconds(utils::checked_mul(amount, SECONDS_PER_DAY)?),
            _ => Err(u.unsupported()),
        }
    }

    fn until<U: TemporalUnit + ?Sized>(&self, end: &Self, unit: &U) -> TemporalResult<i64> {
        let Some(u) = unit.as_chrono_unit() else {
            return unit.between(self, end);
        };
        match u {
            ChronoUnit::Nanos => self.nanos_until(end),
            ChronoUnit::Micros => Ok(self.nanos_until(end)? / NANOS_PER_MICRO),
            ChronoUnit::Millis => utils::checked_sub(end.to_epoch_milli()?, self.to_epoch_milli()?),
            ChronoUnit::Seconds => self.seconds_until(end),
            ChronoUnit::Minutes => Ok(self.seconds_until(end)? / SECONDS_PER_MINUTE),
            ChronoUnit::Hours => Ok(self.seconds_until(end)? / SECONDS_PER_HOUR),
            ChronoUnit::HalfDays => Ok(self.seconds_until(end)? / (SECONDS_PER_DAY / 2)),
            ChronoUnit::Days => Ok(self.seconds_until(end)? / SECONDS_PER_DAY),
            _ => Err(unsupported_unit(unit)),
        }
    }
}

impl TemporalAdjuster for Instant {
    fn adjust_into<T: Temporal>(&self, temporal: &T) -> TemporalResult<T> {
        temporal
            .with_field(&ChronoField::InstantSeconds, self.seconds)?
            .with_field(&ChronoField::NanoOfSecond, i64::from(self.nanos))
    }
}

impl Instant {
    fn formattable(&self) -> (FormattableDate, FormattableTime) {
        let epoch_day = utils::floor_div(self.seconds, SECONDS_PER_DAY);
        let second_of_day = utils::floor_mod(self.seconds, SECONDS_PER_DAY);
        let (year, month, day) = iso::ymd_from_epoch_day(epoch_day);
        let time = FormattableTime {
            hour: (second_of_day / SECONDS_PER_HOUR) as u8,
            minute: ((second_of_day / SECONDS_PER_MINUTE) % 60) as u8,
            second: (second_of_day % 60) as u8,
            nano: self.nanos as u32,
            include_seconds: true,
        };
        (FormattableDate(year as i32, month, day), time)
    }
}

impl Writeable for Instant {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        let (date, time) = self.formattable();
        date.write_to(sink)?;
        sink.write_char('T')?;
        time.write_to(sink)?;
        sink.write_char('Z')
    }

    fn writeable_length_hint(&self) -> LengthHint {
        let (date, time) = self.formattable();
        date.writeable_length_hint() + time.writeable_length_hint() + 2
    }
}

impl_display_with_writeable!(Instant);

impl FromStr for Instant {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsers::parse_instant(s)
    }
}

#[cfg(test)]
mod tests {
    use super::Instant;
    use crate::{error::ErrorKind, ChronoField, ChronoUnit, Duration, Temporal, TemporalAccessor};
    use alloc::string::ToString;
    use core::str::FromStr;

    #[test]
    fn construction_normalizes_nanos() {
        let instant = Instant::of_epoch_second_adjusted(3, -1).unwrap();
        assert_eq!(instant.epoch_second(), 2);
        assert_eq!(instant.nano(), 999_999_999);
        let instant = Instant::of_epoch_milli(-1).unwrap();
        assert_eq!(instant.epoch_second(), -1);
        assert_eq!(instant.nano(), 999_000_000);
        assert_eq!(instant.to_epoch_milli(), Ok(-1));
        assert!(Instant::of_epoch_second(i64::MAX).is_err());
        assert!(Instant::MAX.plus_nanos(1).is_err());
        assert!(Instant::MIN.minus_nanos(1).is_err());
    }

    #[test]
    fn arithmetic_and_until() {
        let start = Instant::of_epoch_second(1_000).unwrap();
        let end = start.plus(&Duration::of_seconds_adjusted(90, 500_000_000).unwrap()).unwrap();
        assert_eq!(start.until(&end, &ChronoUnit::Seconds), Ok(90));
        assert_eq!(start.until(&end, &ChronoUnit::Minutes), Ok(1));
        assert_eq!(start.until(&end, &ChronoUnit::Millis), Ok(90_500));
        assert_eq!(end.until(&start, &ChronoUnit::Seconds), Ok(-90));
        assert_eq!(end.minus(&Duration::of_millis(90_500)), Ok(start));
        assert_eq!(start.plus_unit(1, &ChronoUnit::Days).unwrap().epoch_second(), 87_400);
        assert_eq!(
            start.plus_unit(1, &ChronoUnit::Months).unwrap_err().kind(),
            ErrorKind::Unsupported
        );
        assert!(Instant::MIN.until(&Instant::MAX, &ChronoUnit::Nanos).is_err());
    }

    #[test]
    fn truncation_floors_before_epoch() {
        let instant = Instant::of_epoch_second_adjusted(-1, 500_000_000).unwrap();
        assert_eq!(instant.truncated_to(&ChronoUnit::Seconds), Instant::of_epoch_second(-1));
        assert_eq!(instant.truncated_to(&ChronoUnit::Days), Instant::of_epoch_second(-86_400));
        assert!(instant.truncated_to(&ChronoUnit::Weeks).is_err());
    }

    #[test]
    fn fields() {
        let instant = Instant::of_epoch_second_adjusted(10, 123_456_789).unwrap();
        assert_eq!(instant.get(&ChronoField::MilliOfSecond), Ok(123));
        assert_eq!(instant.get_long(&ChronoField::InstantSeconds), Ok(10));
        assert_eq!(
            instant.get(&ChronoField::InstantSeconds).unwrap_err().kind(),
            ErrorKind::Range
        );
        assert_eq!(
            instant.with_field(&ChronoField::MicroOfSecond, 7),
            Instant::of_epoch_second_adjusted(10, 7_000)
        );
        assert!(instant.with_field(&ChronoField::HourOfDay, 1).is_err());
    }

    #[test]
    fn text_form() {
        assert_eq!(Instant::EPOCH.to_string(), "1970-01-01T00:00:00Z");
        let instant = Instant::of_epoch_second_adjusted(1_196_676_930, 10_000_000).unwrap();
        assert_eq!(instant.to_string(), "2007-12-03T10:15:30.010Z");
        assert_eq!(Instant::from_str("2007-12-03T10:15:30.01Z"), Ok(instant));
        assert_eq!(Instant::from_str("2007-12-03T11:15:30.01+01:00"), Ok(instant));
        assert_eq!(Instant::MAX.to_string(), "+999999999-12-31T23:59:59.999999999Z");
        assert_eq!(Instant::from_str(&Instant::MIN.to_string()), Ok(Instant::MIN));
        assert_eq!(
            Instant::from_str("2007-12-03T10:15:30").unwrap_err().kind(),
            ErrorKind::Parse
        );
    }
}
