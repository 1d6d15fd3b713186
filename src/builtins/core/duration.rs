//! This module implements `Duration`, an exact amount of elapsed time.

use alloc::{vec, vec::Vec};
use core::str::FromStr;

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    fields::ChronoField,
    parsers::{self, FormattableDuration},
    temporal::{Temporal, TemporalAmount},
    units::{ChronoUnit, TemporalUnit},
    utils, Sign, TemporalError, TemporalResult, NANOS_PER_DAY, NANOS_PER_MILLI, NANOS_PER_SECOND,
    SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};


/// A time-based amount of time, such as "34.5 seconds".
///
/// A `Duration` is stored as a count of seconds and a nanosecond adjustment
/// in the range `0..1_000_000_000`. The sign is carried entirely by the
/// seconds, so `-0.5s` is stored as `-1` seconds plus `500_000_000`
/// nanoseconds.
///
/// Days are treated as exactly 24 hours. Calendar amounts such as months are
/// represented by [`Period`][crate::Period] instead.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    seconds: i64,
    nanos: i32,
}

// ==== Private API ====

impl Duration {
    /// Creates a `Duration` from parts that are already normalized.
    #[inline]
    pub(crate) const fn new_unchecked(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }

    #[inline]
    fn total_nanos(&self) -> i128 {
        i128::from(self.seconds) * i128::from(NANOS_PER_SECOND) + i128::from(self.nanos)
    }

    fn from_total_nanos(nanos: i128) -> TemporalResult<Self> {
        let divisor = i128::from(NANOS_PER_SECOND);
        let seconds = utils::i128_to_i64(utils::floor_div_i128(nanos, divisor))?;
        let nanos = utils::floor_mod_i128(nanos, divisor) as i32;
        Ok(Self::new_unchecked(seconds, nanos))
    }

    fn plus_parts(&self, seconds_to_add: i64, nanos_to_add: i64) -> TemporalResult<Self> {
        if (seconds_to_add | nanos_to_add) == 0 {
            return Ok(*self);
        }
        let mut seconds = utils::checked_add(self.seconds, seconds_to_add)?;
        seconds = utils::checked_add(seconds, nanos_to_add / NANOS_PER_SECOND)?;
        let nanos = i64::from(self.nanos) + nanos_to_add % NANOS_PER_SECOND;
        Self::of_seconds_adjusted(seconds, nanos)
    }
}

// ==== Public API ====

impl Duration {
    /// The zero length duration.
    pub const ZERO: Self = Self::new_unchecked(0, 0);

    /// Creates a `Duration` of standard 24 hour days.
    pub fn of_days(days: i64) -> TemporalResult<Self> {
        Ok(Self::new_unchecked(utils::checked_mul(days, SECONDS_PER_DAY)?, 0))
    }

    /// Creates a `Duration` of hours.
    pub fn of_hours(hours: i64) -> TemporalResult<Self> {
        Ok(Self::new_unchecked(utils::checked_mul(hours, SECONDS_PER_HOUR)?, 0))
    }

    /// Creates a `Duration` of minutes.
    pub fn of_minutes(minutes: i64) -> TemporalResult<Self> {
        Ok(Self::new_unchecked(utils::checked_mul(minutes, SECONDS_PER_MINUTE)?, 0))
    }

    /// Creates a `Duration` of seconds.
    #[inline]
    #[must_use]
    pub const fn of_seconds(seconds: i64) -> Self {
        Self::new_unchecked(seconds, 0)
    }

    /// Creates a `Duration` of seconds and a nanosecond adjustment.
    ///
    /// The adjustment may be any value. It is normalized into the nanosecond
    /// range and the excess is carried into the seconds, so
    /// `of_seconds_adjusted(2, -1)` is one second plus 999,999,999 nanoseconds.
    pub fn of_seconds_adjusted(seconds: i64, nano_adjustment: i64) -> TemporalResult<Self> {
        let seconds = utils::checked_add(
            seconds,
            utils::floor_div(nano_adjustment, NANOS_PER_SECOND),
        )?;
        let nanos = utils::floor_mod(nano_adjustment, NANOS_PER_SECOND) as i32;
        Ok(Self::new_unchecked(seconds, nanos))
    }

    /// Creates a `Duration` of milliseconds.
    #[must_use]
    pub const fn of_millis(millis: i64) -> Self {
        let seconds = utils::floor_div(millis, 1_000);
        let millis = utils::floor_mod(millis, 1_000);
        Self::new_unchecked(seconds, (millis * NANOS_PER_MILLI) as i32)
    }

    /// Creates a `Duration` of nanoseconds.
    #[must_use]
    pub const fn of_nanos(nanos: i64) -> Self {
        let seconds = utils::floor_div(nanos, NANOS_PER_SECOND);
        let nanos = utils::floor_mod(nanos, NANOS_PER_SECOND);
        Self::new_unchecked(seconds, nanos as i32)
    }

    /// Creates a `Duration` of an amount of `unit`.
    ///
    /// The unit must have an exact duration or be `Days`, which is treated as
    /// 24 hours. Estimated units fail with an unsupported error.
    pub fn of<U: TemporalUnit + ?Sized>(amount: i64, unit: &U) -> TemporalResult<Self> {
        Self::ZERO.plus_unit(amount, unit)
    }

    /// Creates a `Duration` from any amount, summing each of its units.
    pub fn from<A: TemporalAmount + ?Sized>(amount: &A) -> TemporalResult<Self> {
        let mut duration = Self::ZERO;
        for unit in amount.units() {
            duration = duration.plus_unit(amount.get_unit(unit)?, &unit)?;
        }
        Ok(duration)
    }

    /// Calculates the duration between two values of the same type.
    ///
    /// The difference is taken in nanoseconds where that fits. Otherwise it
    /// falls back to whole seconds plus the nano-of-second difference.
    pub fn between<T: Temporal>(start: &T, end: &T) -> TemporalResult<Self> {
        if let Ok(nanos) = start.until(end, &ChronoUnit::Nanos) {
            return Ok(Self::of_nanos(nanos));
        }
        let mut seconds = start.until(end, &ChronoUnit::Seconds)?;
        let nanos = match (
            end.get_long(&ChronoField::NanoOfSecond),
            start.get_long(&ChronoField::NanoOfSecond),
        ) {
            (Ok(end_nanos), Ok(start_nanos)) => {
                let nanos = end_nanos - start_nanos;
                if seconds > 0 && nanos < 0 {
                    seconds += 1;
                } else if seconds < 0 && nanos > 0 {
                    seconds -= 1;
                }
                nanos
            }
            _ => 0,
        };
        Self::of_seconds_adjusted(seconds, nanos)
    }

    /// Parses an ISO-8601 duration such as `PT8H6M12.345S`.
    pub fn parse(text: &str) -> TemporalResult<Self> {
        parsers::parse_duration(text)
    }

    /// Returns the whole seconds of this duration.
    #[inline]
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Returns the nanosecond adjustment, always in `0..1_000_000_000`.
    #[inline]
    #[must_use]
    pub const fn nanos(&self) -> i32 {
        self.nanos
    }

    /// Returns whether this duration is zero length.
    #[inline]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        (self.seconds | self.nanos as i64) == 0
    }

    /// Returns whether this duration is negative, excluding zero.
    #[inline]
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.seconds < 0
    }

    /// Returns the sign of this duration.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        match self.seconds {
            0 => Sign::from(i64::from(self.nanos)),
            seconds => Sign::from(seconds),
        }
    }

    /// Returns the value of `Seconds` or `Nanos`.
    pub fn get(&self, unit: ChronoUnit) -> TemporalResult<i64> {
        match unit {
            ChronoUnit::Seconds => Ok(self.seconds),
            ChronoUnit::Nanos => Ok(i64::from(self.nanos)),
            _ => Err(unit.unsupported()),
        }
    }

    /// Returns a copy with the given whole seconds.
    #[must_use]
    pub const fn with_seconds(&self, seconds: i64) -> Self {
        Self::new_unchecked(seconds, self.nanos)
    }

    /// Returns a copy with the given nano-of-second.
    pub fn with_nanos(&self, nano_of_second: i64) -> TemporalResult<Self> {
        let nanos = ChronoField::NanoOfSecond.check_valid_int_value(nano_of_second)?;
        Ok(Self::new_unchecked(self.seconds, nanos))
    }

    /// Returns the sum of two durations.
    pub fn plus(&self, other: &Self) -> TemporalResult<Self> {
        self.plus_parts(other.seconds, i64::from(other.nanos))
    }

    /// Returns the difference of two durations.
    pub fn minus(&self, other: &Self) -> TemporalResult<Self> {
        let nanos = i64::from(other.nanos);
        if other.seconds == i64::MIN {
            return self.plus_parts(i64::MAX, -nanos)?.plus_parts(1, 0);
        }
        self.plus_parts(-other.seconds, -nanos)
    }

    /// Returns a copy with `amount` of `unit` added.
    ///
    /// `Days` is exactly 24 hours. Any other estimated unit is unsupported.
    pub fn plus_unit<U: TemporalUnit + ?Sized>(&self, amount: i64, unit: &U) -> TemporalResult<Self> {
        if unit.as_chrono_unit() == Some(ChronoUnit::Days) {
            return self.plus_parts(utils::checked_mul(amount, SECONDS_PER_DAY)?, 0);
        }
        if unit.is_duration_estimated() {
            return Err(TemporalError::unsupported()
                .with_message("Unit must not have an estimated duration"));
        }
        if amount == 0 {
            return Ok(*self);
        }
        match unit.as_chrono_unit() {
            Some(ChronoUnit::Nanos) => self.plus_nanos(amount),
            Some(ChronoUnit::Micros) => self
                .plus_seconds((amount / 1_000_000_000) * 1_000)?
                .plus_nanos((amount % 1_000_000_000) * 1_000),
            Some(ChronoUnit::Millis) => self.plus_millis(amount),
            Some(ChronoUnit::Seconds) => self.plus_seconds(amount),
            Some(u) => self.plus_seconds(utils::checked_mul(u.unit_duration().seconds, amount)?),
            None => {
                let duration = unit.duration().multiplied_by(amount)?;
                self.plus_seconds(duration.seconds)?
                    .plus_nanos(i64::from(duration.nanos))
            }
        }
    }

    /// Returns a copy with `amount` of `unit` subtracted.
    pub fn minus_unit<U: TemporalUnit + ?Sized>(
        &self,
        amount: i64,
        unit: &U,
    ) -> TemporalResult<Self> {
        if amount == i64::MIN {
            return self.plus_unit(i64::MAX, unit)?.plus_unit(1, unit);
        }
        self.plus_unit(-amount, unit)
    }

    /// Returns a copy with standard 24 hour days added.
    pub fn plus_days(&self, days: i64) -> TemporalResult<Self> {
        self.plus_parts(utils::checked_mul(days, SECONDS_PER_DAY)?, 0)
    }

    /// Returns a copy with hours added.
    pub fn plus_hours(&self, hours: i64) -> TemporalResult<Self> {
        self.plus_parts(utils::checked_mul(hours, SECONDS_PER_HOUR)?, 0)
    }

    /// Returns a copy with minutes added.
    pub fn plus_minutes(&self, minutes: i64) -> TemporalResult<Self> {
        self.plus_parts(utils::checked_mul(minutes, SECONDS_PER_MINUTE)?, 0)
    }

    /// Returns a copy with seconds added.
    pub fn plus_seconds(&self, seconds: i64) -> TemporalResult<Self> {
        self.plus_parts(seconds, 0)
    }

    /// Returns a copy with milliseconds added.
    pub fn plus_millis(&self, millis: i64) -> TemporalResult<Self> {
        self.plus_parts(millis / 1_000, (millis % 1_000) * NANOS_PER_MILLI)
    }

    /// Returns a copy with nanoseconds added.
    pub fn plus_nanos(&self, nanos: i64) -> TemporalResult<Self> {
        self.plus_parts(0, nanos)
    }

    /// Returns a copy with standard 24 hour days subtracted.
    pub fn minus_days(&self, days: i64) -> TemporalResult<Self> {
        self.minus_unit(days, &ChronoUnit::Days)
    }

    /// Returns a copy with hours subtracted.
    pub fn minus_hours(&self, hours: i64) -> TemporalResult<Self> {
        self.minus_unit(hours, &ChronoUnit::Hours)
    }

    /// Returns a copy with minutes subtracted.
    pub fn minus_minutes(&self, minutes: i64) -> TemporalResult<Self> {
        self.minus_unit(minutes, &ChronoUnit::Minutes)
    }

    /// Returns a copy with seconds subtracted.
    pub fn minus_seconds(&self, seconds: i64) -> TemporalResult<Self> {
        self.minus_unit(seconds, &ChronoUnit::Seconds)
    }

    /// Returns a copy with milliseconds subtracted.
    pub fn minus_millis(&self, millis: i64) -> TemporalResult<Self> {
        self.minus_unit(millis, &ChronoUnit::Millis)
    }

    /// Returns a copy with nanoseconds subtracted.
    pub fn minus_nanos(&self, nanos: i64) -> TemporalResult<Self> {
        self.minus_unit(nanos, &ChronoUnit::Nanos)
    }

    /// Returns this duration multiplied by a scalar.
    pub fn multiplied_by(&self, multiplicand: i64) -> TemporalResult<Self> {
        match multiplicand {
            0 => Ok(Self::ZERO),
            1 => Ok(*self),
            _ => {
                let total = self
                    .total_nanos()
                    .checked_mul(i128::from(multiplicand))
                    .ok_or(TemporalError::overflow().with_message(
                        "Exceeds capacity of Duration.",
                    ))?;
                Self::from_total_nanos(total)
            }
        }
    }

    /// Returns this duration divided by a scalar, truncating towards zero.
    pub fn divided_by(&self, divisor: i64) -> TemporalResult<Self> {
        match divisor {
            0 => Err(TemporalError::overflow().with_message("Cannot divide by zero")),
            1 => Ok(*self),
            _ => Self::from_total_nanos(self.total_nanos() / i128::from(divisor)),
        }
    }

    /// Returns the whole number of times `divisor` occurs in this duration.
    pub fn divided_by_duration(&self, divisor: &Self) -> TemporalResult<i64> {
        let divisor = divisor.total_nanos();
        if divisor == 0 {
            return Err(TemporalError::overflow().with_message("Cannot divide by zero"));
        }
        utils::i128_to_i64(self.total_nanos() / divisor)
    }

    /// Returns this duration with the sign flipped.
    pub fn negated(&self) -> TemporalResult<Self> {
        self.multiplied_by(-1)
    }

    /// Returns the absolute value of this duration.
    pub fn abs(&self) -> TemporalResult<Self> {
        if self.is_negative() {
            self.negated()
        } else {
            Ok(*self)
        }
    }

    /// Returns the number of whole standard days, truncated towards zero.
    #[inline]
    #[must_use]
    pub const fn to_days(&self) -> i64 {
        self.seconds / SECONDS_PER_DAY
    }

    /// Returns the number of whole hours, truncated towards zero.
    #[inline]
    #[must_use]
    pub const fn to_hours(&self) -> i64 {
        self.seconds / SECONDS_PER_HOUR
    }

    /// Returns the number of whole minutes, truncated towards zero.
    #[inline]
    #[must_use]
    pub const fn to_minutes(&self) -> i64 {
        self.seconds / SECONDS_PER_MINUTE
    }

    /// Returns the whole seconds.
    #[inline]
    #[must_use]
    pub const fn to_seconds(&self) -> i64 {
        self.seconds
    }

    /// Returns the total length in milliseconds.
    pub fn to_millis(&self) -> TemporalResult<i64> {
        let millis = utils::checked_mul(self.seconds, 1_000)?;
        utils::checked_add(millis, i64::from(self.nanos) / NANOS_PER_MILLI)
    }

    /// Returns the total length in nanoseconds.
    pub fn to_nanos(&self) -> TemporalResult<i64> {
        let nanos = utils::checked_mul(self.seconds, NANOS_PER_SECOND)?;
        utils::checked_add(nanos, i64::from(self.nanos))
    }

    /// Returns a copy truncated to `unit`.
    ///
    /// The unit must divide a standard day without remainder.
    pub fn truncated_to<U: TemporalUnit + ?Sized>(&self, unit: &U) -> TemporalResult<Self> {
        match unit.as_chrono_unit() {
            Some(ChronoUnit::Seconds) if self.seconds >= 0 || self.nanos == 0 => {
                return Ok(Self::new_unchecked(self.seconds, 0))
            }
            Some(ChronoUnit::Nanos) => return Ok(*self),
            _ => {}
        }
        let unit_nanos = unit_nanos_within_day(unit)?;
        let nano_of_day = (self.seconds % SECONDS_PER_DAY) * NANOS_PER_SECOND + i64::from(self.nanos);
        let result = (nano_of_day / unit_nanos) * unit_nanos;
        self.plus_nanos(result - nano_of_day)
    }
}

/// Returns the length of `unit` in nanoseconds, requiring it to divide a day.
pub(crate) fn unit_nanos_within_day<U: TemporalUnit + ?Sized>(unit: &U) -> TemporalResult<i64> {
    let duration = unit.duration();
    if duration.seconds > SECONDS_PER_DAY {
        return Err(
            TemporalError::unsupported().with_message("Unit is too large to be used for truncation")
        );
    }
    let nanos = duration.to_nanos()?;
    if nanos == 0 || NANOS_PER_DAY % nanos != 0 {
        return Err(TemporalError::unsupported()
            .with_message("Unit must divide into a standard day without remainder"));
    }
    Ok(nanos)
}

// ==== Trait impls ====

impl TemporalAmount for Duration {
    fn units(&self) -> Vec<ChronoUnit> {
        vec![ChronoUnit::Seconds, ChronoUnit::Nanos]
    }

    fn get_unit(&self, unit: ChronoUnit) -> TemporalResult<i64> {
        self.get(unit)
    }

    fn add_to<T: Temporal>(&self, temporal: &T) -> TemporalResult<T> {
        let mut result = temporal.clone();
        if self.seconds != 0 {
            result = result.plus_unit(self.seconds, &ChronoUnit::Seconds)?;
        }
        if self.nanos != 0 {
            result = result.plus_unit(i64::from(self.nanos), &ChronoUnit::Nanos)?;
        }
        Ok(result)
    }

    fn subtract_from<T: Temporal>(&self, temporal: &T) -> TemporalResult<T> {
        let mut result = temporal.clone();
        if self.seconds != 0 {
            result = result.minus_unit(self.seconds, &ChronoUnit::Seconds)?;
        }
        if self.nanos != 0 {
            result = result.minus_unit(i64::from(self.nanos), &ChronoUnit::Nanos)?;
        }
        Ok(result)
    }
}

impl Writeable for Duration {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        FormattableDuration {
            seconds: self.seconds,
            nanos: self.nanos as u32,
        }
        .write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        FormattableDuration {
            seconds: self.seconds,
            nanos: self.nanos as u32,
        }
        .writeable_length_hint()
    }
}

impl_display_with_writeable!(Duration);

impl FromStr for Duration {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsers::parse_duration(s)
    }
}

impl core::ops::Neg for Duration {
    type Output = TemporalResult<Self>;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl TryFrom<core::time::Duration> for Duration {
    type Error = TemporalError;

    fn try_from(value: core::time::Duration) -> Result<Self, Self::Error> {
        let seconds = i64::try_from(value.as_secs())
            .map_err(|_| TemporalError::overflow().with_message("Exceeds capacity of Duration."))?;
        Ok(Self::new_unchecked(seconds, value.subsec_nanos() as i32))
    }
}
