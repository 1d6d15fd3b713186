//! The unit half of the field / unit protocol.

use core::fmt;

use crate::{builtins::core::Duration, temporal::Temporal, TemporalResult};

/// A unit of date-time, such as days or hours.
///
/// As with [`TemporalField`][crate::fields::TemporalField], implementations
/// outside this crate are dispatched back into through [`TemporalUnit::add_to`]
/// and [`TemporalUnit::between`].
pub trait TemporalUnit: fmt::Debug {
    /// The duration of this unit, which may be an estimate.
    fn duration(&self) -> Duration;

    /// Whether the duration of the unit is an estimate.
    ///
    /// All units from days upwards are estimated since days vary with
    /// daylight saving and months vary in length.
    fn is_duration_estimated(&self) -> bool;

    /// Whether this unit is a date unit.
    fn is_date_based(&self) -> bool;

    /// Whether this unit is a time unit.
    fn is_time_based(&self) -> bool;

    /// Whether `temporal` supports adding this unit.
    fn is_supported_by<T: Temporal>(&self, temporal: &T) -> bool {
        temporal.is_supported_unit(self)
    }

    /// Returns a copy of `temporal` with `amount` of this unit added.
    fn add_to<T: Temporal>(&self, temporal: &T, amount: i64) -> TemporalResult<T>;

    /// Calculates the amount of this unit between two values of the same type.
    fn between<T: Temporal>(&self, start: &T, end: &T) -> TemporalResult<i64>;

    /// Returns the built-in unit this value represents, if any.
    fn as_chrono_unit(&self) -> Option<ChronoUnit> {
        None
    }
}

/// The built-in set of date-time units, ordered from smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChronoUnit {
    Nanos,
    Micros,
    Millis,
    Seconds,
    Minutes,
    Hours,
    HalfDays,
    Days,
    Weeks,
    Months,
    Years,
    Decades,
    Centuries,
    Millennia,
    Eras,
    Forever,
}

const SECONDS_PER_YEAR: i64 = 31_556_952;

impl ChronoUnit {
    /// Returns the name of the unit.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nanos => "Nanos",
            Self::Micros => "Micros",
            Self::Millis => "Millis",
            Self::Seconds => "Seconds",
            Self::Minutes => "Minutes",
            Self::Hours => "Hours",
            Self::HalfDays => "HalfDays",
            Self::Days => "Days",
            Self::Weeks => "Weeks",
            Self::Months => "Months",
            Self::Years => "Years",
            Self::Decades => "Decades",
            Self::Centuries => "Centuries",
            Self::Millennia => "Millennia",
            Self::Eras => "Eras",
            Self::Forever => "Forever",
        }
    }

    /// Returns the (possibly estimated) duration of the unit.
    ///
    /// A year is estimated as 365.2425 days, the length of the average
    /// Gregorian year.
    #[must_use]
    pub const fn unit_duration(self) -> Duration {
        let (seconds, nanos) = match self {
            Self::Nanos => (0, 1),
            Self::Micros => (0, 1_000),
            Self::Millis => (0, 1_000_000),
            Self::Seconds => (1, 0),
            Self::Minutes => (60, 0),
            Self::Hours => (3_600, 0),
            Self::HalfDays => (43_200, 0),
            Self::Days => (86_400, 0),
            Self::Weeks => (7 * 86_400, 0),
            Self::Months => (SECONDS_PER_YEAR / 12, 0),
            Self::Years => (SECONDS_PER_YEAR, 0),
            Self::Decades => (SECONDS_PER_YEAR * 10, 0),
            Self::Centuries => (SECONDS_PER_YEAR * 100, 0),
            Self::Millennia => (SECONDS_PER_YEAR * 1_000, 0),
            Self::Eras => (SECONDS_PER_YEAR * 1_000_000_000, 0),
            Self::Forever => (i64::MAX, 999_999_999),
        };
        Duration::new_unchecked(seconds, nanos)
    }

    /// Returns whether the unit is days or larger.
    #[inline]
    #[must_use]
    pub const fn is_estimated(self) -> bool {
        self as u8 >= Self::Days as u8
    }

    /// Returns whether this is a date unit. `Forever` is neither date nor time based.
    #[inline]
    #[must_use]
    pub const fn is_date_unit(self) -> bool {
        self as u8 >= Self::Days as u8 && !matches!(self, Self::Forever)
    }

    /// Returns whether this is a time unit.
    #[inline]
    #[must_use]
    pub const fn is_time_unit(self) -> bool {
        (self as u8) < Self::Days as u8
    }
}

impl fmt::Display for ChronoUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TemporalUnit for ChronoUnit {
    fn duration(&self) -> Duration {
        self.unit_duration()
    }

    fn is_duration_estimated(&self) -> bool {
        self.is_estimated()
    }

    fn is_date_based(&self) -> bool {
        self.is_date_unit()
    }

    fn is_time_based(&self) -> bool {
        self.is_time_unit()
    }

    fn add_to<T: Temporal>(&self, temporal: &T, amount: i64) -> TemporalResult<T> {
        temporal.plus_unit(amount, self)
    }

    fn between<T: Temporal>(&self, start: &T, end: &T) -> TemporalResult<i64> {
        start.until(end, self)
    }

    fn as_chrono_unit(&self) -> Option<ChronoUnit> {
        Some(*self)
    }
}

impl ChronoUnit {
    /// The error returned by value types that do not support this unit.
    pub(crate) fn unsupported(self) -> crate::TemporalError {
        crate::TemporalError::unsupported()
            .with_message(alloc::format!("Unsupported unit: {}", self.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::{ChronoUnit, TemporalUnit};

    #[test]
    fn unit_durations() {
        assert_eq!(ChronoUnit::Nanos.duration().nanos(), 1);
        assert_eq!(ChronoUnit::HalfDays.duration().seconds(), 43_200);
        assert_eq!(ChronoUnit::Months.duration().seconds(), 2_629_746);
        assert_eq!(ChronoUnit::Years.duration().seconds(), 31_556_952);
        assert_eq!(ChronoUnit::Forever.duration().seconds(), i64::MAX);
        assert_eq!(ChronoUnit::Forever.duration().nanos(), 999_999_999);
    }

    #[test]
    fn unit_classification() {
        assert!(ChronoUnit::Hours.is_time_based());
        assert!(!ChronoUnit::Hours.is_duration_estimated());
        assert!(ChronoUnit::Days.is_date_based());
        assert!(ChronoUnit::Days.is_duration_estimated());
        assert!(ChronoUnit::Eras.is_date_based());
        assert!(!ChronoUnit::Forever.is_date_based());
        assert!(!ChronoUnit::Forever.is_time_based());
        assert!(ChronoUnit::Nanos < ChronoUnit::Days);
    }
}
