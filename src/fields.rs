//! The field half of the field / unit protocol.
//!
//! A field is a stateless descriptor: a legal value range, a base unit and a
//! range unit, plus two callbacks into date/time values. [`ChronoField`] is
//! the closed set of built-in fields. Any other type may implement
//! [`TemporalField`] and will interoperate with every value type in this crate:
//! values resolve built-in fields themselves and call back into
//! [`TemporalField::get_from`] and [`TemporalField::adjust_into`] for anything
//! else.

use alloc::format;
use core::fmt;

use crate::{
    temporal::{Temporal, TemporalAccessor},
    units::{ChronoUnit, TemporalUnit},
    TemporalError, TemporalResult,
};

/// The range of legal values for a field.
///
/// The minimum and maximum may each vary between a smallest and largest
/// value, e.g. the day-of-month maximum lies between 28 and 31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRange {
    min_smallest: i64,
    min_largest: i64,
    max_smallest: i64,
    max_largest: i64,
}

impl ValueRange {
    /// Creates a fixed range where the minimum and maximum never vary.
    #[inline]
    #[must_use]
    pub const fn of(min: i64, max: i64) -> Self {
        Self {
            min_smallest: min,
            min_largest: min,
            max_smallest: max,
            max_largest: max,
        }
    }

    /// Creates a range with a fixed minimum and a variable maximum.
    #[inline]
    #[must_use]
    pub const fn of_variable_max(min: i64, max_smallest: i64, max_largest: i64) -> Self {
        Self {
            min_smallest: min,
            min_largest: min,
            max_smallest,
            max_largest,
        }
    }

    /// Creates a fully variable range, validating that the bounds are ordered.
    pub fn try_new(
        min_smallest: i64,
        min_largest: i64,
        max_smallest: i64,
        max_largest: i64,
    ) -> TemporalResult<Self> {
        if min_smallest > min_largest {
            return Err(TemporalError::range()
                .with_message("Smallest minimum value must be less than largest minimum value"));
        }
        if max_smallest > max_largest {
            return Err(TemporalError::range()
                .with_message("Smallest maximum value must be less than largest maximum value"));
        }
        if min_largest > max_largest {
            return Err(
                TemporalError::range().with_message("Minimum value must be less than maximum value")
            );
        }
        Ok(Self {
            min_smallest,
            min_largest,
            max_smallest,
            max_largest,
        })
    }

    /// Returns the smallest possible minimum value.
    #[inline]
    #[must_use]
    pub const fn minimum(&self) -> i64 {
        self.min_smallest
    }

    /// Returns the largest possible minimum value.
    #[inline]
    #[must_use]
    pub const fn largest_minimum(&self) -> i64 {
        self.min_largest
    }

    /// Returns the smallest possible maximum value.
    #[inline]
    #[must_use]
    pub const fn smallest_maximum(&self) -> i64 {
        self.max_smallest
    }

    /// Returns the largest possible maximum value.
    #[inline]
    #[must_use]
    pub const fn maximum(&self) -> i64 {
        self.max_largest
    }

    /// Returns whether neither bound varies.
    #[inline]
    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        self.min_smallest == self.min_largest && self.max_smallest == self.max_largest
    }

    /// Returns whether every legal value fits in an `i32`.
    #[inline]
    #[must_use]
    pub const fn is_int_value(&self) -> bool {
        self.minimum() >= i32::MIN as i64 && self.maximum() <= i32::MAX as i64
    }

    /// Returns whether `value` lies within the outer bounds.
    #[inline]
    #[must_use]
    pub const fn is_valid_value(&self, value: i64) -> bool {
        value >= self.minimum() && value <= self.maximum()
    }

    /// Returns whether the range is int-valued and `value` lies within it.
    #[inline]
    #[must_use]
    pub const fn is_valid_int_value(&self, value: i64) -> bool {
        self.is_int_value() && self.is_valid_value(value)
    }

    /// Validates `value` against this range, naming `field` in the error.
    pub fn check_valid_value<F: TemporalField + ?Sized>(
        &self,
        value: i64,
        field: &F,
    ) -> TemporalResult<i64> {
        if !self.is_valid_value(value) {
            return Err(TemporalError::range().with_message(format!(
                "Invalid value for {} (valid values {self}): {value}",
                field.name()
            )));
        }
        Ok(value)
    }

    /// Validates `value` and narrows it to an `i32`.
    ///
    /// Fails when the range itself is not int-valued, so wide fields such as
    /// `EpochDay` must be read with `get_long`.
    pub fn check_valid_int_value<F: TemporalField + ?Sized>(
        &self,
        value: i64,
        field: &F,
    ) -> TemporalResult<i32> {
        if !self.is_int_value() {
            return Err(TemporalError::range().with_message(format!(
                "Invalid field {} for get() method, use get_long() instead",
                field.name()
            )));
        }
        self.check_valid_value(value, field).map(|v| v as i32)
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.min_smallest)?;
        if self.min_smallest != self.min_largest {
            write!(f, "/{}", self.min_largest)?;
        }
        write!(f, " - {}", self.max_smallest)?;
        if self.max_smallest != self.max_largest {
            write!(f, "/{}", self.max_largest)?;
        }
        Ok(())
    }
}

/// A field of date-time, such as month-of-year or hour-of-day.
///
/// Implementations outside this crate are first-class: every value type
/// answers `get`, `with_field`, `range` and `is_supported_field` for a custom
/// field by calling back into the methods below.
pub trait TemporalField: fmt::Debug {
    /// The unit type this field is measured in.
    type Unit: TemporalUnit;

    /// The display name of the field.
    fn name(&self) -> &str;

    /// The unit the field is measured in.
    fn base_unit(&self) -> Self::Unit;

    /// The unit the field is bound by.
    fn range_unit(&self) -> Self::Unit;

    /// The outer range of legal values.
    fn range(&self) -> ValueRange;

    /// Whether this field represents a component of a date.
    fn is_date_based(&self) -> bool;

    /// Whether this field represents a component of a time.
    fn is_time_based(&self) -> bool;

    /// Whether `temporal` can answer a query for this field.
    fn is_supported_by<A: TemporalAccessor + ?Sized>(&self, temporal: &A) -> bool;

    /// The range of legal values refined by the state of `temporal`.
    fn range_refined_by<A: TemporalAccessor + ?Sized>(
        &self,
        temporal: &A,
    ) -> TemporalResult<ValueRange>;

    /// Reads this field's value from `temporal`.
    fn get_from<A: TemporalAccessor + ?Sized>(&self, temporal: &A) -> TemporalResult<i64>;

    /// Returns a copy of `temporal` with this field set to `new_value`.
    fn adjust_into<T: Temporal>(&self, temporal: &T, new_value: i64) -> TemporalResult<T>;

    /// Returns the built-in field this value represents, if any.
    ///
    /// Value types resolve built-in fields directly and only dispatch back
    /// into the field for `None`.
    fn as_chrono_field(&self) -> Option<ChronoField> {
        None
    }
}

/// The built-in set of date-time fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChronoField {
    NanoOfSecond,
    NanoOfDay,
    MicroOfSecond,
    MicroOfDay,
    MilliOfSecond,
    MilliOfDay,
    SecondOfMinute,
    SecondOfDay,
    MinuteOfHour,
    MinuteOfDay,
    HourOfAmPm,
    ClockHourOfAmPm,
    HourOfDay,
    ClockHourOfDay,
    AmPmOfDay,
    DayOfWeek,
    AlignedDayOfWeekInMonth,
    AlignedDayOfWeekInYear,
    DayOfMonth,
    DayOfYear,
    EpochDay,
    AlignedWeekOfMonth,
    AlignedWeekOfYear,
    MonthOfYear,
    ProlepticMonth,
    YearOfEra,
    Year,
    Era,
    InstantSeconds,
    OffsetSeconds,
}

struct FieldData {
    name: &'static str,
    base: ChronoUnit,
    range_unit: ChronoUnit,
    range: ValueRange,
}

const fn data(
    name: &'static str,
    base: ChronoUnit,
    range_unit: ChronoUnit,
    range: ValueRange,
) -> FieldData {
    FieldData {
        name,
        base,
        range_unit,
        range,
    }
}

pub(crate) const MIN_YEAR: i64 = -999_999_999;
pub(crate) const MAX_YEAR: i64 = 999_999_999;

use ChronoUnit as U;

// Indexed by `ChronoField as usize`.
const FIELD_DATA: [FieldData; 30] = [
    data("NanoOfSecond", U::Nanos, U::Seconds, ValueRange::of(0, 999_999_999)),
    data("NanoOfDay", U::Nanos, U::Days, ValueRange::of(0, 86_400 * 1_000_000_000 - 1)),
    data("MicroOfSecond", U::Micros, U::Seconds, ValueRange::of(0, 999_999)),
    data("MicroOfDay", U::Micros, U::Days, ValueRange::of(0, 86_400 * 1_000_000 - 1)),
    data("MilliOfSecond", U::Millis, U::Seconds, ValueRange::of(0, 999)),
    data("MilliOfDay", U::Millis, U::Days, ValueRange::of(0, 86_400 * 1_000 - 1)),
    data("SecondOfMinute", U::Seconds, U::Minutes, ValueRange::of(0, 59)),
    data("SecondOfDay", U::Seconds, U::Days, ValueRange::of(0, 86_400 - 1)),
    data("MinuteOfHour", U::Minutes, U::Hours, ValueRange::of(0, 59)),
    data("MinuteOfDay", U::Minutes, U::Days, ValueRange::of(0, 24 * 60 - 1)),
    data("HourOfAmPm", U::Hours, U::HalfDays, ValueRange::of(0, 11)),
    data("ClockHourOfAmPm", U::Hours, U::HalfDays, ValueRange::of(1, 12)),
    data("HourOfDay", U::Hours, U::Days, ValueRange::of(0, 23)),
    data("ClockHourOfDay", U::Hours, U::Days, ValueRange::of(1, 24)),
    data("AmPmOfDay", U::HalfDays, U::Days, ValueRange::of(0, 1)),
    data("DayOfWeek", U::Days, U::Weeks, ValueRange::of(1, 7)),
    data("AlignedDayOfWeekInMonth", U::Days, U::Weeks, ValueRange::of(1, 7)),
    data("AlignedDayOfWeekInYear", U::Days, U::Weeks, ValueRange::of(1, 7)),
    data("DayOfMonth", U::Days, U::Months, ValueRange::of_variable_max(1, 28, 31)),
    data("DayOfYear", U::Days, U::Years, ValueRange::of_variable_max(1, 365, 366)),
    data("EpochDay", U::Days, U::Forever, ValueRange::of(-365_243_219_634, 365_243_219_634)),
    data("AlignedWeekOfMonth", U::Weeks, U::Months, ValueRange::of_variable_max(1, 4, 5)),
    data("AlignedWeekOfYear", U::Weeks, U::Years, ValueRange::of(1, 53)),
    data("MonthOfYear", U::Months, U::Years, ValueRange::of(1, 12)),
    data("ProlepticMonth", U::Months, U::Forever, ValueRange::of(MIN_YEAR * 12, MAX_YEAR * 12 + 11)),
    data("YearOfEra", U::Years, U::Eras, ValueRange::of_variable_max(1, MAX_YEAR, MAX_YEAR + 1)),
    data("Year", U::Years, U::Forever, ValueRange::of(MIN_YEAR, MAX_YEAR)),
    data("Era", U::Eras, U::Forever, ValueRange::of(0, 1)),
    data("InstantSeconds", U::Seconds, U::Forever, ValueRange::of(i64::MIN, i64::MAX)),
    data("OffsetSeconds", U::Seconds, U::Forever, ValueRange::of(-18 * 3600, 18 * 3600)),
];

impl ChronoField {
    #[inline]
    fn data(self) -> &'static FieldData {
        &FIELD_DATA[self as usize]
    }

    /// Returns the field's outer range of legal values.
    #[inline]
    #[must_use]
    pub fn value_range(self) -> ValueRange {
        self.data().range
    }

    /// Returns whether this field is a component of a date.
    #[inline]
    #[must_use]
    pub fn is_date_field(self) -> bool {
        self >= Self::DayOfWeek && self <= Self::Era
    }

    /// Returns whether this field is a component of a time.
    #[inline]
    #[must_use]
    pub fn is_time_field(self) -> bool {
        self < Self::DayOfWeek
    }

    /// Validates `value` against this field's outer range.
    #[inline]
    pub fn check_valid_value(self, value: i64) -> TemporalResult<i64> {
        self.value_range().check_valid_value(value, &self)
    }

    /// Validates `value` and narrows it to an `i32`.
    #[inline]
    pub fn check_valid_int_value(self, value: i64) -> TemporalResult<i32> {
        self.value_range().check_valid_int_value(value, &self)
    }

    /// The error returned by value types that do not support this field.
    pub(crate) fn unsupported(self) -> TemporalError {
        TemporalError::unsupported().with_message(format!("Unsupported field: {}", self.name()))
    }
}

impl fmt::Display for ChronoField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.data().name)
    }
}

impl TemporalField for ChronoField {
    type Unit = ChronoUnit;

    fn name(&self) -> &str {
        self.data().name
    }

    fn base_unit(&self) -> ChronoUnit {
        self.data().base
    }

    fn range_unit(&self) -> ChronoUnit {
        self.data().range_unit
    }

    fn range(&self) -> ValueRange {
        self.value_range()
    }

    fn is_date_based(&self) -> bool {
        self.is_date_field()
    }

    fn is_time_based(&self) -> bool {
        self.is_time_field()
    }

    fn is_supported_by<A: TemporalAccessor + ?Sized>(&self, temporal: &A) -> bool {
        temporal.is_supported_field(self)
    }

    fn range_refined_by<A: TemporalAccessor + ?Sized>(
        &self,
        temporal: &A,
    ) -> TemporalResult<ValueRange> {
        temporal.range(self)
    }

    fn get_from<A: TemporalAccessor + ?Sized>(&self, temporal: &A) -> TemporalResult<i64> {
        temporal.get_long(self)
    }

    fn adjust_into<T: Temporal>(&self, temporal: &T, new_value: i64) -> TemporalResult<T> {
        temporal.with_field(self, new_value)
    }

    fn as_chrono_field(&self) -> Option<ChronoField> {
        Some(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::{ChronoField, TemporalField, ValueRange};
    use crate::error::ErrorKind;
    use crate::units::ChronoUnit;
    use alloc::string::ToString;

    #[test]
    fn field_table_matches_declaration_order() {
        assert_eq!(ChronoField::NanoOfSecond.to_string(), "NanoOfSecond");
        assert_eq!(ChronoField::OffsetSeconds.to_string(), "OffsetSeconds");
        assert_eq!(ChronoField::DayOfMonth.base_unit(), ChronoUnit::Days);
        assert_eq!(ChronoField::DayOfMonth.range_unit(), ChronoUnit::Months);
        assert_eq!(ChronoField::Year.range(), ValueRange::of(-999_999_999, 999_999_999));
        assert_eq!(ChronoField::Era.range_unit(), ChronoUnit::Forever);
    }

    #[test]
    fn field_classification() {
        assert!(ChronoField::HourOfDay.is_time_based());
        assert!(!ChronoField::HourOfDay.is_date_based());
        assert!(ChronoField::DayOfWeek.is_date_based());
        assert!(ChronoField::Era.is_date_based());
        assert!(!ChronoField::InstantSeconds.is_date_based());
        assert!(!ChronoField::InstantSeconds.is_time_based());
        assert!(!ChronoField::OffsetSeconds.is_time_based());
    }

    #[test]
    fn value_range_checks() {
        let range = ValueRange::of_variable_max(1, 28, 31);
        assert_eq!(range.to_string(), "1 - 28/31");
        assert!(!range.is_fixed());
        assert!(range.is_valid_value(31));
        assert!(!range.is_valid_value(32));

        let err = ChronoField::MonthOfYear.check_valid_value(13).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(
            err.message(),
            "Invalid value for MonthOfYear (valid values 1 - 12): 13"
        );

        assert!(!ChronoField::EpochDay.range().is_int_value());
        assert!(ChronoField::EpochDay.check_valid_int_value(0).is_err());
        assert_eq!(ChronoField::DayOfYear.check_valid_int_value(366), Ok(366));

        assert!(ValueRange::try_new(5, 1, 10, 10).is_err());
        assert!(ValueRange::try_new(1, 1, 10, 5).is_err());
        assert!(ValueRange::try_new(1, 2, 3, 4).is_ok());
    }
}
