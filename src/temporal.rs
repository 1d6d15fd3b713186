//! The capability traits shared by every date-time value.
//!
//! A type that can be read from implements [`TemporalAccessor`]; a type that
//! can also be adjusted and moved along a time line implements [`Temporal`].
//! Amounts of time ([`Duration`][crate::Duration], [`Period`][crate::Period])
//! implement [`TemporalAmount`], and reusable adjustments such as "last day of
//! month" implement [`TemporalAdjuster`].

use alloc::vec::Vec;

use crate::{
    fields::{TemporalField, ValueRange},
    units::{ChronoUnit, TemporalUnit},
    TemporalError, TemporalResult,
};

/// Read-only access to the fields of a date-time value.
pub trait TemporalAccessor {
    /// Whether the field can be queried.
    fn is_supported_field<F: TemporalField + ?Sized>(&self, field: &F) -> bool;

    /// The legal range of `field` for this value.
    ///
    /// Built-in fields report their outer range when supported. Other fields
    /// are asked to refine their range against this value.
    fn range<F: TemporalField + ?Sized>(&self, field: &F) -> TemporalResult<ValueRange> {
        match field.as_chrono_field() {
            Some(f) if self.is_supported_field(field) => Ok(f.value_range()),
            Some(f) => Err(f.unsupported()),
            None => field.range_refined_by(self),
        }
    }

    /// Reads `field` as an `i32`, failing for fields too wide for an `i32`.
    fn get<F: TemporalField + ?Sized>(&self, field: &F) -> TemporalResult<i32> {
        let range = self.range(field)?;
        let value = self.get_long(field)?;
        range.check_valid_int_value(value, field)
    }

    /// Reads `field` as an `i64`.
    fn get_long<F: TemporalField + ?Sized>(&self, field: &F) -> TemporalResult<i64>;
}

/// A date-time value that can be adjusted and moved along the time line.
pub trait Temporal: TemporalAccessor + Clone {
    /// Whether `unit` can be added to or subtracted from this value.
    fn is_supported_unit<U: TemporalUnit + ?Sized>(&self, unit: &U) -> bool;

    /// Returns a copy with `field` set to `new_value`.
    fn with_field<F: TemporalField + ?Sized>(&self, field: &F, new_value: i64)
        -> TemporalResult<Self>;

    /// Returns a copy adjusted by `adjuster`.
    fn with_adjuster<A: TemporalAdjuster + ?Sized>(&self, adjuster: &A) -> TemporalResult<Self> {
        adjuster.adjust_into(self)
    }

    /// Returns a copy with `amount` of `unit` added.
    fn plus_unit<U: TemporalUnit + ?Sized>(&self, amount: i64, unit: &U) -> TemporalResult<Self>;

    /// Returns a copy with `amount` of `unit` subtracted.
    fn minus_unit<U: TemporalUnit + ?Sized>(&self, amount: i64, unit: &U) -> TemporalResult<Self> {
        if amount == i64::MIN {
            self.plus_unit(i64::MAX, unit)?.plus_unit(1, unit)
        } else {
            self.plus_unit(-amount, unit)
        }
    }

    /// Returns a copy with `amount` added.
    fn plus_amount<A: TemporalAmount + ?Sized>(&self, amount: &A) -> TemporalResult<Self> {
        amount.add_to(self)
    }

    /// Returns a copy with `amount` subtracted.
    fn minus_amount<A: TemporalAmount + ?Sized>(&self, amount: &A) -> TemporalResult<Self> {
        amount.subtract_from(self)
    }

    /// Calculates the whole amount of `unit` from this value until `end`.
    ///
    /// The result is negative if `end` is before this value.
    fn until<U: TemporalUnit + ?Sized>(&self, end: &Self, unit: &U) -> TemporalResult<i64>;
}

/// An amount of time, such as "6 hours" or "3 years 2 months".
pub trait TemporalAmount {
    /// The units this amount is expressed in.
    fn units(&self) -> Vec<ChronoUnit>;

    /// The value of one of the units returned by [`TemporalAmount::units`].
    fn get_unit(&self, unit: ChronoUnit) -> TemporalResult<i64>;

    /// Adds this amount to `temporal`.
    fn add_to<T: Temporal>(&self, temporal: &T) -> TemporalResult<T>;

    /// Subtracts this amount from `temporal`.
    fn subtract_from<T: Temporal>(&self, temporal: &T) -> TemporalResult<T>;
}

/// A strategy for adjusting a date-time value.
pub trait TemporalAdjuster {
    /// Returns an adjusted copy of `temporal`.
    fn adjust_into<T: Temporal>(&self, temporal: &T) -> TemporalResult<T>;
}

/// The error for a unit a value type does not support.
#[inline]
pub(crate) fn unsupported_unit<U: TemporalUnit + ?Sized>(unit: &U) -> TemporalError {
    match unit.as_chrono_unit() {
        Some(u) => u.unsupported(),
        None => TemporalError::unsupported().with_message("Unsupported unit"),
    }
}

/// The error for a field a value type does not support.
#[inline]
pub(crate) fn unsupported_field<F: TemporalField + ?Sized>(field: &F) -> TemporalError {
    match field.as_chrono_field() {
        Some(f) => f.unsupported(),
        None => TemporalError::unsupported()
            .with_message(alloc::format!("Unsupported field: {}", field.name())),
    }
}
