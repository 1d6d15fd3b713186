//! Checked integer arithmetic used throughout the crate.
//!
//! Every value type in this crate is built on `i64` seconds, days or
//! nanoseconds. These helpers fail with an overflow error instead of
//! wrapping, and provide floor division semantics so that negative values
//! normalize consistently.

use num_traits::ToPrimitive;

use crate::{TemporalError, TemporalResult};

/// Adds two `i64` values, failing on overflow.
#[inline]
pub(crate) fn checked_add(a: i64, b: i64) -> TemporalResult<i64> {
    a.checked_add(b)
        .ok_or(TemporalError::overflow().with_message("long overflow on addition."))
}

/// Subtracts `b` from `a`, failing on overflow.
#[inline]
pub(crate) fn checked_sub(a: i64, b: i64) -> TemporalResult<i64> {
    a.checked_sub(b)
        .ok_or(TemporalError::overflow().with_message("long overflow on subtraction."))
}

/// Multiplies two `i64` values, failing on overflow.
#[inline]
pub(crate) fn checked_mul(a: i64, b: i64) -> TemporalResult<i64> {
    a.checked_mul(b)
        .ok_or(TemporalError::overflow().with_message("long overflow on multiplication."))
}

/// Negates an `i64` value, failing for `i64::MIN`.
#[inline]
pub(crate) fn checked_neg(a: i64) -> TemporalResult<i64> {
    a.checked_neg()
        .ok_or(TemporalError::overflow().with_message("long overflow on negation."))
}

/// Narrows an `i64` to an `i32`, failing when the value does not fit.
#[inline]
pub(crate) fn to_i32(value: i64) -> TemporalResult<i32> {
    value
        .to_i32()
        .ok_or(TemporalError::overflow().with_message("value does not fit into an i32."))
}

/// Narrows an `i128` to an `i64`, failing when the value does not fit.
#[inline]
pub(crate) fn i128_to_i64(value: i128) -> TemporalResult<i64> {
    value
        .to_i64()
        .ok_or(TemporalError::overflow().with_message("value does not fit into an i64."))
}

/// Floor division: rounds the quotient towards negative infinity.
///
/// Panics on a zero divisor, callers only pass non-zero constants.
#[inline]
pub(crate) const fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if (a % b != 0) && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

/// Floor modulo: the result always carries the sign of the divisor.
#[inline]
pub(crate) const fn floor_mod(a: i64, b: i64) -> i64 {
    a - floor_div(a, b) * b
}

/// Floor division for `i128`, used by the wide nanosecond paths.
#[inline]
pub(crate) const fn floor_div_i128(a: i128, b: i128) -> i128 {
    let q = a / b;
    if (a % b != 0) && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

/// Floor modulo for `i128`.
#[inline]
pub(crate) const fn floor_mod_i128(a: i128, b: i128) -> i128 {
    a - floor_div_i128(a, b) * b
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn floor_division_follows_divisor_sign() {
        assert_eq!(floor_div(7, 2), 3);
        assert_eq!(floor_div(-7, 2), -4);
        assert_eq!(floor_div(7, -2), -4);
        assert_eq!(floor_div(-7, -2), 3);
        assert_eq!(floor_div(-4, 2), -2);

        assert_eq!(floor_mod(7, 2), 1);
        assert_eq!(floor_mod(-7, 2), 1);
        assert_eq!(floor_mod(7, -2), -1);
        assert_eq!(floor_mod(-7, -2), -1);
        assert_eq!(floor_mod(-1, 1_000_000_000), 999_999_999);

        assert_eq!(floor_div_i128(-1, 1_000_000_000), -1);
        assert_eq!(floor_mod_i128(-1, 1_000_000_000), 999_999_999);
    }

    #[test]
    fn checked_ops_report_overflow() {
        assert_eq!(checked_add(1, 2), Ok(3));
        let err = checked_add(i64::MAX, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overflow);
        assert!(checked_sub(i64::MIN, 1).is_err());
        assert!(checked_mul(i64::MAX, 2).is_err());
        assert!(checked_neg(i64::MIN).is_err());
        assert_eq!(checked_mul(-3, 4), Ok(-12));

        assert_eq!(to_i32(i64::from(i32::MAX)), Ok(i32::MAX));
        assert!(to_i32(i64::from(i32::MAX) + 1).is_err());
        assert!(i128_to_i64(i128::from(i64::MAX) + 1).is_err());
    }
}
