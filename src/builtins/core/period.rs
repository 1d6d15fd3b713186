//! This module implements `Period`, a calendar amount of years, months and days.

use alloc::{vec, vec::Vec};
use core::str::FromStr;

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    builtins::core::LocalDate,
    parsers::{self, FormattablePeriod},
    temporal::{Temporal, TemporalAmount},
    units::ChronoUnit,
    utils, TemporalError, TemporalResult,
};

/// A date-based amount of time, such as "2 years, 3 months and 4 days".
///
/// The three components are independent and are never normalized
/// implicitly: `P1M` and `P30D` are different periods, and `P14M` stays
/// fourteen months until [`Period::normalized`] is called.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    years: i32,
    months: i32,
    days: i32,
}

impl Period {
    /// A period of zero length.
    pub const ZERO: Self = Self::of(0, 0, 0);

    /// Creates a period from years, months and days.
    #[inline]
    #[must_use]
    pub const fn of(years: i32, months: i32, days: i32) -> Self {
        Self {
            years,
            months,
            days,
        }
    }

    /// Creates a period of years.
    #[inline]
    #[must_use]
    pub const fn of_years(years: i32) -> Self {
        Self::of(years, 0, 0)
    }

    /// Creates a period of months.
    #[inline]
    #[must_use]
    pub const fn of_months(months: i32) -> Self {
        Self::of(0, months, 0)
    }

    /// Creates a period of weeks, stored as days.
    pub fn of_weeks(weeks: i32) -> TemporalResult<Self> {
        let days = utils::to_i32(utils::checked_mul(i64::from(weeks), 7)?)?;
        Ok(Self::of(0, 0, days))
    }

    /// Creates a period of days.
    #[inline]
    #[must_use]
    pub const fn of_days(days: i32) -> Self {
        Self::of(0, 0, days)
    }

    /// Creates a period from the years, months and days of any amount.
    ///
    /// Units other than years, months and days are rejected.
    pub fn from<A: TemporalAmount + ?Sized>(amount: &A) -> TemporalResult<Self> {
        let mut years = 0;
        let mut months = 0;
        let mut days = 0;
        for unit in amount.units() {
            let value = amount.get_unit(unit)?;
            match unit {
                ChronoUnit::Years => years = utils::to_i32(value)?,
                ChronoUnit::Months => months = utils::to_i32(value)?,
                ChronoUnit::Days => days = utils::to_i32(value)?,
                _ => {
                    return Err(TemporalError::unsupported().with_message(alloc::format!(
                        "Unit must be Years, Months or Days, but was {unit}"
                    )))
                }
            }
        }
        Ok(Self::of(years, months, days))
    }

    /// Calculates the period between two dates.
    ///
    /// The start date is included and the end date is excluded.
    pub fn between(start: &LocalDate, end: &LocalDate) -> TemporalResult<Self> {
        start.until_period(end)
    }

    /// Parses an ISO-8601 period such as `P1Y2M3D`.
    pub fn parse(text: &str) -> TemporalResult<Self> {
        parsers::parse_period(text)
    }

    /// Returns the years component.
    #[inline]
    #[must_use]
    pub const fn years(&self) -> i32 {
        self.years
    }

    /// Returns the months component.
    #[inline]
    #[must_use]
    pub const fn months(&self) -> i32 {
        self.months
    }

    /// Returns the days component.
    #[inline]
    #[must_use]
    pub const fn days(&self) -> i32 {
        self.days
    }

    /// Returns whether every component is zero.
    #[inline]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    /// Returns whether any component is negative.
    #[inline]
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.years < 0 || self.months < 0 || self.days < 0
    }

    /// Returns a copy with the given years.
    #[must_use]
    pub const fn with_years(&self, years: i32) -> Self {
        Self::of(years, self.months, self.days)
    }

    /// Returns a copy with the given months.
    #[must_use]
    pub const fn with_months(&self, months: i32) -> Self {
        Self::of(self.years, months, self.days)
    }

    /// Returns a copy with the given days.
    #[must_use]
    pub const fn with_days(&self, days: i32) -> Self {
        Self::of(self.years, self.months, days)
    }

    /// Returns the component-wise sum of two periods.
    pub fn plus(&self, other: &Self) -> TemporalResult<Self> {
        Ok(Self::of(
            checked_add_i32(self.years, other.years)?,
            checked_add_i32(self.months, other.months)?,
            checked_add_i32(self.days, other.days)?,
        ))
    }

    /// Returns the component-wise difference of two periods.
    pub fn minus(&self, other: &Self) -> TemporalResult<Self> {
        Ok(Self::of(
            checked_sub_i32(self.years, other.years)?,
            checked_sub_i32(self.months, other.months)?,
            checked_sub_i32(self.days, other.days)?,
        ))
    }

    /// Returns a copy with years added.
    pub fn plus_years(&self, years: i64) -> TemporalResult<Self> {
        let years = utils::to_i32(utils::checked_add(i64::from(self.years), years)?)?;
        Ok(self.with_years(years))
    }

    /// Returns a copy with months added.
    pub fn plus_months(&self, months: i64) -> TemporalResult<Self> {
        let months = utils::to_i32(utils::checked_add(i64::from(self.months), months)?)?;
        Ok(self.with_months(months))
    }

    /// Returns a copy with days added.
    pub fn plus_days(&self, days: i64) -> TemporalResult<Self> {
        let days = utils::to_i32(utils::checked_add(i64::from(self.days), days)?)?;
        Ok(self.with_days(days))
    }

    /// Returns a copy with years subtracted.
    pub fn minus_years(&self, years: i64) -> TemporalResult<Self> {
        let years = utils::to_i32(utils::checked_sub(i64::from(self.years), years)?)?;
        Ok(self.with_years(years))
    }

    /// Returns a copy with months subtracted.
    pub fn minus_months(&self, months: i64) -> TemporalResult<Self> {
        let months = utils::to_i32(utils::checked_sub(i64::from(self.months), months)?)?;
        Ok(self.with_months(months))
    }

    /// Returns a copy with days subtracted.
    pub fn minus_days(&self, days: i64) -> TemporalResult<Self> {
        let days = utils::to_i32(utils::checked_sub(i64::from(self.days), days)?)?;
        Ok(self.with_days(days))
    }

    /// Returns a copy with every component multiplied by `scalar`.
    pub fn multiplied_by(&self, scalar: i32) -> TemporalResult<Self> {
        if self.is_zero() || scalar == 1 {
            return Ok(*self);
        }
        let mul = |value: i32| utils::to_i32(utils::checked_mul(i64::from(value), i64::from(scalar))?);
        Ok(Self::of(mul(self.years)?, mul(self.months)?, mul(self.days)?))
    }

    /// Returns a copy with every component negated.
    pub fn negated(&self) -> TemporalResult<Self> {
        self.multiplied_by(-1)
    }

    /// Returns a copy with the years and months rebalanced so that the months
    /// lie within `-11..=11`. The days are left unchanged.
    pub fn normalized(&self) -> TemporalResult<Self> {
        let total_months = self.to_total_months();
        let years = utils::to_i32(total_months / 12)?;
        let months = (total_months % 12) as i32;
        if years == self.years && months == self.months {
            return Ok(*self);
        }
        Ok(Self::of(years, months, self.days))
    }

    /// Returns the total number of months in the years and months components.
    #[inline]
    #[must_use]
    pub const fn to_total_months(&self) -> i64 {
        self.years as i64 * 12 + self.months as i64
    }
}

#[inline]
fn checked_add_i32(a: i32, b: i32) -> TemporalResult<i32> {
    a.checked_add(b)
        .ok_or(TemporalError::overflow().with_message("integer overflow on addition."))
}

#[inline]
fn checked_sub_i32(a: i32, b: i32) -> TemporalResult<i32> {
    a.checked_sub(b)
        .ok_or(TemporalError::overflow().with_message("integer overflow on subtraction."))
}

impl TemporalAmount for Period {
    fn units(&self) -> Vec<ChronoUnit> {
        vec![ChronoUnit::Years, ChronoUnit::Months, ChronoUnit::Days]
    }

    fn get_unit(&self, unit: ChronoUnit) -> TemporalResult<i64> {
        match unit {
            ChronoUnit::Years => Ok(i64::from(self.years)),
            ChronoUnit::Months => Ok(i64::from(self.months)),
            ChronoUnit::Days => Ok(i64::from(self.days)),
            _ => Err(unit.unsupported()),
        }
    }

    fn add_to<T: Temporal>(&self, temporal: &T) -> TemporalResult<T> {
        let mut result = temporal.clone();
        if self.years != 0 {
            if self.months != 0 {
                result = result.plus_unit(self.to_total_months(), &ChronoUnit::Months)?;
            } else {
                result = result.plus_unit(i64::from(self.years), &ChronoUnit::Years)?;
            }
        } else if self.months != 0 {
            result = result.plus_unit(i64::from(self.months), &ChronoUnit::Months)?;
        }
        if self.days != 0 {
            result = result.plus_unit(i64::from(self.days), &ChronoUnit::Days)?;
        }
        Ok(result)
    }

    fn subtract_from<T: Temporal>(&self, temporal: &T) -> TemporalResult<T> {
        let mut result = temporal.clone();
        if self.years != 0 {
            if self.months != 0 {
                result = result.minus_unit(self.to_total_months(), &ChronoUnit::Months)?;
            } else {
                result = result.minus_unit(i64::from(self.years), &ChronoUnit::Years)?;
            }
        } else if self.months != 0 {
            result = result.minus_unit(i64::from(self.months), &ChronoUnit::Months)?;
        }
        if self.days != 0 {
            result = result.minus_unit(i64::from(self.days), &ChronoUnit::Days)?;
        }
        Ok(result)
    }
}

impl Writeable for Period {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        FormattablePeriod(self.years, self.months, self.days).write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        FormattablePeriod(self.years, self.months, self.days).writeable_length_hint()
    }
}

impl_display_with_writeable!(Period);

impl FromStr for Period {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsers::parse_period(s)
    }
}

#[cfg(test)]
mod tests {
    use super::Period;
    use crate::{error::ErrorKind, Duration, LocalDate, Temporal};
    use alloc::string::ToString;
    use core::str::FromStr;

    #[test]
    fn period_text_form() {
        assert_eq!(Period::ZERO.to_string(), "P0D");
        assert_eq!(Period::of(1, 2, 3).to_string(), "P1Y2M3D");
        assert_eq!(Period::of(0, -5, 0).to_string(), "P-5M");

        assert_eq!(Period::from_str("P1Y2M3D"), Ok(Period::of(1, 2, 3)));
        assert_eq!(Period::from_str("p2w"), Ok(Period::of(0, 0, 14)));
        assert_eq!(Period::from_str("P1W-2D"), Ok(Period::of(0, 0, 5)));
        assert_eq!(Period::from_str("-P1Y-2M"), Ok(Period::of(-1, 2, 0)));
        assert_eq!(Period::from_str("+P+3D"), Ok(Period::of(0, 0, 3)));

        for bad in ["P", "", "PT1D", "P1D2M", "P1", "1D", "P3000000000D", "P1Y "] {
            let err = Period::from_str(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parse, "{bad}");
        }
    }

    #[test]
    fn period_normalization() {
        assert_eq!(Period::of(1, 14, 40).normalized(), Ok(Period::of(2, 2, 40)));
        assert_eq!(Period::of(1, -14, 0).normalized(), Ok(Period::of(0, -2, 0)));
        assert_eq!(Period::of(-1, 2, 0).normalized(), Ok(Period::of(0, -10, 0)));
        assert_eq!(Period::of(1, 2, 3).to_total_months(), 14);
        assert!(Period::of(i32::MAX, 0, 0).multiplied_by(2).is_err());
        assert_eq!(Period::of(1, -2, 3).negated(), Ok(Period::of(-1, 2, -3)));
    }

    #[test]
    fn period_added_to_date() {
        let date = LocalDate::of(2008, 1, 31).unwrap();
        let result = date.plus_amount(&Period::of(0, 1, 0)).unwrap();
        assert_eq!(result, LocalDate::of(2008, 2, 29).unwrap());

        // Years and months are added as total months before clamping.
        let date = LocalDate::of(2007, 3, 31).unwrap();
        let result = date.plus_amount(&Period::of(1, -1, 1)).unwrap();
        assert_eq!(result, LocalDate::of(2008, 3, 1).unwrap());

        let back = result.minus_amount(&Period::of(1, -1, 1)).unwrap();
        assert_eq!(back, LocalDate::of(2007, 3, 31).unwrap());
    }

    #[test]
    fn duration_from_period_is_rejected() {
        let err = Duration::from(&Period::ZERO).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
        assert_eq!(Period::from(&Period::of(1, 2, 3)), Ok(Period::of(1, 2, 3)));
        assert!(Period::from(&Duration::of_seconds(1)).is_err());
    }
}
