//! The proleptic ISO-8601 calendar equations, and the `Month` and
//! `DayOfWeek` enums.
//!
//! The ISO calendar applies the Gregorian leap year rules to every year. The
//! conversion between an epoch-day count and a year, month and day is closed
//! form, using the 400 year cycle of 146,097 days.

use crate::{
    fields::{ChronoField, TemporalField, ValueRange},
    temporal::{unsupported_field, Temporal, TemporalAccessor, TemporalAdjuster},
    utils, TemporalError, TemporalResult,
};

/// The number of days in a 400 year cycle.
pub(crate) const DAYS_PER_CYCLE: i64 = 146_097;

/// The number of days from year zero to 1970.
///
/// There are five 400 year cycles from year zero to 2000, and 30 years from
/// 1970 to 2000 containing 7 leap years.
pub(crate) const DAYS_0000_TO_1970: i64 = (DAYS_PER_CYCLE * 5) - (30 * 365 + 7);

/// Returns whether `year` is a leap year in the proleptic ISO calendar.
#[inline]
#[must_use]
pub const fn is_leap_year(year: i64) -> bool {
    (year & 3) == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the length of `month` in `year`.
#[inline]
#[must_use]
pub(crate) const fn month_length(year: i64, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Converts a valid year, month and day into a count of days from 1970-01-01.
pub(crate) const fn epoch_day_from_ymd(year: i64, month: u8, day: u8) -> i64 {
    let y = year;
    let m = month as i64;
    let mut total = 365 * y;
    if y >= 0 {
        total += (y + 3) / 4 - (y + 99) / 100 + (y + 399) / 400;
    } else {
        total -= y / -4 - y / -100 + y / -400;
    }
    total += (367 * m - 362) / 12;
    total += day as i64 - 1;
    if m > 2 {
        total -= 1;
        if !is_leap_year(y) {
            total -= 1;
        }
    }
    total - DAYS_0000_TO_1970
}

/// Converts a count of days from 1970-01-01 into a year, month and day.
///
/// The calculation is done on a March based year, so that the leap day falls
/// at the end of the year. The caller validates the epoch-day range.
pub(crate) const fn ymd_from_epoch_day(epoch_day: i64) -> (i64, u8, u8) {
    let mut zero_day = epoch_day + DAYS_0000_TO_1970;
    // Adjust to 0000-03-01 so the leap day is at the end of the cycle.
    zero_day -= 60;
    let mut adjust = 0;
    if zero_day < 0 {
        let adjust_cycles = (zero_day + 1) / DAYS_PER_CYCLE - 1;
        adjust = adjust_cycles * 400;
        zero_day += -adjust_cycles * DAYS_PER_CYCLE;
    }
    let mut year_est = (400 * zero_day + 591) / DAYS_PER_CYCLE;
    let mut doy_est =
        zero_day - (365 * year_est + year_est / 4 - year_est / 100 + year_est / 400);
    if doy_est < 0 {
        year_est -= 1;
        doy_est = zero_day - (365 * year_est + year_est / 4 - year_est / 100 + year_est / 400);
    }
    year_est += adjust;

    let march_month0 = (doy_est * 5 + 2) / 153;
    let month = (march_month0 + 2) % 12 + 1;
    let day = doy_est - (march_month0 * 306 + 5) / 10 + 1;
    year_est += march_month0 / 10;

    (year_est, month as u8, day as u8)
}

/// A month of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

struct MonthData {
    min_length: u8,
    max_length: u8,
    // Day of year of the first day of the month in a standard year.
    first_day: u16,
}

const MONTH_DATA: [MonthData; 12] = [
    MonthData { min_length: 31, max_length: 31, first_day: 1 },
    MonthData { min_length: 28, max_length: 29, first_day: 32 },
    MonthData { min_length: 31, max_length: 31, first_day: 60 },
    MonthData { min_length: 30, max_length: 30, first_day: 91 },
    MonthData { min_length: 31, max_length: 31, first_day: 121 },
    MonthData { min_length: 30, max_length: 30, first_day: 152 },
    MonthData { min_length: 31, max_length: 31, first_day: 182 },
    MonthData { min_length: 31, max_length: 31, first_day: 213 },
    MonthData { min_length: 30, max_length: 30, first_day: 244 },
    MonthData { min_length: 31, max_length: 31, first_day: 274 },
    MonthData { min_length: 30, max_length: 30, first_day: 305 },
    MonthData { min_length: 31, max_length: 31, first_day: 335 },
];

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

impl Month {
    /// Returns the `Month` for a value from 1 to 12.
    pub fn of(month: i64) -> TemporalResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(TemporalError::range()
                .with_message(alloc::format!("Invalid value for MonthOfYear: {month}")));
        }
        Ok(MONTHS[(month - 1) as usize])
    }

    /// Returns the month for a value already known to be in range.
    #[inline]
    pub(crate) const fn from_value_unchecked(month: u8) -> Self {
        MONTHS[(month - 1) as usize]
    }

    #[inline]
    const fn data(self) -> &'static MonthData {
        &MONTH_DATA[self as usize - 1]
    }

    /// Returns the month-of-year value, from 1 (January) to 12 (December).
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Returns the month that is `months` later, wrapping around the year.
    #[must_use]
    pub const fn plus(self, months: i64) -> Self {
        let amount = (months % 12) + 12;
        MONTHS[((self as i64 - 1 + amount) % 12) as usize]
    }

    /// Returns the month that is `months` earlier, wrapping around the year.
    #[must_use]
    pub const fn minus(self, months: i64) -> Self {
        self.plus(-(months % 12))
    }

    /// Returns the length of the month in days.
    #[inline]
    #[must_use]
    pub const fn length(self, leap_year: bool) -> u8 {
        if leap_year {
            self.data().max_length
        } else {
            self.data().min_length
        }
    }

    /// Returns the minimum length of the month in days.
    #[inline]
    #[must_use]
    pub const fn min_length(self) -> u8 {
        self.data().min_length
    }

    /// Returns the maximum length of the month in days.
    #[inline]
    #[must_use]
    pub const fn max_length(self) -> u8 {
        self.data().max_length
    }

    /// Returns the day-of-year of the first day of this month.
    #[must_use]
    pub const fn first_day_of_year(self, leap_year: bool) -> u16 {
        let leap = if leap_year && self as u8 > 2 { 1 } else { 0 };
        self.data().first_day + leap
    }

    /// Returns the first month of the quarter this month belongs to.
    #[must_use]
    pub const fn first_month_of_quarter(self) -> Self {
        MONTHS[((self as usize - 1) / 3) * 3]
    }
}

impl TemporalAccessor for Month {
    fn is_supported_field<F: TemporalField + ?Sized>(&self, field: &F) -> bool {
        match field.as_chrono_field() {
            Some(f) => f == ChronoField::MonthOfYear,
            None => field.is_supported_by(self),
        }
    }

    fn range<F: TemporalField + ?Sized>(&self, field: &F) -> TemporalResult<ValueRange> {
        match field.as_chrono_field() {
            Some(ChronoField::MonthOfYear) => Ok(ChronoField::MonthOfYear.value_range()),
            Some(f) => Err(f.unsupported()),
            None => field.range_refined_by(self),
        }
    }

    fn get_long<F: TemporalField + ?Sized>(&self, field: &F) -> TemporalResult<i64> {
        match field.as_chrono_field() {
            Some(ChronoField::MonthOfYear) => Ok(i64::from(self.value())),
            Some(_) => Err(unsupported_field(field)),
            None => field.get_from(self),
        }
    }
}

impl TemporalAdjuster for Month {
    fn adjust_into<T: Temporal>(&self, temporal: &T) -> TemporalResult<T> {
        temporal.with_field(&ChronoField::MonthOfYear, i64::from(self.value()))
    }
}

/// A day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayOfWeek {
    Monday = 1,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

const DAYS_OF_WEEK: [DayOfWeek; 7] = [
    DayOfWeek::Monday,
    DayOfWeek::Tuesday,
    DayOfWeek::Wednesday,
    DayOfWeek::Thursday,
    DayOfWeek::Friday,
    DayOfWeek::Saturday,
    DayOfWeek::Sunday,
];

impl DayOfWeek {
    /// Returns the `DayOfWeek` for a value from 1 (Monday) to 7 (Sunday).
    pub fn of(day_of_week: i64) -> TemporalResult<Self> {
        if !(1..=7).contains(&day_of_week) {
            return Err(TemporalError::range()
                .with_message(alloc::format!("Invalid value for DayOfWeek: {day_of_week}")));
        }
        Ok(DAYS_OF_WEEK[(day_of_week - 1) as usize])
    }

    /// The day of the week of an epoch-day. 1970-01-01 was a Thursday.
    #[inline]
    pub(crate) const fn from_epoch_day(epoch_day: i64) -> Self {
        DAYS_OF_WEEK[utils::floor_mod(epoch_day + 3, 7) as usize]
    }

    /// Returns the day-of-week value, from 1 (Monday) to 7 (Sunday).
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Returns the day that is `days` later, wrapping around the week.
    #[must_use]
    pub const fn plus(self, days: i64) -> Self {
        let amount = days % 7;
        DAYS_OF_WEEK[((self as i64 - 1 + amount + 7) % 7) as usize]
    }

    /// Returns the day that is `days` earlier, wrapping around the week.
    #[must_use]
    pub const fn minus(self, days: i64) -> Self {
        self.plus(-(days % 7))
    }
}

impl TemporalAccessor for DayOfWeek {
    fn is_supported_field<F: TemporalField + ?Sized>(&self, field: &F) -> bool {
        match field.as_chrono_field() {
            Some(f) => f == ChronoField::DayOfWeek,
            None => field.is_supported_by(self),
        }
    }

    fn range<F: TemporalField + ?Sized>(&self, field: &F) -> TemporalResult<ValueRange> {
        match field.as_chrono_field() {
            Some(ChronoField::DayOfWeek) => Ok(ChronoField::DayOfWeek.value_range()),
            Some(f) => Err(f.unsupported()),
            None => field.range_refined_by(self),
        }
    }

    fn get_long<F: TemporalField + ?Sized>(&self, field: &F) -> TemporalResult<i64> {
        match field.as_chrono_field() {
            Some(ChronoField::DayOfWeek) => Ok(i64::from(self.value())),
            Some(_) => Err(unsupported_field(field)),
            None => field.get_from(self),
        }
    }
}

impl TemporalAdjuster for DayOfWeek {
    fn adjust_into<T: Temporal>(&self, temporal: &T) -> TemporalResult<T> {
        temporal.with_field(&ChronoField::DayOfWeek, i64::from(self.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2008));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2009));
        assert!(is_leap_year(0));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(-100));
        assert!(is_leap_year(-400));
    }

    #[test]
    fn epoch_day_conversion() {
        assert_eq!(DAYS_0000_TO_1970, 719_528);
        assert_eq!(epoch_day_from_ymd(1970, 1, 1), 0);
        assert_eq!(epoch_day_from_ymd(1969, 12, 31), -1);
        assert_eq!(epoch_day_from_ymd(2000, 3, 1), 11_017);
        assert_eq!(epoch_day_from_ymd(0, 1, 1), -719_528);
        assert_eq!(epoch_day_from_ymd(-999_999_999, 1, 1), -365_243_219_162);
        assert_eq!(epoch_day_from_ymd(999_999_999, 12, 31), 365_241_780_471);

        assert_eq!(ymd_from_epoch_day(0), (1970, 1, 1));
        assert_eq!(ymd_from_epoch_day(-1), (1969, 12, 31));
        assert_eq!(ymd_from_epoch_day(11_017), (2000, 3, 1));
        assert_eq!(ymd_from_epoch_day(-365_243_219_162), (-999_999_999, 1, 1));
        assert_eq!(ymd_from_epoch_day(365_241_780_471), (999_999_999, 12, 31));
    }

    #[test]
    fn epoch_day_inverts_across_leap_cycles() {
        for epoch_day in (-800_000..800_000).step_by(97) {
            let (y, m, d) = ymd_from_epoch_day(epoch_day);
            assert!(d <= month_length(y, m));
            assert_eq!(epoch_day_from_ymd(y, m, d), epoch_day);
        }
    }

    #[test]
    fn month_arithmetic() {
        assert_eq!(Month::January.plus(13), Month::February);
        assert_eq!(Month::January.minus(1), Month::December);
        assert_eq!(Month::March.plus(-14), Month::January);
        assert_eq!(Month::February.length(true), 29);
        assert_eq!(Month::March.first_day_of_year(true), 61);
        assert_eq!(Month::March.first_day_of_year(false), 60);
        assert_eq!(Month::August.first_month_of_quarter(), Month::July);
        assert_eq!(Month::of(13).unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(Month::of(12), Ok(Month::December));
    }

    #[test]
    fn day_of_week_arithmetic() {
        assert_eq!(DayOfWeek::from_epoch_day(0), DayOfWeek::Thursday);
        assert_eq!(DayOfWeek::from_epoch_day(-1), DayOfWeek::Wednesday);
        assert_eq!(DayOfWeek::Sunday.plus(1), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::Monday.minus(8), DayOfWeek::Sunday);
        assert_eq!(DayOfWeek::Monday.plus(i64::MAX), DayOfWeek::Monday.plus(i64::MAX % 7));
        assert_eq!(
            DayOfWeek::Friday.get_long(&ChronoField::DayOfWeek),
            Ok(5)
        );
        assert!(DayOfWeek::Friday
            .get_long(&ChronoField::MonthOfYear)
            .is_err());
    }
}
