//! This module implements `LocalDate`, a date in the ISO-8601 calendar.

use alloc::format;
use core::str::FromStr;

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    builtins::core::{LocalDateTime, LocalTime, Period, ZoneId, ZonedDateTime},
    fields::{ChronoField, TemporalField, ValueRange, MAX_YEAR},
    host::HostClock,
    iso::{self, DayOfWeek, Month},
    parsers::{self, FormattableDate},
    temporal::{unsupported_field, unsupported_unit, Temporal, TemporalAccessor, TemporalAdjuster},
    units::{ChronoUnit, TemporalUnit},
    utils, TemporalError, TemporalResult,
};

/// A date without a time zone in the ISO-8601 calendar, such as `2007-12-03`.
///
/// The proleptic Gregorian calendar is used for every year, including years
/// before its historical introduction. Years range from `-999_999_999` to
/// `999_999_999`, with year zero preceding year one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalDate {
    year: i32,
    month: u8,
    day: u8,
}

// ==== Private API ====

impl LocalDate {
    #[inline]
    pub(crate) const fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Creates a date, clamping the day to the last valid day of the month.
    fn resolve_previous_valid(year: i32, month: u8, day: u8) -> Self {
        let day = day.min(iso::month_length(i64::from(year), month));
        Self::new_unchecked(year, month, day)
    }

    fn create(year: i32, month: u8, day: u8) -> TemporalResult<Self> {
        if day > 28 && day > iso::month_length(i64::from(year), month) {
            let month_name = Month::from_value_unchecked(month);
            if day == 29 {
                return Err(TemporalError::invalid_date().with_message(format!(
                    "Invalid date '{month_name:?} 29' as '{year}' is not a leap year"
                )));
            }
            return Err(TemporalError::invalid_date()
                .with_message(format!("Invalid date '{month_name:?} {day}'")));
        }
        Ok(Self::new_unchecked(year, month, day))
    }

    #[inline]
    fn months_until(&self, end: &Self) -> i64 {
        let packed1 = self.proleptic_month() * 32 + i64::from(self.day);
        let packed2 = end.proleptic_month() * 32 + i64::from(end.day);
        (packed2 - packed1) / 32
    }

    fn get_chrono_field(&self, field: ChronoField) -> TemporalResult<i64> {
        let value = match field {
            ChronoField::DayOfWeek => i64::from(self.day_of_week().value()),
            ChronoField::AlignedDayOfWeekInMonth => (i64::from(self.day) - 1) % 7 + 1,
            ChronoField::AlignedDayOfWeekInYear => (i64::from(self.day_of_year()) - 1) % 7 + 1,
            ChronoField::DayOfMonth => i64::from(self.day),
            ChronoField::DayOfYear => i64::from(self.day_of_year()),
            ChronoField::EpochDay => self.to_epoch_day(),
            ChronoField::AlignedWeekOfMonth => (i64::from(self.day) - 1) / 7 + 1,
            ChronoField::AlignedWeekOfYear => (i64::from(self.day_of_year()) - 1) / 7 + 1,
            ChronoField::MonthOfYear => i64::from(self.month),
            ChronoField::ProlepticMonth => self.proleptic_month(),
            ChronoField::YearOfEra if self.year >= 1 => i64::from(self.year),
            ChronoField::YearOfEra => 1 - i64::from(self.year),
            ChronoField::Year => i64::from(self.year),
            ChronoField::Era => i64::from(self.year >= 1),
            _ => return Err(field.unsupported()),
        };
        Ok(value)
    }

    fn with_chrono_field(&self, field: ChronoField, new_value: i64) -> TemporalResult<Self> {
        if !field.is_date_field() {
            return Err(field.unsupported());
        }
        field.check_valid_value(new_value)?;
        match field {
            ChronoField::DayOfWeek => {
                self.plus_days(new_value - i64::from(self.day_of_week().value()))
            }
            ChronoField::AlignedDayOfWeekInMonth
            | ChronoField::AlignedDayOfWeekInYear
            | ChronoField::ProlepticMonth => {
                let current = self.get_chrono_field(field)?;
                if field == ChronoField::ProlepticMonth {
                    self.plus_months(new_value - current)
                } else {
                    self.plus_days(new_value - current)
                }
            }
            ChronoField::DayOfMonth => self.with_day_of_month(new_value as i32),
            ChronoField::DayOfYear => self.with_day_of_year(new_value as i32),
            ChronoField::EpochDay => Self::of_epoch_day(new_value),
            ChronoField::AlignedWeekOfMonth | ChronoField::AlignedWeekOfYear => {
                self.plus_weeks(new_value - self.get_chrono_field(field)?)
            }
            ChronoField::MonthOfYear => self.with_month(new_value as i32),
            ChronoField::YearOfEra if self.year >= 1 => self.with_year(new_value),
            ChronoField::YearOfEra => self.with_year(1 - new_value),
            ChronoField::Year => self.with_year(new_value),
            ChronoField::Era if i64::from(self.year >= 1) == new_value => Ok(*self),
            ChronoField::Era => self.with_year(1 - i64::from(self.year)),
            _ => Err(field.unsupported()),
        }
    }
}

// ==== Public API ====

impl LocalDate {
    /// The minimum supported date, `-999999999-01-01`.
    pub const MIN: Self = Self::new_unchecked(-999_999_999, 1, 1);
    /// The maximum supported date, `+999999999-12-31`.
    pub const MAX: Self = Self::new_unchecked(999_999_999, 12, 31);
    /// The epoch date, `1970-01-01`.
    pub const EPOCH: Self = Self::new_unchecked(1970, 1, 1);

    /// Creates a date from a year, month and day.
    ///
    /// Each value is range checked, then the day is checked against the
    /// length of the month: `of(2009, 2, 29)` is an invalid date error.
    pub fn of(year: i32, month: i32, day: i32) -> TemporalResult<Self> {
        let year = ChronoField::Year.check_valid_int_value(i64::from(year))?;
        let month = ChronoField::MonthOfYear.check_valid_int_value(i64::from(month))?;
        let day = ChronoField::DayOfMonth.check_valid_int_value(i64::from(day))?;
        Self::create(year, month as u8, day as u8)
    }

    /// Creates a date from a year, a `Month` and a day.
    pub fn of_month(year: i32, month: Month, day: i32) -> TemporalResult<Self> {
        Self::of(year, i32::from(month.value()), day)
    }

    /// Creates a date from a year and a day-of-year.
    pub fn of_year_day(year: i32, day_of_year: i32) -> TemporalResult<Self> {
        let year = ChronoField::Year.check_valid_int_value(i64::from(year))?;
        let day_of_year = ChronoField::DayOfYear.check_valid_int_value(i64::from(day_of_year))?;
        let leap = iso::is_leap_year(i64::from(year));
        if day_of_year == 366 && !leap {
            return Err(TemporalError::invalid_date().with_message(format!(
                "Invalid date 'DayOfYear 366' as '{year}' is not a leap year"
            )));
        }
        let mut month = Month::from_value_unchecked(((day_of_year - 1) / 31 + 1) as u8);
        let month_end =
            i32::from(month.first_day_of_year(leap)) + i32::from(month.length(leap)) - 1;
        if day_of_year > month_end {
            month = month.plus(1);
        }
        let day = day_of_year - i32::from(month.first_day_of_year(leap)) + 1;
        Self::create(year, month.value(), day as u8)
    }

    /// Creates a date from a count of days since `1970-01-01`.
    pub fn of_epoch_day(epoch_day: i64) -> TemporalResult<Self> {
        ChronoField::EpochDay.check_valid_value(epoch_day)?;
        let (year, month, day) = iso::ymd_from_epoch_day(epoch_day);
        let year = ChronoField::Year.check_valid_int_value(year)?;
        Ok(Self::new_unchecked(year, month, day))
    }

    /// Obtains a date from any value that supports `EpochDay`.
    pub fn from<A: TemporalAccessor + ?Sized>(temporal: &A) -> TemporalResult<Self> {
        Self::of_epoch_day(temporal.get_long(&ChronoField::EpochDay)?)
    }

    /// Obtains the current date from `clock` as seen in `zone`.
    pub fn now<C: HostClock + ?Sized>(clock: &C, zone: &ZoneId) -> TemporalResult<Self> {
        Ok(LocalDateTime::now(clock, zone)?.to_local_date())
    }

    /// Parses a date such as `2007-12-03`.
    pub fn parse(text: &str) -> TemporalResult<Self> {
        parsers::parse_local_date(text)
    }

    /// Returns the year.
    #[inline]
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month-of-year, from 1 to 12.
    #[inline]
    #[must_use]
    pub const fn month_value(&self) -> u8 {
        self.month
    }

    /// Returns the month-of-year.
    #[inline]
    #[must_use]
    pub const fn month(&self) -> Month {
        Month::from_value_unchecked(self.month)
    }

    /// Returns the day-of-month, from 1 to 31.
    #[inline]
    #[must_use]
    pub const fn day_of_month(&self) -> u8 {
        self.day
    }

    /// Returns the day-of-year, from 1 to 366.
    #[must_use]
    pub const fn day_of_year(&self) -> u16 {
        self.month().first_day_of_year(self.is_leap_year()) + self.day as u16 - 1
    }

    /// Returns the day-of-week.
    #[must_use]
    pub const fn day_of_week(&self) -> DayOfWeek {
        DayOfWeek::from_epoch_day(self.to_epoch_day())
    }

    /// Returns whether the year is a leap year.
    #[inline]
    #[must_use]
    pub const fn is_leap_year(&self) -> bool {
        iso::is_leap_year(self.year as i64)
    }

    /// Returns the length of the month in days.
    #[inline]
    #[must_use]
    pub const fn length_of_month(&self) -> u8 {
        iso::month_length(self.year as i64, self.month)
    }

    /// Returns the length of the year in days.
    #[inline]
    #[must_use]
    pub const fn length_of_year(&self) -> u16 {
        if self.is_leap_year() {
            366
        } else {
            365
        }
    }

    /// Returns the number of days since `1970-01-01`.
    #[inline]
    #[must_use]
    pub const fn to_epoch_day(&self) -> i64 {
        iso::epoch_day_from_ymd(self.year as i64, self.month, self.day)
    }

    /// Returns the number of months since year zero.
    #[inline]
    #[must_use]
    pub const fn proleptic_month(&self) -> i64 {
        self.year as i64 * 12 + self.month as i64 - 1
    }

    /// Returns a copy with the year altered, clamping the day-of-month.
    pub fn with_year(&self, year: i64) -> TemporalResult<Self> {
        if i64::from(self.year) == year {
            return Ok(*self);
        }
        let year = ChronoField::Year.check_valid_int_value(year)?;
        Ok(Self::resolve_previous_valid(year, self.month, self.day))
    }

    /// Returns a copy with the month altered, clamping the day-of-month.
    pub fn with_month(&self, month: i32) -> TemporalResult<Self> {
        if i32::from(self.month) == month {
            return Ok(*self);
        }
        let month = ChronoField::MonthOfYear.check_valid_int_value(i64::from(month))?;
        Ok(Self::resolve_previous_valid(self.year, month as u8, self.day))
    }

    /// Returns a copy with the day-of-month altered.
    pub fn with_day_of_month(&self, day: i32) -> TemporalResult<Self> {
        if i32::from(self.day) == day {
            return Ok(*self);
        }
        Self::of(self.year, i32::from(self.month), day)
    }

    /// Returns a copy with the day-of-year altered.
    pub fn with_day_of_year(&self, day_of_year: i32) -> TemporalResult<Self> {
        if i32::from(self.day_of_year()) == day_of_year {
            return Ok(*self);
        }
        Self::of_year_day(self.year, day_of_year)
    }

    /// Returns a copy with years added.
    ///
    /// The day-of-month is clamped to the last valid day, so
    /// `2008-02-29` plus one year is `2009-02-28`.
    pub fn plus_years(&self, years: i64) -> TemporalResult<Self> {
        if years == 0 {
            return Ok(*self);
        }
        let year = utils::checked_add(i64::from(self.year), years)?;
        let year = ChronoField::Year.check_valid_int_value(year)?;
        Ok(Self::resolve_previous_valid(year, self.month, self.day))
    }

    /// Returns a copy with months added, clamping the day-of-month.
    pub fn plus_months(&self, months: i64) -> TemporalResult<Self> {
        if months == 0 {
            return Ok(*self);
        }
        let month_count = self.proleptic_month();
        let calc_months = utils::checked_add(month_count, months)?;
        let year = ChronoField::Year.check_valid_int_value(utils::floor_div(calc_months, 12))?;
        let month = utils::floor_mod(calc_months, 12) as u8 + 1;
        Ok(Self::resolve_previous_valid(year, month, self.day))
    }

    /// Returns a copy with weeks added.
    pub fn plus_weeks(&self, weeks: i64) -> TemporalResult<Self> {
        self.plus_days(utils::checked_mul(weeks, 7)?)
    }

    /// Returns a copy with days added.
    pub fn plus_days(&self, days: i64) -> TemporalResult<Self> {
        if days == 0 {
            return Ok(*self);
        }
        Self::of_epoch_day(utils::checked_add(self.to_epoch_day(), days)?)
    }

    /// Returns a copy with years subtracted, clamping the day-of-month.
    pub fn minus_years(&self, years: i64) -> TemporalResult<Self> {
        self.minus_unit(years, &ChronoUnit::Years)
    }

    /// Returns a copy with months subtracted, clamping the day-of-month.
    pub fn minus_months(&self, months: i64) -> TemporalResult<Self> {
        self.minus_unit(months, &ChronoUnit::Months)
    }

    /// Returns a copy with weeks subtracted.
    pub fn minus_weeks(&self, weeks: i64) -> TemporalResult<Self> {
        self.minus_unit(weeks, &ChronoUnit::Weeks)
    }

    /// Returns a copy with days subtracted.
    pub fn minus_days(&self, days: i64) -> TemporalResult<Self> {
        self.minus_unit(days, &ChronoUnit::Days)
    }

    /// Calculates the period from this date until `end`.
    ///
    /// The start date is included and the end date is excluded. The result
    /// has the same sign in every component.
    pub fn until_period(&self, end: &Self) -> TemporalResult<Period> {
        let mut total_months = end.proleptic_month() - self.proleptic_month();
        let mut days = i32::from(end.day) - i32::from(self.day);
        if total_months > 0 && days < 0 {
            total_months -= 1;
            let calc_date = self.plus_months(total_months)?;
            days = (end.to_epoch_day() - calc_date.to_epoch_day()) as i32;
        } else if total_months < 0 && days > 0 {
            total_months += 1;
            days -= i32::from(end.length_of_month());
        }
        let years = utils::to_i32(total_months / 12)?;
        let months = (total_months % 12) as i32;
        Ok(Period::of(years, months, days))
    }

    /// Combines this date with a time.
    #[inline]
    #[must_use]
    pub const fn at_time(&self, time: LocalTime) -> LocalDateTime {
        LocalDateTime::of(*self, time)
    }

    /// Returns the earliest valid instant of this date in `zone`.
    ///
    /// This is usually midnight. When midnight falls in a gap, the first
    /// valid time after the gap is used instead.
    pub fn at_start_of_day(&self, zone: &ZoneId) -> TemporalResult<ZonedDateTime> {
        let mut local = self.at_time(LocalTime::MIDNIGHT);
        if let ZoneId::Region { .. } = zone {
            if let Some(transition) = zone.rules().transition(&local)? {
                if transition.is_gap() {
                    local = transition.date_time_after()?;
                }
            }
        }
        ZonedDateTime::of_local(local, zone.clone(), None)
    }
}

// ==== Trait impls ====

impl TemporalAccessor for LocalDate {
    fn is_supported_field<F: TemporalField + ?Sized>(&self, field: &F) -> bool {
        match field.as_chrono_field() {
            Some(f) => f.is_date_field(),
            None => field.is_supported_by(self),
        }
    }

    fn range<F: TemporalField + ?Sized>(&self, field: &F) -> TemporalResult<ValueRange> {
        let Some(f) = field.as_chrono_field() else {
            return field.range_refined_by(self);
        };
        if !f.is_date_field() {
            return Err(f.unsupported());
        }
        let range = match f {
            ChronoField::DayOfMonth => ValueRange::of(1, i64::from(self.length_of_month())),
            ChronoField::DayOfYear => ValueRange::of(1, i64::from(self.length_of_year())),
            ChronoField::AlignedWeekOfMonth
                if self.month() == Month::February && !self.is_leap_year() =>
            {
                ValueRange::of(1, 4)
            }
            ChronoField::AlignedWeekOfMonth => ValueRange::of(1, 5),
            ChronoField::YearOfEra if self.year <= 0 => ValueRange::of(1, MAX_YEAR + 1),
            ChronoField::YearOfEra => ValueRange::of(1, MAX_YEAR),
            _ => f.value_range(),
        };
        Ok(range)
    }

    fn get_long<F: TemporalField + ?Sized>(&self, field: &F) -> TemporalResult<i64> {
        match field.as_chrono_field() {
            Some(f) => self.get_chrono_field(f),
            None => field.get_from(self),
        }
    }
}

impl Temporal for LocalDate {
    fn is_supported_unit<U: TemporalUnit + ?Sized>(&self, unit: &U) -> bool {
        match unit.as_chrono_unit() {
            Some(u) => u.is_date_unit(),
            None => unit.is_supported_by(self),
        }
    }

    fn with_field<F: TemporalField + ?Sized>(&self, field: &F, new_value: i64) -> TemporalResult<Self> {
        match field.as_chrono_field() {
            Some(f) => self.with_chrono_field(f, new_value),
            None => field.adjust_into(self, new_value),
        }
    }

    fn plus_unit<U: TemporalUnit + ?Sized>(&self, amount: i64, unit: &U) -> TemporalResult<Self> {
        let Some(u) = unit.as_chrono_unit() else {
            return unit.add_to(self, amount);
        };
        match u {
            ChronoUnit::Days => self.plus_days(amount),
            ChronoUnit::Weeks => self.plus_weeks(amount),
            ChronoUnit::Months => self.plus_months(amount),
            ChronoUnit::Years => self.plus_years(amount),
            ChronoUnit::Decades => self.plus_years(utils::checked_mul(amount, 10)?),
            ChronoUnit::Centuries => self.plus_years(utils::checked_mul(amount, 100)?),
            ChronoUnit::Millennia => self.plus_years(utils::checked_mul(amount, 1_000)?),
            ChronoUnit::Eras => {
                let era = self.get_chrono_field(ChronoField::Era)?;
                self.with_chrono_field(ChronoField::Era, utils::checked_add(era, amount)?)
            }
            _ => Err(u.unsupported()),
        }
    }

    fn until<U: TemporalUnit + ?Sized>(&self, end: &Self, unit: &U) -> TemporalResult<i64> {
        let Some(u) = unit.as_chrono_unit() else {
            return unit.between(self, end);
        };
        let days_until = end.to_epoch_day() - self.to_epoch_day();
        let amount = match u {
            ChronoUnit::Days => days_until,
            ChronoUnit::Weeks => days_until / 7,
            ChronoUnit::Months => self.months_until(end),
            ChronoUnit::Years => self.months_until(end) / 12,
            ChronoUnit::Decades => self.months_until(end) / 120,
            ChronoUnit::Centuries => self.months_until(end) / 1_200,
            ChronoUnit::Millennia => self.months_until(end) / 12_000,
            ChronoUnit::Eras => {
                end.get_chrono_field(ChronoField::Era)? - self.get_chrono_field(ChronoField::Era)?
            }
            _ => return Err(unsupported_unit(unit)),
        };
        Ok(amount)
    }
}

impl TemporalAdjuster for LocalDate {
    fn adjust_into<T: Temporal>(&self, temporal: &T) -> TemporalResult<T> {
        temporal.with_field(&ChronoField::EpochDay, self.to_epoch_day())
    }
}

impl Writeable for LocalDate {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        FormattableDate(self.year, self.month, self.day).write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        FormattableDate(self.year, self.month, self.day).writeable_length_hint()
    }
}

impl_display_with_writeable!(LocalDate);

impl FromStr for LocalDate {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsers::parse_local_date(s)
    }
}
