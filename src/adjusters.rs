//! Common [`TemporalAdjuster`]s.
//!
//! Every adjuster here works through fields and units, so it applies to any
//! [`Temporal`] that supports `DayOfMonth`, `DayOfYear`, `DayOfWeek` and
//! `Days`, and the time part of a value is left untouched.
//!
//! ```rust
//! use tempora_rs::{adjusters, DayOfWeek, LocalDate, Temporal};
//!
//! let date = LocalDate::of(2011, 12, 15).unwrap();
//! let payday = date.with_adjuster(&adjusters::last_in_month(DayOfWeek::Friday)).unwrap();
//! assert_eq!(payday, LocalDate::of(2011, 12, 30).unwrap());
//! ```

use crate::{
    fields::ChronoField,
    iso::DayOfWeek,
    temporal::{Temporal, TemporalAccessor, TemporalAdjuster},
    units::ChronoUnit,
    TemporalResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum AdjusterKind {
    FirstDayOfMonth,
    LastDayOfMonth,
    FirstDayOfNextMonth,
    FirstDayOfYear,
    LastDayOfYear,
    FirstDayOfNextYear,
    DayOfWeekInMonth { ordinal: i32, day_of_week: DayOfWeek },
    Relative { day_of_week: DayOfWeek, direction: Direction },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Direction {
    Next,
    NextOrSame,
    Previous,
    PreviousOrSame,
}

/// One of the adjusters returned by the functions of this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateAdjuster(AdjusterKind);

impl DateAdjuster {
    fn day_of_week_in_month<T: Temporal>(
        temporal: &T,
        ordinal: i32,
        day_of_week: DayOfWeek,
    ) -> TemporalResult<T> {
        let target = i64::from(day_of_week.value());
        if ordinal >= 0 {
            let first = temporal.with_field(&ChronoField::DayOfMonth, 1)?;
            let current = i64::from(first.get(&ChronoField::DayOfWeek)?);
            let diff = (target - current + 7) % 7 + (i64::from(ordinal) - 1) * 7;
            first.plus_unit(diff, &ChronoUnit::Days)
        } else {
            let length = temporal.range(&ChronoField::DayOfMonth)?.maximum();
            let last = temporal.with_field(&ChronoField::DayOfMonth, length)?;
            let current = i64::from(last.get(&ChronoField::DayOfWeek)?);
            let diff = match target - current {
                0 => 0,
                d if d > 0 => d - 7,
                d => d,
            };
            last.plus_unit(diff - (-i64::from(ordinal) - 1) * 7, &ChronoUnit::Days)
        }
    }

    fn relative<T: Temporal>(
        temporal: &T,
        day_of_week: DayOfWeek,
        direction: Direction,
    ) -> TemporalResult<T> {
        let current = i64::from(temporal.get(&ChronoField::DayOfWeek)?);
        let target = i64::from(day_of_week.value());
        if current == target
            && matches!(direction, Direction::NextOrSame | Direction::PreviousOrSame)
        {
            return Ok(temporal.clone());
        }
        match direction {
            Direction::Next | Direction::NextOrSame => {
                let diff = current - target;
                let days = if diff >= 0 { 7 - diff } else { -diff };
                temporal.plus_unit(days, &ChronoUnit::Days)
            }
            Direction::Previous | Direction::PreviousOrSame => {
                let diff = target - current;
                let days = if diff >= 0 { 7 - diff } else { -diff };
                temporal.minus_unit(days, &ChronoUnit::Days)
            }
        }
    }
}

impl TemporalAdjuster for DateAdjuster {
    fn adjust_into<T: Temporal>(&self, temporal: &T) -> TemporalResult<T> {
        match self.0 {
            AdjusterKind::FirstDayOfMonth => temporal.with_field(&ChronoField::DayOfMonth, 1),
            AdjusterKind::LastDayOfMonth => {
                let length = temporal.range(&ChronoField::DayOfMonth)?.maximum();
                temporal.with_field(&ChronoField::DayOfMonth, length)
            }
            AdjusterKind::FirstDayOfNextMonth => temporal
                .with_field(&ChronoField::DayOfMonth, 1)?
                .plus_unit(1, &ChronoUnit::Months),
            AdjusterKind::FirstDayOfYear => temporal.with_field(&ChronoField::DayOfYear, 1),
            AdjusterKind::LastDayOfYear => {
                let length = temporal.range(&ChronoField::DayOfYear)?.maximum();
                temporal.with_field(&ChronoField::DayOfYear, length)
            }
            AdjusterKind::FirstDayOfNextYear => temporal
                .with_field(&ChronoField::DayOfYear, 1)?
                .plus_unit(1, &ChronoUnit::Years),
            AdjusterKind::DayOfWeekInMonth {
                ordinal,
                day_of_week,
            } => Self::day_of_week_in_month(temporal, ordinal, day_of_week),
            AdjusterKind::Relative {
                day_of_week,
                direction,
            } => Self::relative(temporal, day_of_week, direction),
        }
    }
}

/// The first day of the current month.
#[must_use]
pub const fn first_day_of_month() -> DateAdjuster {
    DateAdjuster(AdjusterKind::FirstDayOfMonth)
}

/// The last day of the current month.
#[must_use]
pub const fn last_day_of_month() -> DateAdjuster {
    DateAdjuster(AdjusterKind::LastDayOfMonth)
}

/// The first day of the following month.
#[must_use]
pub const fn first_day_of_next_month() -> DateAdjuster {
    DateAdjuster(AdjusterKind::FirstDayOfNextMonth)
}

#[must_use]
pub const fn first_day_of_year() -> DateAdjuster {
    DateAdjuster(AdjusterKind::FirstDayOfYear)
}

#[must_use]
pub const fn last_day_of_year() -> DateAdjuster {
    DateAdjuster(AdjusterKind::LastDayOfYear)
}

#[must_use]
pub const fn first_day_of_next_year() -> DateAdjuster {
    DateAdjuster(AdjusterKind::FirstDayOfNextYear)
}

/// The first `day_of_week` in the current month.
#[must_use]
pub const fn first_in_month(day_of_week: DayOfWeek) -> DateAdjuster {
    day_of_week_in_month(1, day_of_week)
}

/// The last `day_of_week` in the current month.
#[must_use]
pub const fn last_in_month(day_of_week: DayOfWeek) -> DateAdjuster {
    day_of_week_in_month(-1, day_of_week)
}

/// The `ordinal`-th `day_of_week` of the current month.
///
/// A positive ordinal counts from the start of the month and a negative one
/// from its end, so `-1` is the last occurrence. An ordinal of `0` means the
/// last occurrence in the previous month. Large ordinals run on into later
/// months.
#[must_use]
pub const fn day_of_week_in_month(ordinal: i32, day_of_week: DayOfWeek) -> DateAdjuster {
    DateAdjuster(AdjusterKind::DayOfWeekInMonth {
        ordinal,
        day_of_week,
    })
}

/// The next `day_of_week` strictly after the date.
#[must_use]
pub const fn next(day_of_week: DayOfWeek) -> DateAdjuster {
    DateAdjuster(AdjusterKind::Relative {
        day_of_week,
        direction: Direction::Next,
    })
}

/// The date itself if it falls on `day_of_week`, otherwise the next one.
#[must_use]
pub const fn next_or_same(day_of_week: DayOfWeek) -> DateAdjuster {
    DateAdjuster(AdjusterKind::Relative {
        day_of_week,
        direction: Direction::NextOrSame,
    })
}

/// The previous `day_of_week` strictly before the date.
#[must_use]
pub const fn previous(day_of_week: DayOfWeek) -> DateAdjuster {
    DateAdjuster(AdjusterKind::Relative {
        day_of_week,
        direction: Direction::Previous,
    })
}

/// The date itself if it falls on `day_of_week`, otherwise the previous one.
#[must_use]
pub const fn previous_or_same(day_of_week: DayOfWeek) -> DateAdjuster {
    DateAdjuster(AdjusterKind::Relative {
        day_of_week,
        direction: Direction::PreviousOrSame,
    })
}
