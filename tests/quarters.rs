//! A quarter-of-year field and a quarter-years unit defined outside the crate,
//! used through the generic field / unit protocol.

use core::str::FromStr;

use tempora_rs::{
    error::ErrorKind, ChronoField, ChronoUnit, Duration, LocalDate, LocalDateTime, LocalTime,
    Temporal, TemporalAccessor, TemporalError, TemporalField, TemporalResult, TemporalUnit,
    ValueRange, ZoneId, ZonedDateTime,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuarterUnit {
    QuarterYears,
    Years,
}

impl TemporalUnit for QuarterUnit {
    fn duration(&self) -> Duration {
        match self {
            Self::QuarterYears => Duration::of_seconds(31_556_952 / 4),
            Self::Years => ChronoUnit::Years.duration(),
        }
    }

    fn is_duration_estimated(&self) -> bool {
        true
    }

    fn is_date_based(&self) -> bool {
        true
    }

    fn is_time_based(&self) -> bool {
        false
    }

    fn is_supported_by<T: Temporal>(&self, temporal: &T) -> bool {
        temporal.is_supported_unit(&ChronoUnit::Months)
    }

    fn add_to<T: Temporal>(&self, temporal: &T, amount: i64) -> TemporalResult<T> {
        match self {
            Self::QuarterYears => {
                let months = amount.checked_mul(3).ok_or_else(TemporalError::overflow)?;
                temporal.plus_unit(months, &ChronoUnit::Months)
            }
            Self::Years => temporal.plus_unit(amount, &ChronoUnit::Years),
        }
    }

    fn between<T: Temporal>(&self, start: &T, end: &T) -> TemporalResult<i64> {
        match self {
            Self::QuarterYears => Ok(start.until(end, &ChronoUnit::Months)? / 3),
            Self::Years => start.until(end, &ChronoUnit::Years),
        }
    }

    // Values handle years themselves and only call back for quarters.
    fn as_chrono_unit(&self) -> Option<ChronoUnit> {
        match self {
            Self::QuarterYears => None,
            Self::Years => Some(ChronoUnit::Years),
        }
    }
}

#[derive(Debug)]
struct QuarterOfYear;

impl TemporalField for QuarterOfYear {
    type Unit = QuarterUnit;

    fn name(&self) -> &str {
        "QuarterOfYear"
    }

    fn base_unit(&self) -> QuarterUnit {
        QuarterUnit::QuarterYears
    }

    fn range_unit(&self) -> QuarterUnit {
        QuarterUnit::Years
    }

    fn range(&self) -> ValueRange {
        ValueRange::of(1, 4)
    }

    fn is_date_based(&self) -> bool {
        true
    }

    fn is_time_based(&self) -> bool {
        false
    }

    fn is_supported_by<A: TemporalAccessor + ?Sized>(&self, temporal: &A) -> bool {
        temporal.is_supported_field(&ChronoField::MonthOfYear)
    }

    fn range_refined_by<A: TemporalAccessor + ?Sized>(
        &self,
        temporal: &A,
    ) -> TemporalResult<ValueRange> {
        if !self.is_supported_by(temporal) {
            return Err(TemporalError::unsupported().with_message("Unsupported field: QuarterOfYear"));
        }
        Ok(self.range())
    }

    fn get_from<A: TemporalAccessor + ?Sized>(&self, temporal: &A) -> TemporalResult<i64> {
        if !self.is_supported_by(temporal) {
            return Err(TemporalError::unsupported().with_message("Unsupported field: QuarterOfYear"));
        }
        Ok((temporal.get_long(&ChronoField::MonthOfYear)? + 2) / 3)
    }

    fn adjust_into<T: Temporal>(&self, temporal: &T, new_value: i64) -> TemporalResult<T> {
        let new_value = self.range().check_valid_value(new_value, self)?;
        let current = self.get_from(temporal)?;
        let month = temporal.get_long(&ChronoField::MonthOfYear)?;
        temporal.with_field(&ChronoField::MonthOfYear, month + (new_value - current) * 3)
    }
}

fn date(year: i32, month: i32, day: i32) -> LocalDate {
    LocalDate::of(year, month, day).unwrap()
}

#[test]
fn quarter_of_local_date() {
    let may = date(2012, 5, 15);
    assert!(may.is_supported_field(&QuarterOfYear));
    assert_eq!(may.get(&QuarterOfYear).unwrap(), 2);
    assert_eq!(may.range(&QuarterOfYear).unwrap(), ValueRange::of(1, 4));
    assert_eq!(may.with_field(&QuarterOfYear, 4).unwrap(), date(2012, 11, 15));
    assert_eq!(
        may.with_field(&QuarterOfYear, 5).unwrap_err().kind(),
        ErrorKind::Range
    );
}

#[test]
fn quarter_years_on_local_date() {
    let may = date(2012, 5, 15);
    assert!(may.is_supported_unit(&QuarterUnit::QuarterYears));
    assert_eq!(
        may.plus_unit(3, &QuarterUnit::QuarterYears).unwrap(),
        date(2013, 2, 15)
    );
    assert_eq!(
        may.minus_unit(1, &QuarterUnit::QuarterYears).unwrap(),
        date(2012, 2, 15)
    );
    assert_eq!(may.plus_unit(1, &QuarterUnit::Years).unwrap(), date(2013, 5, 15));
    assert_eq!(
        may.until(&date(2013, 5, 14), &QuarterUnit::QuarterYears).unwrap(),
        3
    );
    assert_eq!(
        may.until(&date(2011, 11, 15), &QuarterUnit::QuarterYears).unwrap(),
        -2
    );
}

#[test]
fn local_date_time_keeps_time() {
    let local = LocalDateTime::from_str("2012-08-31T10:15").unwrap();
    assert_eq!(local.get(&QuarterOfYear).unwrap(), 3);
    let first = local.with_field(&QuarterOfYear, 1).unwrap();
    assert_eq!(first.to_string(), "2012-02-29T10:15");
    assert_eq!(
        local.plus_unit(2, &QuarterUnit::QuarterYears).unwrap().to_string(),
        "2013-02-28T10:15"
    );
}

#[test]
fn local_time_rejects_quarters() {
    let noon = LocalTime::of(12, 0).unwrap();
    assert!(!noon.is_supported_field(&QuarterOfYear));
    assert!(!noon.is_supported_unit(&QuarterUnit::QuarterYears));
    assert_eq!(
        noon.get(&QuarterOfYear).unwrap_err().kind(),
        ErrorKind::Unsupported
    );
    assert_eq!(
        noon.plus_unit(1, &QuarterUnit::QuarterYears).unwrap_err().kind(),
        ErrorKind::Unsupported
    );
}

#[test]
fn zoned_quarters_cross_transitions() {
    let london = ZoneId::of("Europe/London").unwrap();
    let winter = ZonedDateTime::of(LocalDateTime::from_str("2024-01-15T12:00").unwrap(), london)
        .unwrap();
    assert_eq!(winter.get(&QuarterOfYear).unwrap(), 1);

    let spring = winter.plus_unit(1, &QuarterUnit::QuarterYears).unwrap();
    assert_eq!(spring.to_string(), "2024-04-15T12:00+01:00[Europe/London]");
    // The end is aligned to the start's offset, so a quarter needs an extra hour.
    assert_eq!(winter.until(&spring, &QuarterUnit::QuarterYears).unwrap(), 0);
    let later = spring.plus_hours(1).unwrap();
    assert_eq!(winter.until(&later, &QuarterUnit::QuarterYears).unwrap(), 1);

    let autumn = winter.with_field(&QuarterOfYear, 4).unwrap();
    assert_eq!(autumn.to_string(), "2024-10-15T12:00+01:00[Europe/London]");
}
