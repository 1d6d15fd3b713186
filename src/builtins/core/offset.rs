//! This module implements `ZoneOffset`, a fixed offset from UTC.

use alloc::string::{String, ToString};
use core::str::FromStr;

use writeable::{impl_display_with_writeable, LengthHint, Writeable};

use crate::{
    builtins::core::rules::ZoneRules,
    fields::{ChronoField, TemporalField, ValueRange},
    parsers::{self, FormattableOffset},
    temporal::{unsupported_field, Temporal, TemporalAccessor, TemporalAdjuster},
    TemporalError, TemporalResult, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};

const MAX_SECONDS: i32 = 18 * SECONDS_PER_HOUR as i32;

/// A fixed offset from UTC, such as `+02:00`.
///
/// Offsets range from `-18:00` to `+18:00` with second precision. Offsets
/// order by their total seconds, so `-05:00` sorts before `+01:00`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZoneOffset {
    total_seconds: i32,
}

impl ZoneOffset {
    /// The offset of UTC itself, `Z`.
    pub const UTC: Self = Self { total_seconds: 0 };
    /// The minimum supported offset, `-18:00`.
    pub const MIN: Self = Self {
        total_seconds: -MAX_SECONDS,
    };
    /// The maximum supported offset, `+18:00`.
    pub const MAX: Self = Self {
        total_seconds: MAX_SECONDS,
    };

    /// Creates an offset from its total seconds.
    pub fn of_total_seconds(total_seconds: i32) -> TemporalResult<Self> {
        if !(-MAX_SECONDS..=MAX_SECONDS).contains(&total_seconds) {
            return Err(TemporalError::range()
                .with_message("Zone offset not in valid range: -18:00 to +18:00"));
        }
        Ok(Self { total_seconds })
    }

    /// Creates an offset of whole hours.
    pub fn of_hours(hours: i32) -> TemporalResult<Self> {
        Self::of_hours_minutes_seconds(hours, 0, 0)
    }

    /// Creates an offset of hours and minutes, which must share a sign.
    pub fn of_hours_minutes(hours: i32, minutes: i32) -> TemporalResult<Self> {
        Self::of_hours_minutes_seconds(hours, minutes, 0)
    }

    /// Creates an offset of hours, minutes and seconds, which must share a sign.
    pub fn of_hours_minutes_seconds(hours: i32, minutes: i32, seconds: i32) -> TemporalResult<Self> {
        if !(-18..=18).contains(&hours) {
            return Err(TemporalError::range()
                .with_message("Zone offset hours not in valid range: -18 to 18"));
        }
        let sign_mismatch = if hours > 0 {
            minutes < 0 || seconds < 0
        } else if hours < 0 {
            minutes > 0 || seconds > 0
        } else {
            (minutes > 0 && seconds < 0) || (minutes < 0 && seconds > 0)
        };
        if sign_mismatch {
            return Err(TemporalError::range()
                .with_message("Zone offset hours, minutes and seconds must have the same sign"));
        }
        if !(-59..=59).contains(&minutes) || !(-59..=59).contains(&seconds) {
            return Err(TemporalError::range()
                .with_message("Zone offset minutes and seconds not in valid range: -59 to 59"));
        }
        if hours.abs() == 18 && (minutes | seconds) != 0 {
            return Err(TemporalError::range()
                .with_message("Zone offset not in valid range: -18:00 to +18:00"));
        }
        Self::of_total_seconds(
            hours * SECONDS_PER_HOUR as i32 + minutes * SECONDS_PER_MINUTE as i32 + seconds,
        )
    }

    /// Parses an offset id such as `Z`, `+02`, `-0530` or `+05:30:15`.
    pub fn of(id: &str) -> TemporalResult<Self> {
        parsers::parse_offset(id)
    }

    /// Obtains an offset from any value supporting `OffsetSeconds`.
    pub fn from<A: TemporalAccessor + ?Sized>(temporal: &A) -> TemporalResult<Self> {
        Self::of_total_seconds(temporal.get(&ChronoField::OffsetSeconds)?)
    }

    /// Returns the offset in seconds.
    #[inline]
    #[must_use]
    pub const fn total_seconds(&self) -> i32 {
        self.total_seconds
    }

    /// Returns the normalized id of this offset, `Z` or `±HH:MM[:SS]`.
    #[must_use]
    pub fn id(&self) -> String {
        self.to_string()
    }

    /// Returns rules in which this offset always applies.
    #[must_use]
    pub fn rules(&self) -> ZoneRules {
        ZoneRules::of(*self)
    }

    #[inline]
    fn formattable(&self) -> FormattableOffset {
        FormattableOffset {
            total_seconds: self.total_seconds,
        }
    }
}

impl TemporalAccessor for ZoneOffset {
    fn is_supported_field<F: TemporalField + ?Sized>(&self, field: &F) -> bool {
        match field.as_chrono_field() {
            Some(f) => f == ChronoField::OffsetSeconds,
            None => field.is_supported_by(self),
        }
    }

    fn range<F: TemporalField + ?Sized>(&self, field: &F) -> TemporalResult<ValueRange> {
        match field.as_chrono_field() {
            Some(ChronoField::OffsetSeconds) => Ok(ChronoField::OffsetSeconds.value_range()),
            Some(f) => Err(f.unsupported()),
            None => field.range_refined_by(self),
        }
    }

    fn get_long<F: TemporalField + ?Sized>(&self, field: &F) -> TemporalResult<i64> {
        match field.as_chrono_field() {
            Some(ChronoField::OffsetSeconds) => Ok(i64::from(self.total_seconds)),
            Some(_) => Err(unsupported_field(field)),
            None => field.get_from(self),
        }
    }
}

impl TemporalAdjuster for ZoneOffset {
    fn adjust_into<T: Temporal>(&self, temporal: &T) -> TemporalResult<T> {
        temporal.with_field(&ChronoField::OffsetSeconds, i64::from(self.total_seconds))
    }
}

impl Writeable for ZoneOffset {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        self.formattable().write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.formattable().writeable_length_hint()
    }
}

impl_display_with_writeable!(ZoneOffset);

impl FromStr for ZoneOffset {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parsers::parse_offset(s)
    }
}

#[cfg(test)]
mod tests {
    use super::ZoneOffset;
    use crate::{error::ErrorKind, ChronoField, TemporalAccessor};
    use alloc::string::ToString;

    #[test]
    fn construction() {
        assert_eq!(ZoneOffset::of_hours(2).unwrap().total_seconds(), 7_200);
        assert_eq!(
            ZoneOffset::of_hours_minutes(-5, -30).unwrap().total_seconds(),
            -19_800
        );
        assert_eq!(
            ZoneOffset::of_hours_minutes(-5, 30).unwrap_err().kind(),
            ErrorKind::Range
        );
        assert!(ZoneOffset::of_hours_minutes_seconds(0, 1, -1).is_err());
        assert!(ZoneOffset::of_hours_minutes(18, 1).is_err());
        assert!(ZoneOffset::of_hours(19).is_err());
        assert!(ZoneOffset::of_total_seconds(64_801).is_err());
        assert_eq!(ZoneOffset::of_total_seconds(-64_800), Ok(ZoneOffset::MIN));
    }

    #[test]
    fn ordering_is_by_total_seconds() {
        let west = ZoneOffset::of_hours(-5).unwrap();
        let east = ZoneOffset::of_hours(1).unwrap();
        assert!(west < ZoneOffset::UTC);
        assert!(ZoneOffset::UTC < east);
        assert_eq!(ZoneOffset::of_hours(0), Ok(ZoneOffset::UTC));
    }

    #[test]
    fn ids() {
        assert_eq!(ZoneOffset::UTC.id(), "Z");
        assert_eq!(ZoneOffset::of_hours(2).unwrap().to_string(), "+02:00");
        assert_eq!(
            ZoneOffset::of_hours_minutes_seconds(-5, -30, -15).unwrap().to_string(),
            "-05:30:15"
        );

        assert_eq!(ZoneOffset::of("Z"), Ok(ZoneOffset::UTC));
        assert_eq!(ZoneOffset::of("+2"), ZoneOffset::of_hours(2));
        assert_eq!(ZoneOffset::of("-02"), ZoneOffset::of_hours(-2));
        assert_eq!(ZoneOffset::of("+0530"), ZoneOffset::of_hours_minutes(5, 30));
        assert_eq!(ZoneOffset::of("+05:30"), ZoneOffset::of_hours_minutes(5, 30));
        assert_eq!(
            ZoneOffset::of("-053015"),
            ZoneOffset::of_hours_minutes_seconds(-5, -30, -15)
        );
        assert_eq!(ZoneOffset::of("+05:3").unwrap_err().kind(), ErrorKind::Parse);
        assert!(ZoneOffset::of("+05:30:").is_err());
        assert!(ZoneOffset::of("+0530:15").is_err());
        assert!(ZoneOffset::of("05:30").is_err());
        assert!(ZoneOffset::of("+19").is_err());
    }

    #[test]
    fn offset_seconds_field() {
        let offset = ZoneOffset::of_hours(-8).unwrap();
        assert_eq!(offset.get(&ChronoField::OffsetSeconds), Ok(-28_800));
        assert!(offset.get(&ChronoField::HourOfDay).is_err());
        assert_eq!(ZoneOffset::from(&offset), Ok(offset));
    }
}
