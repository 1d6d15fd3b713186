use core::str::FromStr;

use crate::{builtins::TZ_PROVIDER, TemporalError, TemporalResult, ZonedDateTime};

impl ZonedDateTime {
    /// Parses text such as `2007-12-03T10:15:30+01:00[Europe/Paris]` with the
    /// bundled time zone database.
    ///
    /// ```rust
    /// use tempora_rs::ZonedDateTime;
    ///
    /// let zoned = ZonedDateTime::parse("2024-03-31T01:30[Europe/London]").unwrap();
    /// assert_eq!(zoned.to_string(), "2024-03-31T02:30+01:00[Europe/London]");
    /// ```
    pub fn parse(text: &str) -> TemporalResult<Self> {
        Self::parse_with_provider(text, &*TZ_PROVIDER)
    }
}

impl FromStr for ZonedDateTime {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use crate::{ZoneId, ZoneOffset, ZonedDateTime};

    #[test]
    fn offset_and_zone() {
        // The offset fixes the instant, the zone re-expresses it.
        let zoned = ZonedDateTime::from_str("2024-07-01T12:00+00:00[Europe/Paris]").unwrap();
        assert_eq!(zoned.to_string(), "2024-07-01T14:00+02:00[Europe/Paris]");

        let fixed = ZonedDateTime::parse("2024-07-01T12:00-03:00").unwrap();
        assert_eq!(fixed.zone(), &ZoneId::Offset(ZoneOffset::of_hours(-3).unwrap()));
        assert_eq!(fixed.to_string(), "2024-07-01T12:00-03:00");

        assert!(ZonedDateTime::parse("2024-07-01T12:00").is_err());
        assert!(ZonedDateTime::parse("2024-07-01T12:00[Europe/Nowhere]").is_err());
    }
}
