//! This module implements `TemporalError`.

use alloc::borrow::Cow;
use core::fmt;

/// `TemporalError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Error.
    #[default]
    Generic,
    /// A field value was outside of its legal range.
    Range,
    /// Individually legal fields combined into a date that does not exist.
    InvalidDate,
    /// Integer overflow or division by zero.
    Overflow,
    /// The field or unit is not supported by the target type.
    Unsupported,
    /// A local date-time could not be resolved against a zone's rules.
    ZoneResolution,
    /// Malformed text.
    Parse,
    /// Implementation error.
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Range => "ValueRangeError",
            Self::InvalidDate => "InvalidDateError",
            Self::Overflow => "OverflowError",
            Self::Unsupported => "UnsupportedFieldOrUnitError",
            Self::ZoneResolution => "ZoneResolutionError",
            Self::Parse => "ParseError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The error type for `tempora_rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
    position: Option<usize>,
}

impl TemporalError {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
            position: None,
        }
    }

    /// Create a generic error
    #[must_use]
    pub fn general<S>(msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Create a value range error.
    #[must_use]
    pub fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Create an invalid date error.
    #[must_use]
    pub fn invalid_date() -> Self {
        Self::new(ErrorKind::InvalidDate)
    }

    /// Create an overflow error.
    #[must_use]
    pub fn overflow() -> Self {
        Self::new(ErrorKind::Overflow)
    }

    /// Create an unsupported field or unit error.
    #[must_use]
    pub fn unsupported() -> Self {
        Self::new(ErrorKind::Unsupported)
    }

    /// Create a zone resolution error.
    #[must_use]
    pub fn zone() -> Self {
        Self::new(ErrorKind::ZoneResolution)
    }

    /// Create a parse error.
    #[must_use]
    pub fn parse() -> Self {
        Self::new(ErrorKind::Parse)
    }

    /// Creates an assertion error
    #[must_use]
    pub(crate) fn assert() -> Self {
        Self::new(ErrorKind::Assert)
    }

    /// Create an abrupt end error.
    #[must_use]
    pub fn abrupt_end(position: usize) -> Self {
        Self::parse()
            .with_message("Abrupt end to parsing target.")
            .with_position(position)
    }

    /// Add a message to the error.
    #[must_use]
    pub fn with_message<S>(mut self, msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.msg = msg.into();
        self
    }

    /// Attach the byte offset at which parsing failed.
    #[must_use]
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Returns the byte offset of a parse failure, if one was recorded.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        self.position
    }

    /// Extracts the error message.
    #[inline]
    #[must_use]
    pub fn into_message(self) -> Cow<'static, str> {
        self.msg
    }
}

impl fmt::Display for TemporalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.trim();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        if let Some(position) = self.position {
            write!(f, " (at position {position})")?;
        }

        Ok(())
    }
}

impl core::error::Error for TemporalError {}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, TemporalError};
    use alloc::string::ToString;

    #[test]
    fn error_display() {
        let err = TemporalError::range().with_message("Invalid value for MonthOfYear: 13");
        assert_eq!(
            err.to_string(),
            "ValueRangeError: Invalid value for MonthOfYear: 13"
        );

        let err = TemporalError::parse()
            .with_message("Text cannot be parsed to a Duration")
            .with_position(3);
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.position(), Some(3));
        assert_eq!(
            err.to_string(),
            "ParseError: Text cannot be parsed to a Duration (at position 3)"
        );

        assert_eq!(TemporalError::overflow().to_string(), "OverflowError");
    }
}
