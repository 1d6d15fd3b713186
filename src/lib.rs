//! The `tempora_rs` crate is an immutable date, time and duration library
//! built on the ISO-8601 calendar system, with time-zone rule resolution.
//!
//! ```rust
//! use tempora_rs::{Duration, LocalDate};
//! use core::str::FromStr;
//!
//! let date = LocalDate::of(2008, 2, 29).unwrap();
//! assert_eq!(date.plus_years(1).unwrap().to_string(), "2009-02-28");
//!
//! let duration = Duration::from_str("PT-1.1S").unwrap();
//! assert_eq!(duration.seconds(), -2);
//! assert_eq!(duration.nanos(), 900_000_000);
//! assert_eq!(duration.to_string(), "PT-1.1S");
//! ```
//!
//! Every value type is a small immutable value. Arithmetic is overflow
//! checked and returns a [`TemporalResult`] instead of wrapping or panicking.
//!
//! Values can be read and adjusted generically through the field / unit
//! protocol in [`fields`], [`units`] and [`temporal`]. The protocol is open:
//! a field or unit defined in another crate works with every value type here.
//!
//! Zone-aware values resolve local date-times against [`ZoneRules`] obtained
//! from a [`provider::ZoneRulesProvider`]. With the `tzdb` feature, the
//! bundled IANA time zone database is available through
//! [`tzdb::TzdbProvider`] and the provider-less convenience methods like
//! [`ZoneId::of`].
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_lines,
    clippy::cognitive_complexity,
    clippy::missing_errors_doc,
    clippy::let_unit_value,
    clippy::option_if_let_else,

    // It may be worth to look if we can fix the issues highlighted by these lints.
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,

    // Add temporarily - Needs addressing
    clippy::missing_panics_doc,
)]

extern crate alloc;
extern crate core;

#[cfg(feature = "std")]
extern crate std;

pub mod adjusters;
pub mod error;
pub mod fields;
pub mod host;
pub mod iso;
pub mod provider;
pub mod temporal;
pub mod units;

#[cfg(feature = "sys")]
pub mod sys;

#[cfg(feature = "tzdb")]
pub mod tzdb;

mod builtins;
mod parsers;

#[doc(hidden)]
pub(crate) mod utils;

use core::cmp::Ordering;

#[doc(inline)]
pub use error::TemporalError;

/// The `tempora_rs` result type
pub type TemporalResult<T> = Result<T, TemporalError>;

pub use crate::builtins::core::{
    rules::{
        LocalResolution, OffsetInfo, TimeDefinition, ZoneOffsetTransition,
        ZoneOffsetTransitionRule, ZoneRules,
    },
    Duration, Instant, LocalDate, LocalDateTime, LocalTime, Now, Period, ZoneId, ZoneOffset,
    ZonedDateTime,
};
#[cfg(feature = "tzdb")]
pub use crate::builtins::TZ_PROVIDER;
pub use crate::fields::{ChronoField, TemporalField, ValueRange};
pub use crate::iso::{DayOfWeek, Month};
pub use crate::temporal::{Temporal, TemporalAccessor, TemporalAdjuster, TemporalAmount};
pub use crate::units::{ChronoUnit, TemporalUnit};

/// A library specific trait for unwrapping assertions.
pub(crate) trait TemporalUnwrap {
    type Output;

    /// `tempora_rs` based assertion for unwrapping. This will panic in
    /// debug builds, but throws error during runtime.
    fn temporal_unwrap(self) -> TemporalResult<Self::Output>;
}

impl<T> TemporalUnwrap for Option<T> {
    type Output = T;

    fn temporal_unwrap(self) -> TemporalResult<Self::Output> {
        debug_assert!(self.is_some());
        self.ok_or(TemporalError::assert())
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! temporal_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err(TemporalError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err(TemporalError::assert());
        }
    };
}

/// A general Sign type.
#[repr(i8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sign {
    #[default]
    Positive = 1,
    Zero = 0,
    Negative = -1,
}

impl From<i64> for Sign {
    fn from(value: i64) -> Self {
        match value.cmp(&0) {
            Ordering::Greater => Self::Positive,
            Ordering::Equal => Self::Zero,
            Ordering::Less => Self::Negative,
        }
    }
}

// Relevant numeric constants
/// Seconds per day constant: 86,400
pub const SECONDS_PER_DAY: i64 = 86_400;
/// Nanoseconds per second constant: 1e9
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
/// Nanoseconds per day constant: 8.64e+13
pub const NANOS_PER_DAY: i64 = SECONDS_PER_DAY * NANOS_PER_SECOND;

pub(crate) const SECONDS_PER_HOUR: i64 = 3_600;
pub(crate) const SECONDS_PER_MINUTE: i64 = 60;
pub(crate) const MINUTES_PER_DAY: i64 = 1_440;
pub(crate) const HOURS_PER_DAY: i64 = 24;
pub(crate) const NANOS_PER_HOUR: i64 = SECONDS_PER_HOUR * NANOS_PER_SECOND;
pub(crate) const NANOS_PER_MINUTE: i64 = SECONDS_PER_MINUTE * NANOS_PER_SECOND;
pub(crate) const NANOS_PER_MILLI: i64 = 1_000_000;
pub(crate) const NANOS_PER_MICRO: i64 = 1_000;
