//! The native Rust implementations of the date, time and zone value types.

pub(crate) mod date;
pub(crate) mod datetime;
pub(crate) mod duration;
pub(crate) mod instant;
pub(crate) mod now;
pub(crate) mod offset;
pub(crate) mod period;
pub(crate) mod rules;
pub(crate) mod time;
pub(crate) mod zone;
pub(crate) mod zoneddatetime;

#[doc(inline)]
pub use date::LocalDate;
#[doc(inline)]
pub use datetime::LocalDateTime;
#[doc(inline)]
pub use duration::Duration;
#[doc(inline)]
pub use instant::Instant;
#[doc(inline)]
pub use now::Now;
#[doc(inline)]
pub use offset::ZoneOffset;
#[doc(inline)]
pub use period::Period;
#[doc(inline)]
pub use time::LocalTime;
#[doc(inline)]
pub use zone::ZoneId;
#[doc(inline)]
pub use zoneddatetime::ZonedDateTime;
