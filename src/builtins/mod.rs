pub(crate) mod core;

#[cfg(feature = "tzdb")]
pub(crate) mod compiled;

pub use self::core::*;

#[cfg(feature = "tzdb")]
pub use compiled::TZ_PROVIDER;
