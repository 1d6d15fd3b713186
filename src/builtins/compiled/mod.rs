//! Implementations backed by the bundled time zone database.
//!
//! Methods here are feature gated behind the `tzdb` feature and resolve
//! region ids with [`TZ_PROVIDER`].

mod now;
mod zone;
mod zoneddatetime;

use std::sync::LazyLock;

use crate::tzdb::TzdbProvider;

/// The process-wide provider behind the provider-less methods.
pub static TZ_PROVIDER: LazyLock<TzdbProvider> = LazyLock::new(TzdbProvider::new);
