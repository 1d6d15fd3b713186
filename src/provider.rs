//! The `ZoneRulesProvider` trait and simple providers.
//!
//! A provider maps region identifiers such as `Europe/Paris` to the
//! [`ZoneRules`] in force there. Zone-aware values ask a provider for rules
//! once, when the [`ZoneId`][crate::ZoneId] is created, and share them after.

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    sync::Arc,
    vec::Vec,
};

use crate::{builtins::core::rules::ZoneRules, TemporalError, TemporalResult};

/// The `ZoneRulesProvider` trait provides the methods required for a source
/// of time zone data.
pub trait ZoneRulesProvider {
    /// Returns the rules for a region identifier.
    ///
    /// Unknown identifiers are a [`ErrorKind::ZoneResolution`][crate::error::ErrorKind::ZoneResolution]
    /// error.
    fn rules_for(&self, id: &str) -> TemporalResult<Arc<ZoneRules>>;

    /// Returns every region identifier this provider can resolve.
    fn available_zone_ids(&self) -> Vec<String>;
}

impl<P: ZoneRulesProvider + ?Sized> ZoneRulesProvider for &P {
    fn rules_for(&self, id: &str) -> TemporalResult<Arc<ZoneRules>> {
        (**self).rules_for(id)
    }

    fn available_zone_ids(&self) -> Vec<String> {
        (**self).available_zone_ids()
    }
}

#[inline]
pub(crate) fn unknown_zone(id: &str) -> TemporalError {
    TemporalError::zone().with_message(alloc::format!("Unknown time-zone ID: {id}"))
}

/// A provider that knows no regions.
///
/// Offsets and the `UTC`, `GMT` and `UT` prefixes still resolve without a
/// provider.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverProvider;

impl ZoneRulesProvider for NeverProvider {
    fn rules_for(&self, id: &str) -> TemporalResult<Arc<ZoneRules>> {
        Err(unknown_zone(id))
    }

    fn available_zone_ids(&self) -> Vec<String> {
        Vec::new()
    }
}

/// A provider backed by rules registered in memory.
///
/// ```rust
/// use tempora_rs::{provider::InMemoryProvider, ZoneId, ZoneOffset, ZoneRules};
///
/// let provider = InMemoryProvider::default()
///     .with_zone("Fixed/Three", ZoneRules::of(ZoneOffset::of_hours(3).unwrap()));
/// let zone = ZoneId::of_with_provider("Fixed/Three", &provider).unwrap();
/// assert_eq!(zone.id(), "Fixed/Three");
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryProvider {
    zones: BTreeMap<String, Arc<ZoneRules>>,
}

impl InMemoryProvider {
    /// Returns this provider with `rules` registered under `id`.
    #[must_use]
    pub fn with_zone(mut self, id: &str, rules: ZoneRules) -> Self {
        self.insert(id, rules);
        self
    }

    /// Registers `rules` under `id`, replacing any earlier registration.
    pub fn insert(&mut self, id: &str, rules: ZoneRules) {
        self.zones.insert(id.to_string(), Arc::new(rules));
    }
}

impl ZoneRulesProvider for InMemoryProvider {
    fn rules_for(&self, id: &str) -> TemporalResult<Arc<ZoneRules>> {
        self.zones.get(id).cloned().ok_or_else(|| unknown_zone(id))
    }

    fn available_zone_ids(&self) -> Vec<String> {
        self.zones.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryProvider, NeverProvider, ZoneRulesProvider};
    use crate::{error::ErrorKind, ZoneOffset, ZoneRules};

    #[test]
    fn in_memory_lookup() {
        let rules = ZoneRules::of(ZoneOffset::of_hours(-3).unwrap());
        let provider = InMemoryProvider::default().with_zone("Test/Minus", rules.clone());
        assert_eq!(*provider.rules_for("Test/Minus").unwrap(), rules);
        assert_eq!(provider.available_zone_ids(), ["Test/Minus"]);

        let err = provider.rules_for("Test/Other").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ZoneResolution);
        assert_eq!(err.message(), "Unknown time-zone ID: Test/Other");
    }

    #[test]
    fn never_provider() {
        assert!(NeverProvider.rules_for("Europe/Paris").is_err());
        assert!(NeverProvider.available_zone_ids().is_empty());
    }
}
