//! This module implements `ZoneId`, the identifier of a time zone.

use alloc::{
    borrow::Cow,
    format,
    string::{String, ToString},
    sync::Arc,
};
use core::{fmt, hash::Hash};

use crate::{
    builtins::core::{rules::ZoneRules, Instant, ZoneOffset},
    provider::ZoneRulesProvider,
    TemporalError, TemporalResult,
};

/// A time zone identifier, either a fixed offset such as `+02:00` or a
/// region such as `Europe/Paris`.
///
/// A region carries the rules it was resolved with. Two zones are equal when
/// their identifiers are equal.
#[derive(Debug, Clone)]
pub enum ZoneId {
    /// A fixed offset from UTC, identified by its offset id.
    Offset(ZoneOffset),
    /// A named region and its rules.
    Region { id: Arc<str>, rules: Arc<ZoneRules> },
}

// ==== Private API ====

impl ZoneId {
    fn fixed_region(id: String, offset: ZoneOffset) -> Self {
        Self::Region {
            id: id.into(),
            rules: Arc::new(ZoneRules::of(offset)),
        }
    }

    /// Resolves `UTC`, `GMT` or `UT` optionally followed by an offset.
    fn of_with_prefix(id: &str, prefix: &str) -> TemporalResult<Self> {
        let rest = &id[prefix.len()..];
        if rest.is_empty() {
            return Ok(Self::fixed_region(prefix.to_string(), ZoneOffset::UTC));
        }
        let offset = ZoneOffset::of(rest).map_err(|_| {
            TemporalError::parse().with_message(format!("Invalid ID for offset-based ZoneId: {id}"))
        })?;
        if offset == ZoneOffset::UTC {
            return Ok(Self::fixed_region(prefix.to_string(), offset));
        }
        Ok(Self::fixed_region(format!("{prefix}{offset}"), offset))
    }

    fn check_region_id(id: &str) -> TemporalResult<()> {
        let bytes = id.as_bytes();
        let valid = bytes.len() >= 2
            && bytes[0].is_ascii_alphabetic()
            && bytes[1..]
                .iter()
                .all(|b| b.is_ascii_alphanumeric() || b"~/._+-".contains(b));
        if !valid {
            return Err(TemporalError::parse()
                .with_message(format!("Invalid ID for region-based ZoneId: {id}")));
        }
        Ok(())
    }
}

// ==== Public API ====

impl ZoneId {
    /// Resolves `id` against `provider`.
    ///
    /// - `Z` and ids starting with `+` or `-` are fixed offsets.
    /// - `UTC`, `GMT` and `UT`, alone or followed by an offset, are fixed
    ///   regions that keep their prefix, such as `UTC+01:00`.
    /// - Anything else is a region looked up in `provider`.
    pub fn of_with_provider<P: ZoneRulesProvider + ?Sized>(
        id: &str,
        provider: &P,
    ) -> TemporalResult<Self> {
        if id == "Z" || id.starts_with(['+', '-']) {
            return ZoneOffset::of(id).map(Self::Offset);
        }
        for prefix in ["UTC", "GMT", "UT"] {
            let Some(rest) = id.strip_prefix(prefix) else {
                continue;
            };
            if rest.is_empty() || rest.starts_with(['+', '-']) {
                return Self::of_with_prefix(id, prefix);
            }
        }
        Self::check_region_id(id)?;
        let rules = provider.rules_for(id)?;
        Ok(Self::Region {
            id: id.into(),
            rules,
        })
    }

    /// Creates a zone for a region with known rules.
    pub fn of_region(id: &str, rules: Arc<ZoneRules>) -> TemporalResult<Self> {
        Self::check_region_id(id)?;
        Ok(Self::Region {
            id: id.into(),
            rules,
        })
    }

    /// Returns the identifier of this zone.
    #[must_use]
    pub fn id(&self) -> Cow<'_, str> {
        match self {
            Self::Offset(offset) => Cow::Owned(offset.id()),
            Self::Region { id, .. } => Cow::Borrowed(id),
        }
    }

    /// Returns the rules of this zone.
    #[must_use]
    pub fn rules(&self) -> Cow<'_, ZoneRules> {
        match self {
            Self::Offset(offset) => Cow::Owned(offset.rules()),
            Self::Region { rules, .. } => Cow::Borrowed(rules),
        }
    }

    /// Returns the offset of a fixed-offset zone variant.
    #[inline]
    #[must_use]
    pub const fn as_offset(&self) -> Option<ZoneOffset> {
        match self {
            Self::Offset(offset) => Some(*offset),
            Self::Region { .. } => None,
        }
    }

    /// Returns whether the offset of this zone never changes.
    #[must_use]
    pub fn is_fixed_offset(&self) -> bool {
        match self {
            Self::Offset(_) => true,
            Self::Region { rules, .. } => rules.is_fixed_offset(),
        }
    }

    /// Returns the offset variant when this zone has a fixed offset, or this
    /// zone unchanged.
    #[must_use]
    pub fn normalized(&self) -> Self {
        if let Self::Region { rules, .. } = self {
            if rules.is_fixed_offset() {
                if let Ok(offset) = rules.offset(&Instant::EPOCH) {
                    return Self::Offset(offset);
                }
            }
        }
        self.clone()
    }
}

impl From<ZoneOffset> for ZoneId {
    fn from(offset: ZoneOffset) -> Self {
        Self::Offset(offset)
    }
}

impl PartialEq for ZoneId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Offset(a), Self::Offset(b)) => a == b,
            _ => self.id() == other.id(),
        }
    }
}

impl Eq for ZoneId {}

impl Hash for ZoneId {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl PartialOrd for ZoneId {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ZoneId {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.id().cmp(&other.id())
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offset(offset) => fmt::Display::fmt(offset, f),
            Self::Region { id, .. } => f.write_str(id),
        }
    }
}
