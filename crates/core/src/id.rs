//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of an inventory item.
///
/// Ids are positive integers assigned by the inventory store
/// (`max(existing) + 1`, starting at 1). Every code path compares ids through
/// this type, so textual ids coming from a form or a CSV cell must be parsed
/// with [`FromStr`] first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ItemId(u64);

impl ItemId {
    /// The id handed out when the collection is empty.
    pub const FIRST: ItemId = ItemId(1);

    /// Wrap a raw id. Returns `None` for 0, which is never a valid id.
    pub const fn new(raw: u64) -> Option<Self> {
        if raw == 0 { None } else { Some(Self(raw)) }
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id following this one, or `None` once the id space is exhausted.
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<ItemId> for u64 {
    fn from(value: ItemId) -> Self {
        value.0
    }
}

impl TryFrom<u64> for ItemId {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| DomainError::invalid_id("ItemId: must be positive"))
    }
}

impl FromStr for ItemId {
    type Err = DomainError;

    /// Surrounding whitespace is ignored, so `" 7 "` parses as `7`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<u64>()
            .map_err(|e| DomainError::invalid_id(format!("ItemId: {e}")))?;
        Self::try_from(raw)
    }
}
