//! Identifiers used by the save/restore pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Width of an exported id when the caller does not configure one.
pub const DEFAULT_EXPORTED_ID_WIDTH: usize = 4;

/// Identity of a live entity while the runtime is up.
///
/// Never persisted: a snapshot refers to entities by [`ExportedId`] and a
/// restore hands out fresh ones. Serializes as the bare UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// A fresh, time-ordered (v7) id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parses the hyphenated UUID form written by `Display`.
    pub fn parse(s: &str) -> crate::Result<Self> {
        Uuid::parse_str(s).map(Self).map_err(crate::Error::from)
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for EntityId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<EntityId> for Uuid {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for EntityId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Snapshot-local identifier of an exported record.
///
/// A decimal counter starting at 1, left-padded with zeros to a fixed width
/// (`"0001"`, `"0002"`, ...). Counters wider than the configured width are
/// emitted in full rather than truncated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ExportedId(String);

impl ExportedId {
    /// Formats `counter` zero-padded to `width` digits.
    #[must_use]
    pub fn from_counter(counter: u64, width: usize) -> Self {
        Self(format!("{counter:0width$}"))
    }

    /// Parses an exported id. Any non-empty run of ASCII digits is accepted.
    pub fn parse(s: &str) -> crate::Result<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(crate::Error::InvalidExportedId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// Numeric value of the counter.
    #[must_use]
    pub fn counter(&self) -> u64 {
        // digits-only is checked on construction; only overflow can fail here
        self.0.parse().unwrap_or(u64::MAX)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExportedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ExportedId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ExportedId {
    type Error = crate::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ExportedId> for String {
    fn from(id: ExportedId) -> Self {
        id.0
    }
}

impl AsRef<str> for ExportedId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
