use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Concrete variant of an entity.
///
/// Persisted as the `className` of an exported record when it differs from
/// the save's default kind, and used on restore to pick what to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    #[default]
    Card,
    Text,
    Shape,
    Ticker,
    BarChart,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Card,
        EntityKind::Text,
        EntityKind::Shape,
        EntityKind::Ticker,
        EntityKind::BarChart,
    ];

    /// Wire name written to `className`.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            EntityKind::Card => "Card",
            EntityKind::Text => "Text",
            EntityKind::Shape => "Shape",
            EntityKind::Ticker => "Ticker",
            EntityKind::BarChart => "BarChart",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// A `className` that names no known [`EntityKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity kind: {0:?}")]
pub struct UnknownKind(pub String);

impl FromStr for EntityKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.class_name() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}
