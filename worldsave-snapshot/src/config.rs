//! Save configuration.

use crate::SaveResult;
use serde::{Deserialize, Serialize};
use worldsave_model::{EntityKind, IntrinsicProperty};
use worldsave_types::DEFAULT_EXPORTED_ID_WIDTH;

/// What to do with an entity whose owner is not part of the save (it does not
/// exist in the provider, or is not savable).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    /// Save the entity as a root and leave `parent` out of its record.
    #[default]
    TreatAsRoot,
    /// Fail the save with [`SaveError::OrphanedParent`](crate::SaveError::OrphanedParent).
    Reject,
}

/// Configuration shared by [`SnapshotBuilder`](crate::SnapshotBuilder) and
/// [`restore`](crate::restore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    /// Kind assumed for records without `className`.
    pub default_kind: EntityKind,
    /// Properties captured into records, in fill order.
    pub intrinsic_properties: Vec<IntrinsicProperty>,
    pub orphan_policy: OrphanPolicy,
    /// Digits exported ids are zero-padded to.
    pub id_width: usize,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            default_kind: EntityKind::default(),
            intrinsic_properties: IntrinsicProperty::ALL.to_vec(),
            orphan_policy: OrphanPolicy::default(),
            id_width: DEFAULT_EXPORTED_ID_WIDTH,
        }
    }
}

impl SaveConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> SaveResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Returns true if `prop` is captured by this configuration.
    #[must_use]
    pub fn captures(&self, prop: IntrinsicProperty) -> bool {
        self.intrinsic_properties.contains(&prop)
    }
}
