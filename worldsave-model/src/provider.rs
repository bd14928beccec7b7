use crate::{Entity, EntityKind};
use worldsave_codec::Mapping;
use worldsave_types::EntityId;

/// Read access to the live entities a snapshot is taken from.
///
/// The returned order is the order the linearizer starts from, so a provider
/// that enumerates deterministically gets deterministic snapshots.
pub trait EntityProvider {
    fn entities(&self) -> Vec<&Entity>;
}

/// Everything needed to rebuild one entity from an exported record.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpec {
    /// Already-materialized owner, if any.
    pub parent: Option<EntityId>,
    pub kind: EntityKind,
    /// Intrinsic properties from the record, `parent` excluded.
    pub properties: Mapping,
    /// Record entries that are neither intrinsic properties nor `className`.
    pub shape_options: Option<Mapping>,
}

/// Write side used when restoring a snapshot.
pub trait EntitySink {
    /// Builds an entity from `spec` and returns its id.
    /// Return `Err(message)` to abort the restore.
    fn materialize(&mut self, spec: EntitySpec) -> Result<EntityId, String>;
}
