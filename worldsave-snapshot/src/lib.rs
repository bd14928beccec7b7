//! Save and restore for worldsave.
//!
//! Turns the live entity graph into a [`Snapshot`] and back:
//!
//! 1. **Linearize**: [`linearize`] orders entities so every owner precedes
//!    the entities it owns, failing with [`CycleError`] on ownership cycles
//! 2. **Save**: [`SnapshotBuilder::save`] assigns each entity a fixed-width
//!    [`ExportedId`](worldsave_types::ExportedId) in that order and captures
//!    its intrinsic properties, rewriting `parent` to the owner's exported id
//! 3. **Restore**: [`restore`] replays the records in order into an
//!    [`EntitySink`](worldsave_model::EntitySink), so every parent exists
//!    before its children are built
//!
//! Encoding is left to the caller: [`Snapshot::to_value`] and
//! [`Snapshot::from_value`] bridge to the canonical codec.
//!
//! # Example
//!
//! ```
//! use worldsave_model::{Entity, EntityKind, EntityRegistry, IntrinsicProperty};
//! use worldsave_snapshot::{SaveConfig, SnapshotBuilder};
//!
//! let mut registry = EntityRegistry::new();
//! let root = registry.insert(Entity::new(EntityKind::Card).with_property(IntrinsicProperty::Name, "root"));
//! registry.insert(Entity::new(EntityKind::Text).with_parent(root));
//!
//! let snapshot = SnapshotBuilder::new(SaveConfig::default()).save(&registry).unwrap();
//! assert_eq!(snapshot.len(), 2);
//! assert_eq!(snapshot.records()[1].parent(), Some("0001"));
//! ```

mod builder;
mod config;
mod error;
mod linearize;
mod record;
mod restore;

pub use builder::SnapshotBuilder;
pub use config::{OrphanPolicy, SaveConfig};
pub use error::{RestoreError, RestoreResult, SaveError, SaveResult};
pub use linearize::{linearize, CycleError, Linearizable};
pub use record::{ExportedRecord, Snapshot, CLASS_NAME_KEY, PARENT_KEY};
pub use restore::restore;
