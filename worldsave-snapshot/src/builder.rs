//! Snapshot builder: live entities in, exported records out.

use crate::{
    linearize, ExportedRecord, OrphanPolicy, SaveConfig, SaveError, SaveResult, Snapshot,
    CLASS_NAME_KEY, PARENT_KEY,
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};
use worldsave_codec::{Mapping, Value};
use worldsave_model::{Entity, EntityProvider, IntrinsicProperty};
use worldsave_types::{EntityId, ExportedId};

/// Takes snapshots of an [`EntityProvider`].
///
/// The builder holds no state between saves: exported ids restart at 1 on
/// every call, so saving an unchanged provider twice gives equal snapshots.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    config: SaveConfig,
}

impl SnapshotBuilder {
    #[must_use]
    pub fn new(config: SaveConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SaveConfig {
        &self.config
    }

    /// Saves every savable entity of `provider`, parents before children.
    ///
    /// # Errors
    ///
    /// - [`SaveError::Cycle`] if the saved entities' ownership graph is cyclic
    /// - [`SaveError::OrphanedParent`] if an owner is missing and the policy
    ///   is [`OrphanPolicy::Reject`]
    /// - [`SaveError::Property`] if a property value contains itself
    pub fn save<P: EntityProvider + ?Sized>(&self, provider: &P) -> SaveResult<Snapshot> {
        let all = provider.entities();
        let available = all.len();
        let entities: Vec<&Entity> = all.into_iter().filter(|e| e.savable).collect();
        self.check_owners(&entities)?;

        let ordered = linearize(entities)?;

        let mut exported: HashMap<EntityId, ExportedId> = HashMap::with_capacity(ordered.len());
        let mut records = Vec::with_capacity(ordered.len());
        for (counter, entity) in (1u64..).zip(ordered) {
            let id = ExportedId::from_counter(counter, self.config.id_width);
            exported.insert(entity.id, id.clone());
            let data = self.collect_data(entity, &exported)?;
            records.push(ExportedRecord::new(id, data));
        }

        debug!(
            records = records.len(),
            skipped = available - records.len(),
            "saved snapshot"
        );
        Ok(Snapshot::new(records))
    }

    fn check_owners(&self, entities: &[&Entity]) -> SaveResult<()> {
        let saved: HashSet<EntityId> = entities.iter().map(|e| e.id).collect();
        for entity in entities {
            let Some(parent) = entity.parent else {
                continue;
            };
            if saved.contains(&parent) {
                continue;
            }
            match self.config.orphan_policy {
                OrphanPolicy::Reject => {
                    return Err(SaveError::OrphanedParent {
                        entity: entity.id,
                        parent,
                    });
                }
                OrphanPolicy::TreatAsRoot => {
                    warn!(entity = %entity.id, %parent, "owner is not saved, saving entity as a root");
                }
            }
        }
        Ok(())
    }

    /// Builds a record's data. The owner, if saved, is already in `exported`
    /// because records are produced in linearized order.
    fn collect_data(
        &self,
        entity: &Entity,
        exported: &HashMap<EntityId, ExportedId>,
    ) -> SaveResult<Mapping> {
        let mut data = Mapping::new();
        if entity.kind != self.config.default_kind {
            data.insert(CLASS_NAME_KEY, entity.kind.class_name());
        }

        for &prop in &self.config.intrinsic_properties {
            if prop == IntrinsicProperty::Parent {
                if let Some(parent) = entity.parent.and_then(|p| exported.get(&p)) {
                    data.insert(PARENT_KEY, parent.as_str());
                }
                continue;
            }
            if let Some(value) = entity.intrinsic(prop).filter(|v| v.is_truthy()) {
                data.insert(prop.as_str(), capture(entity, prop.as_str(), value)?);
            }
        }

        if let Some(options) = &entity.shape_options {
            for (key, value) in options.iter() {
                if key == PARENT_KEY || key == CLASS_NAME_KEY {
                    warn!(
                        entity = %entity.id,
                        option = key,
                        "shape option uses a reserved record key, skipping"
                    );
                    continue;
                }
                data.insert(key, capture(entity, key, value)?);
            }
        }
        Ok(data)
    }
}

/// Detaches a property value from the live entity.
fn capture(entity: &Entity, property: &str, value: &Value) -> SaveResult<Value> {
    value.deep_copy().map_err(|source| SaveError::Property {
        entity: entity.id,
        property: property.to_string(),
        source,
    })
}
