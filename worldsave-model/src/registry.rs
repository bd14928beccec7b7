//! In-memory entity registry.

use crate::{Entity, EntityProvider, EntitySink, EntitySpec};
use std::collections::HashMap;
use worldsave_types::EntityId;

/// Insertion-ordered collection of entities, addressable by id.
///
/// Enumerates in insertion order, which makes it a deterministic
/// [`EntityProvider`]. As an [`EntitySink`] it refuses specs whose parent it
/// does not hold.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    index: HashMap<EntityId, usize>,
}

impl EntityRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entity. A replaced entity keeps its position.
    pub fn insert(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        match self.index.get(&id) {
            Some(&idx) => self.entities[idx] = entity,
            None => {
                self.index.insert(id, self.entities.len());
                self.entities.push(entity);
            }
        }
        id
    }

    #[must_use]
    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.index.get(id).map(|&idx| &self.entities[idx])
    }

    pub fn get_mut(&mut self, id: &EntityId) -> Option<&mut Entity> {
        self.index.get(id).map(|&idx| &mut self.entities[idx])
    }

    /// Direct children of `id`, in insertion order.
    pub fn children(&self, id: EntityId) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(move |entity| entity.parent == Some(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntityProvider for EntityRegistry {
    fn entities(&self) -> Vec<&Entity> {
        self.entities.iter().collect()
    }
}

impl EntitySink for EntityRegistry {
    fn materialize(&mut self, spec: EntitySpec) -> Result<EntityId, String> {
        if let Some(parent) = spec.parent {
            if !self.index.contains_key(&parent) {
                return Err(format!("parent {parent} is not in the registry"));
            }
        }

        let mut entity = Entity::new(spec.kind);
        entity.parent = spec.parent;
        entity.properties = spec.properties;
        entity.shape_options = spec.shape_options;
        let id = self.insert(entity);
        tracing::trace!(%id, kind = %spec.kind, "materialized entity");
        Ok(id)
    }
}
