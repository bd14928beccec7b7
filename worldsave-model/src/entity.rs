use crate::{EntityKind, IntrinsicProperty};
use worldsave_codec::{Mapping, Value};
use worldsave_types::EntityId;

/// A live card in the runtime.
///
/// `parent` is an ownership reference: the parent has to exist before this
/// entity can be rebuilt. `properties` is the open property bag; only the
/// keys named by [`IntrinsicProperty`] are ever persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub parent: Option<EntityId>,
    pub kind: EntityKind,
    pub properties: Mapping,
    /// Extra geometry options, flattened into the exported record.
    pub shape_options: Option<Mapping>,
    /// Entities with `savable == false` never appear in a snapshot.
    pub savable: bool,
}

impl Entity {
    /// Creates a savable, parentless entity with a fresh id and an empty
    /// property bag.
    #[must_use]
    pub fn new(kind: EntityKind) -> Self {
        Self {
            id: EntityId::new(),
            parent: None,
            kind,
            properties: Mapping::new(),
            shape_options: None,
            savable: true,
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent: EntityId) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn with_property(mut self, prop: IntrinsicProperty, value: impl Into<Value>) -> Self {
        self.properties.insert(prop.as_str(), value);
        self
    }

    /// Sets a property that is not part of the intrinsic schema.
    #[must_use]
    pub fn with_runtime_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key, value);
        self
    }

    #[must_use]
    pub fn with_shape_option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.shape_options
            .get_or_insert_with(Mapping::new)
            .insert(key, value);
        self
    }

    #[must_use]
    pub fn unsavable(mut self) -> Self {
        self.savable = false;
        self
    }

    /// Looks up an intrinsic property in the property bag.
    ///
    /// Always `None` for [`IntrinsicProperty::Parent`]; the parent lives in
    /// [`Entity::parent`].
    #[must_use]
    pub fn intrinsic(&self, prop: IntrinsicProperty) -> Option<&Value> {
        match prop {
            IntrinsicProperty::Parent => None,
            _ => self.properties.get(prop.as_str()),
        }
    }
}
