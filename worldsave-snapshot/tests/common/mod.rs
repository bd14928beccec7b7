//! Shared fixtures for snapshot integration tests.

#![allow(dead_code)]

use std::sync::Once;
use worldsave_model::{Entity, EntityKind, EntityRegistry, IntrinsicProperty};
use worldsave_types::EntityId;

static TRACING: Once = Once::new();

/// Routes `tracing` output through the test harness. Filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// The A <- B <- C chain, inserted child-first as `[C, B, A]`.
pub struct Chain {
    pub registry: EntityRegistry,
    pub a: EntityId,
    pub b: EntityId,
    pub c: EntityId,
}

pub fn chain_inserted_child_first() -> Chain {
    let a = Entity::new(EntityKind::Card).with_property(IntrinsicProperty::Name, "A");
    let b = Entity::new(EntityKind::Text)
        .with_parent(a.id)
        .with_property(IntrinsicProperty::Name, "B");
    let c = Entity::new(EntityKind::Card)
        .with_parent(b.id)
        .with_property(IntrinsicProperty::Name, "C")
        .with_property(
            IntrinsicProperty::Translation,
            worldsave_codec::Value::array([1, 2, 3]),
        );

    let (a_id, b_id, c_id) = (a.id, b.id, c.id);
    let mut registry = EntityRegistry::new();
    registry.insert(c);
    registry.insert(b);
    registry.insert(a);

    Chain {
        registry,
        a: a_id,
        b: b_id,
        c: c_id,
    }
}
