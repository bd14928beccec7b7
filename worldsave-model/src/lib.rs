//! Entity model for worldsave.
//!
//! Defines what the save/restore core needs from the live runtime:
//! - [`Entity`]: a card with an identity, an optional owning parent, a kind
//!   and a property bag
//! - [`EntityKind`]: the concrete variant to reconstruct on load
//! - [`IntrinsicProperty`]: the fixed schema of persistable property names
//! - [`EntityProvider`] / [`EntitySink`]: read side for saving, write side
//!   for restoring
//! - [`EntityRegistry`]: an in-memory implementation of both
//!
//! The runtime that owns the entities (rendering, replication, live feeds)
//! stays outside this crate; it only has to expose its entities through
//! these traits.

mod entity;
mod kind;
mod property;
mod registry;
mod provider;

pub use entity::Entity;
pub use kind::{EntityKind, UnknownKind};
pub use property::{IntrinsicProperty, UnknownProperty};
pub use provider::{EntityProvider, EntitySink, EntitySpec};
pub use registry::EntityRegistry;
