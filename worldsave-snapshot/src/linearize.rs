//! Parent-first ordering of an ownership forest.
//!
//! A FIFO work queue starts with every input. The front item is resolved when
//! it has no parent, its parent is not among the inputs, or its parent is
//! already resolved; otherwise it goes to the back of the queue. An item that
//! comes round again without anything having been resolved in between proves
//! that every item still queued waits on another queued item, i.e. a cycle.
//!
//! Worst case O(n²) dequeues. Ready items resolve in queue order, so the
//! result is a deterministic function of the input order.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::hash::Hash;
use thiserror::Error;
use tracing::debug;
use worldsave_model::Entity;
use worldsave_types::EntityId;

/// Something with an identity and at most one owner.
pub trait Linearizable {
    type Key: Copy + Eq + Hash + fmt::Debug;

    fn key(&self) -> Self::Key;

    fn parent_key(&self) -> Option<Self::Key>;
}

impl Linearizable for Entity {
    type Key = EntityId;

    fn key(&self) -> EntityId {
        self.id
    }

    fn parent_key(&self) -> Option<EntityId> {
        self.parent
    }
}

impl<T: Linearizable + ?Sized> Linearizable for &T {
    type Key = T::Key;

    fn key(&self) -> Self::Key {
        (**self).key()
    }

    fn parent_key(&self) -> Option<Self::Key> {
        (**self).parent_key()
    }
}

/// The parent relation among the inputs contains a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("entities make an ownership cycle (stuck at {key})")]
pub struct CycleError<K> {
    /// An item on, or waiting behind, the cycle.
    pub key: K,
}

/// Orders `items` so that every item follows its parent.
///
/// Items whose parent is not among `items` count as roots.
///
/// # Errors
///
/// [`CycleError`] if the parent relation among `items` is cyclic. Nothing is
/// returned in that case.
pub fn linearize<T: Linearizable>(items: Vec<T>) -> Result<Vec<T>, CycleError<T::Key>> {
    let total = items.len();
    let present: HashSet<T::Key> = items.iter().map(Linearizable::key).collect();
    let mut queue: VecDeque<T> = items.into();
    let mut resolved: HashSet<T::Key> = HashSet::with_capacity(total);
    let mut result = Vec::with_capacity(total);

    // item -> number of resolutions when it was last sent to the back
    let mut requeued_at: HashMap<T::Key, usize> = HashMap::new();
    let mut dequeues = 0usize;

    while let Some(item) = queue.pop_front() {
        dequeues += 1;
        let ready = match item.parent_key() {
            None => true,
            Some(parent) => resolved.contains(&parent) || !present.contains(&parent),
        };

        if ready {
            resolved.insert(item.key());
            result.push(item);
        } else if requeued_at.insert(item.key(), result.len()) == Some(result.len()) {
            debug!(key = ?item.key(), dequeues, "ownership cycle detected");
            return Err(CycleError { key: item.key() });
        } else {
            queue.push_back(item);
        }
    }

    debug!(total, dequeues, "linearized entities");
    Ok(result)
}
