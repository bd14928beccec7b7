//! The value universe the codec operates over.
//!
//! Containers are held behind [`Node`], a shared handle with interior
//! mutability. Cloning a `Value` that holds a container clones the handle,
//! not the contents, so the same container can appear in several places of a
//! value graph (or inside itself). Container identity is what the encoder's
//! circular-structure check keys on.

use crate::{CodecError, CodecResult, MAX_DEPTH};
use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// Shared, mutable handle to a container.
///
/// Equality is structural: two handles are equal when they point at the same
/// container or at containers with equal contents. Comparing or debug-printing
/// a value graph that contains a cycle does not terminate; run it through
/// [`encode`](crate::encode) first if the input is untrusted.
pub struct Node<T>(Rc<RefCell<T>>);

impl<T> Node<T> {
    /// Wraps `inner` in a fresh container with its own identity.
    pub fn new(inner: T) -> Self {
        Self(Rc::new(RefCell::new(inner)))
    }

    /// Borrows the contents.
    ///
    /// # Panics
    ///
    /// Panics if the container is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Mutably borrows the contents.
    ///
    /// # Panics
    ///
    /// Panics if the container is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Returns true if both handles point at the same container.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Identity of the container, stable while any handle is alive.
    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl<T> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: PartialEq> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.borrow() == *other.borrow()
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.borrow().fmt(f)
    }
}

/// A canonical value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// An absent value. Never produced by decoding.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Node<Vec<Value>>),
    Object(Node<Mapping>),
    /// Ordered-pairs map whose keys may be any value.
    Map(Node<PairsMap>),
}

impl Value {
    /// Builds an array from its elements.
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(Node::new(items.into_iter().map(Into::into).collect()))
    }

    /// Builds an object from `(key, value)` entries. Later duplicates replace
    /// earlier ones.
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(Node::new(entries.into_iter().collect()))
    }

    /// Builds an ordered-pairs map from `(key, value)` pairs.
    pub fn map<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(Node::new(pairs.into_iter().collect()))
    }

    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Truthiness: false for undefined, null, `false`, zero, NaN and the
    /// empty string; true for everything else, including empty containers.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) | Value::Map(_) => true,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Copies the value with fresh containers all the way down, so the copy
    /// no longer observes mutations made through the original handles.
    /// Containers shared between branches are copied once per occurrence.
    ///
    /// # Errors
    ///
    /// [`CodecError::CircularStructure`] if a container contains itself, and
    /// [`CodecError::TooDeep`] if the value would not encode for depth.
    pub fn deep_copy(&self) -> CodecResult<Value> {
        self.copy_within(&mut HashSet::new(), 0)
    }

    /// `depth` counts text nesting levels the same way the encoder does.
    fn copy_within(&self, on_path: &mut HashSet<usize>, depth: usize) -> CodecResult<Value> {
        let copy = match self {
            Value::Array(node) => {
                let depth = enter(on_path, node.addr(), depth + 1)?;
                let items = node
                    .borrow()
                    .iter()
                    .map(|item| item.copy_within(on_path, depth))
                    .collect::<CodecResult<Vec<_>>>()?;
                Value::from(items)
            }
            Value::Object(node) => {
                let depth = enter(on_path, node.addr(), depth + 1)?;
                let mut mapping = Mapping::new();
                for (key, value) in node.borrow().iter() {
                    mapping.insert(key, value.copy_within(on_path, depth)?);
                }
                Value::from(mapping)
            }
            Value::Map(node) => {
                // the reserved object and its `values` array, then one
                // array per pair
                let depth = enter(on_path, node.addr(), depth + 2)? + 1;
                if depth > MAX_DEPTH && !node.borrow().is_empty() {
                    return Err(CodecError::TooDeep { limit: MAX_DEPTH });
                }
                let mut map = PairsMap::new();
                for (key, value) in node.borrow().iter() {
                    map.insert(
                        key.copy_within(on_path, depth)?,
                        value.copy_within(on_path, depth)?,
                    );
                }
                Value::from(map)
            }
            scalar => return Ok(scalar.clone()),
        };
        if let Some(addr) = self.container_addr() {
            on_path.remove(&addr);
        }
        Ok(copy)
    }

    fn container_addr(&self) -> Option<usize> {
        match self {
            Value::Array(node) => Some(node.addr()),
            Value::Object(node) => Some(node.addr()),
            Value::Map(node) => Some(node.addr()),
            _ => None,
        }
    }

    /// Returns the object handle if this is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&Node<Mapping>> {
        match self {
            Value::Object(node) => Some(node),
            _ => None,
        }
    }

    /// Returns the array handle if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&Node<Vec<Value>>> {
        match self {
            Value::Array(node) => Some(node),
            _ => None,
        }
    }

    /// Returns the map handle if this is an ordered-pairs map.
    #[must_use]
    pub fn as_map(&self) -> Option<&Node<PairsMap>> {
        match self {
            Value::Map(node) => Some(node),
            _ => None,
        }
    }
}

fn enter(on_path: &mut HashSet<usize>, addr: usize, depth: usize) -> CodecResult<usize> {
    if !on_path.insert(addr) {
        return Err(CodecError::CircularStructure);
    }
    if depth > MAX_DEPTH {
        return Err(CodecError::TooDeep { limit: MAX_DEPTH });
    }
    Ok(depth)
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Node::new(items))
    }
}

impl From<Mapping> for Value {
    fn from(mapping: Mapping) -> Self {
        Value::Object(Node::new(mapping))
    }
}

impl From<PairsMap> for Value {
    fn from(map: PairsMap) -> Self {
        Value::Map(Node::new(map))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Undefined, Into::into)
    }
}

/// String-keyed mapping that remembers insertion order.
///
/// Order only matters in memory; the encoder sorts keys. Equality ignores
/// order.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
}

impl Mapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces `key`, returning the previous value. A replaced
    /// key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| ov == v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Ordered-pairs map: an association whose keys may be any value.
///
/// Pair order is preserved through encode and decode. Inserting a key equal
/// to an existing one replaces that pair's value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairsMap {
    pairs: Vec<(Value, Value)>,
}

impl PairsMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<Value>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.pairs.push((key, value));
                None
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.pairs.iter().map(|(k, v)| (k, v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for PairsMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PairsMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
