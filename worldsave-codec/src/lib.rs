//! Canonical codec for worldsave.
//!
//! Encodes a [`Value`] tree into a deterministic text form and parses it back:
//!
//! - object keys are always emitted in sorted order, so two structurally equal
//!   values produce byte-identical text regardless of insertion order
//! - non-finite numbers are written as `null`
//! - [`Value::Undefined`] entries are dropped from objects and written as `null`
//!   inside arrays
//! - an ordered-pairs map ([`PairsMap`]) travels as the reserved object shape
//!   `{"__map":true,"values":[[k,v],...]}` and is rebuilt on decode
//! - a container that contains itself is reported as
//!   [`CodecError::CircularStructure`] instead of recursing forever
//! - text never nests deeper than [`MAX_DEPTH`] levels; both directions
//!   fail with [`CodecError::TooDeep`] past it
//!
//! # Example
//!
//! ```
//! use worldsave_codec::{decode, encode, Value};
//!
//! let value = Value::object([("b", Value::from(1)), ("a", Value::from(2))]);
//! let text = encode(&value).unwrap();
//! assert_eq!(text, r#"{"a":2,"b":1}"#);
//! assert_eq!(decode(&text).unwrap(), value);
//! ```

mod decode;
mod encode;
mod error;
mod value;

pub use decode::decode;
pub use encode::encode;
pub use error::{CodecError, CodecResult};
pub use value::{Mapping, Node, PairsMap, Value};

/// Marker key of the reserved ordered-pairs map shape.
pub const MAP_TAG_KEY: &str = "__map";

/// Deepest array/object nesting accepted by [`encode`], [`decode`] and
/// [`Value::deep_copy`]. An ordered-pairs map counts as the levels of its
/// reserved shape: the object, the `values` array and one pair array.
///
/// Kept below `serde_json`'s own parser limit of 128.
pub const MAX_DEPTH: usize = 100;

/// Key holding the `[key, value]` pairs of the reserved ordered-pairs map shape.
pub const MAP_VALUES_KEY: &str = "values";
