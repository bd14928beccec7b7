//! Canonical text encoder.

use crate::value::{Mapping, Node, PairsMap, Value};
use crate::{CodecError, CodecResult, MAP_TAG_KEY, MAP_VALUES_KEY, MAX_DEPTH};
use std::collections::HashSet;

/// Encodes `value` as canonical text.
///
/// A bare [`Value::Undefined`] encodes to the empty string.
///
/// # Errors
///
/// Returns [`CodecError::CircularStructure`] if a container is reachable from
/// itself, and [`CodecError::TooDeep`] if the text would nest deeper than
/// [`MAX_DEPTH`](crate::MAX_DEPTH).
pub fn encode(value: &Value) -> CodecResult<String> {
    let mut encoder = Encoder::default();
    let mut out = String::new();
    encoder.write_value(&mut out, value)?;
    tracing::trace!(bytes = out.len(), "encoded canonical value");
    Ok(out)
}

/// Recursion state: identities of the containers on the active path and
/// the current text nesting depth.
#[derive(Default)]
struct Encoder {
    on_path: HashSet<usize>,
    depth: usize,
}

impl Encoder {
    /// Writes `value`. Writes nothing for [`Value::Undefined`].
    fn write_value(&mut self, out: &mut String, value: &Value) -> CodecResult<()> {
        match value {
            Value::Undefined => {}
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => write_number(out, *n),
            Value::String(s) => write_string(out, s)?,
            Value::Array(node) => {
                self.enter(node, 1)?;
                self.write_array(out, &node.borrow())?;
                self.leave(node, 1);
            }
            Value::Object(node) => {
                self.enter(node, 1)?;
                self.write_object(out, &node.borrow())?;
                self.leave(node, 1);
            }
            // the reserved object plus its `values` array
            Value::Map(node) => {
                self.enter(node, 2)?;
                self.write_pairs_map(out, &node.borrow())?;
                self.leave(node, 2);
            }
        }
        Ok(())
    }

    fn enter<T>(&mut self, node: &Node<T>, levels: usize) -> CodecResult<()> {
        if !self.on_path.insert(node.addr()) {
            return Err(CodecError::CircularStructure);
        }
        self.descend(levels)
    }

    fn leave<T>(&mut self, node: &Node<T>, levels: usize) {
        self.on_path.remove(&node.addr());
        self.depth -= levels;
    }

    fn descend(&mut self, levels: usize) -> CodecResult<()> {
        if self.depth + levels > MAX_DEPTH {
            return Err(CodecError::TooDeep { limit: MAX_DEPTH });
        }
        self.depth += levels;
        Ok(())
    }

    /// Array elements that encode to nothing are written as `null`.
    fn write_element(&mut self, out: &mut String, value: &Value) -> CodecResult<()> {
        if value.is_undefined() {
            out.push_str("null");
            Ok(())
        } else {
            self.write_value(out, value)
        }
    }

    fn write_array(&mut self, out: &mut String, items: &[Value]) -> CodecResult<()> {
        out.push('[');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.write_element(out, item)?;
        }
        out.push(']');
        Ok(())
    }

    fn write_object(&mut self, out: &mut String, mapping: &Mapping) -> CodecResult<()> {
        let mut entries: Vec<(&str, &Value)> = mapping
            .iter()
            .filter(|(_, v)| !v.is_undefined())
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

        out.push('{');
        for (i, (key, value)) in entries.into_iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            write_string(out, key)?;
            out.push(':');
            self.write_value(out, value)?;
        }
        out.push('}');
        Ok(())
    }

    /// Writes the reserved `{"__map":true,"values":[[k,v],...]}` shape. The
    /// two keys are already in sorted order.
    fn write_pairs_map(&mut self, out: &mut String, map: &PairsMap) -> CodecResult<()> {
        out.push('{');
        write_string(out, MAP_TAG_KEY)?;
        out.push_str(":true,");
        write_string(out, MAP_VALUES_KEY)?;
        out.push_str(":[");
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.descend(1)?;
            out.push('[');
            self.write_element(out, key)?;
            out.push(',');
            self.write_element(out, value)?;
            out.push(']');
            self.depth -= 1;
        }
        out.push_str("]}");
        Ok(())
    }
}

/// Finite numbers as their shortest round-tripping decimal; everything else
/// as `null`. Negative zero is written as `0`.
fn write_number(out: &mut String, n: f64) {
    if !n.is_finite() {
        out.push_str("null");
    } else if n == 0.0 {
        out.push('0');
    } else {
        out.push_str(&n.to_string());
    }
}

fn write_string(out: &mut String, s: &str) -> CodecResult<()> {
    out.push_str(&serde_json::to_string(s)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_formatting() {
        let mut out = String::new();
        write_number(&mut out, 2.0);
        assert_eq!(out, "2");

        out.clear();
        write_number(&mut out, -0.0);
        assert_eq!(out, "0");

        out.clear();
        write_number(&mut out, 1.5);
        assert_eq!(out, "1.5");

        out.clear();
        write_number(&mut out, f64::NEG_INFINITY);
        assert_eq!(out, "null");
    }

    #[test]
    fn path_set_is_empty_after_encoding() {
        let shared = Value::array([1, 2]);
        let root = Value::array([shared.clone(), shared]);
        let mut encoder = Encoder::default();
        let mut out = String::new();
        encoder.write_value(&mut out, &root).unwrap();
        assert!(encoder.on_path.is_empty());
        assert_eq!(encoder.depth, 0);
        assert_eq!(out, "[[1,2],[1,2]]");
    }
}
