//! Canonical text decoder.

use crate::value::{Mapping, PairsMap, Value};
use crate::{CodecError, CodecResult, MAP_TAG_KEY, MAP_VALUES_KEY, MAX_DEPTH};
use serde_json::Value as Json;

/// Parses canonical text back into a [`Value`].
///
/// Objects shaped `{"__map": true, "values": [...]}` come back as
/// [`Value::Map`]; every other object is a [`Value::Object`].
///
/// # Errors
///
/// [`CodecError::Malformed`] if `text` does not parse, and
/// [`CodecError::MalformedMap`] if a reserved map shape has pairs that are not
/// two-element arrays. [`CodecError::TooDeep`] if the text nests deeper than
/// [`MAX_DEPTH`](crate::MAX_DEPTH); text nested past `serde_json`'s own limit
/// is reported as [`CodecError::Malformed`].
pub fn decode(text: &str) -> CodecResult<Value> {
    let json: Json = serde_json::from_str(text)?;
    from_json(json, 0)
}

impl TryFrom<Json> for Value {
    type Error = CodecError;

    /// Converts an already-parsed document, applying the same map-shape
    /// rules as [`decode`].
    fn try_from(json: Json) -> CodecResult<Self> {
        from_json(json, 0)
    }
}

/// Converts `json`, whose enclosing containers are `depth` levels deep.
fn from_json(json: Json, depth: usize) -> CodecResult<Value> {
    Ok(match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => Value::Number(
            n.as_f64()
                .ok_or_else(|| CodecError::UnrepresentableNumber(n.to_string()))?,
        ),
        Json::String(s) => Value::String(s),
        Json::Array(items) => {
            let depth = nested(depth)?;
            Value::from(
                items
                    .into_iter()
                    .map(|item| from_json(item, depth))
                    .collect::<CodecResult<Vec<_>>>()?,
            )
        }
        Json::Object(mut object) => {
            let depth = nested(depth)?;
            if is_map_shape(&object) {
                let pairs = object.remove(MAP_VALUES_KEY).unwrap_or(Json::Null);
                Value::from(pairs_from_json(pairs, depth)?)
            } else {
                let mut mapping = Mapping::new();
                for (key, value) in object {
                    mapping.insert(key, from_json(value, depth)?);
                }
                Value::from(mapping)
            }
        }
    })
}

fn nested(depth: usize) -> CodecResult<usize> {
    if depth < MAX_DEPTH {
        Ok(depth + 1)
    } else {
        Err(CodecError::TooDeep { limit: MAX_DEPTH })
    }
}

fn is_map_shape(object: &serde_json::Map<String, Json>) -> bool {
    object.get(MAP_TAG_KEY) == Some(&Json::Bool(true)) && object.contains_key(MAP_VALUES_KEY)
}

fn pairs_from_json(pairs: Json, depth: usize) -> CodecResult<PairsMap> {
    let Json::Array(pairs) = pairs else {
        return Err(CodecError::MalformedMap(format!(
            "`{MAP_VALUES_KEY}` must be an array, got {pairs}"
        )));
    };

    let depth = nested(depth)?;
    let mut map = PairsMap::new();
    for (i, pair) in pairs.into_iter().enumerate() {
        match pair {
            Json::Array(kv) if kv.len() == 2 => {
                let depth = nested(depth)?;
                let mut kv = kv.into_iter().map(|item| from_json(item, depth));
                let key = kv.next().transpose()?.unwrap_or_default();
                let value = kv.next().transpose()?.unwrap_or_default();
                map.insert(key, value);
            }
            other => {
                return Err(CodecError::MalformedMap(format!(
                    "pair {i} is not a [key, value] array: {other}"
                )));
            }
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_parsed_documents() {
        let json = serde_json::json!({"__map": true, "values": [["k", [1, null]]]});
        let value = Value::try_from(json).unwrap();
        assert_eq!(
            value.as_map().unwrap().borrow().get(&Value::from("k")),
            Some(&Value::array([Value::from(1), Value::Null]))
        );
    }

    #[test]
    fn map_shape_requires_literal_true() {
        let value = decode(r#"{"__map":1,"values":[]}"#).unwrap();
        assert!(value.as_object().is_some());
    }

    #[test]
    fn map_shape_requires_values_key() {
        let value = decode(r#"{"__map":true}"#).unwrap();
        assert!(value.as_object().is_some());
    }

    #[test]
    fn map_values_must_be_array() {
        let err = decode(r#"{"__map":true,"values":{}}"#).unwrap_err();
        assert!(matches!(err, CodecError::MalformedMap(_)));
    }

    #[test]
    fn map_pairs_must_have_two_elements() {
        let err = decode(r#"{"__map":true,"values":[[1,2,3]]}"#).unwrap_err();
        assert!(err.to_string().contains("pair 0"));
    }
}
