//! Property-based tests for the canonical codec.
//!
//! - Round trip: decode(encode(v)) == v for finite, acyclic values
//! - Determinism: object insertion order never changes the output bytes
//! - Non-finite numbers become `null` wherever they appear

use proptest::prelude::*;
use std::collections::BTreeMap;
use worldsave_codec::{decode, encode, Mapping, PairsMap, Value};

/// Plain-data mirror of `Value` used to drive generation.
#[derive(Debug, Clone)]
enum Tree {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    List(Vec<Tree>),
    Obj(Vec<(String, Tree)>),
    Pairs(Vec<(Tree, Tree)>),
}

impl Tree {
    fn to_value(&self) -> Value {
        match self {
            Tree::Null => Value::Null,
            Tree::Bool(b) => Value::Bool(*b),
            Tree::Num(n) => Value::Number(*n),
            Tree::Str(s) => Value::from(s.as_str()),
            Tree::List(items) => Value::array(items.iter().map(Tree::to_value)),
            Tree::Obj(entries) => {
                Value::object(entries.iter().map(|(k, v)| (k.clone(), v.to_value())))
            }
            Tree::Pairs(pairs) => {
                Value::from(pairs.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect::<PairsMap>())
            }
        }
    }
}

fn tree_strategy() -> impl Strategy<Value = Tree> {
    let leaf = prop_oneof![
        Just(Tree::Null),
        any::<bool>().prop_map(Tree::Bool),
        any::<i32>().prop_map(|n| Tree::Num(f64::from(n))),
        (-1.0e12f64..1.0e12).prop_map(Tree::Num),
        "\\PC{0,8}".prop_map(Tree::Str),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Tree::List),
            // no underscore, so generated objects never collide with the map shape
            prop::collection::vec(("[a-z]{1,6}", inner.clone()), 0..6).prop_map(Tree::Obj),
            prop::collection::vec((inner.clone(), inner), 0..4).prop_map(Tree::Pairs),
        ]
    })
}

proptest! {
    #[test]
    fn decode_inverts_encode(tree in tree_strategy()) {
        let value = tree.to_value();
        let text = encode(&value).unwrap();
        let decoded = decode(&text).unwrap();
        prop_assert_eq!(&decoded, &value);
        prop_assert_eq!(encode(&decoded).unwrap(), text);
    }

    #[test]
    fn key_order_is_irrelevant(entries in prop::collection::btree_map("[a-zA-Z0-9_]{1,8}", any::<i32>(), 0..12)) {
        let forward: Mapping = entries.iter().map(|(k, v)| (k.clone(), *v)).collect();
        let backward: Mapping = entries.iter().rev().map(|(k, v)| (k.clone(), *v)).collect();
        prop_assert_eq!(
            encode(&Value::from(forward)).unwrap(),
            encode(&Value::from(backward)).unwrap()
        );
    }

    #[test]
    fn non_finite_numbers_encode_as_null(
        slots in prop::collection::vec(prop_oneof![
            Just(f64::NAN),
            Just(f64::INFINITY),
            Just(f64::NEG_INFINITY),
            (-1000i32..1000).prop_map(f64::from),
        ], 0..10)
    ) {
        let text = encode(&Value::array(slots.iter().copied())).unwrap();
        let decoded = decode(&text).unwrap();
        let decoded = decoded.as_array().unwrap().borrow().clone();
        prop_assert_eq!(decoded.len(), slots.len());
        for (slot, got) in slots.iter().zip(decoded.iter()) {
            if slot.is_finite() {
                prop_assert_eq!(got, &Value::Number(*slot));
            } else {
                prop_assert_eq!(got, &Value::Null);
            }
        }
    }

    #[test]
    fn undefined_object_entries_are_omitted(keys in prop::collection::btree_set("[a-z]{1,4}", 1..8)) {
        let with_gaps: Mapping = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.clone(), if i % 2 == 0 { Value::Undefined } else { Value::from(1) }))
            .collect();
        let decoded = decode(&encode(&Value::from(with_gaps)).unwrap()).unwrap();
        let decoded = decoded.as_object().unwrap().borrow().clone();
        prop_assert_eq!(decoded.len(), keys.len() / 2);
        let expected: BTreeMap<_, _> = keys.iter().skip(1).step_by(2).map(|k| (k.as_str(), 1.0)).collect();
        for (k, v) in decoded.iter() {
            prop_assert_eq!(expected.get(k).copied(), v.as_f64());
        }
    }
}
