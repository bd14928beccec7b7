use pretty_assertions::assert_eq;
use worldsave_codec::{encode, CodecError, Mapping, PairsMap, Value};

// ── Scalars ──────────────────────────────────────────────────────

#[test]
fn encodes_scalars() {
    assert_eq!(encode(&Value::Null).unwrap(), "null");
    assert_eq!(encode(&Value::from(true)).unwrap(), "true");
    assert_eq!(encode(&Value::from(false)).unwrap(), "false");
    assert_eq!(encode(&Value::from(42)).unwrap(), "42");
    assert_eq!(encode(&Value::from(-3.25)).unwrap(), "-3.25");
    assert_eq!(encode(&Value::from("hi")).unwrap(), r#""hi""#);
}

#[test]
fn escapes_strings() {
    let value = Value::from("line\n\"quoted\"\\");
    assert_eq!(encode(&value).unwrap(), r#""line\n\"quoted\"\\""#);
}

#[test]
fn bare_undefined_encodes_to_empty_string() {
    assert_eq!(encode(&Value::Undefined).unwrap(), "");
}

// ── Non-finite numbers ───────────────────────────────────────────

#[test]
fn non_finite_numbers_become_null() {
    assert_eq!(encode(&Value::from(f64::NAN)).unwrap(), "null");
    assert_eq!(encode(&Value::from(f64::INFINITY)).unwrap(), "null");

    let value = Value::array([f64::NAN, 1.0, f64::NEG_INFINITY]);
    assert_eq!(encode(&value).unwrap(), "[null,1,null]");

    let value = Value::object([("x", f64::INFINITY)]);
    assert_eq!(encode(&value).unwrap(), r#"{"x":null}"#);
}

// ── Objects ──────────────────────────────────────────────────────

#[test]
fn object_keys_are_sorted() {
    let value = Value::object([("b", 1), ("a", 2)]);
    assert_eq!(encode(&value).unwrap(), r#"{"a":2,"b":1}"#);
}

#[test]
fn insertion_order_does_not_change_output() {
    let mut first = Mapping::new();
    first.insert("zeta", 1);
    first.insert("alpha", Value::array(["x", "y"]));
    first.insert("mid", Value::object([("q", true), ("p", false)]));

    let mut second = Mapping::new();
    second.insert("mid", Value::object([("p", false), ("q", true)]));
    second.insert("zeta", 1);
    second.insert("alpha", Value::array(["x", "y"]));

    assert_eq!(
        encode(&Value::from(first)).unwrap(),
        encode(&Value::from(second)).unwrap()
    );
}

#[test]
fn keys_sort_by_byte_order() {
    let value = Value::object([("a", 1), ("B", 2), ("_", 3), ("aa", 4)]);
    assert_eq!(encode(&value).unwrap(), r#"{"B":2,"_":3,"a":1,"aa":4}"#);
}

#[test]
fn undefined_entries_are_dropped_from_objects() {
    let value = Value::object([
        ("a", Value::Undefined),
        ("b", Value::Null),
        ("c", Value::from(1)),
    ]);
    assert_eq!(encode(&value).unwrap(), r#"{"b":null,"c":1}"#);
}

#[test]
fn undefined_elements_become_null_in_arrays() {
    let value = Value::array([Value::from(1), Value::Undefined, Value::from(3)]);
    assert_eq!(encode(&value).unwrap(), "[1,null,3]");
}

#[test]
fn empty_containers() {
    assert_eq!(encode(&Value::array(Vec::<Value>::new())).unwrap(), "[]");
    assert_eq!(encode(&Value::from(Mapping::new())).unwrap(), "{}");
    assert_eq!(
        encode(&Value::from(PairsMap::new())).unwrap(),
        r#"{"__map":true,"values":[]}"#
    );
}

// ── Ordered-pairs maps ───────────────────────────────────────────

#[test]
fn pairs_map_uses_reserved_shape() {
    let value = Value::map([(Value::from(2), "two"), (Value::from("k"), "v")]);
    assert_eq!(
        encode(&value).unwrap(),
        r#"{"__map":true,"values":[[2,"two"],["k","v"]]}"#
    );
}

#[test]
fn pairs_map_keeps_pair_order() {
    let value = Value::map([("z", 1), ("a", 2)]);
    assert_eq!(
        encode(&value).unwrap(),
        r#"{"__map":true,"values":[["z",1],["a",2]]}"#
    );
}

#[test]
fn pairs_map_nested_in_object() {
    let value = Value::object([("m", Value::map([(Value::array([1, 2]), true)]))]);
    assert_eq!(
        encode(&value).unwrap(),
        r#"{"m":{"__map":true,"values":[[[1,2],true]]}}"#
    );
}

// ── Circular structures ──────────────────────────────────────────

#[test]
fn self_containing_object_is_rejected() {
    let value = Value::object([("name", "loop")]);
    let node = value.as_object().unwrap().clone();
    node.borrow_mut().insert("me", value.clone());

    let err = encode(&value).unwrap_err();
    assert!(matches!(err, CodecError::CircularStructure));
}

#[test]
fn self_containing_array_is_rejected() {
    let value = Value::array([1]);
    value.as_array().unwrap().borrow_mut().push(value.clone());
    assert!(matches!(
        encode(&value),
        Err(CodecError::CircularStructure)
    ));
}

#[test]
fn indirect_cycle_through_pairs_map_is_rejected() {
    let outer = Value::object([("k", 1)]);
    let map = Value::map([("back", outer.clone())]);
    outer.as_object().unwrap().borrow_mut().insert("map", map);
    assert!(matches!(
        encode(&outer),
        Err(CodecError::CircularStructure)
    ));
}

#[test]
fn shared_container_in_sibling_branches_is_allowed() {
    let shared = Value::object([("x", 1)]);
    let value = Value::object([
        ("left", shared.clone()),
        ("right", Value::array([shared.clone(), shared])),
    ]);
    assert_eq!(
        encode(&value).unwrap(),
        r#"{"left":{"x":1},"right":[{"x":1},{"x":1}]}"#
    );
}

#[test]
fn circular_error_message() {
    let err = CodecError::CircularStructure;
    assert!(err.to_string().contains("circular structure"));
}

// ── Deep copy ────────────────────────────────────────────────────

#[test]
fn deep_copy_detaches_from_original() {
    let original = Value::object([("list", Value::array([1, 2]))]);
    let copy = original.deep_copy().unwrap();

    let list = original.as_object().unwrap().borrow().get("list").cloned().unwrap();
    list.as_array().unwrap().borrow_mut().push(Value::from(3));

    assert_eq!(encode(&original).unwrap(), r#"{"list":[1,2,3]}"#);
    assert_eq!(encode(&copy).unwrap(), r#"{"list":[1,2]}"#);
}

#[test]
fn deep_copy_rejects_cycles() {
    let value = Value::array([0]);
    value.as_array().unwrap().borrow_mut().push(value.clone());
    assert!(matches!(
        value.deep_copy(),
        Err(CodecError::CircularStructure)
    ));
}

#[test]
fn deep_copy_allows_shared_siblings() {
    let shared = Value::map([("k", 1)]);
    let value = Value::array([shared.clone(), shared]);
    let copy = value.deep_copy().unwrap();
    assert_eq!(copy, value);
}
