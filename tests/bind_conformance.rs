//! Binder conformance tests.
//!
//! Binds parsed documents onto records, collections and smart pointers
//! through the public API and checks defaults, conversions and error paths.

use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};
use std::rc::Rc;

use jsonbind::demo::{Address, Person, SAMPLE_PERSON};
use jsonbind::error::BindError;
use jsonbind::{bind, from_str, json_record, parse, Error, JsonValue, Record};

#[derive(Debug, Default, PartialEq)]
struct User {
    name: String,
    age: i32,
    nickname: String,
    active: bool,
}

json_record!(User { name, age, nickname, active });

#[derive(Debug, Default, PartialEq)]
struct Collections {
    fixed: [i32; 3],
    boxed: Box<[String]>,
    list: Vec<i64>,
    queue: VecDeque<bool>,
    unique: HashSet<String>,
    ordered: BTreeSet<i32>,
    raw: Vec<JsonValue>,
    lookup: BTreeMap<String, f64>,
}

json_record!(Collections { fixed, boxed, list, queue, unique, ordered, raw, lookup });

#[derive(Debug, Default)]
struct Node {
    label: String,
    child: Option<Box<Node>>,
    shared: Option<Rc<Address>>,
}

json_record!(Node { label, child, shared });

#[derive(Debug, Default)]
struct Misfit {
    count: i32,
}

json_record!(Misfit { count });

fn bind_err<T: jsonbind::FromJson + std::fmt::Debug>(text: &str) -> BindError {
    match from_str::<T>(text) {
        Err(Error::Bind(e)) => e,
        other => panic!("expected bind error for {text}, got {other:?}"),
    }
}

// ============================================================================
// Records
// ============================================================================

#[test]
fn record_partial_document_leaves_defaults() {
    let user: User = from_str(r#"{"name":"Ann","age":30}"#).unwrap();
    assert_eq!(
        user,
        User {
            name: "Ann".into(),
            age: 30,
            ..User::default()
        }
    );
}

#[test]
fn record_null_treated_as_absent() {
    let user: User = from_str(r#"{"name":null,"age":5}"#).unwrap();
    assert_eq!(user.name, "");
    assert_eq!(user.age, 5);
}

#[test]
fn record_unknown_keys_ignored() {
    let user: User = from_str(r#"{"name":"Bo","extra":{"deep":[1,2]},"age":1}"#).unwrap();
    assert_eq!(user.name, "Bo");
}

#[test]
fn record_field_names_in_declaration_order() {
    assert_eq!(User::field_names(), ["name", "age", "nickname", "active"]);
    assert_eq!(
        Person::field_names(),
        ["name", "age", "city", "isStudent", "grades", "address"]
    );
}

#[test]
fn record_sample_person() {
    let person: Person = from_str(SAMPLE_PERSON).unwrap();
    assert_eq!(person.name, "John Doe");
    assert_eq!(person.age, 30);
    assert_eq!(person.city, "New York");
    assert!(!person.isStudent);
    assert_eq!(person.grades, [85, 90, 78]);
    assert_eq!(
        person.address,
        Address {
            street: "123 Main St".into(),
            zipcode: "10001".into(),
        }
    );
}

#[test]
fn record_nested_optional_and_shared() {
    let node: Node = from_str(
        r#"{"label":"root","child":{"label":"leaf","shared":{"street":"s","zipcode":"z"}}}"#,
    )
    .unwrap();
    let child = node.child.unwrap();
    assert_eq!(child.label, "leaf");
    assert!(child.child.is_none());
    assert_eq!(child.shared.unwrap().zipcode, "z");
    assert!(node.shared.is_none());
}

#[test]
fn record_bind_from_value() {
    let value = parse(r#"[{"street":"a","zipcode":"b"}]"#).unwrap();
    let address: Address = bind(&value[0]).unwrap();
    assert_eq!(address.street, "a");
}

// ============================================================================
// Collections
// ============================================================================

#[test]
fn collections_every_kind() {
    let bound: Collections = from_str(
        r#"{
            "fixed": [1, 2, 3],
            "boxed": ["x", "y"],
            "list": [5000000000, 1],
            "queue": [true, false],
            "unique": ["a", "b", "a"],
            "ordered": [3, 1, 2, 1],
            "raw": [1, "two", null, {"k": []}],
            "lookup": {"half": 0.5, "one": 1}
        }"#,
    )
    .unwrap();
    assert_eq!(bound.fixed, [1, 2, 3]);
    assert_eq!(&*bound.boxed, ["x".to_string(), "y".to_string()]);
    assert_eq!(bound.list, [5_000_000_000, 1]);
    assert_eq!(bound.queue, VecDeque::from(vec![true, false]));
    assert_eq!(bound.unique.len(), 2);
    assert_eq!(bound.ordered.into_iter().collect::<Vec<_>>(), [1, 2, 3]);
    assert_eq!(bound.raw.len(), 4);
    assert!(bound.raw[2].is_null());
    assert!(bound.raw[3]["k"].is_array());
    assert_eq!(bound.lookup["one"], 1.0);
}

#[test]
fn collections_fixed_length_mismatch() {
    let err = bind_err::<Collections>(r#"{"fixed":[1,2]}"#);
    assert_eq!(err.root_cause(), &BindError::LengthMismatch { expected: 3, found: 2 });
    assert_eq!(err.path(), "fixed");
}

#[test]
fn collections_element_type_mismatch() {
    let err = bind_err::<Collections>(r#"{"list":[1,"x"]}"#);
    assert_eq!(err.name(), "TypeMismatch");
    assert_eq!(err.code(), 302);
}

// ============================================================================
// Conversions and errors
// ============================================================================

#[test]
fn convert_int_narrowing_out_of_range() {
    let err = bind_err::<Misfit>(r#"{"count":3000000000}"#);
    assert_eq!(
        err,
        BindError::NumberOutOfRange {
            value: 3_000_000_000,
            target: "i32"
        }
        .in_field("count")
    );
    assert_eq!(
        err.to_string(),
        "field `count`: number 3000000000 does not fit in i32"
    );
}

#[test]
fn convert_array_to_scalar_unsupported() {
    let err = bind_err::<Misfit>(r#"{"count":[1]}"#);
    assert_eq!(err.root_cause(), &BindError::UnsupportedCollection { target: "i32" });
    assert_eq!(err.code(), 301);
}

#[test]
fn convert_string_to_int_mismatch() {
    let err = bind_err::<Misfit>(r#"{"count":"7"}"#);
    assert_eq!(
        err.root_cause(),
        &BindError::TypeMismatch {
            expected: "i32",
            found: "string"
        }
    );
}

#[test]
fn convert_nested_error_path() {
    let err = bind_err::<Person>(r#"{"address":{"zipcode":10001}}"#);
    assert_eq!(err.path(), "address.zipcode");
    assert_eq!(err.name(), "TypeMismatch");
}

#[test]
fn convert_record_from_non_object() {
    let err = bind_err::<User>(r#"[{"name":"x"}]"#);
    assert_eq!(err.name(), "UnsupportedCollection");
}

#[test]
fn convert_parse_failure_surfaces_as_syntax() {
    assert_eq!(from_str::<User>(r#"{"name":}"#).unwrap_err().name(), "UnexpectedToken");
}
