//! JSON value types.
//!
//! The value model is a closed enum with six variants. Numbers remember the
//! narrowest width that represents their literal exactly, so `30` and
//! `3000000000` carry different tags and binding can widen or narrow them
//! explicitly.
//!
//! Objects wrap a `BTreeMap` behind [`JsonObject`], which exposes only the
//! read and insert operations the pipeline needs. Values are owned trees:
//! whoever holds `&mut` may insert, everyone else sees a snapshot.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::Index;

/// A JSON number, tagged with the width its literal fits in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Integral literal within 32-bit signed range
    I32(i32),
    /// Integral literal outside 32-bit but within 64-bit signed range
    I64(i64),
    /// Literal with a fraction or exponent
    F64(f64),
}

impl Number {
    /// Build an integer number in its narrowest width.
    pub fn from_i64(value: i64) -> Self {
        match i32::try_from(value) {
            Ok(narrow) => Number::I32(narrow),
            Err(_) => Number::I64(value),
        }
    }

    /// Returns the value as i64 if this is an integer of either width.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::I32(n) => Some(i64::from(n)),
            Number::I64(n) => Some(n),
            Number::F64(_) => None,
        }
    }

    /// Returns the value as f64, converting integers.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::I32(n) => f64::from(n),
            Number::I64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns true for the two integer widths.
    pub fn is_integer(&self) -> bool {
        !matches!(self, Number::F64(_))
    }

    /// Returns the width name used in error messages.
    pub fn width_name(&self) -> &'static str {
        match self {
            Number::I32(_) => "i32",
            Number::I64(_) => "i64",
            Number::F64(_) => "f64",
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I32(n) => write!(f, "{n}"),
            Number::I64(n) => write!(f, "{n}"),
            // Debug keeps a '.' or exponent so the text re-reads as a float
            Number::F64(n) => write!(f, "{n:?}"),
        }
    }
}

/// A JSON object: unique string keys mapped to values, last write wins.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonObject {
    entries: BTreeMap<String, JsonValue>,
}

impl JsonObject {
    /// Create an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Option<JsonValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.entries.get(key)
    }

    /// Returns true if the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over the entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy the entries into a plain map, for consumers that want untyped data.
    pub fn to_map(&self) -> HashMap<String, JsonValue> {
        self.entries.clone().into_iter().collect()
    }

    /// Take the entries as a plain map.
    pub fn into_map(self) -> HashMap<String, JsonValue> {
        self.entries.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<JsonValue>> FromIterator<(K, V)> for JsonObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut object = JsonObject::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

impl IntoIterator for JsonObject {
    type Item = (String, JsonValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A JSON value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JsonValue {
    /// JSON null literal
    #[default]
    Null,
    /// JSON boolean (true/false)
    Bool(bool),
    /// JSON number in its narrowest width
    Number(Number),
    /// JSON string
    String(String),
    /// JSON array of values
    Array(Vec<JsonValue>),
    /// JSON object
    Object(JsonObject),
}

static NULL: JsonValue = JsonValue::Null;

impl JsonValue {
    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Returns true if this is a boolean value.
    pub fn is_bool(&self) -> bool {
        matches!(self, JsonValue::Bool(_))
    }

    /// Returns true if this is a number value.
    pub fn is_number(&self) -> bool {
        matches!(self, JsonValue::Number(_))
    }

    /// Returns true if this is a string value.
    pub fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    /// Returns true if this is an array value.
    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Returns true if this is an object value.
    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// Returns the boolean value if this is a Bool, None otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if this is a Number, None otherwise.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value if this is a 32-bit integer, None otherwise.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            JsonValue::Number(Number::I32(n)) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value if this is an integer of either width, None otherwise.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(|n| n.as_i64())
    }

    /// Returns the value as f64 if this is any number, None otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(|n| n.as_f64())
    }

    /// Returns a reference to the string if this is a String, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if this is an Array, None otherwise.
    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns a reference to the object if this is an Object, None otherwise.
    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Returns a mutable reference to the object if this is an Object.
    pub fn as_object_mut(&mut self) -> Option<&mut JsonObject> {
        match self {
            JsonValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get a value from an object by key.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        match self {
            JsonValue::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Get a value from an array by index.
    pub fn get_index(&self, index: usize) -> Option<&JsonValue> {
        match self {
            JsonValue::Array(arr) => arr.get(index),
            _ => None,
        }
    }

    /// Number of entries for objects and elements for arrays.
    pub fn len(&self) -> Option<usize> {
        match self {
            JsonValue::Object(o) => Some(o.len()),
            JsonValue::Array(a) => Some(a.len()),
            _ => None,
        }
    }

    /// Returns the type name as a string for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }
}

/// Missing keys and non-objects index to `Null`.
impl Index<&str> for JsonValue {
    type Output = JsonValue;

    fn index(&self, key: &str) -> &JsonValue {
        self.get(key).unwrap_or(&NULL)
    }
}

/// Out-of-range positions and non-arrays index to `Null`.
impl Index<usize> for JsonValue {
    type Output = JsonValue;

    fn index(&self, index: usize) -> &JsonValue {
        self.get_index(index).unwrap_or(&NULL)
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Bool(b)
    }
}

impl From<i32> for JsonValue {
    fn from(n: i32) -> Self {
        JsonValue::Number(Number::I32(n))
    }
}

impl From<i64> for JsonValue {
    fn from(n: i64) -> Self {
        JsonValue::Number(Number::from_i64(n))
    }
}

impl From<f64> for JsonValue {
    fn from(n: f64) -> Self {
        JsonValue::Number(Number::F64(n))
    }
}

impl From<Number> for JsonValue {
    fn from(n: Number) -> Self {
        JsonValue::Number(n)
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(s)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(a: Vec<JsonValue>) -> Self {
        JsonValue::Array(a)
    }
}

impl From<JsonObject> for JsonValue {
    fn from(o: JsonObject) -> Self {
        JsonValue::Object(o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_value_types() {
        assert!(JsonValue::Null.is_null());
        assert!(JsonValue::Bool(true).is_bool());
        assert!(JsonValue::from(42).is_number());
        assert!(JsonValue::from("test").is_string());
        assert!(JsonValue::Array(vec![]).is_array());
        assert!(JsonValue::Object(JsonObject::new()).is_object());
    }

    #[test]
    fn test_json_value_accessors() {
        assert_eq!(JsonValue::Bool(true).as_bool(), Some(true));
        assert_eq!(JsonValue::from(42).as_i32(), Some(42));
        assert_eq!(JsonValue::from(42).as_i64(), Some(42));
        assert_eq!(JsonValue::from(1.5).as_i64(), None);
        assert_eq!(JsonValue::from(7).as_f64(), Some(7.0));
        assert_eq!(JsonValue::from("test").as_str(), Some("test"));
    }

    #[test]
    fn test_number_narrowest_width() {
        assert_eq!(Number::from_i64(2_147_483_647), Number::I32(i32::MAX));
        assert_eq!(Number::from_i64(2_147_483_648), Number::I64(2_147_483_648));
        assert_eq!(Number::from_i64(-2_147_483_649), Number::I64(-2_147_483_649));
    }

    #[test]
    fn test_widths_are_distinct() {
        assert_ne!(JsonValue::from(Number::I32(1)), JsonValue::from(Number::I64(1)));
    }

    #[test]
    fn test_number_display_keeps_float_marker() {
        assert_eq!(Number::F64(1.0).to_string(), "1.0");
        assert_eq!(Number::F64(0.1).to_string(), "0.1");
        assert_eq!(Number::F64(1e300).to_string(), "1e300");
        assert_eq!(Number::I64(-5_000_000_000).to_string(), "-5000000000");
    }

    #[test]
    fn test_object_last_write_wins() {
        let mut obj = JsonObject::new();
        assert_eq!(obj.insert("a", 1), None);
        assert_eq!(obj.insert("a", 2), Some(JsonValue::from(1)));
        assert_eq!(obj.len(), 1);
        assert_eq!(obj.get("a"), Some(&JsonValue::from(2)));
    }

    #[test]
    fn test_object_equality() {
        let obj1: JsonObject = [("a", 1), ("b", 2)].into_iter().collect();
        let obj2: JsonObject = [("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(JsonValue::Object(obj1), JsonValue::Object(obj2));
    }

    #[test]
    fn test_index_missing_is_null() {
        let value = JsonValue::Array(vec![JsonValue::from(1)]);
        assert_eq!(value[0], JsonValue::from(1));
        assert!(value[5].is_null());
        assert!(value["key"].is_null());
    }

    #[test]
    fn test_len() {
        assert_eq!(JsonValue::Array(vec![JsonValue::Null; 3]).len(), Some(3));
        assert_eq!(JsonValue::Object(JsonObject::new()).len(), Some(0));
        assert_eq!(JsonValue::from(true).len(), None);
    }

    #[test]
    fn test_to_map() {
        let obj: JsonObject = [("x", "1")].into_iter().collect();
        let map = obj.to_map();
        assert_eq!(map.get("x"), Some(&JsonValue::from("1")));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(JsonValue::Null.type_name(), "null");
        assert_eq!(JsonValue::Bool(false).type_name(), "boolean");
        assert_eq!(JsonValue::from(0).type_name(), "number");
        assert_eq!(JsonValue::String(String::new()).type_name(), "string");
        assert_eq!(JsonValue::Array(vec![]).type_name(), "array");
        assert_eq!(JsonValue::Object(JsonObject::new()).type_name(), "object");
    }
}
