//! Conversions to and from `serde_json::Value`.
//!
//! Lets consumers hand parsed documents to code built on the serde
//! ecosystem, and bring serde-produced values back in for binding or
//! serialization.

use super::types::{JsonObject, JsonValue, Number};

impl From<JsonValue> for serde_json::Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => serde_json::Value::Null,
            JsonValue::Bool(b) => serde_json::Value::Bool(b),
            JsonValue::Number(Number::I32(n)) => serde_json::Value::from(n),
            JsonValue::Number(Number::I64(n)) => serde_json::Value::from(n),
            // Non-finite floats have no JSON form and become null
            JsonValue::Number(Number::F64(n)) => serde_json::Number::from_f64(n)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            JsonValue::String(s) => serde_json::Value::String(s),
            JsonValue::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(Into::into).collect())
            }
            JsonValue::Object(obj) => serde_json::Value::Object(
                obj.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for JsonValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::Bool(b) => JsonValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => JsonValue::Number(Number::from_i64(i)),
                // u64 above i64::MAX falls back to a float, like any other wide literal
                None => JsonValue::Number(Number::F64(n.as_f64().unwrap_or(f64::NAN))),
            },
            serde_json::Value::String(s) => JsonValue::String(s),
            serde_json::Value::Array(arr) => {
                JsonValue::Array(arr.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(obj) => {
                JsonValue::Object(obj.into_iter().collect::<JsonObject>())
            }
        }
    }
}
