use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::rc::{self, Rc};
use std::sync::{self, Arc, Mutex};

use super::{mismatch, FromJson};
use crate::error::BindError;
use crate::json::{JsonObject, JsonValue, Number};

impl FromJson for JsonValue {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        Ok(value.clone())
    }
}

impl FromJson for JsonObject {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        match value {
            JsonValue::Object(object) => Ok(object.clone()),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl FromJson for Number {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        match value {
            JsonValue::Number(n) => Ok(*n),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl FromJson for bool {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        match value {
            JsonValue::Bool(b) => Ok(*b),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl FromJson for String {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        match value {
            JsonValue::String(s) => Ok(s.clone()),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl FromJson for i32 {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        match value {
            JsonValue::Number(Number::I32(n)) => Ok(*n),
            JsonValue::Number(Number::I64(n)) => {
                i32::try_from(*n).map_err(|_| BindError::NumberOutOfRange {
                    value: *n,
                    target: "i32",
                })
            }
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl FromJson for i64 {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        match value.as_number().and_then(|n| n.as_i64()) {
            Some(n) => Ok(n),
            None => Err(mismatch::<Self>(value)),
        }
    }
}

impl FromJson for f64 {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        match value {
            JsonValue::Number(n) => Ok(n.as_f64()),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

/// `null` binds to `None`; anything else must bind to `T`.
impl<T: FromJson> FromJson for Option<T> {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        match value {
            JsonValue::Null => Ok(None),
            other => T::from_json(other).map(Some),
        }
    }
}

impl<T: FromJson> FromJson for Box<T> {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        T::from_json(value).map(Box::new)
    }
}

impl<T: FromJson> FromJson for Rc<T> {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        T::from_json(value).map(Rc::new)
    }
}

impl<T: FromJson> FromJson for Arc<T> {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        T::from_json(value).map(Arc::new)
    }
}

impl<T: FromJson> FromJson for RefCell<T> {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        T::from_json(value).map(RefCell::new)
    }
}

impl<T: FromJson> FromJson for Mutex<T> {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        T::from_json(value).map(Mutex::new)
    }
}

/// A weak handle cannot own what it would point at, so only `null` binds,
/// to a dangling handle.
fn bind_weak<W>(value: &JsonValue, empty: fn() -> W) -> Result<W, BindError> {
    match value {
        JsonValue::Null => Ok(empty()),
        _ => Err(BindError::Construction {
            type_name: "Weak",
            reason: "a weak reference cannot own a bound value".into(),
        }),
    }
}

impl<T> FromJson for rc::Weak<T> {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        bind_weak(value, rc::Weak::new)
    }
}

impl<T> FromJson for sync::Weak<T> {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        bind_weak(value, sync::Weak::new)
    }
}

/// Bind every element of an array source, collecting into `C`.
fn bind_elements<T, C>(value: &JsonValue) -> Result<C, BindError>
where
    T: FromJson,
    C: FromIterator<T>,
{
    match value {
        JsonValue::Array(items) => items.iter().map(T::from_json).collect(),
        other => Err(BindError::TypeMismatch {
            expected: "array",
            found: other.type_name(),
        }),
    }
}

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        bind_elements(value)
    }
}

impl<T: FromJson> FromJson for VecDeque<T> {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        bind_elements(value)
    }
}

impl<T: FromJson> FromJson for Box<[T]> {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        bind_elements::<T, Vec<T>>(value).map(Vec::into_boxed_slice)
    }
}

impl<T: FromJson, const N: usize> FromJson for [T; N] {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        let items: Vec<T> = bind_elements(value)?;
        let found = items.len();
        items
            .try_into()
            .map_err(|_| BindError::LengthMismatch { expected: N, found })
    }
}

/// Duplicate elements collapse; the last one bound wins.
impl<T, S> FromJson for HashSet<T, S>
where
    T: FromJson + Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        bind_elements(value)
    }
}

impl<T: FromJson + Ord> FromJson for BTreeSet<T> {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        bind_elements(value)
    }
}

/// Bind every entry of an object source, collecting into `C`.
///
/// Unlike record fields, `null` entries are bound like any other value.
fn bind_entries<T, C>(value: &JsonValue) -> Result<C, BindError>
where
    T: FromJson,
    C: FromIterator<(String, T)>,
{
    match value {
        JsonValue::Object(object) => object
            .iter()
            .map(|(key, entry)| {
                T::from_json(entry)
                    .map(|bound| (key.to_string(), bound))
                    .map_err(|e| e.in_field(key))
            })
            .collect(),
        JsonValue::Array(_) => Err(BindError::UnsupportedCollection { target: "map" }),
        other => Err(BindError::TypeMismatch {
            expected: "object",
            found: other.type_name(),
        }),
    }
}

impl<T, S> FromJson for HashMap<String, T, S>
where
    T: FromJson,
    S: BuildHasher + Default,
{
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        bind_entries(value)
    }
}

impl<T: FromJson> FromJson for BTreeMap<String, T> {
    fn from_json(value: &JsonValue) -> Result<Self, BindError> {
        bind_entries(value)
    }
}
