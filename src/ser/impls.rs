use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::rc::{self, Rc};
use std::sync::{self, Arc, Mutex, TryLockError};

use super::{Encoder, ToJson};
use crate::error::SerializeError;
use crate::json::{JsonObject, JsonValue, Number};

impl ToJson for JsonValue {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        match self {
            JsonValue::Null => encoder.write_null(),
            JsonValue::Bool(b) => encoder.write_bool(*b),
            JsonValue::Number(n) => encoder.write_number(*n)?,
            JsonValue::String(s) => encoder.write_str(s),
            JsonValue::Array(arr) => encoder.write_seq(arr)?,
            JsonValue::Object(obj) => obj.to_json(encoder)?,
        }
        Ok(())
    }
}

impl ToJson for JsonObject {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        encoder.write_map(self.iter())
    }
}

impl ToJson for Number {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        encoder.write_number(*self)
    }
}

impl ToJson for () {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        encoder.write_null();
        Ok(())
    }
}

impl ToJson for bool {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        encoder.write_bool(*self);
        Ok(())
    }
}

impl ToJson for i32 {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        encoder.write_i64(i64::from(*self));
        Ok(())
    }
}

impl ToJson for i64 {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        encoder.write_i64(*self);
        Ok(())
    }
}

impl ToJson for f64 {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        encoder.write_f64(*self)
    }
}

impl ToJson for str {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        encoder.write_str(self);
        Ok(())
    }
}

impl ToJson for String {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        encoder.write_str(self);
        Ok(())
    }
}

impl<T: ToJson + ?Sized> ToJson for &T {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        (**self).to_json(encoder)
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        match self {
            Some(value) => value.to_json(encoder),
            None => {
                encoder.write_null();
                Ok(())
            }
        }
    }
}

impl<T: ToJson + ?Sized> ToJson for Box<T> {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        (**self).to_json(encoder)
    }
}

// Shared pointers are the only way to build a cycle, so they carry identity.

impl<T: ToJson + ?Sized> ToJson for Rc<T> {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        encoder.write_shared(Rc::as_ptr(self) as *const (), &**self)
    }
}

impl<T: ToJson + ?Sized> ToJson for Arc<T> {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        encoder.write_shared(Arc::as_ptr(self) as *const (), &**self)
    }
}

/// A dangling weak reference is written as `null`.
impl<T: ToJson + ?Sized> ToJson for rc::Weak<T> {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        match self.upgrade() {
            Some(strong) => strong.to_json(encoder),
            None => {
                encoder.write_null();
                Ok(())
            }
        }
    }
}

impl<T: ToJson + ?Sized> ToJson for sync::Weak<T> {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        match self.upgrade() {
            Some(strong) => strong.to_json(encoder),
            None => {
                encoder.write_null();
                Ok(())
            }
        }
    }
}

impl<T: ToJson + ?Sized> ToJson for RefCell<T> {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        let value = self.try_borrow().map_err(|_| SerializeError::UnsupportedType {
            type_name: "RefCell",
            reason: "value is mutably borrowed",
        })?;
        value.to_json(encoder)
    }
}

impl<T: ToJson + ?Sized> ToJson for Mutex<T> {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        let value = match self.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => {
                return Err(SerializeError::UnsupportedType {
                    type_name: "Mutex",
                    reason: "mutex is locked",
                })
            }
            Err(TryLockError::Poisoned(_)) => {
                return Err(SerializeError::UnsupportedType {
                    type_name: "Mutex",
                    reason: "mutex is poisoned",
                })
            }
        };
        value.to_json(encoder)
    }
}

impl<T: ToJson> ToJson for [T] {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        encoder.write_seq(self)
    }
}

impl<T: ToJson, const N: usize> ToJson for [T; N] {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        encoder.write_seq(self)
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        encoder.write_seq(self)
    }
}

impl<T: ToJson> ToJson for VecDeque<T> {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        encoder.write_seq(self)
    }
}

impl<T: ToJson, S> ToJson for HashSet<T, S> {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        encoder.write_seq(self)
    }
}

impl<T: ToJson> ToJson for BTreeSet<T> {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        encoder.write_seq(self)
    }
}

impl<K: fmt::Display, V: ToJson, S> ToJson for HashMap<K, V, S> {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        encoder.write_map(self)
    }
}

impl<K: fmt::Display, V: ToJson> ToJson for BTreeMap<K, V> {
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError> {
        encoder.write_map(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SerializeError;
    use crate::ser::serialize;

    #[test]
    fn test_option_and_unit() {
        assert_eq!(serialize(&Some(3)).unwrap(), "3");
        assert_eq!(serialize(&None::<i32>).unwrap(), "null");
        assert_eq!(serialize(&()).unwrap(), "null");
    }

    #[test]
    fn test_collections() {
        assert_eq!(serialize(&[1, 2]).unwrap(), "[1,2]");
        assert_eq!(serialize(&VecDeque::from(vec![3])).unwrap(), "[3]");
        let set: BTreeSet<i32> = [2, 1, 2].into_iter().collect();
        assert_eq!(serialize(&set).unwrap(), "[1,2]");
        assert_eq!(serialize(&vec!["a", "b"]).unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn test_map_keys_coerced_to_text() {
        let map: BTreeMap<i32, bool> = [(1, true), (2, false)].into_iter().collect();
        assert_eq!(serialize(&map).unwrap(), r#"{"1":true,"2":false}"#);
    }

    #[test]
    fn test_map_keys_escaped() {
        let map: BTreeMap<&str, i32> = [("a\"b", 1)].into_iter().collect();
        assert_eq!(serialize(&map).unwrap(), r#"{"a\"b":1}"#);
    }

    #[test]
    fn test_shared_siblings_serialized_twice() {
        let shared = Rc::new(vec![1, 2]);
        let pair = vec![Rc::clone(&shared), Rc::clone(&shared)];
        assert_eq!(serialize(&pair).unwrap(), "[[1,2],[1,2]]");
    }

    #[test]
    fn test_rc_cycle_detected() {
        let list: Rc<RefCell<Vec<Rc<dyn ToJson>>>> = Rc::new(RefCell::new(Vec::new()));
        let erased: Rc<dyn ToJson> = list.clone();
        list.borrow_mut().push(erased);
        assert_eq!(serialize(&list), Err(SerializeError::CycleDetected));
        // Break the cycle so the allocation is released
        list.borrow_mut().clear();
    }

    #[test]
    fn test_weak_dangling_is_null() {
        let weak = {
            let strong = Rc::new(1);
            Rc::downgrade(&strong)
        };
        assert_eq!(serialize(&weak).unwrap(), "null");
    }

    #[test]
    fn test_mutably_borrowed_refcell_rejected() {
        let cell = RefCell::new(1);
        let _guard = cell.borrow_mut();
        assert_eq!(serialize(&cell).unwrap_err().name(), "UnsupportedType");
    }

    #[test]
    fn test_arc_mutex() {
        let value = Arc::new(Mutex::new(vec![true]));
        assert_eq!(serialize(&value).unwrap(), "[true]");
    }
}
