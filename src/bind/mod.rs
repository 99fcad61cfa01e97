//! Structural binding from the value model onto user types.
//!
//! Binding is name-driven and shallow-to-deep: a record is constructed with
//! no arguments, then each of its declared fields is looked up by exact name
//! in the source object and converted to the field's static type. Absent
//! keys and keys holding `null` leave the field at its constructed default;
//! source keys the record does not declare are ignored.
//!
//! # Architecture
//!
//! - [`FromJson`] - conversion of one value into one target type
//! - [`Record`] - construction plus by-name field assignment for structs
//! - [`json_record!`](crate::json_record) - derives both for a `Default` struct
//! - [`bind_record`] - the field walk shared by every record
//!
//! Errors raised while converting a field are wrapped with the field name,
//! so nested failures carry a dotted path (see [`BindError::path`]).
//!
//! # Example
//!
//! ```
//! use jsonbind::{from_str, json_record};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//!     label: Option<String>,
//! }
//!
//! json_record!(Point { x, y, label });
//!
//! let point: Point = from_str(r#"{"x": 3, "y": -1, "z": 9}"#).unwrap();
//! assert_eq!(point, Point { x: 3, y: -1, label: None });
//! ```

mod impls;
mod record;

use crate::error::{BindError, JsonResult};
use crate::json::{parse, JsonValue};

/// Types that can be built from a JSON value.
pub trait FromJson: Sized {
    /// Convert `value` into `Self`.
    fn from_json(value: &JsonValue) -> Result<Self, BindError>;
}

/// Struct types whose fields are populated by name.
pub trait Record: Sized {
    /// Create an instance with every field at its default.
    fn construct() -> Result<Self, BindError>;

    /// Declared field names, in declaration order.
    fn field_names() -> &'static [&'static str];

    /// Convert `value` and store it in the field called `name`.
    ///
    /// Names not in [`field_names`](Record::field_names) are ignored.
    fn assign(&mut self, name: &str, value: &JsonValue) -> Result<(), BindError>;
}

/// Bind an object onto a record, field by field.
pub fn bind_record<T: Record>(value: &JsonValue) -> Result<T, BindError> {
    let object = match value {
        JsonValue::Object(object) => object,
        other => return Err(mismatch::<T>(other)),
    };

    let mut target = T::construct()?;
    for &name in T::field_names() {
        match object.get(name) {
            None | Some(JsonValue::Null) => {}
            Some(field) => target
                .assign(name, field)
                .map_err(|e| e.in_field(name))?,
        }
    }
    Ok(target)
}

/// Bind a value onto any supported target type.
pub fn bind<T: FromJson>(value: &JsonValue) -> Result<T, BindError> {
    T::from_json(value)
}

/// Parse text and bind the result in one step.
pub fn from_str<T: FromJson>(text: &str) -> JsonResult<T> {
    let value = parse(text)?;
    Ok(bind(&value)?)
}

/// The error for a source value the target cannot take.
///
/// Arrays get their own variant so callers can tell a missing collection
/// impl apart from a plain type mismatch.
pub(crate) fn mismatch<T>(found: &JsonValue) -> BindError {
    let target = short_type_name::<T>();
    match found {
        JsonValue::Array(_) => BindError::UnsupportedCollection { target },
        JsonValue::Number(n) => BindError::TypeMismatch {
            expected: target,
            found: n.width_name(),
        },
        other => BindError::TypeMismatch {
            expected: target,
            found: other.type_name(),
        },
    }
}

/// Type name without its module path, for error messages.
pub(crate) fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    match full.find('<') {
        // Generic types keep their full path inside the brackets
        Some(_) => full,
        None => full.rsplit("::").next().unwrap_or(full),
    }
}
