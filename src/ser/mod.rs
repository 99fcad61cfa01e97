//! Compact JSON serialization.
//!
//! Anything implementing [`ToJson`] can be written as text: the value model
//! itself, scalars, sequences, sets, maps, smart pointers and records
//! declared with [`json_record!`](crate::json_record). Output carries no
//! whitespace. Maps use their own iteration order and records use field
//! declaration order.
//!
//! # Cycles
//!
//! Owned trees cannot be cyclic; graphs built from `Rc`/`Arc` can. The
//! [`Encoder`] keeps a stack of the shared allocations on the current path
//! and fails with [`SerializeError::CycleDetected`] when a node would be
//! entered a second time below itself. The check is path-local: two
//! siblings pointing at the same node are both written out in full.
//!
//! # Example
//!
//! ```
//! use jsonbind::{parse, serialize};
//!
//! let value = parse(r#"{ "b": [1, 2.5], "a": "x\ty" }"#).unwrap();
//! assert_eq!(serialize(&value).unwrap(), r#"{"a":"x\ty","b":[1,2.5]}"#);
//! ```

mod impls;

use std::fmt;

use crate::error::SerializeError;
use crate::json::{Limits, Number};

/// Types that can write themselves as JSON.
pub trait ToJson {
    /// Write this value to the encoder.
    fn to_json(&self, encoder: &mut Encoder) -> Result<(), SerializeError>;
}

/// Output buffer plus the state needed to reject cycles and runaway depth.
pub struct Encoder {
    output: String,
    ancestors: Vec<*const ()>,
    depth: usize,
    max_depth: usize,
}

impl Encoder {
    /// Create an encoder bounded by the given limits.
    pub fn new(limits: Limits) -> Self {
        Self {
            output: String::new(),
            ancestors: Vec::new(),
            depth: 0,
            max_depth: limits.max_nesting_depth,
        }
    }

    /// Take the text written so far.
    pub fn finish(self) -> String {
        self.output
    }

    /// Write `null`.
    pub fn write_null(&mut self) {
        self.output.push_str("null");
    }

    /// Write `true` or `false`.
    pub fn write_bool(&mut self, value: bool) {
        self.output.push_str(if value { "true" } else { "false" });
    }

    /// Write an integer.
    pub fn write_i64(&mut self, value: i64) {
        self.output.push_str(&value.to_string());
    }

    /// Write a float; NaN and infinities have no JSON form.
    pub fn write_f64(&mut self, value: f64) -> Result<(), SerializeError> {
        if !value.is_finite() {
            return Err(SerializeError::UnsupportedType {
                type_name: "f64",
                reason: "non-finite number",
            });
        }
        self.output.push_str(&Number::F64(value).to_string());
        Ok(())
    }

    /// Write a number in its own width.
    pub fn write_number(&mut self, value: Number) -> Result<(), SerializeError> {
        match value {
            Number::I32(n) => self.write_i64(i64::from(n)),
            Number::I64(n) => self.write_i64(n),
            Number::F64(n) => self.write_f64(n)?,
        }
        Ok(())
    }

    /// Write a quoted, escaped string.
    pub fn write_str(&mut self, value: &str) {
        escape_into(value, &mut self.output);
    }

    /// Write `[a,b,...]`.
    pub fn write_seq<'v, T, I>(&mut self, items: I) -> Result<(), SerializeError>
    where
        T: ToJson + ?Sized + 'v,
        I: IntoIterator<Item = &'v T>,
    {
        self.nested('[', ']', |encoder| {
            for (i, item) in items.into_iter().enumerate() {
                if i > 0 {
                    encoder.output.push(',');
                }
                item.to_json(encoder)?;
            }
            Ok(())
        })
    }

    /// Write `{"key":value,...}`, coercing keys to text.
    pub fn write_map<'v, K, V, I>(&mut self, entries: I) -> Result<(), SerializeError>
    where
        K: fmt::Display,
        V: ToJson + ?Sized + 'v,
        I: IntoIterator<Item = (K, &'v V)>,
    {
        self.nested('{', '}', |encoder| {
            for (i, (key, value)) in entries.into_iter().enumerate() {
                if i > 0 {
                    encoder.output.push(',');
                }
                encoder.write_str(&key.to_string());
                encoder.output.push(':');
                value.to_json(encoder)?;
            }
            Ok(())
        })
    }

    /// Write a record as `{"field":value,...}` in the given order.
    pub fn write_record(&mut self, fields: &[(&str, &dyn ToJson)]) -> Result<(), SerializeError> {
        self.write_map(fields.iter().map(|&(name, value)| (name, value)))
    }

    /// Write a value reachable through a shared pointer.
    ///
    /// `identity` is the address of the shared allocation. Entering an
    /// identity that is already an ancestor on the current path fails.
    pub fn write_shared<T>(&mut self, identity: *const (), value: &T) -> Result<(), SerializeError>
    where
        T: ToJson + ?Sized,
    {
        if self.ancestors.contains(&identity) {
            return Err(SerializeError::CycleDetected);
        }
        self.ancestors.push(identity);
        let result = value.to_json(self);
        self.ancestors.pop();
        result
    }

    fn nested<F>(&mut self, open: char, close: char, body: F) -> Result<(), SerializeError>
    where
        F: FnOnce(&mut Self) -> Result<(), SerializeError>,
    {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(SerializeError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        self.output.push(open);
        body(self)?;
        self.output.push(close);
        self.depth -= 1;
        Ok(())
    }
}

/// Serialize a string with JSON escaping.
///
/// Only backslash, quote and the five short control escapes are rewritten;
/// every other character, including other control characters and non-ASCII
/// text, is written as is.
fn escape_into(s: &str, output: &mut String) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\x08' => output.push_str("\\b"),
            '\x0C' => output.push_str("\\f"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            c => output.push(c),
        }
    }
    output.push('"');
}

/// Serialize a value to compact JSON with the default limits.
pub fn serialize<T: ToJson + ?Sized>(value: &T) -> Result<String, SerializeError> {
    serialize_with_limits(value, Limits::default())
}

/// Serialize a value to compact JSON with custom limits.
pub fn serialize_with_limits<T: ToJson + ?Sized>(
    value: &T,
    limits: Limits,
) -> Result<String, SerializeError> {
    let mut encoder = Encoder::new(limits);
    value.to_json(&mut encoder)?;
    Ok(encoder.finish())
}
