//! JSON text handling: scanning, parsing and the value model.
//!
//! # Architecture
//!
//! The subsystem is organized into focused modules:
//!
//! - [`types`] - The tagged value model
//! - [`limits`] - Resource limits for untrusted input
//! - [`lexer`] - Tokenizer producing borrowed token slices
//! - [`parser`] - Recursive descent parser over the token sequence
//! - `interop` - Conversions to and from `serde_json::Value`
//!
//! Data flows one way: text -> [`tokenize`] -> tokens -> [`Parser`] ->
//! [`JsonValue`]. Each stage has its own error type so callers can tell a
//! scanning failure from a structural one.
//!
//! # Example
//!
//! ```
//! use jsonbind::json::{parse, tokenize, JsonValue};
//!
//! assert_eq!(tokenize(r#"{"a": [1, true]}"#).unwrap(), ["{", "\"a\"", ":", "[", "1", ",", "true", "]", "}"]);
//!
//! let value = parse(r#"{"a":{"b":[1,2,{"c":true}]}}"#).unwrap();
//! assert_eq!(value["a"]["b"][2]["c"], JsonValue::Bool(true));
//! ```

mod interop;
pub mod lexer;
pub mod limits;
pub mod parser;
pub mod types;

// Re-export commonly used items
pub use lexer::{tokenize, tokenize_with_limits, Lexer};
pub use limits::Limits;
pub use parser::{
    parse, parse_to_array, parse_to_list, parse_to_map, parse_to_object, parse_tokens,
    parse_with_limits, Parser,
};
pub use types::{JsonObject, JsonValue, Number};
