//! jsonbind - JSON text to typed values and back.
//!
//! This crate scans and parses JSON text into a tagged value model, binds
//! that model onto user-defined structs and collections by field name, and
//! serializes values of any supported type back to compact text with
//! cycle detection over shared pointers.
//!
//! # Architecture
//!
//! The implementation is organized into modules by pipeline stage:
//!
//! - [`json`] - Lexer, parser, limits and the [`JsonValue`] model
//! - [`bind`] - Structural decode through [`FromJson`] and [`Record`]
//! - [`ser`] - Compact encode through [`ToJson`] and [`Encoder`]
//! - [`demo`] - Sample person/address records used by the CLI
//! - [`error`] - One error enum per stage with stable numeric codes
//!
//! # Example
//!
//! ```
//! use jsonbind::{from_str, json_record, serialize};
//!
//! #[derive(Debug, Default)]
//! struct User {
//!     name: String,
//!     age: i32,
//!     tags: Vec<String>,
//! }
//!
//! json_record!(User { name, age, tags });
//!
//! let user: User = from_str(r#"{"name":"Ann","age":30}"#).unwrap();
//! assert_eq!(user.age, 30);
//! assert!(user.tags.is_empty());
//! assert_eq!(serialize(&user).unwrap(), r#"{"name":"Ann","age":30,"tags":[]}"#);
//! ```

// Library code reports every failure through Result.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod bind;
pub mod demo;
pub mod error;
pub mod json;
pub mod ser;

// Re-export commonly used types
pub use bind::{bind, bind_record, from_str, FromJson, Record};
pub use error::{BindError, Error, JsonResult, LexError, SerializeError, SyntaxError};
pub use json::{parse, parse_with_limits, tokenize, JsonObject, JsonValue, Limits, Number};
pub use ser::{serialize, serialize_with_limits, Encoder, ToJson};
