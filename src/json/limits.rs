//! Resource limits for parsing and serialization.
//!
//! Recursive descent and the serializer's tree walk both recurse once per
//! nesting level, so depth is bounded here rather than by the call stack.
//! Limits are plain data with serde support so they can be loaded from a
//! configuration file; fields missing from the file keep their defaults.

use serde::{Deserialize, Serialize};

/// Resource limits and string handling options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum total input size in bytes
    pub max_input_size: usize,
    /// Maximum nesting depth for arrays/objects, also applied when serializing
    pub max_nesting_depth: usize,
    /// Maximum string token length in bytes, quotes excluded
    pub max_string_length: usize,
    /// Maximum number of entries in an object
    pub max_object_fields: usize,
    /// Maximum number of elements in an array
    pub max_array_length: usize,
    /// Keep string contents exactly as written, without decoding escapes
    pub raw_strings: bool,
}

impl Limits {
    /// Tight limits for untrusted input.
    pub const fn strict() -> Self {
        Self {
            max_input_size: 1024 * 1024,  // 1 MiB
            max_nesting_depth: 32,        // 32 levels
            max_string_length: 64 * 1024, // 64 KiB
            max_object_fields: 1024,      // 1024 fields
            max_array_length: 10_000,     // 10,000 elements
            raw_strings: false,
        }
    }

    /// Limits for trusted input: only nesting depth is bounded.
    pub const fn lenient() -> Self {
        Self {
            max_input_size: usize::MAX,
            max_nesting_depth: 128,
            max_string_length: usize::MAX,
            max_object_fields: usize::MAX,
            max_array_length: usize::MAX,
            raw_strings: false,
        }
    }

    /// Same limits, with string escapes kept verbatim.
    pub const fn with_raw_strings(mut self, raw: bool) -> Self {
        self.raw_strings = raw;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::lenient()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_limits() {
        let limits = Limits::strict();
        assert_eq!(limits.max_input_size, 1024 * 1024);
        assert_eq!(limits.max_nesting_depth, 32);
        assert_eq!(limits.max_string_length, 64 * 1024);
        assert_eq!(limits.max_object_fields, 1024);
        assert_eq!(limits.max_array_length, 10_000);
        assert!(!limits.raw_strings);
    }

    #[test]
    fn test_lenient_is_default() {
        let limits = Limits::default();
        assert_eq!(limits, Limits::lenient());
        assert!(limits.max_nesting_depth > Limits::strict().max_nesting_depth);
    }

    #[test]
    fn test_lenient_bounds_only_depth() {
        let limits = Limits::lenient();
        assert_eq!(limits.max_nesting_depth, 128);
        assert_eq!(limits.max_input_size, usize::MAX);
        assert_eq!(limits.max_string_length, usize::MAX);
        assert_eq!(limits.max_object_fields, usize::MAX);
        assert_eq!(limits.max_array_length, usize::MAX);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let limits: Limits =
            serde_json::from_str(r#"{"max_nesting_depth": 4, "raw_strings": true}"#).unwrap();
        assert_eq!(limits.max_nesting_depth, 4);
        assert!(limits.raw_strings);
        assert_eq!(limits.max_input_size, Limits::lenient().max_input_size);
    }

    #[test]
    fn test_with_raw_strings() {
        assert!(Limits::strict().with_raw_strings(true).raw_strings);
    }
}
