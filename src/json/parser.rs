//! JSON parser.
//!
//! Recursive descent over the token slices produced by the lexer. Each
//! production consumes tokens left to right and never backtracks. The root
//! must be an object or an array.
//!
//! Duplicate keys are not an error: the last occurrence wins. Empty keys,
//! trailing commas and leftover tokens after the root are rejected.

use super::lexer::tokenize_with_limits;
use super::limits::Limits;
use super::types::{JsonObject, JsonValue, Number};
use crate::error::{JsonResult, SyntaxError};
use std::collections::HashMap;

/// JSON parser over a token sequence.
pub struct Parser<'t, 'a> {
    tokens: &'t [&'a str],
    pos: usize,
    limits: Limits,
    depth: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    /// Create a new parser for the given tokens.
    pub fn new(tokens: &'t [&'a str], limits: Limits) -> Self {
        Self {
            tokens,
            pos: 0,
            limits,
            depth: 0,
        }
    }

    /// Parse the tokens and return the root value.
    pub fn parse(&mut self) -> Result<JsonValue, SyntaxError> {
        let value = match self.peek() {
            None => return Err(SyntaxError::UnexpectedEnd),
            Some("{") => self.parse_object()?,
            Some("[") => self.parse_array()?,
            Some(other) => return Err(SyntaxError::InvalidRoot(other.to_string())),
        };

        // Ensure no trailing content
        if let Some(extra) = self.peek() {
            return Err(SyntaxError::TrailingTokens(extra.to_string()));
        }

        Ok(value)
    }

    /// Peek at the current token.
    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).copied()
    }

    /// Consume and return the current token.
    fn advance(&mut self) -> Result<&'a str, SyntaxError> {
        let token = self.peek().ok_or(SyntaxError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(token)
    }

    fn enter(&mut self) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth > self.limits.max_nesting_depth {
            return Err(SyntaxError::DepthExceeded {
                depth: self.depth,
                limit: self.limits.max_nesting_depth,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Parse a single JSON value.
    fn parse_value(&mut self) -> Result<JsonValue, SyntaxError> {
        match self.peek() {
            None => Err(SyntaxError::UnexpectedEnd),
            Some("{") => self.parse_object(),
            Some("[") => self.parse_array(),
            Some(token) if token.starts_with('"') => {
                let s = self.parse_string()?;
                Ok(JsonValue::String(s))
            }
            Some("true") => {
                self.pos += 1;
                Ok(JsonValue::Bool(true))
            }
            Some("false") => {
                self.pos += 1;
                Ok(JsonValue::Bool(false))
            }
            Some("null") => {
                self.pos += 1;
                Ok(JsonValue::Null)
            }
            Some(token) if token.starts_with(|c: char| c == '-' || c.is_ascii_digit()) => {
                self.pos += 1;
                parse_number(token).map(JsonValue::Number)
            }
            Some(token) => Err(SyntaxError::UnexpectedToken(token.to_string())),
        }
    }

    /// Parse a JSON object.
    fn parse_object(&mut self) -> Result<JsonValue, SyntaxError> {
        self.enter()?;
        // Consume opening brace
        self.pos += 1;

        let mut object = JsonObject::new();

        // Empty object
        if self.peek() == Some("}") {
            self.pos += 1;
            self.leave();
            return Ok(JsonValue::Object(object));
        }

        loop {
            // Expect string key
            let key = match self.peek() {
                None => return Err(SyntaxError::UnexpectedEnd),
                Some(token) if token.starts_with('"') => self.parse_string()?,
                Some(token) => return Err(SyntaxError::UnexpectedToken(token.to_string())),
            };
            if key.is_empty() {
                return Err(SyntaxError::MissingKey);
            }

            // Expect colon
            match self.advance()? {
                ":" => {}
                other => return Err(SyntaxError::ExpectedColon(other.to_string())),
            }

            let value = self.parse_value()?;
            object.insert(key, value);

            if object.len() > self.limits.max_object_fields {
                return Err(SyntaxError::TooManyFields {
                    count: object.len(),
                    limit: self.limits.max_object_fields,
                });
            }

            // Expect comma or closing brace
            match self.advance()? {
                "," => {
                    if self.peek() == Some("}") {
                        return Err(SyntaxError::TrailingComma("object"));
                    }
                }
                "}" => break,
                other => return Err(SyntaxError::ExpectedComma(other.to_string())),
            }
        }

        self.leave();
        Ok(JsonValue::Object(object))
    }

    /// Parse a JSON array.
    fn parse_array(&mut self) -> Result<JsonValue, SyntaxError> {
        self.enter()?;
        // Consume opening bracket
        self.pos += 1;

        let mut arr = Vec::new();

        // Empty array
        if self.peek() == Some("]") {
            self.pos += 1;
            self.leave();
            return Ok(JsonValue::Array(arr));
        }

        loop {
            arr.push(self.parse_value()?);

            if arr.len() > self.limits.max_array_length {
                return Err(SyntaxError::ArrayTooLong {
                    length: arr.len(),
                    limit: self.limits.max_array_length,
                });
            }

            // Expect comma or closing bracket
            match self.advance()? {
                "," => {
                    if self.peek() == Some("]") {
                        return Err(SyntaxError::TrailingComma("array"));
                    }
                }
                "]" => break,
                other => return Err(SyntaxError::ExpectedComma(other.to_string())),
            }
        }

        self.leave();
        Ok(JsonValue::Array(arr))
    }

    /// Consume a string token and return its contents.
    fn parse_string(&mut self) -> Result<String, SyntaxError> {
        let token = self.advance()?;
        if token.len() < 2 {
            return Err(SyntaxError::InvalidStringToken(token.to_string()));
        }
        let inner = &token[1..token.len() - 1];

        if self.limits.raw_strings {
            Ok(inner.to_string())
        } else {
            Ok(unescape(inner))
        }
    }
}

/// Decode the short escape sequences of a string body.
///
/// `\uXXXX` and unknown escapes are kept verbatim, backslash included.
fn unescape(inner: &str) -> String {
    if !inner.contains('\\') {
        return inner.to_string();
    }

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some('/') => result.push('/'),
            Some('b') => result.push('\x08'),
            Some('f') => result.push('\x0C'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    result
}

/// Full-match a token against `-?\d+(\.\d+)?([eE][-+]?\d+)?`.
fn is_number_literal(token: &str) -> bool {
    fn digits(bytes: &[u8], mut i: usize) -> Option<usize> {
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        (i > start).then_some(i)
    }

    let bytes = token.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }
    let Some(mut i) = digits(bytes, i) else {
        return false;
    };
    if bytes.get(i) == Some(&b'.') {
        match digits(bytes, i + 1) {
            Some(next) => i = next,
            None => return false,
        }
    }
    if let Some(b'e' | b'E') = bytes.get(i) {
        i += 1;
        if let Some(b'+' | b'-') = bytes.get(i) {
            i += 1;
        }
        match digits(bytes, i) {
            Some(next) => i = next,
            None => return false,
        }
    }
    i == bytes.len()
}

/// Materialize a numeric token in the narrowest width that holds it.
fn parse_number(token: &str) -> Result<Number, SyntaxError> {
    if !is_number_literal(token) {
        return Err(SyntaxError::MalformedNumber(token.to_string()));
    }

    if token.contains(['.', 'e', 'E']) {
        let value: f64 = token
            .parse()
            .map_err(|_| SyntaxError::MalformedNumber(token.to_string()))?;
        if !value.is_finite() {
            return Err(SyntaxError::NumberOutOfRange(token.to_string()));
        }
        return Ok(Number::F64(value));
    }

    let value: i64 = token
        .parse()
        .map_err(|_| SyntaxError::NumberOutOfRange(token.to_string()))?;
    Ok(Number::from_i64(value))
}

/// Parse already-scanned tokens with the default limits.
pub fn parse_tokens(tokens: &[&str]) -> Result<JsonValue, SyntaxError> {
    Parser::new(tokens, Limits::default()).parse()
}

/// Parse a JSON document with the default limits.
pub fn parse(text: &str) -> JsonResult<JsonValue> {
    parse_with_limits(text, Limits::default())
}

/// Parse a JSON document with custom limits.
pub fn parse_with_limits(text: &str, limits: Limits) -> JsonResult<JsonValue> {
    let tokens = tokenize_with_limits(text, limits)?;
    let value = Parser::new(&tokens, limits).parse()?;
    Ok(value)
}

/// Parse a document whose root must be an object.
pub fn parse_to_object(text: &str) -> JsonResult<JsonObject> {
    match parse(text)? {
        JsonValue::Object(object) => Ok(object),
        other => Err(root_mismatch("object", &other)),
    }
}

/// Parse a document whose root must be an array.
pub fn parse_to_array(text: &str) -> JsonResult<Vec<JsonValue>> {
    match parse(text)? {
        JsonValue::Array(arr) => Ok(arr),
        other => Err(root_mismatch("array", &other)),
    }
}

/// Parse an object-rooted document into a plain map.
pub fn parse_to_map(text: &str) -> JsonResult<HashMap<String, JsonValue>> {
    parse_to_object(text).map(JsonObject::into_map)
}

/// Parse an array-rooted document into a plain list.
pub fn parse_to_list(text: &str) -> JsonResult<Vec<JsonValue>> {
    parse_to_array(text)
}

fn root_mismatch(expected: &'static str, found: &JsonValue) -> crate::error::Error {
    SyntaxError::RootMismatch {
        expected,
        found: found.type_name(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn syntax_error(input: &str) -> SyntaxError {
        match parse(input) {
            Err(Error::Syntax(e)) => e,
            other => panic!("expected syntax error for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_containers() {
        assert_eq!(parse("{}").unwrap(), JsonValue::Object(JsonObject::new()));
        assert_eq!(parse("[]").unwrap(), JsonValue::Array(vec![]));
    }

    #[test]
    fn test_parse_scalars_in_array() {
        let result = parse(r#"[null, true, false, "s", 1, -2.5]"#).unwrap();
        assert_eq!(
            result,
            JsonValue::Array(vec![
                JsonValue::Null,
                JsonValue::Bool(true),
                JsonValue::Bool(false),
                JsonValue::from("s"),
                JsonValue::from(1),
                JsonValue::from(-2.5),
            ])
        );
    }

    #[test]
    fn test_parse_object() {
        let result = parse(r#"{"a": 1, "b": 2}"#).unwrap();
        let expected: JsonObject = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(result, JsonValue::Object(expected));
    }

    #[test]
    fn test_number_widths() {
        assert_eq!(parse_number("2147483647"), Ok(Number::I32(2147483647)));
        assert_eq!(parse_number("2147483648"), Ok(Number::I64(2147483648)));
        assert_eq!(parse_number("-2147483648"), Ok(Number::I32(i32::MIN)));
        assert_eq!(parse_number("1.0"), Ok(Number::F64(1.0)));
        assert_eq!(parse_number("1e3"), Ok(Number::F64(1000.0)));
        assert_eq!(parse_number("2E-2"), Ok(Number::F64(0.02)));
    }

    #[test]
    fn test_number_grammar() {
        for ok in ["0", "-0", "12", "1.5", "-1.5e10", "1E+2", "007"] {
            assert!(is_number_literal(ok), "{ok} should match");
        }
        for bad in ["-", "1.", ".5", "1e", "1e+", "--1", "1.2e3.4", ""] {
            assert!(!is_number_literal(bad), "{bad} should not match");
        }
    }

    #[test]
    fn test_malformed_number() {
        assert_eq!(
            syntax_error("[1.]"),
            SyntaxError::MalformedNumber("1.".to_string())
        );
        assert_eq!(
            syntax_error("[-]"),
            SyntaxError::MalformedNumber("-".to_string())
        );
    }

    #[test]
    fn test_number_out_of_range() {
        assert_eq!(
            syntax_error("[9223372036854775808]"),
            SyntaxError::NumberOutOfRange("9223372036854775808".to_string())
        );
        assert_eq!(
            syntax_error("[1e400]"),
            SyntaxError::NumberOutOfRange("1e400".to_string())
        );
    }

    #[test]
    fn test_invalid_root() {
        assert_eq!(syntax_error("42"), SyntaxError::InvalidRoot("42".to_string()));
        assert_eq!(
            syntax_error(r#""text""#),
            SyntaxError::InvalidRoot("\"text\"".to_string())
        );
        assert_eq!(syntax_error(""), SyntaxError::UnexpectedEnd);
    }

    #[test]
    fn test_trailing_commas() {
        assert_eq!(syntax_error(r#"{"a":1,}"#), SyntaxError::TrailingComma("object"));
        assert_eq!(syntax_error("[1,2,]"), SyntaxError::TrailingComma("array"));
    }

    #[test]
    fn test_missing_separators() {
        assert_eq!(
            syntax_error(r#"{"a":1 "b":2}"#),
            SyntaxError::ExpectedComma("\"b\"".to_string())
        );
        assert_eq!(syntax_error("[1 2]"), SyntaxError::ExpectedComma("2".to_string()));
        assert_eq!(
            syntax_error(r#"{"a" 1}"#),
            SyntaxError::ExpectedColon("1".to_string())
        );
    }

    #[test]
    fn test_keys() {
        assert_eq!(syntax_error(r#"{"":1}"#), SyntaxError::MissingKey);
        assert_eq!(
            syntax_error("{1:2}"),
            SyntaxError::UnexpectedToken("1".to_string())
        );
    }

    #[test]
    fn test_unexpected_tokens() {
        assert_eq!(syntax_error("[,]"), SyntaxError::UnexpectedToken(",".to_string()));
        assert_eq!(syntax_error(r#"{"a":}"#), SyntaxError::UnexpectedToken("}".to_string()));
    }

    #[test]
    fn test_truncated_input() {
        assert_eq!(syntax_error("["), SyntaxError::UnexpectedEnd);
        assert_eq!(syntax_error(r#"{"a""#), SyntaxError::UnexpectedEnd);
        assert_eq!(syntax_error(r#"{"a":1"#), SyntaxError::UnexpectedEnd);
        assert_eq!(syntax_error("[1,"), SyntaxError::UnexpectedEnd);
    }

    #[test]
    fn test_trailing_tokens() {
        assert_eq!(syntax_error("{} []"), SyntaxError::TrailingTokens("[".to_string()));
    }

    #[test]
    fn test_parse_tokens_directly() {
        let value = parse_tokens(&["[", "\"x\"", "]"]).unwrap();
        assert_eq!(value, JsonValue::Array(vec![JsonValue::from("x")]));
        assert_eq!(
            parse_tokens(&["[", "\"", "]"]),
            Err(SyntaxError::InvalidStringToken("\"".to_string()))
        );
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r#"a\"b"#), "a\"b");
        assert_eq!(unescape(r"\\\/\b\f\n\r\t"), "\\/\x08\x0C\n\r\t");
        assert_eq!(unescape(r"\u0041"), r"\u0041");
        assert_eq!(unescape(r"\q"), r"\q");
    }

    #[test]
    fn test_raw_strings() {
        let limits = Limits::default().with_raw_strings(true);
        let value = parse_with_limits(r#"["a\nb"]"#, limits).unwrap();
        assert_eq!(value[0].as_str(), Some(r"a\nb"));
    }

    #[test]
    fn test_nesting_depth_limit() {
        let mut limits = Limits::strict();
        limits.max_nesting_depth = 2;

        assert!(parse_with_limits("[[1]]", limits).is_ok());
        assert_eq!(
            parse_with_limits("[[[1]]]", limits),
            Err(Error::Syntax(SyntaxError::DepthExceeded { depth: 3, limit: 2 }))
        );
    }

    #[test]
    fn test_sibling_depth_is_restored() {
        let mut limits = Limits::strict();
        limits.max_nesting_depth = 2;
        assert!(parse_with_limits("[[1],[2],{\"a\":1}]", limits).is_ok());
    }

    #[test]
    fn test_object_field_limit() {
        let mut limits = Limits::lenient();
        limits.max_object_fields = 2;
        let result = parse_with_limits(r#"{"a": 1, "b": 2, "c": 3}"#, limits);
        assert_eq!(result.unwrap_err().code(), 212);
    }

    #[test]
    fn test_array_length_limit() {
        let mut limits = Limits::lenient();
        limits.max_array_length = 2;
        let result = parse_with_limits("[1, 2, 3]", limits);
        assert_eq!(result.unwrap_err().code(), 213);
    }

    #[test]
    fn test_root_helpers() {
        assert_eq!(parse_to_object(r#"{"a":1}"#).unwrap().len(), 1);
        assert_eq!(parse_to_array("[1,2]").unwrap().len(), 2);
        assert_eq!(parse_to_list("[]").unwrap(), Vec::<JsonValue>::new());
        assert_eq!(
            parse_to_object("[]").unwrap_err(),
            Error::Syntax(SyntaxError::RootMismatch {
                expected: "object",
                found: "array"
            })
        );
        assert_eq!(
            parse_to_map(r#"{"k":"v"}"#).unwrap().get("k"),
            Some(&JsonValue::from("v"))
        );
    }
}
