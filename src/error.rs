//! Error types for every stage of the pipeline.
//!
//! Each stage has its own enum so callers can match on exactly the failures
//! that stage can produce. Every variant carries a stable numeric code and
//! name for machine-readable reporting (the CLI `check` command prints them):
//!
//! - 1xx: [`LexError`]
//! - 2xx: [`SyntaxError`]
//! - 3xx: [`BindError`]
//! - 4xx: [`SerializeError`]
//!
//! [`Error`] wraps all four for the text-level entry points.

use thiserror::Error;

/// Failures while scanning text into tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A character that cannot start any token.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),

    /// End of input reached inside a string token.
    #[error("unclosed string")]
    UnclosedString,

    /// Input exceeds the configured size limit.
    #[error("input of {size} bytes exceeds limit of {limit}")]
    InputTooLarge {
        /// Input size in bytes
        size: usize,
        /// Configured limit
        limit: usize,
    },

    /// A string token exceeds the configured length limit.
    #[error("string of {length} bytes exceeds limit of {limit}")]
    StringTooLong {
        /// Token length in bytes, quotes excluded
        length: usize,
        /// Configured limit
        limit: usize,
    },
}

impl LexError {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            LexError::UnexpectedCharacter(_) => 100,
            LexError::UnclosedString => 101,
            LexError::InputTooLarge { .. } => 102,
            LexError::StringTooLong { .. } => 103,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            LexError::UnexpectedCharacter(_) => "UnexpectedCharacter",
            LexError::UnclosedString => "UnclosedString",
            LexError::InputTooLarge { .. } => "InputTooLarge",
            LexError::StringTooLong { .. } => "StringTooLong",
        }
    }
}

/// Failures while building a value from tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// The document does not start with `{` or `[`.
    #[error("invalid JSON: must start with {{ or [, found '{0}'")]
    InvalidRoot(String),

    /// Two entries are not separated by `,`.
    #[error("expected ',' or closing bracket, found '{0}'")]
    ExpectedComma(String),

    /// An object key is not followed by `:`.
    #[error("expected ':' after key, found '{0}'")]
    ExpectedColon(String),

    /// A `,` directly before `}` or `]`.
    #[error("trailing comma in {0}")]
    TrailingComma(&'static str),

    /// An object key is the empty string.
    #[error("missing key")]
    MissingKey,

    /// A token that cannot start a value here.
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),

    /// A string token without its surrounding quotes.
    #[error("invalid string token '{0}'")]
    InvalidStringToken(String),

    /// A numeric token that fails the number grammar.
    #[error("malformed number '{0}'")]
    MalformedNumber(String),

    /// A numeric token outside the range of `i64` or finite `f64`.
    #[error("number out of range '{0}'")]
    NumberOutOfRange(String),

    /// The token sequence ended inside a production.
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// Tokens remain after the root value closed.
    #[error("unexpected token '{0}' after root value")]
    TrailingTokens(String),

    /// Nesting exceeds the configured depth.
    #[error("nesting depth {depth} exceeds limit of {limit}")]
    DepthExceeded {
        /// Depth reached
        depth: usize,
        /// Configured limit
        limit: usize,
    },

    /// An object has more entries than allowed.
    #[error("object with {count} fields exceeds limit of {limit}")]
    TooManyFields {
        /// Entries seen so far
        count: usize,
        /// Configured limit
        limit: usize,
    },

    /// An array has more elements than allowed.
    #[error("array of {length} elements exceeds limit of {limit}")]
    ArrayTooLong {
        /// Elements seen so far
        length: usize,
        /// Configured limit
        limit: usize,
    },

    /// The root has a different shape than the caller asked for.
    #[error("root element is not a JSON {expected}, found {found}")]
    RootMismatch {
        /// Requested root shape
        expected: &'static str,
        /// Actual root shape
        found: &'static str,
    },
}

impl SyntaxError {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            SyntaxError::InvalidRoot(_) => 200,
            SyntaxError::ExpectedComma(_) => 201,
            SyntaxError::ExpectedColon(_) => 202,
            SyntaxError::TrailingComma(_) => 203,
            SyntaxError::MissingKey => 204,
            SyntaxError::UnexpectedToken(_) => 205,
            SyntaxError::InvalidStringToken(_) => 206,
            SyntaxError::MalformedNumber(_) => 207,
            SyntaxError::NumberOutOfRange(_) => 208,
            SyntaxError::UnexpectedEnd => 209,
            SyntaxError::TrailingTokens(_) => 210,
            SyntaxError::DepthExceeded { .. } => 211,
            SyntaxError::TooManyFields { .. } => 212,
            SyntaxError::ArrayTooLong { .. } => 213,
            SyntaxError::RootMismatch { .. } => 214,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            SyntaxError::InvalidRoot(_) => "InvalidRoot",
            SyntaxError::ExpectedComma(_) => "ExpectedComma",
            SyntaxError::ExpectedColon(_) => "ExpectedColon",
            SyntaxError::TrailingComma(_) => "TrailingComma",
            SyntaxError::MissingKey => "MissingKey",
            SyntaxError::UnexpectedToken(_) => "UnexpectedToken",
            SyntaxError::InvalidStringToken(_) => "InvalidStringToken",
            SyntaxError::MalformedNumber(_) => "MalformedNumber",
            SyntaxError::NumberOutOfRange(_) => "NumberOutOfRange",
            SyntaxError::UnexpectedEnd => "UnexpectedEnd",
            SyntaxError::TrailingTokens(_) => "TrailingTokens",
            SyntaxError::DepthExceeded { .. } => "DepthExceeded",
            SyntaxError::TooManyFields { .. } => "TooManyFields",
            SyntaxError::ArrayTooLong { .. } => "ArrayTooLong",
            SyntaxError::RootMismatch { .. } => "RootMismatch",
        }
    }
}

/// Failures while binding a value onto a typed target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The target type could not be constructed.
    #[error("error creating instance of {type_name}: {reason}")]
    Construction {
        /// Target type
        type_name: &'static str,
        /// Why construction failed
        reason: String,
    },

    /// An array was bound to a target that is not a supported collection.
    #[error("cannot convert array to {target}")]
    UnsupportedCollection {
        /// Target type
        target: &'static str,
    },

    /// The source variant cannot populate the target type.
    #[error("cannot convert {found} to {expected}")]
    TypeMismatch {
        /// Target type
        expected: &'static str,
        /// Source variant
        found: &'static str,
    },

    /// An integer does not fit the target width.
    #[error("number {value} does not fit in {target}")]
    NumberOutOfRange {
        /// Source value
        value: i64,
        /// Target type
        target: &'static str,
    },

    /// A fixed-size target received a different number of elements.
    #[error("expected {expected} elements, found {found}")]
    LengthMismatch {
        /// Target length
        expected: usize,
        /// Source length
        found: usize,
    },

    /// A failure inside a named field.
    #[error("field `{field}`: {source}")]
    Field {
        /// Field name
        field: String,
        /// Underlying failure
        #[source]
        source: Box<BindError>,
    },
}

impl BindError {
    /// Wrap this error with the name of the field it occurred in.
    pub fn in_field(self, field: &str) -> Self {
        BindError::Field {
            field: field.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping field wrappers.
    pub fn root_cause(&self) -> &BindError {
        match self {
            BindError::Field { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Dotted path of field names leading to the innermost error.
    pub fn path(&self) -> String {
        let mut segments = Vec::new();
        let mut current = self;
        while let BindError::Field { field, source } = current {
            segments.push(field.as_str());
            current = source;
        }
        segments.join(".")
    }

    /// Get the numeric error code of the innermost error.
    pub fn code(&self) -> u32 {
        match self.root_cause() {
            BindError::Construction { .. } => 300,
            BindError::UnsupportedCollection { .. } => 301,
            BindError::TypeMismatch { .. } => 302,
            BindError::NumberOutOfRange { .. } => 303,
            BindError::LengthMismatch { .. } => 304,
            BindError::Field { .. } => 305,
        }
    }

    /// Get the error name of the innermost error.
    pub fn name(&self) -> &'static str {
        match self.root_cause() {
            BindError::Construction { .. } => "Construction",
            BindError::UnsupportedCollection { .. } => "UnsupportedCollection",
            BindError::TypeMismatch { .. } => "TypeMismatch",
            BindError::NumberOutOfRange { .. } => "NumberOutOfRange",
            BindError::LengthMismatch { .. } => "LengthMismatch",
            BindError::Field { .. } => "Field",
        }
    }
}

/// Failures while encoding a value as text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    /// A shared node was reached again along its own ancestry path.
    #[error("cyclic dependency detected")]
    CycleDetected,

    /// A value with no JSON representation.
    #[error("unsupported type {type_name}: {reason}")]
    UnsupportedType {
        /// Offending type
        type_name: &'static str,
        /// Why it cannot be encoded
        reason: &'static str,
    },

    /// Nesting exceeds the configured depth.
    #[error("nesting depth exceeds limit of {limit}")]
    DepthExceeded {
        /// Configured limit
        limit: usize,
    },
}

impl SerializeError {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            SerializeError::CycleDetected => 400,
            SerializeError::UnsupportedType { .. } => 401,
            SerializeError::DepthExceeded { .. } => 402,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            SerializeError::CycleDetected => "CycleDetected",
            SerializeError::UnsupportedType { .. } => "UnsupportedType",
            SerializeError::DepthExceeded { .. } => "DepthExceeded",
        }
    }
}

/// Any failure of the text-level entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Scanning failed.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// Parsing failed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// Binding failed.
    #[error(transparent)]
    Bind(#[from] BindError),
    /// Encoding failed.
    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

impl Error {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            Error::Lex(e) => e.code(),
            Error::Syntax(e) => e.code(),
            Error::Bind(e) => e.code(),
            Error::Serialize(e) => e.code(),
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Error::Lex(e) => e.name(),
            Error::Syntax(e) => e.name(),
            Error::Bind(e) => e.name(),
            Error::Serialize(e) => e.name(),
        }
    }
}

/// Result type for text-level operations.
pub type JsonResult<T> = Result<T, Error>;
