// nmlrs/src/error.rs

//! Error types for reading, parsing, binding and printing namelists.
//!
//! Errors fall into three families: stream-shape errors raised while pulling
//! a block off a reader, syntactic errors raised by the parser, and semantic
//! errors raised while binding a parsed block onto a schema. Each error maps
//! onto the integer codes used by the legacy surface through [`NamelistError::code`]
//! and [`NamelistError::status`].

use std::io;
use thiserror::Error;

/// Result type alias for namelist operations.
pub type Result<T> = std::result::Result<T, NamelistError>;

/// Status returned by binder entry points on failure.
pub const NAMELIST_ERROR: i64 = -1;

/// Status returned by binder entry points on success.
pub const NAMELIST_OK: i64 = 0;

/// Machine-actionable error codes of the reader and parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum ErrorCode {
    NoError = 0,
    BufferTooSmall = 1,
    ImproperConstruction = 2,
}

impl ErrorCode {
    /// The integer value of this code.
    pub fn as_i64(self) -> i64 {
        self as i64
    }
}

/// Errors that can occur when reading, parsing, binding or printing a namelist.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NamelistError {
    /// I/O error when reading or writing a stream
    #[error("I/O error: {0}")]
    Io(String),

    /// A block does not fit the caller-supplied capacity
    #[error("namelist block needs at least {required} characters but the buffer holds {capacity}")]
    BufferTooSmall { capacity: usize, required: usize },

    /// End of input reached before the closing `&end`
    #[error("namelist '{group}' is not terminated by &end")]
    UnterminatedBlock { group: String },

    /// Generic malformed block (missing `&`, missing group name, ...)
    #[error("improperly constructed namelist: {message}")]
    ImproperConstruction { message: String },

    /// Odd number of unescaped quote marks
    #[error("unbalanced quotes in namelist '{group}'")]
    UnbalancedQuotes { group: String },

    /// Text that should be an assignment has no `=`
    #[error("missing '=' after '{text}' in namelist '{group}'")]
    MissingAssignment { group: String, text: String },

    /// Empty or malformed entity name
    #[error("invalid entity name '{name}' in namelist '{group}'")]
    InvalidName { group: String, name: String },

    /// A subscript is not a non-negative integer, or brackets do not balance
    #[error("invalid subscript '{subscript}' on '{name}'")]
    InvalidSubscript { name: String, subscript: String },

    /// A repeat prefix is not a positive integer
    #[error("invalid repeat count in '{token}' for '{name}'")]
    InvalidRepeat { name: String, token: String },

    /// No schema matches the group name
    #[error("no namelist definition for group '{group}'")]
    GroupNotFound { group: String },

    /// Entity name is not declared in the schema
    #[error("unknown item '{item}' in namelist '{group}'")]
    UnknownItem { group: String, item: String },

    /// Entity gives a subscript count different from the item rank
    #[error("item '{item}' takes {expected} subscript(s) but {actual} were given")]
    SubscriptCount {
        item: String,
        expected: usize,
        actual: usize,
    },

    /// A subscript is not below its dimension
    #[error("subscript {subscript} out of range for dimension {axis} (size {dimension}) of item '{item}'")]
    SubscriptOutOfRange {
        item: String,
        axis: usize,
        subscript: usize,
        dimension: usize,
    },

    /// Entity supplies more slots than the item holds from its starting offset
    #[error("too many values for item '{item}': {supplied} slot(s) from offset {offset}, capacity {capacity}")]
    TooManyValues {
        item: String,
        offset: usize,
        supplied: usize,
        capacity: usize,
    },

    /// Literal cannot be decoded as the item's type
    #[error("invalid value '{value}' for item '{item}', expected {expected_type}")]
    InvalidValue {
        item: String,
        value: String,
        expected_type: String,
    },

    /// Two items with one name in a schema
    #[error("duplicate item '{item}' in namelist '{group}'")]
    Duplicate { group: String, item: String },

    /// Item default does not cover its declared shape
    #[error("item '{item}' declares {expected} slot(s) but its default holds {actual}")]
    DimensionMismatch {
        item: String,
        expected: usize,
        actual: usize,
    },

    /// Serialization error
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization error
    #[cfg(feature = "yaml")]
    #[error("YAML error: {0}")]
    Yaml(String),
}

impl From<io::Error> for NamelistError {
    fn from(err: io::Error) -> Self {
        NamelistError::Io(err.to_string())
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Error> for NamelistError {
    fn from(err: serde_json::Error) -> Self {
        NamelistError::Json(err.to_string())
    }
}

#[cfg(feature = "yaml")]
impl From<serde_yaml::Error> for NamelistError {
    fn from(err: serde_yaml::Error) -> Self {
        NamelistError::Yaml(err.to_string())
    }
}

impl NamelistError {
    /// Create a new improper construction error.
    pub fn improper<S: Into<String>>(message: S) -> Self {
        NamelistError::ImproperConstruction {
            message: message.into(),
        }
    }

    /// Create a new invalid subscript error.
    pub fn invalid_subscript<S: Into<String>>(name: S, subscript: S) -> Self {
        NamelistError::InvalidSubscript {
            name: name.into(),
            subscript: subscript.into(),
        }
    }

    /// Create a new invalid repeat error.
    pub fn invalid_repeat<S: Into<String>>(name: S, token: S) -> Self {
        NamelistError::InvalidRepeat {
            name: name.into(),
            token: token.into(),
        }
    }

    /// Create a new invalid value error.
    pub fn invalid_value<S: Into<String>>(item: S, value: S, expected_type: S) -> Self {
        NamelistError::InvalidValue {
            item: item.into(),
            value: value.into(),
            expected_type: expected_type.into(),
        }
    }

    /// Create a new unknown item error.
    pub fn unknown_item<S: Into<String>>(group: S, item: S) -> Self {
        NamelistError::UnknownItem {
            group: group.into(),
            item: item.into(),
        }
    }

    /// The reader/parser error code for this error.
    ///
    /// Only a capacity overflow maps to `BufferTooSmall`; everything else is
    /// an improperly constructed namelist from the caller's point of view.
    pub fn code(&self) -> ErrorCode {
        match self {
            NamelistError::BufferTooSmall { .. } => ErrorCode::BufferTooSmall,
            _ => ErrorCode::ImproperConstruction,
        }
    }

    /// The binder status for this error.
    pub fn status(&self) -> i64 {
        NAMELIST_ERROR
    }

    /// Get the error category for logging purposes.
    pub fn category(&self) -> &'static str {
        match self {
            NamelistError::Io(_) => "io",
            NamelistError::BufferTooSmall { .. } | NamelistError::UnterminatedBlock { .. } => {
                "stream"
            }
            NamelistError::ImproperConstruction { .. }
            | NamelistError::UnbalancedQuotes { .. }
            | NamelistError::MissingAssignment { .. }
            | NamelistError::InvalidName { .. }
            | NamelistError::InvalidSubscript { .. }
            | NamelistError::InvalidRepeat { .. } => "syntax",
            NamelistError::GroupNotFound { .. }
            | NamelistError::UnknownItem { .. }
            | NamelistError::SubscriptCount { .. }
            | NamelistError::SubscriptOutOfRange { .. }
            | NamelistError::TooManyValues { .. }
            | NamelistError::InvalidValue { .. }
            | NamelistError::Duplicate { .. }
            | NamelistError::DimensionMismatch { .. } => "semantic",
            #[cfg(feature = "json")]
            NamelistError::Json(_) => "json",
            #[cfg(feature = "yaml")]
            NamelistError::Yaml(_) => "yaml",
        }
    }
}

/// Integer status of a binder result: `NAMELIST_OK` or `NAMELIST_ERROR`.
pub fn status_of<T>(result: &Result<T>) -> i64 {
    match result {
        Ok(_) => NAMELIST_OK,
        Err(err) => err.status(),
    }
}
