//! Error types for daogen

use thiserror::Error;

use crate::value::Value;

/// Result type alias for daogen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by generated DAO implementations and sessions
#[derive(Error, Debug)]
pub enum Error {
    /// Type conversion error
    #[error("Type conversion error: expected {expected}, got {actual}")]
    TypeConversion {
        expected: &'static str,
        actual: String,
    },

    /// Column not found in row
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// NULL read into a non-optional type
    #[error("Unexpected NULL: expected {expected}")]
    UnexpectedNull { expected: &'static str },

    /// A single-entity query returned no rows
    #[error("Query returned no rows")]
    RowNotFound,

    /// Error reported by the session implementation
    #[error("Session error: {0}")]
    Session(String),
}

impl Error {
    pub(crate) fn conversion(expected: &'static str, actual: impl Into<String>) -> Self {
        Error::TypeConversion {
            expected,
            actual: actual.into(),
        }
    }

    /// Error for a value of the wrong kind
    pub(crate) fn mismatch(expected: &'static str, actual: &Value) -> Self {
        match actual {
            Value::Null => Error::UnexpectedNull { expected },
            other => Error::conversion(expected, other.type_name()),
        }
    }
}
