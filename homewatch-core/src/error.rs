//! Validation error types

use thiserror::Error;

/// Result type alias for validation operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors raised while checking the shape of an API payload
///
/// Structural errors (`NotAnObject`, `MissingField`) and type errors
/// (`WrongType`) name the offending field so the operator can see which part
/// of the payload broke. `UnknownStatus` is a domain error: the record is
/// well-formed but carries a status the verdict table does not document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The payload is not a JSON object
    #[error("response is not a JSON object")]
    NotAnObject,

    /// A required field is absent
    #[error("missing required field `{0}` in API response")]
    MissingField(String),

    /// A required field is present but has the wrong type
    #[error("field `{field}` is not of type {expected}")]
    WrongType {
        /// Name of the offending field
        field: String,
        /// The expected semantic type
        expected: &'static str,
    },

    /// A homework record carries an undocumented review status
    #[error("undocumented homework status \"{0}\"")]
    UnknownStatus(String),
}

impl ValidationError {
    /// Create a type error for a field
    pub fn wrong_type(field: impl Into<String>, expected: &'static str) -> Self {
        Self::WrongType {
            field: field.into(),
            expected,
        }
    }

    /// Check if this error is structural (missing field or not an object)
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::NotAnObject | Self::MissingField(_))
    }
}
