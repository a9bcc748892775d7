//! Payload schema validation
//!
//! Shape checks over decoded JSON before any typed extraction. The review
//! API is not versioned, so the watcher verifies field presence and type on
//! every poll and reports exactly which field broke instead of surfacing a
//! generic decode failure.

use serde_json::{Map, Value};

use crate::domain::{Homework, ReviewFeed};
use crate::error::{Result, ValidationError};

/// Expected semantic type of a required field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A JSON array
    Sequence,
    /// A JSON integer
    Integer,
    /// A JSON string
    Text,
}

impl FieldKind {
    /// Human-readable name used in type errors
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::Integer => "integer",
            Self::Text => "text",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Sequence => value.is_array(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Text => value.is_string(),
        }
    }
}

/// Required fields of the top-level status feed
const FEED_FIELDS: &[(&str, FieldKind)] = &[
    ("homeworks", FieldKind::Sequence),
    ("current_date", FieldKind::Integer),
];

/// Required fields of one homework record
const HOMEWORK_FIELDS: &[(&str, FieldKind)] = &[
    ("status", FieldKind::Text),
    ("homework_name", FieldKind::Text),
];

/// Verifies that `value` is an object carrying every required field with the
/// expected type
///
/// Returns the object's map on success so callers can extract fields without
/// re-checking. Errors name the missing field or the field and expected type.
pub fn require_fields<'a>(
    value: &'a Value,
    fields: &[(&str, FieldKind)],
) -> Result<&'a Map<String, Value>> {
    let object = value.as_object().ok_or(ValidationError::NotAnObject)?;

    for (name, kind) in fields {
        let field = object
            .get(*name)
            .ok_or_else(|| ValidationError::MissingField(name.to_string()))?;
        if !kind.matches(field) {
            return Err(ValidationError::wrong_type(*name, kind.name()));
        }
    }

    Ok(object)
}

/// Validates a full API response and extracts the typed feed
///
/// Checks the top-level schema, then every homework record, including the
/// verdict-table lookup for its status.
pub fn check_feed(value: &Value) -> Result<ReviewFeed> {
    let object = require_fields(value, FEED_FIELDS)?;

    let current_date = object
        .get("current_date")
        .and_then(Value::as_i64)
        .ok_or_else(|| ValidationError::wrong_type("current_date", FieldKind::Integer.name()))?;

    let homeworks = object
        .get("homeworks")
        .and_then(Value::as_array)
        .ok_or_else(|| ValidationError::wrong_type("homeworks", FieldKind::Sequence.name()))?
        .iter()
        .map(check_homework)
        .collect::<Result<Vec<_>>>()?;

    Ok(ReviewFeed {
        homeworks,
        current_date,
    })
}

/// Validates one homework record and maps its status through the verdict table
pub fn check_homework(value: &Value) -> Result<Homework> {
    let object = require_fields(value, HOMEWORK_FIELDS)?;

    let status = object
        .get("status")
        .and_then(Value::as_str)
        .ok_or_else(|| ValidationError::wrong_type("status", FieldKind::Text.name()))?
        .parse()?;

    let homework_name = object
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or_else(|| ValidationError::wrong_type("homework_name", FieldKind::Text.name()))?
        .to_string();

    Ok(Homework {
        homework_name,
        status,
    })
}
