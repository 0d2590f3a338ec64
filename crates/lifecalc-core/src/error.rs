use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifeCalcError {
    #[error("Empty input: {field}")]
    EmptyInput { field: String },

    #[error("Not a number: {field} = {value:?}")]
    NotANumber { field: String, value: String },

    #[error("Out of range: {field} — {reason}")]
    OutOfRange { field: String, reason: String },

    #[error("Invalid date: {field} = {value:?}")]
    InvalidDate { field: String, value: String },

    #[error("Date in the future: {field} ({date})")]
    FutureDate { field: String, date: String },

    #[error("Ordering violation: {earlier} must come before {later}")]
    OrderingViolation { earlier: String, later: String },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Discriminant of [`LifeCalcError`], cheap to copy and match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyInput,
    NotANumber,
    OutOfRange,
    InvalidDate,
    FutureDate,
    OrderingViolation,
    InvalidInput,
    Serialization,
}

impl LifeCalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LifeCalcError::EmptyInput { .. } => ErrorKind::EmptyInput,
            LifeCalcError::NotANumber { .. } => ErrorKind::NotANumber,
            LifeCalcError::OutOfRange { .. } => ErrorKind::OutOfRange,
            LifeCalcError::InvalidDate { .. } => ErrorKind::InvalidDate,
            LifeCalcError::FutureDate { .. } => ErrorKind::FutureDate,
            LifeCalcError::OrderingViolation { .. } => ErrorKind::OrderingViolation,
            LifeCalcError::InvalidInput { .. } => ErrorKind::InvalidInput,
            LifeCalcError::SerializationError(_) => ErrorKind::Serialization,
        }
    }

    /// The form field the error refers to, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            LifeCalcError::EmptyInput { field }
            | LifeCalcError::NotANumber { field, .. }
            | LifeCalcError::OutOfRange { field, .. }
            | LifeCalcError::InvalidDate { field, .. }
            | LifeCalcError::FutureDate { field, .. }
            | LifeCalcError::InvalidInput { field, .. } => Some(field),
            LifeCalcError::OrderingViolation { later, .. } => Some(later),
            LifeCalcError::SerializationError(_) => None,
        }
    }

    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        LifeCalcError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// A figure derived from `field` left the representable decimal range.
    pub(crate) fn overflow(field: &str) -> Self {
        Self::invalid(field, "Arithmetic overflow; inputs are out of range")
    }

    /// Rename an engine-level `from` field to the form field a caller fed it.
    pub(crate) fn renamed(self, from: &str, to: &str) -> Self {
        match self {
            LifeCalcError::InvalidInput { field, reason } if field == from => {
                Self::invalid(to, reason)
            }
            LifeCalcError::OutOfRange { field, reason } if field == from => {
                Self::out_of_range(to, reason)
            }
            other => other,
        }
    }

    pub(crate) fn out_of_range(field: &str, reason: impl Into<String>) -> Self {
        LifeCalcError::OutOfRange {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for LifeCalcError {
    fn from(e: serde_json::Error) -> Self {
        LifeCalcError::SerializationError(e.to_string())
    }
}
