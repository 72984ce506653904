use serde::Serialize;
use thiserror::Error;

use std::fmt;

/// One field-level validation failure, addressed to the step's own view.
///
/// `field` names the offending field within the step that produced it
/// ("title", "rent", "agency"); it is not a path into the full draft.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors from repository operations (used by trait definitions in rentora-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("listing not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("i/o error: {0}")]
    Io(String),
}
