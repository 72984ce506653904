//! Wizard error types.
//!
//! Structural misuse of the session (unknown steps, mismatched patches,
//! navigation on a closed session) is an error; a draft failing validation
//! is not. Validation outcomes travel in the transition results so the
//! host can re-prompt with field-level messages.

use thiserror::Error;

use rentora_types::error::RepositoryError;
use rentora_types::step::StepId;

/// Structural errors from session operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    #[error("step '{0}' is not part of this session's sequence")]
    UnknownStep(StepId),

    #[error("fields for step '{fields}' cannot be committed to step '{step}'")]
    PatchMismatch { step: StepId, fields: StepId },

    #[error("step index {index} is out of range for a sequence of {len} steps")]
    StepOutOfRange { index: usize, len: usize },

    #[error("step '{0}' has not been completed")]
    StepIncomplete(StepId),

    #[error("a submission is in flight; the session is locked")]
    SubmitInFlight,

    #[error("the session is closed: its listing was already submitted")]
    SessionClosed,

    #[error("draft is missing required field '{field}' for step '{step}'")]
    MissingField { step: StepId, field: &'static str },
}

/// Errors from service-level wizard operations.
#[derive(Debug, Error)]
pub enum WizardServiceError {
    #[error(transparent)]
    Session(#[from] WizardError),

    #[error("listing not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wizard_error_display() {
        let err = WizardError::PatchMismatch {
            step: StepId::Basics,
            fields: StepId::Location,
        };
        assert_eq!(
            err.to_string(),
            "fields for step 'location' cannot be committed to step 'basics'"
        );
    }

    #[test]
    fn test_missing_field_display() {
        let err = WizardError::MissingField {
            step: StepId::Financials,
            field: "rent",
        };
        assert!(err.to_string().contains("rent"));
        assert!(err.to_string().contains("financials"));
    }
}
