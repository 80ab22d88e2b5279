//! Journey-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, JourneyId, ValidationError};

/// Errors surfaced by journey operations.
///
/// Every variant is recoverable from the engine's point of view: a rejected
/// operation leaves the previously committed journey untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JourneyError {
    /// Malformed response or one that does not match the pending question.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Operation not allowed in the journey's current state.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Another turn for the same journey is in flight.
    #[error("Journey {0} is being modified concurrently")]
    ConcurrentModification(JourneyId),

    /// No journey with this id.
    #[error("Journey not found: {0}")]
    NotFound(JourneyId),

    /// A collaborator (store, question source, analyzer) failed.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl JourneyError {
    pub fn invalid_response(message: impl Into<String>) -> Self {
        JourneyError::InvalidResponse(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        JourneyError::InvalidState(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        JourneyError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            JourneyError::InvalidResponse(_) => ErrorCode::InvalidResponse,
            JourneyError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            JourneyError::ConcurrentModification(_) => ErrorCode::ConcurrentModification,
            JourneyError::NotFound(_) => ErrorCode::JourneyNotFound,
            JourneyError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    /// True for errors the caller may resolve by retrying the same call.
    pub fn is_retryable(&self) -> bool {
        matches!(self, JourneyError::ConcurrentModification(_))
    }
}

impl From<ValidationError> for JourneyError {
    fn from(err: ValidationError) -> Self {
        JourneyError::InvalidResponse(err.to_string())
    }
}

impl From<DomainError> for JourneyError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::InvalidResponse => {
                JourneyError::InvalidResponse(err.message)
            }
            ErrorCode::InvalidStateTransition | ErrorCode::JourneyTerminal => {
                JourneyError::InvalidState(err.message)
            }
            ErrorCode::JourneyNotFound => match err
                .details
                .get("journey_id")
                .and_then(|id| id.parse::<JourneyId>().ok())
            {
                Some(id) => JourneyError::NotFound(id),
                None => JourneyError::Infrastructure(err.to_string()),
            },
            _ => JourneyError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_per_variant() {
        let id = JourneyId::new();
        assert_eq!(
            JourneyError::invalid_response("x").code(),
            ErrorCode::InvalidResponse
        );
        assert_eq!(
            JourneyError::invalid_state("x").code(),
            ErrorCode::InvalidStateTransition
        );
        assert_eq!(
            JourneyError::ConcurrentModification(id).code(),
            ErrorCode::ConcurrentModification
        );
        assert_eq!(JourneyError::NotFound(id).code(), ErrorCode::JourneyNotFound);
    }

    #[test]
    fn only_contention_is_retryable() {
        assert!(JourneyError::ConcurrentModification(JourneyId::new()).is_retryable());
        assert!(!JourneyError::invalid_state("done").is_retryable());
    }

    #[test]
    fn storage_failures_become_infrastructure() {
        let err: JourneyError = DomainError::new(ErrorCode::StorageError, "disk full").into();
        assert!(matches!(err, JourneyError::Infrastructure(msg) if msg.contains("disk full")));
    }

    #[test]
    fn not_found_keeps_journey_id_from_details() {
        let id = JourneyId::new();
        let err: JourneyError = DomainError::new(ErrorCode::JourneyNotFound, "missing")
            .with_detail("journey_id", id.to_string())
            .into();
        assert_eq!(err, JourneyError::NotFound(id));
    }

    #[test]
    fn validation_errors_become_invalid_response() {
        let err: JourneyError = ValidationError::out_of_range("riasec.R", 0.0, 1.0, 1.5).into();
        assert!(matches!(err, JourneyError::InvalidResponse(_)));
    }
}
