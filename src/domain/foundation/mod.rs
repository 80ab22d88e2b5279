//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types and event plumbing
//! that form the vocabulary of the assessment domain.

mod confidence;
mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use confidence::Confidence;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{domain_event, DomainEvent, EventEnvelope, EventId};
pub use ids::{JourneyId, QuestionId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
