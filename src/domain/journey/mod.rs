//! Journey module - the aggregate threading an assessment across turns.

mod aggregate;
mod engine_state;
mod errors;
mod events;
mod evidence;
mod question;
mod response;
mod status;

pub use aggregate::Journey;
pub use engine_state::EngineState;
pub use errors::JourneyError;
pub use events::JourneyCompleted;
pub use evidence::{DimensionEvidence, EvidenceLedger, InterestEvidence};
pub use question::{AnswerOption, Question};
pub use response::{Answer, Response, ResponseRecord, Submission};
pub use status::JourneyStatus;
