//! Application layer - handlers, locking and the engine facade.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The domain stays synchronous; everything that awaits a collaborator
//! lives here.

mod engine;
pub mod handlers;
mod journey_locks;

pub use engine::{AssessmentEngine, EngineDependencies, EngineSettings};
pub use handlers::{
    AbandonJourneyCommand, AbandonJourneyHandler, GetProfileHandler, GetProfileQuery,
    GetSnapshotHandler, GetSnapshotQuery, PresentQuestionCommand, PresentQuestionHandler,
    StartJourneyCommand, StartJourneyHandler, SubmitResponseCommand, SubmitResponseHandler,
    SubmitResponseResult,
};
pub use journey_locks::{JourneyGuard, JourneyLocks};
