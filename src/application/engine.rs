//! AssessmentEngine - the caller-facing entry point.
//!
//! Wires the handlers to one shared set of collaborators, one assessment
//! pipeline and one lock registry. Every collaborator is passed in
//! explicitly; the engine holds no global state.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::assessment::{
    AssessmentPipeline, ConfidenceSnapshot, Decision, DecisionPolicy, Profile, ScoringParameters,
};
use crate::domain::foundation::JourneyId;
use crate::domain::journey::{Journey, JourneyError, Question, Response};
use crate::ports::{EventPublisher, FreeTextAnalyzer, JourneyStore, QuestionSource};

use super::handlers::{
    AbandonJourneyCommand, AbandonJourneyHandler, GetProfileHandler, GetProfileQuery,
    GetSnapshotHandler, GetSnapshotQuery, PresentQuestionCommand, PresentQuestionHandler,
    StartJourneyCommand, StartJourneyHandler, SubmitResponseCommand, SubmitResponseHandler,
    SubmitResponseResult,
};
use super::JourneyLocks;

/// Collaborators the engine consumes.
#[derive(Clone)]
pub struct EngineDependencies {
    pub store: Arc<dyn JourneyStore>,
    pub questions: Arc<dyn QuestionSource>,
    pub analyzer: Arc<dyn FreeTextAnalyzer>,
    pub publisher: Arc<dyn EventPublisher>,
}

/// Tunables of the engine itself.
#[derive(Debug, Clone, Default)]
pub struct EngineSettings {
    pub scoring: ScoringParameters,
    pub policy: DecisionPolicy,
    /// How long a second operation on the same journey waits for the first.
    /// Zero fails immediately with `ConcurrentModification`.
    pub lock_wait: Duration,
}

/// Confidence-driven assessment engine.
pub struct AssessmentEngine {
    start: StartJourneyHandler,
    present: PresentQuestionHandler,
    submit: SubmitResponseHandler,
    abandon: AbandonJourneyHandler,
    snapshot: GetSnapshotHandler,
    profile: GetProfileHandler,
    locks: Arc<JourneyLocks>,
}

impl AssessmentEngine {
    pub fn new(deps: EngineDependencies, settings: EngineSettings) -> Self {
        let pipeline = Arc::new(AssessmentPipeline::new(settings.scoring, settings.policy));
        let locks = Arc::new(JourneyLocks::new(settings.lock_wait));

        Self {
            start: StartJourneyHandler::new(deps.store.clone()),
            present: PresentQuestionHandler::new(
                deps.store.clone(),
                deps.questions,
                pipeline.clone(),
                locks.clone(),
            ),
            submit: SubmitResponseHandler::new(
                deps.store.clone(),
                deps.analyzer,
                deps.publisher,
                pipeline.clone(),
                locks.clone(),
            ),
            abandon: AbandonJourneyHandler::new(deps.store.clone(), locks.clone()),
            snapshot: GetSnapshotHandler::new(deps.store.clone(), pipeline.clone()),
            profile: GetProfileHandler::new(deps.store, pipeline),
            locks,
        }
    }

    /// Engine with default scoring, policy and fail-fast locking.
    pub fn with_defaults(deps: EngineDependencies) -> Self {
        Self::new(deps, EngineSettings::default())
    }

    /// Starts a journey: in progress, no turns.
    pub async fn start_journey(&self) -> Result<Journey, JourneyError> {
        self.start.handle(StartJourneyCommand::default()).await
    }

    /// Starts a journey under a caller-chosen id.
    pub async fn start_journey_with_id(&self, id: JourneyId) -> Result<Journey, JourneyError> {
        self.start
            .handle(StartJourneyCommand {
                journey_id: Some(id),
            })
            .await
    }

    /// Returns the question awaiting a response, issuing one if needed.
    pub async fn present_question(&self, journey_id: JourneyId) -> Result<Question, JourneyError> {
        self.present
            .handle(PresentQuestionCommand { journey_id })
            .await
    }

    /// Runs one full turn and returns its decision.
    pub async fn submit_response(
        &self,
        journey_id: JourneyId,
        response: Response,
    ) -> Result<Decision, JourneyError> {
        Ok(self.submit_turn(journey_id, response).await?.decision)
    }

    /// Like `submit_response`, also returning the snapshot and new status.
    pub async fn submit_turn(
        &self,
        journey_id: JourneyId,
        response: Response,
    ) -> Result<SubmitResponseResult, JourneyError> {
        self.submit
            .handle(SubmitResponseCommand {
                journey_id,
                response,
            })
            .await
    }

    /// Abandons a journey. No-op if it is already finished.
    pub async fn abandon(&self, journey_id: JourneyId) -> Result<(), JourneyError> {
        self.abandon
            .handle(AbandonJourneyCommand { journey_id })
            .await
            .map(|_| ())
    }

    pub async fn get_snapshot(
        &self,
        journey_id: JourneyId,
    ) -> Result<ConfidenceSnapshot, JourneyError> {
        self.snapshot.handle(GetSnapshotQuery { journey_id }).await
    }

    /// Profile of a completed journey.
    pub async fn get_profile(&self, journey_id: JourneyId) -> Result<Profile, JourneyError> {
        self.profile.handle(GetProfileQuery { journey_id }).await
    }

    /// Journeys with an operation currently in flight.
    pub fn journeys_in_flight(&self) -> usize {
        self.locks.tracked()
    }
}
