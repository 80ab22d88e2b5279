//! PresentQuestionHandler - obtains and records the next question.

use std::sync::Arc;

use tracing::debug;

use crate::application::JourneyLocks;
use crate::domain::assessment::AssessmentPipeline;
use crate::domain::foundation::JourneyId;
use crate::domain::journey::{EngineState, JourneyError, Question};
use crate::ports::{JourneyStore, QuestionRequest, QuestionSource};

use super::load_journey;

/// Command to present the next question of a journey.
#[derive(Debug, Clone)]
pub struct PresentQuestionCommand {
    pub journey_id: JourneyId,
}

/// Handler that asks the question source for the next question and records
/// it as pending.
pub struct PresentQuestionHandler {
    store: Arc<dyn JourneyStore>,
    questions: Arc<dyn QuestionSource>,
    pipeline: Arc<AssessmentPipeline>,
    locks: Arc<JourneyLocks>,
}

impl PresentQuestionHandler {
    pub fn new(
        store: Arc<dyn JourneyStore>,
        questions: Arc<dyn QuestionSource>,
        pipeline: Arc<AssessmentPipeline>,
        locks: Arc<JourneyLocks>,
    ) -> Self {
        Self {
            store,
            questions,
            pipeline,
            locks,
        }
    }

    /// Returns the pending question, issuing a new one if none is pending.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown journey
    /// - `InvalidState` once the journey is finished
    /// - `ConcurrentModification` if another operation holds the journey
    /// - `Infrastructure` if the question source or store fails
    #[tracing::instrument(skip(self, cmd), fields(journey_id = %cmd.journey_id))]
    pub async fn handle(&self, cmd: PresentQuestionCommand) -> Result<Question, JourneyError> {
        let _guard = self.locks.acquire(cmd.journey_id).await?;

        let mut journey = load_journey(self.store.as_ref(), &cmd.journey_id).await?;
        journey.ensure_active()?;

        if let Some(pending) = journey.pending_question() {
            debug!(question_id = %pending.id, "re-presenting pending question");
            return Ok(pending.clone());
        }

        let snapshot = self.pipeline.snapshot(&journey);
        let request = QuestionRequest {
            journey_id: cmd.journey_id,
            question_number: journey.turn_count() + 1,
            is_clarification: journey.engine_state() == EngineState::Clarify,
            focus: journey.last_decision().and_then(|d| d.next_focus),
            gaps: snapshot.gaps_remaining,
        };

        let mut question = self.questions.next_question(&request).await?;
        question.number = request.question_number;
        question.is_clarification = request.is_clarification;

        journey.issue_question(question.clone())?;
        self.store.save(&journey).await?;

        debug!(
            question_id = %question.id,
            number = question.number,
            clarification = question.is_clarification,
            "question presented"
        );
        Ok(question)
    }
}
