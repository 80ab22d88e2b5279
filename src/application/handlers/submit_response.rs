//! SubmitResponseHandler - runs one full turn for a journey.
//!
//! The turn is evaluated against a copy of the stored journey and committed
//! with a single save, so a rejected response never changes what is stored.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::JourneyLocks;
use crate::domain::assessment::{AssessmentPipeline, ConfidenceSnapshot, Decision, TurnOutcome};
use crate::domain::foundation::{EventEnvelope, EventId, JourneyId};
use crate::domain::journey::{
    Answer, Journey, JourneyCompleted, JourneyError, JourneyStatus, Response, Submission,
};
use crate::ports::{EventPublisher, FreeTextAnalyzer, JourneyStore};

use super::load_journey;

/// Command to submit a response to the pending question.
#[derive(Debug, Clone)]
pub struct SubmitResponseCommand {
    pub journey_id: JourneyId,
    pub response: Response,
}

/// Result of a committed turn.
#[derive(Debug, Clone)]
pub struct SubmitResponseResult {
    pub decision: Decision,
    pub snapshot: ConfidenceSnapshot,
    pub status: JourneyStatus,
}

/// Handler for submitting responses.
pub struct SubmitResponseHandler {
    store: Arc<dyn JourneyStore>,
    analyzer: Arc<dyn FreeTextAnalyzer>,
    publisher: Arc<dyn EventPublisher>,
    pipeline: Arc<AssessmentPipeline>,
    locks: Arc<JourneyLocks>,
}

impl SubmitResponseHandler {
    pub fn new(
        store: Arc<dyn JourneyStore>,
        analyzer: Arc<dyn FreeTextAnalyzer>,
        publisher: Arc<dyn EventPublisher>,
        pipeline: Arc<AssessmentPipeline>,
        locks: Arc<JourneyLocks>,
    ) -> Self {
        Self {
            store,
            analyzer,
            publisher,
            pipeline,
            locks,
        }
    }

    /// Applies the response, rescores and decides.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown journey
    /// - `InvalidState` if the journey is finished
    /// - `InvalidResponse` if no question is pending or the response does not
    ///   fit it
    /// - `ConcurrentModification` if another operation holds the journey
    /// - `Infrastructure` if the analyzer or store fails
    #[tracing::instrument(skip(self, cmd), fields(journey_id = %cmd.journey_id))]
    pub async fn handle(
        &self,
        cmd: SubmitResponseCommand,
    ) -> Result<SubmitResponseResult, JourneyError> {
        let _guard = self.locks.acquire(cmd.journey_id).await?;

        let journey = load_journey(self.store.as_ref(), &cmd.journey_id).await?;
        journey.ensure_active()?;

        let submission = self.prepare(&journey, cmd.response).await?;
        let TurnOutcome {
            journey,
            snapshot,
            decision,
        } = self.pipeline.evaluate_turn(&journey, submission).map_err(|e| {
            warn!(error = %e, "response rejected");
            e
        })?;

        self.store.save(&journey).await?;

        debug!(
            turn = decision.turn,
            overall_confidence = decision.overall_confidence.value(),
            decision = ?decision.decision,
            "turn evaluated"
        );

        if journey.status() == JourneyStatus::Completed {
            info!(
                turns = journey.turn_count(),
                overall_confidence = decision.overall_confidence.value(),
                "journey completed"
            );
            self.publish_completion(&journey).await;
        }

        Ok(SubmitResponseResult {
            decision,
            snapshot,
            status: journey.status(),
        })
    }

    /// Attaches analyzer weights to a free-text answer the pending question
    /// accepts. Anything else passes through for the accumulator to judge.
    async fn prepare(
        &self,
        journey: &Journey,
        response: Response,
    ) -> Result<Submission, JourneyError> {
        let question = match journey.pending_question() {
            Some(q) if q.id == response.question_id && q.allows_free_text => q,
            _ => return Ok(Submission::new(response)),
        };

        let text = match &response.answer {
            Answer::FreeText { text } if !text.trim().is_empty() => text.clone(),
            _ => return Ok(Submission::new(response)),
        };

        let weights = self.analyzer.analyze(&text, question).await?;
        Ok(Submission::with_analysis(response, weights))
    }

    async fn publish_completion(&self, journey: &Journey) {
        let riasec_code = match self.pipeline.synthesize(journey) {
            Ok(profile) => profile.riasec.riasec_code,
            Err(e) => {
                warn!(error = %e, "cannot build completion event");
                return;
            }
        };

        let event = JourneyCompleted {
            event_id: EventId::new(),
            journey_id: *journey.id(),
            riasec_code,
            overall_confidence: journey
                .confidence_at_completion()
                .map_or(0.0, |c| c.value()),
            turn_count: journey.turn_count(),
            completed_at: journey.completed_at().copied().unwrap_or_else(|| *journey.updated_at()),
        };

        let envelope = match EventEnvelope::from_event(&event) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(error = %e, "cannot serialize completion event");
                return;
            }
        };

        if let Err(e) = self.publisher.publish(envelope).await {
            warn!(error = %e, "failed to publish journey completion");
        }
    }
}
