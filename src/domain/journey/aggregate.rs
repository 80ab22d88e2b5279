//! Journey aggregate entity.
//!
//! A journey is one assessment attempt. It threads evidence, confidence
//! history and decisions across turns and is mutated only by the engine.

use serde::{Deserialize, Serialize};

use super::{
    EngineState, EvidenceLedger, JourneyError, JourneyStatus, Question, Response, ResponseRecord,
};
use crate::domain::assessment::{ConfidenceSnapshot, Decision, DecisionType};
use crate::domain::dimensions::{SignalSet, WeightMap};
use crate::domain::foundation::{Confidence, JourneyId, StateMachine, Timestamp};

/// Journey aggregate - one assessment attempt.
///
/// # Invariants
///
/// - `turn_count >= skip_count`
/// - `turn_count` and `skip_count` never decrease
/// - `status` only moves forward
/// - `confidence_history` and `decisions` are append-only, one entry per turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    id: JourneyId,
    status: JourneyStatus,
    engine_state: EngineState,
    turn_count: u32,
    skip_count: u32,
    clarifications_used: u32,
    evidence: EvidenceLedger,
    pending_question: Option<Question>,
    responses: Vec<ResponseRecord>,
    confidence_history: Vec<ConfidenceSnapshot>,
    decisions: Vec<Decision>,
    started_at: Timestamp,
    updated_at: Timestamp,
    completed_at: Option<Timestamp>,
}

impl Journey {
    /// Starts a new journey: in progress, no turns, empty evidence.
    pub fn start(id: JourneyId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            status: JourneyStatus::InProgress,
            engine_state: EngineState::Continue,
            turn_count: 0,
            skip_count: 0,
            clarifications_used: 0,
            evidence: EvidenceLedger::new(),
            pending_question: None,
            responses: Vec::new(),
            confidence_history: Vec::new(),
            decisions: Vec::new(),
            started_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &JourneyId {
        &self.id
    }

    pub fn status(&self) -> JourneyStatus {
        self.status
    }

    pub fn engine_state(&self) -> EngineState {
        self.engine_state
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn skip_count(&self) -> u32 {
        self.skip_count
    }

    /// Turns that carried an answer.
    pub fn questions_answered(&self) -> u32 {
        self.turn_count - self.skip_count
    }

    pub fn clarifications_used(&self) -> u32 {
        self.clarifications_used
    }

    pub fn evidence(&self) -> &EvidenceLedger {
        &self.evidence
    }

    pub fn pending_question(&self) -> Option<&Question> {
        self.pending_question.as_ref()
    }

    pub fn responses(&self) -> &[ResponseRecord] {
        &self.responses
    }

    pub fn confidence_history(&self) -> &[ConfidenceSnapshot] {
        &self.confidence_history
    }

    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    pub fn last_decision(&self) -> Option<&Decision> {
        self.decisions.last()
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }

    /// Overall confidence recorded on the completing turn.
    pub fn confidence_at_completion(&self) -> Option<Confidence> {
        self.completed_at?;
        self.confidence_history.last().map(|s| s.overall_confidence)
    }

    /// True once the journey is completed or abandoned.
    pub fn is_finished(&self) -> bool {
        self.status.is_finished() || self.engine_state.is_terminal()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Fails with `InvalidState` if the journey no longer accepts changes.
    pub fn ensure_active(&self) -> Result<(), JourneyError> {
        if self.is_finished() {
            return Err(JourneyError::invalid_state(format!(
                "journey {} is {:?}",
                self.id, self.status
            )));
        }
        Ok(())
    }

    /// Records `question` as the one awaiting a response.
    ///
    /// Issuing from `Clarify` counts as a clarification turn.
    pub fn issue_question(&mut self, question: Question) -> Result<(), JourneyError> {
        self.ensure_active()?;
        if self.pending_question.is_some() {
            return Err(JourneyError::invalid_state(
                "a question is already awaiting a response",
            ));
        }

        let from = self.engine_state;
        self.engine_state = from
            .transition_to(EngineState::AwaitingResponse)
            .map_err(|e| JourneyError::invalid_state(e.to_string()))?;
        if from == EngineState::Clarify {
            self.clarifications_used += 1;
        }
        self.pending_question = Some(question);
        self.touch();
        Ok(())
    }

    /// Applies an already validated response. Counts exactly one turn.
    pub(crate) fn accept_response(
        &mut self,
        response: Response,
        signals: Option<&SignalSet>,
    ) -> Result<(), JourneyError> {
        self.engine_state = self
            .engine_state
            .transition_to(EngineState::Evaluating)
            .map_err(|e| JourneyError::invalid_state(e.to_string()))?;

        self.turn_count += 1;
        match signals {
            Some(signals) => self.evidence.record(signals),
            None => self.skip_count += 1,
        }

        self.responses.push(ResponseRecord {
            turn: self.turn_count,
            response,
            applied: signals.map(WeightMap::from),
            recorded_at: Timestamp::now(),
        });
        self.pending_question = None;
        self.touch();
        Ok(())
    }

    /// Commits the turn's snapshot and verdict, finalising the journey on a
    /// terminal verdict.
    pub(crate) fn record_evaluation(
        &mut self,
        snapshot: ConfidenceSnapshot,
        decision: Decision,
    ) -> Result<(), JourneyError> {
        let target = decision.decision.engine_state();
        self.engine_state = self
            .engine_state
            .transition_to(target)
            .map_err(|e| JourneyError::invalid_state(e.to_string()))?;

        match decision.decision {
            DecisionType::Complete => {
                self.status = self
                    .status
                    .transition_to(JourneyStatus::Completed)
                    .map_err(|e| JourneyError::invalid_state(e.to_string()))?;
                self.completed_at = Some(Timestamp::now());
            }
            DecisionType::SavePartial => {
                self.status = self
                    .status
                    .transition_to(JourneyStatus::Abandoned)
                    .map_err(|e| JourneyError::invalid_state(e.to_string()))?;
            }
            DecisionType::Continue | DecisionType::Clarify => {}
        }

        self.confidence_history.push(snapshot);
        self.decisions.push(decision);
        self.touch();
        Ok(())
    }

    /// Abandons the journey. Returns false when it was already finished.
    pub fn abandon(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.engine_state = EngineState::Abandoned;
        self.status = JourneyStatus::Abandoned;
        self.pending_question = None;
        self.touch();
        true
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
