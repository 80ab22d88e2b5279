//! Evidence Accumulator - turns one response into dimension evidence.
//!
//! Everything is validated before the journey is touched, so a rejected
//! response leaves the journey exactly as it was.

use crate::domain::dimensions::SignalSet;
use crate::domain::journey::{Answer, Journey, JourneyError, Submission};

/// Applies responses to a journey's evidence ledger.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvidenceAccumulator;

impl EvidenceAccumulator {
    pub fn new() -> Self {
        Self
    }

    /// Applies one submission. Counts exactly one turn on success.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the journey is finished
    /// - `InvalidResponse` if no question is pending, the question id does not
    ///   match, the option is unknown, or any weight is invalid
    pub fn apply(&self, journey: &mut Journey, submission: Submission) -> Result<(), JourneyError> {
        let signals = self.resolve(journey, &submission)?;
        journey.accept_response(submission.response, signals.as_ref())
    }

    /// Validates a submission against the pending question and resolves the
    /// signals it contributes (`None` for a skip).
    pub fn resolve(
        &self,
        journey: &Journey,
        submission: &Submission,
    ) -> Result<Option<SignalSet>, JourneyError> {
        journey.ensure_active()?;

        let response = &submission.response;
        let question = journey
            .pending_question()
            .ok_or_else(|| JourneyError::invalid_response("no question is awaiting a response"))?;

        if response.question_id != question.id {
            return Err(JourneyError::invalid_response(format!(
                "response is for question {}, but {} is pending",
                response.question_id, question.id
            )));
        }

        if !response.elapsed_seconds.is_finite() || response.elapsed_seconds < 0.0 {
            return Err(JourneyError::invalid_response(
                "elapsed_seconds must be a non-negative number",
            ));
        }

        match &response.answer {
            Answer::Skipped => Ok(None),
            Answer::Selected { option_id } => {
                let option = question.option(option_id).ok_or_else(|| {
                    JourneyError::invalid_response(format!("unknown option '{}'", option_id))
                })?;
                Ok(Some(option.weights.validate()?))
            }
            Answer::FreeText { text } => {
                if !question.allows_free_text {
                    return Err(JourneyError::invalid_response(
                        "this question does not accept free text",
                    ));
                }
                if text.trim().is_empty() {
                    return Err(JourneyError::invalid_response("free text is empty"));
                }
                let weights = submission.analyzed.as_ref().ok_or_else(|| {
                    JourneyError::invalid_response("free text has not been analyzed")
                })?;
                Ok(Some(weights.validate()?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dimensions::{Motivator, RiasecAxis, WeightMap};
    use crate::domain::foundation::{JourneyId, QuestionId};
    use crate::domain::journey::{AnswerOption, EngineState, Question, Response};

    fn question() -> Question {
        Question {
            id: QuestionId::new(),
            number: 1,
            prompt: "Saturday project?".to_string(),
            options: vec![
                AnswerOption {
                    id: "a".to_string(),
                    text: "Build a shed".to_string(),
                    weights: WeightMap::new()
                        .with_axis("R", 0.9)
                        .with_axis("C", 0.3)
                        .with_motivator("autonomy", 0.5)
                        .with_interest("construction", Some("carpentry"), 0.7),
                },
                AnswerOption {
                    id: "bad".to_string(),
                    text: "Broken".to_string(),
                    weights: WeightMap::new().with_axis("R", 1.5),
                },
            ],
            allows_free_text: true,
            focus: None,
            is_clarification: false,
        }
    }

    fn journey_with(q: &Question) -> Journey {
        let mut journey = Journey::start(JourneyId::new());
        journey.issue_question(q.clone()).unwrap();
        journey
    }

    #[test]
    fn selected_option_contributes_to_every_named_dimension() {
        let q = question();
        let mut journey = journey_with(&q);

        EvidenceAccumulator
            .apply(&mut journey, Submission::new(Response::selected(q.id, "a")))
            .unwrap();

        let ledger = journey.evidence();
        assert_eq!(ledger.axis(RiasecAxis::Realistic).weight_count(), 1);
        assert_eq!(ledger.axis(RiasecAxis::Conventional).weight_count(), 1);
        assert_eq!(ledger.axis(RiasecAxis::Social).weight_count(), 0);
        assert_eq!(ledger.motivator(Motivator::Autonomy).weight_count(), 1);
        assert_eq!(ledger.interests().len(), 1);
        assert_eq!(journey.turn_count(), 1);
        assert_eq!(journey.skip_count(), 0);
        assert_eq!(journey.engine_state(), EngineState::Evaluating);
    }

    #[test]
    fn skip_counts_turn_without_evidence() {
        let q = question();
        let mut journey = journey_with(&q);

        EvidenceAccumulator
            .apply(&mut journey, Submission::new(Response::skipped(q.id)))
            .unwrap();

        assert_eq!(journey.turn_count(), 1);
        assert_eq!(journey.skip_count(), 1);
        assert!(journey.evidence().axis(RiasecAxis::Realistic).is_empty());
    }

    #[test]
    fn mismatched_question_is_rejected_without_mutation() {
        let q = question();
        let mut journey = journey_with(&q);
        let before = journey.clone();

        let result = EvidenceAccumulator.apply(
            &mut journey,
            Submission::new(Response::selected(QuestionId::new(), "a")),
        );

        assert!(matches!(result, Err(JourneyError::InvalidResponse(_))));
        assert_eq!(journey, before);
    }

    #[test]
    fn out_of_range_weights_are_rejected() {
        let q = question();
        let mut journey = journey_with(&q);
        let result =
            EvidenceAccumulator.apply(&mut journey, Submission::new(Response::selected(q.id, "bad")));
        assert!(matches!(result, Err(JourneyError::InvalidResponse(_))));
        assert_eq!(journey.turn_count(), 0);
    }

    #[test]
    fn unknown_option_is_rejected() {
        let q = question();
        let journey = journey_with(&q);
        let result =
            EvidenceAccumulator.resolve(&journey, &Submission::new(Response::selected(q.id, "z")));
        assert!(matches!(result, Err(JourneyError::InvalidResponse(_))));
    }

    #[test]
    fn no_pending_question_is_invalid_response() {
        let journey = Journey::start(JourneyId::new());
        let result = EvidenceAccumulator.resolve(
            &journey,
            &Submission::new(Response::skipped(QuestionId::new())),
        );
        assert!(matches!(result, Err(JourneyError::InvalidResponse(_))));
    }

    #[test]
    fn free_text_uses_analyzed_weights() {
        let q = question();
        let mut journey = journey_with(&q);

        EvidenceAccumulator
            .apply(
                &mut journey,
                Submission::with_analysis(
                    Response::free_text(q.id, "I like helping people"),
                    WeightMap::new().with_axis("S", 0.8),
                ),
            )
            .unwrap();

        assert_eq!(journey.evidence().axis(RiasecAxis::Social).weight_count(), 1);
    }

    #[test]
    fn free_text_without_analysis_is_rejected() {
        let q = question();
        let journey = journey_with(&q);
        let result = EvidenceAccumulator
            .resolve(&journey, &Submission::new(Response::free_text(q.id, "hello")));
        assert!(matches!(result, Err(JourneyError::InvalidResponse(_))));
    }

    #[test]
    fn negative_elapsed_time_is_rejected() {
        let q = question();
        let journey = journey_with(&q);
        let result = EvidenceAccumulator.resolve(
            &journey,
            &Submission::new(Response::skipped(q.id).with_elapsed(-1.0)),
        );
        assert!(matches!(result, Err(JourneyError::InvalidResponse(_))));
    }

    #[test]
    fn finished_journey_is_invalid_state() {
        let q = question();
        let mut journey = journey_with(&q);
        journey.abandon();
        let result =
            EvidenceAccumulator.resolve(&journey, &Submission::new(Response::skipped(q.id)));
        assert!(matches!(result, Err(JourneyError::InvalidState(_))));
    }
}
