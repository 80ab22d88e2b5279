//! Assessment module - the pure per-turn services.
//!
//! - `EvidenceAccumulator` - applies a response to the evidence ledger
//! - `ConfidenceScorer` - recomputes confidence from evidence
//! - `DecisionEngine` - chooses continue, clarify, complete or save_partial
//! - `ProfileSynthesizer` - builds the final profile
//!
//! `AssessmentPipeline` chains the first three into one all-or-nothing turn.

mod accumulator;
mod decision;
mod policy;
mod scorer;
mod synthesizer;

pub use accumulator::EvidenceAccumulator;
pub use decision::{Decision, DecisionEngine, DecisionType};
pub use policy::DecisionPolicy;
pub use scorer::{AxisScores, ConfidenceScorer, ConfidenceSnapshot, ScoringParameters};
pub use synthesizer::{
    InterestCategory, InterestProfile, MotivatorProfile, Profile, ProfileSynthesizer,
    RankedMotivator, RiasecProfile,
};

use crate::domain::journey::{Journey, JourneyError, Submission};

/// Result of one evaluated turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The journey as it should be committed.
    pub journey: Journey,
    pub snapshot: ConfidenceSnapshot,
    pub decision: Decision,
}

/// Runs apply, score and decide as a single transaction.
#[derive(Debug, Clone, Default)]
pub struct AssessmentPipeline {
    accumulator: EvidenceAccumulator,
    scorer: ConfidenceScorer,
    engine: DecisionEngine,
    synthesizer: ProfileSynthesizer,
}

impl AssessmentPipeline {
    pub fn new(params: ScoringParameters, policy: DecisionPolicy) -> Self {
        let scorer = ConfidenceScorer::new(params, policy.clone());
        Self {
            accumulator: EvidenceAccumulator::new(),
            synthesizer: ProfileSynthesizer::new(scorer.clone()),
            scorer,
            engine: DecisionEngine::new(policy),
        }
    }

    /// Evaluates one turn against a copy of `journey`.
    ///
    /// The input is never modified; on error nothing needs rolling back.
    pub fn evaluate_turn(
        &self,
        journey: &Journey,
        submission: Submission,
    ) -> Result<TurnOutcome, JourneyError> {
        let mut next = journey.clone();
        self.accumulator.apply(&mut next, submission)?;

        let snapshot = self.scorer.score(&next);
        let decision = self.engine.decide(&next, &snapshot)?;
        next.record_evaluation(snapshot.clone(), decision.clone())?;

        Ok(TurnOutcome {
            journey: next,
            snapshot,
            decision,
        })
    }

    /// Current confidence of a journey in any status.
    pub fn snapshot(&self, journey: &Journey) -> ConfidenceSnapshot {
        self.scorer.score(journey)
    }

    pub fn synthesize(&self, journey: &Journey) -> Result<Profile, JourneyError> {
        self.synthesizer.synthesize(journey)
    }

    pub fn scorer(&self) -> &ConfidenceScorer {
        &self.scorer
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dimensions::{DimensionKey, Motivator, RiasecAxis, WeightMap};
    use crate::domain::foundation::{JourneyId, QuestionId};
    use crate::domain::journey::{
        AnswerOption, EngineState, JourneyStatus, Question, Response,
    };

    const MOTIVATORS: [&str; 6] = ["growth", "autonomy", "purpose", "learning", "stability", "creativity"];
    const INTERESTS: [(&str, &str); 4] = [
        ("technology", "software"),
        ("science", "research"),
        ("arts", "design"),
        ("business", "strategy"),
    ];

    /// Answer `n` (1-based): strong Investigative for six answers, then an even low spread.
    fn weights(n: usize) -> WeightMap {
        let mut map = WeightMap::new();
        for axis in RiasecAxis::ALL {
            let w = match (n <= 6, axis) {
                (true, RiasecAxis::Investigative) => 0.9,
                (true, _) => 0.1,
                (false, _) => 0.2,
            };
            map = map.with_axis(axis.name(), w);
        }
        let (category, specific) = INTERESTS[(n - 1) % INTERESTS.len()];
        map.with_motivator(MOTIVATORS[(n - 1) % MOTIVATORS.len()], 0.6)
            .with_interest(category, Some(specific), 0.5)
    }

    fn issue(journey: &mut Journey, n: usize) -> QuestionId {
        let id = QuestionId::new();
        journey
            .issue_question(Question {
                id,
                number: journey.turn_count() + 1,
                prompt: format!("Scenario {}", n),
                options: vec![AnswerOption {
                    id: "a".to_string(),
                    text: "Option A".to_string(),
                    weights: weights(n),
                }],
                allows_free_text: false,
                focus: None,
                is_clarification: false,
            })
            .unwrap();
        id
    }

    /// Drives a journey until a terminal verdict, skipping the given turns.
    fn run(pipeline: &AssessmentPipeline, skip_turns: &[u32]) -> (Journey, Vec<Decision>) {
        let mut journey = Journey::start(JourneyId::new());
        let mut answered = 0;
        let mut decisions = Vec::new();
        while !journey.is_finished() {
            let turn = journey.turn_count() + 1;
            let response = if skip_turns.contains(&turn) {
                let qid = issue(&mut journey, answered + 1);
                Response::skipped(qid)
            } else {
                answered += 1;
                let qid = issue(&mut journey, answered);
                Response::selected(qid, "a")
            };
            let outcome = pipeline
                .evaluate_turn(&journey, Submission::new(response))
                .unwrap();
            decisions.push(outcome.decision);
            journey = outcome.journey;
        }
        (journey, decisions)
    }

    #[test]
    fn strong_single_axis_completes_at_turn_fifteen() {
        let pipeline = AssessmentPipeline::default();
        let (journey, decisions) = run(&pipeline, &[]);

        assert_eq!(journey.turn_count(), 15);
        assert_eq!(journey.status(), JourneyStatus::Completed);
        assert_eq!(journey.engine_state(), EngineState::Complete);
        let last = decisions.last().unwrap();
        assert_eq!(last.decision, DecisionType::Complete);
        assert!(last.overall_confidence.value() >= 75.0);
        for d in &decisions[..14] {
            assert_eq!(d.decision, DecisionType::Continue);
        }

        let profile = pipeline.synthesize(&journey).unwrap();
        assert_eq!(profile.riasec.riasec_code, "IRA");
        assert!(profile.riasec.riasec_code.starts_with('I'));
    }

    #[test]
    fn history_has_one_entry_per_turn() {
        let pipeline = AssessmentPipeline::default();
        let (journey, _) = run(&pipeline, &[]);
        assert_eq!(journey.confidence_history().len(), 15);
        assert_eq!(journey.decisions().len(), 15);
        assert_eq!(journey.responses().len(), 15);
    }

    #[test]
    fn three_early_skips_force_clarification_and_partial_save() {
        let pipeline = AssessmentPipeline::default();
        let (journey, decisions) = run(&pipeline, &[2, 3, 5]);

        assert_eq!(journey.skip_count(), 3);
        let at_fifteen = &decisions[14];
        assert_eq!(at_fifteen.decision, DecisionType::Clarify);
        assert_eq!(
            at_fifteen.next_focus,
            Some(DimensionKey::Axis(RiasecAxis::Realistic))
        );
        assert_eq!(decisions.len(), 18);
        assert_eq!(decisions[17].decision, DecisionType::SavePartial);
        assert_eq!(journey.status(), JourneyStatus::Abandoned);
    }

    #[test]
    fn rejected_turn_leaves_journey_untouched() {
        let pipeline = AssessmentPipeline::default();
        let mut journey = Journey::start(JourneyId::new());
        issue(&mut journey, 1);
        let before = journey.clone();

        let result = pipeline.evaluate_turn(
            &journey,
            Submission::new(Response::selected(QuestionId::new(), "a")),
        );

        assert!(result.is_err());
        assert_eq!(journey, before);
    }

    #[test]
    fn synthesize_requires_completed_journey() {
        let pipeline = AssessmentPipeline::default();
        let journey = Journey::start(JourneyId::new());
        assert!(matches!(
            pipeline.synthesize(&journey),
            Err(JourneyError::InvalidState(_))
        ));
    }

    #[test]
    fn synthesize_is_byte_identical_on_repeat() {
        let pipeline = AssessmentPipeline::default();
        let (journey, _) = run(&pipeline, &[]);

        let first = serde_json::to_string(&pipeline.synthesize(&journey).unwrap()).unwrap();
        let second = serde_json::to_string(&pipeline.synthesize(&journey).unwrap()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn profile_partitions_motivators_relative_to_strongest() {
        let pipeline = AssessmentPipeline::default();
        let (journey, _) = run(&pipeline, &[]);
        let profile = pipeline.synthesize(&journey).unwrap();

        // 15 answers over 6 rotating motivators: three get 3 mentions, three get 2.
        let top: Vec<Motivator> = profile.motivators.top.iter().map(|m| m.motivator).collect();
        assert_eq!(
            top,
            vec![Motivator::Growth, Motivator::Purpose, Motivator::Autonomy]
        );
        assert_eq!(profile.motivators.moderate.len(), 3);
        assert!(profile.motivators.low.is_empty());
        assert_eq!(profile.questions_answered, 15);
        assert_eq!(profile.turn_count, 15);
    }

    #[test]
    fn profile_groups_interests_by_category() {
        let pipeline = AssessmentPipeline::default();
        let (journey, _) = run(&pipeline, &[]);
        let profile = pipeline.synthesize(&journey).unwrap();

        // 15 answers over 4 categories: 4,4,4,3 mentions.
        let primary: Vec<&str> = profile
            .interests
            .primary
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(primary, vec!["arts", "science", "technology", "business"]);
        assert!(profile.interests.secondary.is_empty());
        assert_eq!(profile.interests.primary[0].specifics, vec!["design".to_string()]);
    }

    #[test]
    fn snapshot_matches_last_history_entry() {
        let pipeline = AssessmentPipeline::default();
        let (journey, _) = run(&pipeline, &[]);
        assert_eq!(
            Some(&pipeline.snapshot(&journey)),
            journey.confidence_history().last()
        );
    }
}
