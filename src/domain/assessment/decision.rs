//! Decision Engine - turns confidence and turn metadata into a verdict.

use serde::{Deserialize, Serialize};

use super::{ConfidenceSnapshot, DecisionPolicy};
use crate::domain::dimensions::{DimensionKey, RiasecAxis};
use crate::domain::foundation::Confidence;
use crate::domain::journey::{EngineState, Journey, JourneyError};

/// The verdict for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionType {
    Continue,
    Clarify,
    Complete,
    SavePartial,
}

impl DecisionType {
    /// Engine state entered after this verdict.
    pub fn engine_state(&self) -> EngineState {
        match self {
            DecisionType::Continue => EngineState::Continue,
            DecisionType::Clarify => EngineState::Clarify,
            DecisionType::Complete => EngineState::Complete,
            DecisionType::SavePartial => EngineState::SavePartial,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DecisionType::Complete | DecisionType::SavePartial)
    }
}

/// Immutable decision record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub decision: DecisionType,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_focus: Option<DimensionKey>,
    pub turn: u32,
    pub overall_confidence: Confidence,
}

/// Evaluates the stopping policy. Pure and total over valid input.
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    policy: DecisionPolicy,
}

impl DecisionEngine {
    pub fn new(policy: DecisionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }

    /// Decides the verdict for a journey's just-evaluated turn.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the journey is already finished
    pub fn decide(
        &self,
        journey: &Journey,
        snapshot: &ConfidenceSnapshot,
    ) -> Result<Decision, JourneyError> {
        journey.ensure_active()?;
        Ok(self.evaluate(journey.turn_count(), snapshot))
    }

    /// Applies the rules in order; the first match wins.
    pub fn evaluate(&self, turn_count: u32, snapshot: &ConfidenceSnapshot) -> Decision {
        let p = &self.policy;
        let overall = snapshot.overall_confidence;
        let value = overall.value();

        let (decision, next_focus, reasoning) = if turn_count >= p.max_turns {
            if value >= p.completion_confidence {
                (
                    DecisionType::Complete,
                    None,
                    format!(
                        "Reached the {}-turn limit with {:.1}% confidence; completing.",
                        p.max_turns, value
                    ),
                )
            } else {
                (
                    DecisionType::SavePartial,
                    None,
                    format!(
                        "Reached the {}-turn limit with only {:.1}% confidence (needs {:.0}%); saving partial results.",
                        p.max_turns, value, p.completion_confidence
                    ),
                )
            }
        } else if turn_count >= p.early_exit_turn && value >= p.early_exit_confidence {
            (
                DecisionType::Complete,
                None,
                format!(
                    "Strong signal at turn {}: {:.1}% confidence meets the {:.0}% early-exit bar.",
                    turn_count, value, p.early_exit_confidence
                ),
            )
        } else if turn_count >= p.standard_turns && value >= p.completion_confidence {
            (
                DecisionType::Complete,
                None,
                format!(
                    "Turn {} reached with {:.1}% confidence (threshold {:.0}%).",
                    turn_count, value, p.completion_confidence
                ),
            )
        } else if turn_count >= p.standard_turns {
            let focus = weakest(snapshot, snapshot.gaps_remaining.iter().copied())
                .or_else(|| weakest(snapshot, RiasecAxis::ALL.into_iter().map(DimensionKey::Axis)));
            (
                DecisionType::Clarify,
                focus,
                format!(
                    "Turn {} with {:.1}% confidence, below {:.0}%; clarifying {}.",
                    turn_count,
                    value,
                    p.completion_confidence,
                    focus.map_or_else(|| "the weakest dimension".to_string(), |f| f.to_string())
                ),
            )
        } else {
            let focus = weakest(
                snapshot,
                snapshot
                    .gaps_remaining
                    .iter()
                    .copied()
                    .filter(DimensionKey::is_axis),
            );
            let reasoning = match focus {
                Some(f) => format!(
                    "Turn {} at {:.1}% confidence; {} still needs evidence.",
                    turn_count, value, f
                ),
                None => format!(
                    "Turn {} at {:.1}% confidence; all axes have minimum evidence.",
                    turn_count, value
                ),
            };
            (DecisionType::Continue, focus, reasoning)
        };

        Decision {
            decision,
            reasoning,
            next_focus,
            turn: turn_count,
            overall_confidence: overall,
        }
    }
}

/// Lowest-confidence key; the earliest declared key wins ties.
fn weakest(
    snapshot: &ConfidenceSnapshot,
    keys: impl Iterator<Item = DimensionKey>,
) -> Option<DimensionKey> {
    let mut keys: Vec<DimensionKey> = keys.collect();
    keys.sort();
    keys.into_iter().fold(None, |best, key| match best {
        Some(b) if snapshot.confidence_of(b).value() <= snapshot.confidence_of(key).value() => {
            Some(b)
        }
        _ => Some(key),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::AxisScores;

    fn snapshot(overall: f64, gaps: Vec<DimensionKey>) -> ConfidenceSnapshot {
        ConfidenceSnapshot {
            turn_count: 0,
            skip_count: 0,
            axes: AxisScores::from_fn(|axis| match axis {
                RiasecAxis::Realistic => Confidence::new(70.0),
                RiasecAxis::Investigative => Confidence::new(90.0),
                RiasecAxis::Artistic => Confidence::new(30.0),
                RiasecAxis::Social => Confidence::new(30.0),
                RiasecAxis::Enterprising => Confidence::new(50.0),
                RiasecAxis::Conventional => Confidence::new(60.0),
            }),
            motivator_confidence: Confidence::new(20.0),
            interest_confidence: Confidence::new(80.0),
            overall_confidence: Confidence::new(overall),
            ready_to_complete: false,
            gaps_remaining: gaps,
        }
    }

    fn engine() -> DecisionEngine {
        DecisionEngine::default()
    }

    #[test]
    fn cap_completes_when_confident() {
        let d = engine().evaluate(18, &snapshot(80.0, vec![]));
        assert_eq!(d.decision, DecisionType::Complete);
    }

    #[test]
    fn cap_saves_partial_when_not_confident() {
        let d = engine().evaluate(18, &snapshot(60.0, vec![DimensionKey::Motivators]));
        assert_eq!(d.decision, DecisionType::SavePartial);
        assert!(d.next_focus.is_none());
    }

    #[test]
    fn early_exit_between_twelve_and_fourteen() {
        for turn in 12..=14 {
            let d = engine().evaluate(turn, &snapshot(85.0, vec![]));
            assert_eq!(d.decision, DecisionType::Complete, "turn {}", turn);
        }
        let d = engine().evaluate(11, &snapshot(99.0, vec![]));
        assert_eq!(d.decision, DecisionType::Continue);
    }

    #[test]
    fn standard_completion_at_fifteen() {
        let d = engine().evaluate(15, &snapshot(75.0, vec![]));
        assert_eq!(d.decision, DecisionType::Complete);
        let d = engine().evaluate(14, &snapshot(80.0, vec![]));
        assert_eq!(d.decision, DecisionType::Continue);
    }

    #[test]
    fn clarify_targets_weakest_gap() {
        let gaps = vec![
            DimensionKey::Axis(RiasecAxis::Enterprising),
            DimensionKey::Motivators,
        ];
        let d = engine().evaluate(15, &snapshot(60.0, gaps));
        assert_eq!(d.decision, DecisionType::Clarify);
        assert_eq!(d.next_focus, Some(DimensionKey::Motivators));
    }

    #[test]
    fn clarify_breaks_ties_by_declaration_order() {
        let gaps = vec![
            DimensionKey::Axis(RiasecAxis::Social),
            DimensionKey::Axis(RiasecAxis::Artistic),
        ];
        let d = engine().evaluate(16, &snapshot(60.0, gaps));
        assert_eq!(d.next_focus, Some(DimensionKey::Axis(RiasecAxis::Artistic)));
    }

    #[test]
    fn clarify_without_gaps_targets_weakest_axis() {
        let d = engine().evaluate(15, &snapshot(60.0, vec![]));
        assert_eq!(d.next_focus, Some(DimensionKey::Axis(RiasecAxis::Artistic)));
    }

    #[test]
    fn continue_focuses_on_axis_gaps_only() {
        let gaps = vec![
            DimensionKey::Axis(RiasecAxis::Conventional),
            DimensionKey::Axis(RiasecAxis::Enterprising),
            DimensionKey::Motivators,
        ];
        let d = engine().evaluate(5, &snapshot(40.0, gaps));
        assert_eq!(d.decision, DecisionType::Continue);
        assert_eq!(d.next_focus, Some(DimensionKey::Axis(RiasecAxis::Enterprising)));
    }

    #[test]
    fn continue_without_axis_gaps_has_no_focus() {
        let d = engine().evaluate(5, &snapshot(40.0, vec![DimensionKey::Interests]));
        assert_eq!(d.decision, DecisionType::Continue);
        assert!(d.next_focus.is_none());
    }

    #[test]
    fn reasoning_mentions_turn_and_confidence() {
        let d = engine().evaluate(15, &snapshot(80.0, vec![]));
        assert!(d.reasoning.contains("15"));
        assert!(d.reasoning.contains("80.0%"));
    }
}
