//! Stopping thresholds for the decision engine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Confidence, ValidationError};

/// Turn caps and confidence thresholds that decide when a journey stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionPolicy {
    /// Hard cap including clarification turns.
    pub max_turns: u32,
    /// Earliest turn at which a strong signal may end the journey.
    pub early_exit_turn: u32,
    pub early_exit_confidence: f64,
    /// Turn at which the standard question budget is exhausted.
    pub standard_turns: u32,
    pub completion_confidence: f64,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self {
            max_turns: 18,
            early_exit_turn: 12,
            early_exit_confidence: 85.0,
            standard_turns: 15,
            completion_confidence: 75.0,
        }
    }
}

impl DecisionPolicy {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.early_exit_turn <= self.standard_turns && self.standard_turns <= self.max_turns) {
            return Err(ValidationError::invalid_format(
                "policy",
                "turn thresholds must satisfy early_exit_turn <= standard_turns <= max_turns",
            ));
        }
        if self.max_turns == 0 {
            return Err(ValidationError::invalid_format("max_turns", "must be at least 1"));
        }
        for (field, value) in [
            ("early_exit_confidence", self.early_exit_confidence),
            ("completion_confidence", self.completion_confidence),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ValidationError::out_of_range(field, 0.0, 100.0, value));
            }
        }
        if self.early_exit_confidence < self.completion_confidence {
            return Err(ValidationError::invalid_format(
                "early_exit_confidence",
                "must be at least completion_confidence",
            ));
        }
        Ok(())
    }

    /// True when the stopping rules would select `complete` right now.
    pub fn would_complete(&self, turn_count: u32, overall: Confidence) -> bool {
        let overall = overall.value();
        (turn_count >= self.max_turns && overall >= self.completion_confidence)
            || (turn_count >= self.early_exit_turn && overall >= self.early_exit_confidence)
            || (turn_count >= self.standard_turns && overall >= self.completion_confidence)
    }
}
