//! Journey lifecycle status.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a journey. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JourneyStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Abandoned,
}

impl JourneyStatus {
    /// Returns true once the journey can no longer change.
    pub fn is_finished(&self) -> bool {
        matches!(self, JourneyStatus::Completed | JourneyStatus::Abandoned)
    }
}

impl StateMachine for JourneyStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use JourneyStatus::*;
        matches!(
            (self, target),
            (NotStarted, InProgress)
                | (NotStarted, Abandoned)
                | (InProgress, Completed)
                | (InProgress, Abandoned)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use JourneyStatus::*;
        match self {
            NotStarted => vec![InProgress, Abandoned],
            InProgress => vec![Completed, Abandoned],
            Completed | Abandoned => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_never_returns_to_in_progress() {
        assert!(JourneyStatus::Completed
            .transition_to(JourneyStatus::InProgress)
            .is_err());
    }

    #[test]
    fn in_progress_can_finish_either_way() {
        assert!(JourneyStatus::InProgress.can_transition_to(&JourneyStatus::Completed));
        assert!(JourneyStatus::InProgress.can_transition_to(&JourneyStatus::Abandoned));
    }

    #[test]
    fn finished_states_are_terminal() {
        assert!(JourneyStatus::Completed.is_terminal());
        assert!(JourneyStatus::Abandoned.is_terminal());
        assert!(!JourneyStatus::NotStarted.is_terminal());
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&JourneyStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
