//! Turn-level state of the decision engine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Where a journey stands within the per-turn cycle.
///
/// ```text
/// Continue ──┐
///            ├──► AwaitingResponse ──► Evaluating ──► Continue | Clarify | Complete | SavePartial
/// Clarify  ──┘
/// (any non-terminal) ──► Abandoned
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    #[default]
    Continue,
    AwaitingResponse,
    Evaluating,
    Clarify,
    Complete,
    SavePartial,
    Abandoned,
}

impl EngineState {
    /// True when a new question may be issued.
    pub fn can_issue_question(&self) -> bool {
        matches!(self, EngineState::Continue | EngineState::Clarify)
    }
}

impl StateMachine for EngineState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use EngineState::*;
        match (self, target) {
            (Complete | SavePartial | Abandoned, _) => false,
            (_, Abandoned) => true,
            (Continue | Clarify, AwaitingResponse) => true,
            (AwaitingResponse, Evaluating) => true,
            (Evaluating, Continue | Clarify | Complete | SavePartial) => true,
            _ => false,
        }
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use EngineState::*;
        match self {
            Continue | Clarify => vec![AwaitingResponse, Abandoned],
            AwaitingResponse => vec![Evaluating, Abandoned],
            Evaluating => vec![Continue, Clarify, Complete, SavePartial, Abandoned],
            Complete | SavePartial | Abandoned => vec![],
        }
    }
}
