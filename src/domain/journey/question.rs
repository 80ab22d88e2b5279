//! Questions issued to the respondent.

use serde::{Deserialize, Serialize};

use crate::domain::dimensions::{DimensionKey, WeightMap};
use crate::domain::foundation::QuestionId;

/// One selectable option with the weights it contributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub weights: WeightMap,
}

/// A scenario question as issued for one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    /// 1-based turn number this question was issued for.
    pub number: u32,
    pub prompt: String,
    pub options: Vec<AnswerOption>,
    #[serde(default)]
    pub allows_free_text: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<DimensionKey>,
    #[serde(default)]
    pub is_clarification: bool,
}

impl Question {
    /// Looks up an option by its id.
    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}
