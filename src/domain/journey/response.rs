//! Responses submitted by the caller.

use serde::{Deserialize, Serialize};

use crate::domain::dimensions::WeightMap;
use crate::domain::foundation::{QuestionId, Timestamp};

/// What the respondent did with a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Answer {
    Selected { option_id: String },
    FreeText { text: String },
    Skipped,
}

/// A response to the currently pending question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub question_id: QuestionId,
    pub answer: Answer,
    pub elapsed_seconds: f64,
}

impl Response {
    pub fn selected(question_id: QuestionId, option_id: impl Into<String>) -> Self {
        Self {
            question_id,
            answer: Answer::Selected {
                option_id: option_id.into(),
            },
            elapsed_seconds: 0.0,
        }
    }

    pub fn free_text(question_id: QuestionId, text: impl Into<String>) -> Self {
        Self {
            question_id,
            answer: Answer::FreeText { text: text.into() },
            elapsed_seconds: 0.0,
        }
    }

    pub fn skipped(question_id: QuestionId) -> Self {
        Self {
            question_id,
            answer: Answer::Skipped,
            elapsed_seconds: 0.0,
        }
    }

    pub fn with_elapsed(mut self, seconds: f64) -> Self {
        self.elapsed_seconds = seconds;
        self
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self.answer, Answer::Skipped)
    }
}

/// A response together with the weights a free-text analyzer derived for it.
///
/// Structured and skipped responses carry no analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub response: Response,
    pub analyzed: Option<WeightMap>,
}

impl Submission {
    pub fn new(response: Response) -> Self {
        Self {
            response,
            analyzed: None,
        }
    }

    pub fn with_analysis(response: Response, weights: WeightMap) -> Self {
        Self {
            response,
            analyzed: Some(weights),
        }
    }
}

/// Audit trail entry for an accepted response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub turn: u32,
    pub response: Response,
    /// Weights actually applied (absent for skips).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied: Option<WeightMap>,
    pub recorded_at: Timestamp,
}
