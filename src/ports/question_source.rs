//! Question source port - supplies the next scenario question.
//!
//! The engine never authors question or option text. It tells the source
//! what it needs (clarification or not, which dimension to target, what is
//! still thin) and records whatever comes back as the pending question.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::dimensions::DimensionKey;
use crate::domain::foundation::{DomainError, JourneyId};
use crate::domain::journey::Question;

/// What the engine asks the source for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub journey_id: JourneyId,
    /// 1-based number of the turn this question is for.
    pub question_number: u32,
    pub is_clarification: bool,
    /// Dimension the question should target, if any.
    pub focus: Option<DimensionKey>,
    /// Dimensions still below their minimum evidence.
    pub gaps: Vec<DimensionKey>,
}

/// Port for obtaining questions.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Produce the next question for a journey.
    ///
    /// Returned option weights must use the `WeightMap` shape with values in
    /// `[0, 1]`; they are validated when a response selects them.
    ///
    /// # Errors
    ///
    /// - `QuestionSourceError` when no question can be produced
    async fn next_question(&self, request: &QuestionRequest) -> Result<Question, DomainError>;
}
