//! Free-text analyzer port.
//!
//! Maps a free-text answer onto the same weight shape structured options
//! carry. The engine itself never inspects raw text.

use async_trait::async_trait;

use crate::domain::dimensions::WeightMap;
use crate::domain::foundation::DomainError;
use crate::domain::journey::Question;

/// Port for analyzing free-text responses.
#[async_trait]
pub trait FreeTextAnalyzer: Send + Sync {
    /// Derive dimension weights from `text` written in answer to `question`.
    ///
    /// # Errors
    ///
    /// - `AnalyzerError` when analysis fails
    async fn analyze(&self, text: &str, question: &Question) -> Result<WeightMap, DomainError>;
}
