//! GetSnapshotHandler - Query handler for current confidence.

use std::sync::Arc;

use crate::domain::assessment::{AssessmentPipeline, ConfidenceSnapshot};
use crate::domain::foundation::JourneyId;
use crate::domain::journey::JourneyError;
use crate::ports::JourneyStore;

use super::load_journey;

/// Query for a journey's confidence snapshot.
#[derive(Debug, Clone)]
pub struct GetSnapshotQuery {
    pub journey_id: JourneyId,
}

/// Handler recomputing confidence from stored evidence. Works in any status.
pub struct GetSnapshotHandler {
    store: Arc<dyn JourneyStore>,
    pipeline: Arc<AssessmentPipeline>,
}

impl GetSnapshotHandler {
    pub fn new(store: Arc<dyn JourneyStore>, pipeline: Arc<AssessmentPipeline>) -> Self {
        Self { store, pipeline }
    }

    pub async fn handle(&self, query: GetSnapshotQuery) -> Result<ConfidenceSnapshot, JourneyError> {
        let journey = load_journey(self.store.as_ref(), &query.journey_id).await?;
        Ok(self.pipeline.snapshot(&journey))
    }
}
