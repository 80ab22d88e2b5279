//! GetProfileHandler - Query handler for the final profile.

use std::sync::Arc;

use crate::domain::assessment::{AssessmentPipeline, Profile};
use crate::domain::foundation::JourneyId;
use crate::domain::journey::JourneyError;
use crate::ports::JourneyStore;

use super::load_journey;

/// Query for a completed journey's profile.
#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub journey_id: JourneyId,
}

/// Handler synthesizing the profile of a completed journey.
pub struct GetProfileHandler {
    store: Arc<dyn JourneyStore>,
    pipeline: Arc<AssessmentPipeline>,
}

impl GetProfileHandler {
    pub fn new(store: Arc<dyn JourneyStore>, pipeline: Arc<AssessmentPipeline>) -> Self {
        Self { store, pipeline }
    }

    /// # Errors
    ///
    /// - `NotFound` for an unknown journey
    /// - `InvalidState` unless the journey is completed
    pub async fn handle(&self, query: GetProfileQuery) -> Result<Profile, JourneyError> {
        let journey = load_journey(self.store.as_ref(), &query.journey_id).await?;
        self.pipeline.synthesize(&journey)
    }
}
