//! AbandonJourneyHandler - Command handler for abandoning journeys.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::JourneyLocks;
use crate::domain::foundation::JourneyId;
use crate::domain::journey::JourneyError;
use crate::ports::JourneyStore;

use super::load_journey;

/// Command to abandon a journey.
#[derive(Debug, Clone)]
pub struct AbandonJourneyCommand {
    pub journey_id: JourneyId,
}

/// Handler for abandoning journeys.
///
/// Abandoning a finished journey is a no-op, so repeated calls are safe.
pub struct AbandonJourneyHandler {
    store: Arc<dyn JourneyStore>,
    locks: Arc<JourneyLocks>,
}

impl AbandonJourneyHandler {
    pub fn new(store: Arc<dyn JourneyStore>, locks: Arc<JourneyLocks>) -> Self {
        Self { store, locks }
    }

    /// Returns whether the journey changed.
    #[tracing::instrument(skip(self, cmd), fields(journey_id = %cmd.journey_id))]
    pub async fn handle(&self, cmd: AbandonJourneyCommand) -> Result<bool, JourneyError> {
        let _guard = self.locks.acquire(cmd.journey_id).await?;

        let mut journey = load_journey(self.store.as_ref(), &cmd.journey_id).await?;
        if !journey.abandon() {
            debug!(status = ?journey.status(), "journey already finished");
            return Ok(false);
        }

        self.store.save(&journey).await?;
        info!(turns = journey.turn_count(), "journey abandoned");
        Ok(true)
    }
}
