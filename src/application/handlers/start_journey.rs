//! StartJourneyHandler - Command handler for starting assessment journeys.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::JourneyId;
use crate::domain::journey::{Journey, JourneyError};
use crate::ports::JourneyStore;

/// Command to start a new journey.
#[derive(Debug, Clone, Default)]
pub struct StartJourneyCommand {
    /// Caller-chosen id; a fresh one is generated when absent.
    pub journey_id: Option<JourneyId>,
}

/// Handler for starting journeys.
pub struct StartJourneyHandler {
    store: Arc<dyn JourneyStore>,
}

impl StartJourneyHandler {
    pub fn new(store: Arc<dyn JourneyStore>) -> Self {
        Self { store }
    }

    /// Creates and persists a journey with no turns.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if a journey with the requested id already exists
    /// - `Infrastructure` on storage failure
    pub async fn handle(&self, cmd: StartJourneyCommand) -> Result<Journey, JourneyError> {
        let id = cmd.journey_id.unwrap_or_default();
        if cmd.journey_id.is_some() && self.store.exists(&id).await? {
            return Err(JourneyError::invalid_state(format!(
                "journey {} already exists",
                id
            )));
        }

        let journey = Journey::start(id);
        self.store.save(&journey).await?;

        info!(journey_id = %id, "journey started");
        Ok(journey)
    }
}
