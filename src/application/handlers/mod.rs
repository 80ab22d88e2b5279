//! Application handlers.
//!
//! One handler per engine operation. Handlers load the journey, run the
//! domain services and commit the result through the ports. Mutating
//! handlers hold the journey's lock for the whole load-evaluate-save cycle.

mod abandon_journey;
mod get_profile;
mod get_snapshot;
mod present_question;
mod start_journey;
mod submit_response;

pub use abandon_journey::{AbandonJourneyCommand, AbandonJourneyHandler};
pub use get_profile::{GetProfileHandler, GetProfileQuery};
pub use get_snapshot::{GetSnapshotHandler, GetSnapshotQuery};
pub use present_question::{PresentQuestionCommand, PresentQuestionHandler};
pub use start_journey::{StartJourneyCommand, StartJourneyHandler};
pub use submit_response::{SubmitResponseCommand, SubmitResponseHandler, SubmitResponseResult};

use crate::domain::foundation::JourneyId;
use crate::domain::journey::{Journey, JourneyError};
use crate::ports::JourneyStore;

/// Loads a journey, mapping a missing one to `NotFound`.
pub(crate) async fn load_journey(
    store: &dyn JourneyStore,
    id: &JourneyId,
) -> Result<Journey, JourneyError> {
    store
        .find_by_id(id)
        .await?
        .ok_or(JourneyError::NotFound(*id))
}
