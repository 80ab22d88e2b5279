//! Journey storage adapters.

mod file_journey_store;
mod in_memory_journey_store;

pub use file_journey_store::FileJourneyStore;
pub use in_memory_journey_store::InMemoryJourneyStore;
