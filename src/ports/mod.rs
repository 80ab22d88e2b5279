//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the assessment engine and the outside world. Adapters implement these ports.
//!
//! - `JourneyStore` - Persists journeys between turns
//! - `QuestionSource` - Supplies scenario questions with weighted options
//! - `FreeTextAnalyzer` - Turns free-text answers into dimension weights
//! - `EventPublisher` - Publishes domain events (journey completion)

mod event_publisher;
mod free_text_analyzer;
mod journey_store;
mod question_source;

pub use event_publisher::EventPublisher;
pub use free_text_analyzer::FreeTextAnalyzer;
pub use journey_store::JourneyStore;
pub use question_source::{QuestionRequest, QuestionSource};
