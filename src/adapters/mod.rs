//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the engine to concrete infrastructure:
//! - `storage` - Journey stores (in-memory, YAML files)
//! - `questions` - YAML question bank
//! - `analysis` - Keyword-lexicon free-text analyzer
//! - `events` - In-memory event bus

pub mod analysis;
pub mod events;
pub mod questions;
pub mod storage;

pub use analysis::{KeywordAnalyzer, KeywordRule};
pub use events::InMemoryEventBus;
pub use questions::QuestionBank;
pub use storage::{FileJourneyStore, InMemoryJourneyStore};
