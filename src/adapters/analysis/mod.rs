//! Free-text analysis adapters.

mod keyword_analyzer;

pub use keyword_analyzer::{KeywordAnalyzer, KeywordRule};
