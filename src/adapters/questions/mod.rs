//! Question source adapters.

mod question_bank;

pub use question_bank::QuestionBank;
