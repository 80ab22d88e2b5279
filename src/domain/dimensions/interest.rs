//! Open-ended interest taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Key identifying one interest: a normalised category plus a specific label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InterestKey {
    category: String,
    specific: String,
}

impl InterestKey {
    /// Creates an interest key.
    ///
    /// Both parts are trimmed and lower-cased. A missing or blank specific
    /// label falls back to `general interest in <category>`.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the category is blank
    pub fn new(category: &str, specific: Option<&str>) -> Result<Self, ValidationError> {
        let category = category.trim().to_lowercase();
        if category.is_empty() {
            return Err(ValidationError::empty_field("interests.category"));
        }

        let specific = match specific.map(str::trim) {
            Some(s) if !s.is_empty() => s.to_lowercase(),
            _ => format!("general interest in {}", category),
        };

        Ok(Self { category, specific })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn specific(&self) -> &str {
        &self.specific
    }
}

impl fmt::Display for InterestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.specific)
    }
}
