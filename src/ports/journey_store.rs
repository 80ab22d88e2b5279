//! Journey store port - persistence of journeys between turns.
//!
//! The engine only needs load-by-id and save-by-id. Saves are
//! last-writer-wins; the per-journey lock in the application layer is what
//! keeps writers from overlapping.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, JourneyId};
use crate::domain::journey::Journey;

/// Port for Journey aggregate persistence.
#[async_trait]
pub trait JourneyStore: Send + Sync {
    /// Insert or replace a journey.
    ///
    /// # Errors
    ///
    /// - `StorageError` on persistence failure
    async fn save(&self, journey: &Journey) -> Result<(), DomainError>;

    /// Find a journey by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &JourneyId) -> Result<Option<Journey>, DomainError>;

    /// Check if a journey exists.
    async fn exists(&self, id: &JourneyId) -> Result<bool, DomainError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn JourneyStore) {}
}
