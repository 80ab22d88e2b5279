//! In-Memory Journey Store Adapter
//!
//! Keeps journeys in a map for the lifetime of the process.
//! Useful for testing and the terminal walkthrough.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, JourneyId};
use crate::domain::journey::Journey;
use crate::ports::JourneyStore;

/// In-memory storage for journeys
#[derive(Debug, Clone, Default)]
pub struct InMemoryJourneyStore {
    journeys: Arc<RwLock<HashMap<JourneyId, Journey>>>,
}

impl InMemoryJourneyStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored journeys
    pub async fn journey_count(&self) -> usize {
        self.journeys.read().await.len()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.journeys.write().await.clear();
    }
}

#[async_trait]
impl JourneyStore for InMemoryJourneyStore {
    async fn save(&self, journey: &Journey) -> Result<(), DomainError> {
        let mut journeys = self.journeys.write().await;
        journeys.insert(*journey.id(), journey.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &JourneyId) -> Result<Option<Journey>, DomainError> {
        Ok(self.journeys.read().await.get(id).cloned())
    }

    async fn exists(&self, id: &JourneyId) -> Result<bool, DomainError> {
        Ok(self.journeys.read().await.contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_and_find() {
        let store = InMemoryJourneyStore::new();
        let journey = Journey::start(JourneyId::new());

        store.save(&journey).await.unwrap();

        let loaded = store.find_by_id(journey.id()).await.unwrap();
        assert_eq!(loaded, Some(journey.clone()));
        assert!(store.exists(journey.id()).await.unwrap());
    }

    #[tokio::test]
    async fn unknown_id_is_none() {
        let store = InMemoryJourneyStore::new();
        assert!(store.find_by_id(&JourneyId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_replaces_previous_version() {
        let store = InMemoryJourneyStore::new();
        let mut journey = Journey::start(JourneyId::new());
        store.save(&journey).await.unwrap();

        journey.abandon();
        store.save(&journey).await.unwrap();

        assert_eq!(store.journey_count().await, 1);
        let loaded = store.find_by_id(journey.id()).await.unwrap().unwrap();
        assert!(loaded.is_finished());
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let store = InMemoryJourneyStore::new();
        store.save(&Journey::start(JourneyId::new())).await.unwrap();
        store.clear().await;
        assert_eq!(store.journey_count().await, 0);
    }
}
