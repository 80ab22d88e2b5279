//! Per-journey mutual exclusion.
//!
//! At most one mutating operation runs per journey at a time. Different
//! journeys never contend with each other. A journey's registry entry lives
//! only while someone holds or waits on its lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::foundation::JourneyId;
use crate::domain::journey::JourneyError;

type Registry = Arc<Mutex<HashMap<JourneyId, Arc<AsyncMutex<()>>>>>;

fn registry_of(locks: &Registry) -> MutexGuard<'_, HashMap<JourneyId, Arc<AsyncMutex<()>>>> {
    locks.lock().unwrap_or_else(|e| e.into_inner())
}

/// Held while a journey is being modified.
///
/// Dropping it releases the lock and removes the registry entry when no
/// other caller is waiting on it.
#[derive(Debug)]
pub struct JourneyGuard {
    id: JourneyId,
    guard: Option<OwnedMutexGuard<()>>,
    registry: Registry,
}

impl Drop for JourneyGuard {
    fn drop(&mut self) {
        // Release first so the entry's only remaining owner may be the registry.
        self.guard.take();

        let mut registry = registry_of(&self.registry);
        if registry
            .get(&self.id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            registry.remove(&self.id);
        }
    }
}

/// Registry of per-journey locks.
///
/// With a zero wait, contention fails immediately with
/// `ConcurrentModification`; otherwise the caller waits up to `wait`.
#[derive(Debug)]
pub struct JourneyLocks {
    locks: Registry,
    wait: Duration,
}

impl JourneyLocks {
    pub fn new(wait: Duration) -> Self {
        Self {
            locks: Arc::new(Mutex::new(HashMap::new())),
            wait,
        }
    }

    /// Locks that fail instead of waiting.
    pub fn fail_fast() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Acquires the lock for `id`.
    ///
    /// # Errors
    ///
    /// - `ConcurrentModification` if the lock is not obtained in time
    pub async fn acquire(&self, id: JourneyId) -> Result<JourneyGuard, JourneyError> {
        let lock = registry_of(&self.locks).entry(id).or_default().clone();

        let guard = if self.wait.is_zero() {
            lock.try_lock_owned()
                .map_err(|_| JourneyError::ConcurrentModification(id))?
        } else {
            tokio::time::timeout(self.wait, lock.lock_owned())
                .await
                .map_err(|_| JourneyError::ConcurrentModification(id))?
        };

        Ok(JourneyGuard {
            id,
            guard: Some(guard),
            registry: Arc::clone(&self.locks),
        })
    }

    /// Number of journeys currently holding or waiting on a lock.
    pub fn tracked(&self) -> usize {
        registry_of(&self.locks).len()
    }
}
