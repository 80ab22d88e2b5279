//! Engine configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MAX_LOCK_WAIT_MS: u64 = 60_000;

/// Engine runtime configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// How long a second operation on the same journey waits, in
    /// milliseconds. Zero fails immediately with `ConcurrentModification`.
    #[serde(default)]
    pub lock_wait_ms: u64,
}

impl EngineConfig {
    pub fn lock_wait(&self) -> Duration {
        Duration::from_millis(self.lock_wait_ms)
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.lock_wait_ms > MAX_LOCK_WAIT_MS {
            return Err(ValidationError::LockWaitTooLong {
                max_ms: MAX_LOCK_WAIT_MS,
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { lock_wait_ms: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_fail_fast() {
        let config = EngineConfig::default();
        assert_eq!(config.lock_wait(), Duration::ZERO);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_excessive_wait() {
        let config = EngineConfig {
            lock_wait_ms: 120_000,
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::LockWaitTooLong { .. })
        ));
    }
}
