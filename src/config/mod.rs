//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `COMPASS` prefix and nested values use double underscores as separators.
//!
//! Every section has defaults, so an empty environment yields a working
//! in-memory engine with the standard scoring curves and stopping policy.
//!
//! # Example
//!
//! ```no_run
//! use compass_engine::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Max turns: {}", config.policy.max_turns);
//! ```

mod engine;
mod error;
mod storage;
mod telemetry;

pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use storage::{StorageBackend, StorageConfig};
pub use telemetry::{LogFormat, TelemetryConfig};

use serde::Deserialize;
use std::path::PathBuf;

use crate::application::EngineSettings;
use crate::domain::assessment::{DecisionPolicy, ScoringParameters};

/// Question bank configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionsConfig {
    /// YAML question bank; the built-in bank is used when unset
    pub bank_path: Option<PathBuf>,
}

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Confidence curve parameters
    #[serde(default)]
    pub scoring: ScoringParameters,

    /// Turn caps and stopping thresholds
    #[serde(default)]
    pub policy: DecisionPolicy,

    /// Engine runtime settings (per-journey locking)
    #[serde(default)]
    pub engine: EngineConfig,

    /// Journey store selection
    #[serde(default)]
    pub storage: StorageConfig,

    /// Question bank location
    #[serde(default)]
    pub questions: QuestionsConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `COMPASS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `COMPASS__POLICY__MAX_TURNS=18` -> `policy.max_turns = 18`
    /// - `COMPASS__STORAGE__BACKEND=file` -> `storage.backend = file`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COMPASS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.scoring
            .validate()
            .map_err(ValidationError::InvalidScoring)?;
        self.policy
            .validate()
            .map_err(ValidationError::InvalidPolicy)?;
        self.engine.validate()?;
        self.storage.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }

    /// Engine tunables derived from this configuration.
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            scoring: self.scoring.clone(),
            policy: self.policy.clone(),
            lock_wait: self.engine.lock_wait(),
        }
    }
}
