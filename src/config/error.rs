//! Configuration error types

use thiserror::Error;

use crate::domain::foundation::ValidationError as DomainValidationError;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid scoring parameters: {0}")]
    InvalidScoring(DomainValidationError),

    #[error("Invalid decision policy: {0}")]
    InvalidPolicy(DomainValidationError),

    #[error("Lock wait exceeds maximum allowed ({max_ms} ms)")]
    LockWaitTooLong { max_ms: u64 },

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
