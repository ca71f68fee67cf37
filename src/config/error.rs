//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid store URL format")]
    InvalidStoreUrl,

    #[error("Store URL must use HTTPS outside localhost")]
    StoreUrlMustBeHttps,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("History limit must be between 1 and {max}")]
    InvalidHistoryLimit { max: usize },

    #[error("Estimated read time must be at least one minute")]
    InvalidReadTime,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
