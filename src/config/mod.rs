//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `RAPHA` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use rapha::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Store at {}", config.store.url);
//! ```

mod devotional;
mod error;
mod log;
mod store;

pub use devotional::{DevotionalConfig, MAX_HISTORY_LIMIT};
pub use error::{ConfigError, ValidationError};
pub use log::LogConfig;
pub use store::StoreConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Remote store configuration (PostgREST/Supabase)
    pub store: StoreConfig,

    /// Devotional content settings
    #[serde(default)]
    pub devotional: DevotionalConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `RAPHA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `RAPHA__STORE__URL=https://abc.supabase.co` -> `store.url`
    /// - `RAPHA__DEVOTIONAL__HISTORY_LIMIT=14` -> `devotional.history_limit = 14`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("RAPHA")
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
        self.store.validate()?;
        self.devotional.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("RAPHA__STORE__URL", "https://abc.supabase.co");
        env::set_var("RAPHA__STORE__ANON_KEY", "anon-key");
    }

    fn clear_env() {
        env::remove_var("RAPHA__STORE__URL");
        env::remove_var("RAPHA__STORE__ANON_KEY");
        env::remove_var("RAPHA__STORE__REQUEST_TIMEOUT_SECS");
        env::remove_var("RAPHA__DEVOTIONAL__HISTORY_LIMIT");
        env::remove_var("RAPHA__LOG__JSON");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.store.url, "https://abc.supabase.co");
        assert_eq!(config.store.anon_key.expose_secret(), "anon-key");
    }

    #[test]
    fn test_defaults_apply() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.store.request_timeout_secs, 10);
        assert_eq!(config.devotional.history_limit, 30);
        assert_eq!(config.log.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("RAPHA__STORE__REQUEST_TIMEOUT_SECS", "5");
        env::set_var("RAPHA__DEVOTIONAL__HISTORY_LIMIT", "14");
        env::set_var("RAPHA__LOG__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.store.request_timeout_secs, 5);
        assert_eq!(config.devotional.history_limit, 14);
        assert!(config.log.json);
    }

    #[test]
    fn test_missing_store_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(AppConfig::load().is_err());
    }
}
