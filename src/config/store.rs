//! Remote store configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Store (PostgREST/Supabase) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Project URL, e.g. `https://abc.supabase.co`
    pub url: String,

    /// Anonymous API key sent as `apikey` and bearer token
    pub anon_key: Secret<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Postgres schema (server default when unset)
    #[serde(default)]
    pub schema: Option<String>,
}

impl StoreConfig {
    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn is_local(&self) -> bool {
        let rest = self.url.trim_start_matches("http://");
        rest.starts_with("localhost") || rest.starts_with("127.0.0.1")
    }

    /// Validate store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("STORE__URL"));
        }
        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(ValidationError::InvalidStoreUrl);
        }
        if self.url.starts_with("http://") && !self.is_local() {
            return Err(ValidationError::StoreUrlMustBeHttps);
        }
        if self.anon_key.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("STORE__ANON_KEY"));
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_request_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> StoreConfig {
        StoreConfig {
            url: url.to_string(),
            anon_key: Secret::new("anon".to_string()),
            request_timeout_secs: default_request_timeout(),
            schema: None,
        }
    }

    #[test]
    fn test_https_url_is_valid() {
        assert!(config("https://abc.supabase.co").validate().is_ok());
    }

    #[test]
    fn test_plain_http_only_for_localhost() {
        assert!(config("http://localhost:54321").validate().is_ok());
        assert!(config("http://127.0.0.1:54321").validate().is_ok());
        assert_eq!(
            config("http://abc.supabase.co").validate(),
            Err(ValidationError::StoreUrlMustBeHttps)
        );
    }

    #[test]
    fn test_missing_url_and_key() {
        assert_eq!(
            config("").validate(),
            Err(ValidationError::MissingRequired("STORE__URL"))
        );

        let mut c = config("https://abc.supabase.co");
        c.anon_key = Secret::new("  ".to_string());
        assert_eq!(
            c.validate(),
            Err(ValidationError::MissingRequired("STORE__ANON_KEY"))
        );
    }

    #[test]
    fn test_invalid_url_scheme() {
        assert_eq!(
            config("ftp://abc").validate(),
            Err(ValidationError::InvalidStoreUrl)
        );
    }

    #[test]
    fn test_timeout_bounds() {
        let mut c = config("https://abc.supabase.co");
        c.request_timeout_secs = 0;
        assert_eq!(c.validate(), Err(ValidationError::InvalidTimeout));
        c.request_timeout_secs = 30;
        assert_eq!(c.request_timeout(), Duration::from_secs(30));
    }
}
