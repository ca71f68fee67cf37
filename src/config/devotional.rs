//! Devotional content settings

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::onboarding::DEFAULT_READ_TIME_MINUTES;

/// Upper bound for a single history request.
pub const MAX_HISTORY_LIMIT: usize = 365;

/// Devotional configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DevotionalConfig {
    /// Records returned by a history request when no limit is given
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Read time suggested to the content generator, in minutes
    #[serde(default = "default_read_time")]
    pub estimated_read_time: u32,
}

impl DevotionalConfig {
    /// Validate devotional configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.history_limit == 0 || self.history_limit > MAX_HISTORY_LIMIT {
            return Err(ValidationError::InvalidHistoryLimit {
                max: MAX_HISTORY_LIMIT,
            });
        }
        if self.estimated_read_time == 0 {
            return Err(ValidationError::InvalidReadTime);
        }
        Ok(())
    }
}

impl Default for DevotionalConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            estimated_read_time: default_read_time(),
        }
    }
}

fn default_history_limit() -> usize {
    30
}

fn default_read_time() -> u32 {
    DEFAULT_READ_TIME_MINUTES
}
