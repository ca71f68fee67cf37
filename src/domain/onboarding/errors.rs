//! Onboarding validation errors.
//!
//! Raised locally before anything is written to the store.

use thiserror::Error;

use super::Dimension;
use crate::domain::foundation::{ErrorCode, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OnboardingError {
    /// One or more required answers are missing or empty.
    #[error("Onboarding is incomplete, missing: {}", .missing.join(", "))]
    Incomplete { missing: Vec<&'static str> },

    /// A submitted value is not part of the option registry.
    #[error("'{value}' is not a valid {dimension} option")]
    UnknownOption { dimension: Dimension, value: String },

    /// A slider or the prayer focus failed a value check.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl OnboardingError {
    pub fn unknown_option(dimension: Dimension, value: impl Into<String>) -> Self {
        OnboardingError::UnknownOption {
            dimension,
            value: value.into(),
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            OnboardingError::Incomplete { .. } => ErrorCode::OnboardingIncomplete,
            OnboardingError::UnknownOption { .. } => ErrorCode::UnknownOption,
            OnboardingError::Invalid(_) => ErrorCode::ValidationFailed,
        }
    }
}
