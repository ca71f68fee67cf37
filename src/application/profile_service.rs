//! ProfileService - Reads and writes user profiles.
//!
//! Owns the `user_profiles` table. Every write is an upsert or update keyed
//! by `user_id` and stamps `updated_at` from the clock; `created_at` is left
//! to the store's column default.

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::foundation::{DevotionalId, ErrorCode, UserId};
use crate::domain::onboarding::{self, OnboardingError, OnboardingResponse, PartialOnboardingResponse};
use crate::domain::user::{ProfilePatch, UserProfile};
use crate::ports::{from_row, to_row, Clock, Filter, RecordStore, Row, Select, StoreError};

const CONFLICT_COLUMNS: &[&str] = &["user_id"];

/// Errors returned by [`ProfileService`].
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error(transparent)]
    Validation(#[from] OnboardingError),

    #[error("No profile exists for user {0}")]
    NotFound(UserId),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Stored profile could not be decoded: {0}")]
    Decode(String),
}

impl ProfileError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ProfileError::Validation(e) => e.code(),
            ProfileError::NotFound(_) => ErrorCode::ProfileNotFound,
            ProfileError::Store(e) => e.code(),
            ProfileError::Decode(_) => ErrorCode::MalformedRecord,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, ProfileError::Store(e) if e.is_retryable())
    }
}

/// Profile persistence service.
pub struct ProfileService {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Creates the profile or merges `patch` into it.
    ///
    /// Fields absent from the patch keep their stored values. Repeating the
    /// same call converges to the same state apart from `updated_at`.
    pub async fn upsert_profile(
        &self,
        user_id: &UserId,
        patch: ProfilePatch,
    ) -> Result<UserProfile, ProfileError> {
        let row = self.keyed_row(user_id, to_row(&patch)?);
        debug!(user_id = %user_id, "Upserting profile");

        let stored = self
            .store
            .upsert(UserProfile::TABLE, row, CONFLICT_COLUMNS)
            .await?;
        decode(stored)
    }

    /// Point lookup; `Ok(None)` when the user has no profile yet.
    pub async fn get_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, ProfileError> {
        let query = Select::from(UserProfile::TABLE).eq("user_id", user_id.as_str());
        match self.store.select_one(&query).await? {
            Some(row) => decode(row).map(Some),
            None => Ok(None),
        }
    }

    /// Stores validated onboarding answers, touching nothing else.
    pub async fn update_onboarding(
        &self,
        user_id: &UserId,
        responses: &OnboardingResponse,
    ) -> Result<UserProfile, ProfileError> {
        let mut row = Row::new();
        row.insert(
            "onboarding_responses".to_string(),
            serde_json::to_value(responses).map_err(|e| StoreError::malformed(e.to_string()))?,
        );
        let row = self.keyed_row(user_id, row);
        debug!(user_id = %user_id, "Updating onboarding responses");

        let stored = self
            .store
            .upsert(UserProfile::TABLE, row, CONFLICT_COLUMNS)
            .await?;
        decode(stored)
    }

    /// Validates raw questionnaire answers and stores them.
    ///
    /// Nothing is written when validation fails.
    pub async fn submit_onboarding(
        &self,
        user_id: &UserId,
        partial: &PartialOnboardingResponse,
    ) -> Result<UserProfile, ProfileError> {
        let responses = onboarding::validate(partial).map_err(|e| {
            debug!(user_id = %user_id, error = %e, "Onboarding submission rejected");
            e
        })?;
        self.update_onboarding(user_id, &responses).await
    }

    /// Appends `devotional_id` to the user's history and stamps today's date.
    ///
    /// Recording the same id twice leaves a single entry. The history is read,
    /// modified and written back without a lock, so two concurrent calls for
    /// the same user race and the last writer wins: the other id can be lost.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` if the user has no profile.
    pub async fn record_devotional_issued(
        &self,
        user_id: &UserId,
        devotional_id: DevotionalId,
    ) -> Result<UserProfile, ProfileError> {
        let profile = self
            .get_profile(user_id)
            .await?
            .ok_or_else(|| ProfileError::NotFound(user_id.clone()))?;

        let mut history = profile.user_history;
        if !history.record_devotional(devotional_id, self.clock.today()) {
            debug!(user_id = %user_id, devotional_id = %devotional_id, "Devotional already recorded");
        }

        let mut patch = Row::new();
        patch.insert(
            "user_history".to_string(),
            serde_json::to_value(&history).map_err(|e| StoreError::malformed(e.to_string()))?,
        );
        patch.insert(
            "updated_at".to_string(),
            Value::String(self.clock.now().to_rfc3339()),
        );

        let filters = [Filter::eq("user_id", user_id.as_str())];
        let updated = self.store.update(UserProfile::TABLE, &filters, patch).await?;

        match updated.into_iter().next() {
            Some(row) => decode(row),
            None => {
                warn!(user_id = %user_id, "Profile vanished while recording devotional");
                Err(ProfileError::NotFound(user_id.clone()))
            }
        }
    }

    /// Adds the key column and a fresh `updated_at` to a write.
    fn keyed_row(&self, user_id: &UserId, mut row: Row) -> Row {
        row.insert(
            "user_id".to_string(),
            Value::String(user_id.as_str().to_string()),
        );
        row.insert(
            "updated_at".to_string(),
            Value::String(self.clock.now().to_rfc3339()),
        );
        row
    }
}

fn decode(row: Row) -> Result<UserProfile, ProfileError> {
    from_row(row).map_err(|e| ProfileError::Decode(e.to_string()))
}
