//! DevotionalService - Stores and looks up daily devotionals.
//!
//! Owns the `devotional_content` table. At most one devotional exists per
//! `(user_id, date)`; the store's unique constraint enforces this and a
//! rejected insert surfaces as [`DevotionalError::AlreadyExistsForDay`].
//! "Today" always comes from the injected clock.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::devotional::{DevotionalContent, NewDevotional};
use crate::domain::foundation::{DayKey, DevotionalId, ErrorCode, UserId, ValidationError};
use crate::ports::{from_row, to_row, Clock, Direction, RecordStore, Row, Select, StoreError};

/// History length used when the caller has no preference.
pub const DEFAULT_HISTORY_LIMIT: usize = 30;

/// Errors returned by [`DevotionalService`].
#[derive(Debug, Error)]
pub enum DevotionalError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A devotional already exists for user {user_id} on {date}")]
    AlreadyExistsForDay { user_id: UserId, date: DayKey },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Stored devotional could not be decoded: {0}")]
    Decode(String),
}

impl DevotionalError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DevotionalError::Validation(_) => ErrorCode::ValidationFailed,
            DevotionalError::AlreadyExistsForDay { .. } => ErrorCode::DuplicateDevotional,
            DevotionalError::Store(e) => e.code(),
            DevotionalError::Decode(_) => ErrorCode::MalformedRecord,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, DevotionalError::Store(e) if e.is_retryable())
    }
}

/// Devotional persistence service.
pub struct DevotionalService {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
    history_limit: usize,
}

impl DevotionalService {
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Overrides the limit used by [`Self::get_recent_history`].
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Stores a new devotional, assigning its id and creation time.
    ///
    /// There is no read-before-write: a second devotional for the same user
    /// and day is rejected by the store and reported as
    /// `AlreadyExistsForDay`.
    pub async fn create_devotional(
        &self,
        devotional: NewDevotional,
    ) -> Result<DevotionalContent, DevotionalError> {
        devotional.validate()?;

        let user_id = devotional.user_id.clone();
        let date = devotional.date;
        let content = devotional.into_content(DevotionalId::new(), self.clock.now());
        debug!(user_id = %user_id, date = %date, id = %content.id(), "Creating devotional");

        match self.store.insert(DevotionalContent::TABLE, to_row(&content)?).await {
            Ok(row) => decode(row),
            Err(e) if e.is_unique_violation() => {
                warn!(user_id = %user_id, date = %date, "Devotional already exists for day");
                Err(DevotionalError::AlreadyExistsForDay { user_id, date })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Today's devotional for the user, if one was created.
    pub async fn get_todays_devotional(
        &self,
        user_id: &UserId,
    ) -> Result<Option<DevotionalContent>, DevotionalError> {
        let query = today_query(user_id, self.clock.today());
        match self.store.select_one(&query).await? {
            Some(row) => decode(row).map(Some),
            None => Ok(None),
        }
    }

    /// Up to `limit` devotionals, newest date first.
    pub async fn get_devotional_history(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<DevotionalContent>, DevotionalError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let query = Select::from(DevotionalContent::TABLE)
            .eq("user_id", user_id.as_str())
            .order_by("date", Direction::Descending)
            .limit(limit);
        let rows = self.store.select(&query).await?;
        debug!(user_id = %user_id, count = rows.len(), "Loaded devotional history");

        rows.into_iter().map(decode).collect()
    }

    /// History using the configured limit.
    pub async fn get_recent_history(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<DevotionalContent>, DevotionalError> {
        self.get_devotional_history(user_id, self.history_limit).await
    }

    /// True if today's devotional exists. Store failures are errors, not
    /// `false`.
    pub async fn has_todays_devotional(&self, user_id: &UserId) -> Result<bool, DevotionalError> {
        let query = today_query(user_id, self.clock.today()).columns(["id"]);
        Ok(self.store.select_one(&query).await?.is_some())
    }
}

fn today_query(user_id: &UserId, today: DayKey) -> Select {
    Select::from(DevotionalContent::TABLE)
        .eq("user_id", user_id.as_str())
        .eq("date", today.to_string())
}

fn decode(row: Row) -> Result<DevotionalContent, DevotionalError> {
    from_row(row).map_err(|e| DevotionalError::Decode(e.to_string()))
}
