//! AppServices - Wires services to their ports from configuration.

use std::sync::Arc;
use tracing::info;

use super::{DailyStatusHandler, DevotionalService, ProfileService};
use crate::adapters::{PostgrestConfig, PostgrestRecordStore, SystemClock};
use crate::config::{AppConfig, DevotionalConfig};
use crate::ports::{Clock, RecordStore, StoreError};

/// The application's services, sharing one store and one clock.
pub struct AppServices {
    pub profiles: Arc<ProfileService>,
    pub devotionals: Arc<DevotionalService>,
    pub daily_status: DailyStatusHandler,
}

impl AppServices {
    pub fn new(
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
        devotional: &DevotionalConfig,
    ) -> Self {
        let profiles = Arc::new(ProfileService::new(store.clone(), clock.clone()));
        let devotionals = Arc::new(
            DevotionalService::new(store, clock.clone()).with_history_limit(devotional.history_limit),
        );
        let daily_status = DailyStatusHandler::new(
            profiles.clone(),
            devotionals.clone(),
            clock,
            devotional.estimated_read_time,
        );
        Self {
            profiles,
            devotionals,
            daily_status,
        }
    }

    /// Connects to the configured remote store on the system clock.
    pub fn connect(config: &AppConfig) -> Result<Self, StoreError> {
        let store = PostgrestRecordStore::new(PostgrestConfig::from_store_config(&config.store))?;
        info!(url = %config.store.url, "Record store configured");
        Ok(Self::new(
            Arc::new(store),
            Arc::new(SystemClock),
            &config.devotional,
        ))
    }
}
