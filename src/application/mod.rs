//! Application layer - Services and handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Each service owns one store table; cross-table composition lives in
//! handlers such as [`DailyStatusHandler`].

pub mod app_services;
pub mod daily_status;
pub mod devotional_service;
pub mod profile_service;

pub use app_services::AppServices;
pub use daily_status::{DailyStatus, DailyStatusError, DailyStatusHandler};
pub use devotional_service::{DevotionalError, DevotionalService, DEFAULT_HISTORY_LIMIT};
pub use profile_service::{ProfileError, ProfileService};
