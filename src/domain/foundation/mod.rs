//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, time value objects and error types that form the
//! vocabulary shared by the onboarding, profile and devotional modules.

mod day_key;
mod errors;
mod ids;
mod time_of_day;
mod timestamp;

pub use day_key::DayKey;
pub use errors::{ErrorCode, ValidationError};
pub use ids::{DevotionalId, UserId};
pub use time_of_day::TimeOfDay;
pub use timestamp::Timestamp;
