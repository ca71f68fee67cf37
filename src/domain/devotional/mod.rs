//! Devotional module - Daily devotional records
//!
//! A devotional is generated elsewhere and handed over for storage. Once
//! stored it is never edited. At most one exists per user per calendar day,
//! keyed by [`DayKey`](crate::domain::foundation::DayKey).

mod content;

pub use content::{DevotionalContent, NewDevotional, Scripture};
