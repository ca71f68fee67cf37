//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, day keys, timestamps, errors)
//! - `onboarding` - Questionnaire options, answers and their validation
//! - `user` - User profile and engagement history
//! - `devotional` - Daily devotional records

pub mod devotional;
pub mod foundation;
pub mod onboarding;
pub mod user;
