//! User module - Profile and engagement history
//!
//! The profile is keyed by the identity provider's user id. It is created on
//! first sign-in, updated when onboarding answers change or a devotional is
//! issued, and never deleted here (account deletion is handled elsewhere).

pub mod history;
pub mod profile;

pub use history::UserHistory;
pub use profile::{ProfilePatch, UserProfile};
