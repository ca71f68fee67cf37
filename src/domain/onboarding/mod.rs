//! Onboarding module - Questionnaire intake and personalization.
//!
//! The onboarding flow collects eleven screens of answers. This module owns:
//!
//! - **Option registry** - Closed option sets and labels per dimension
//! - **Response model** - Partial (in-progress) and validated responses
//! - **Normalizer** - Slider defaults, completeness and submission checks
//! - **Personalization** - The brief handed to the content generator
//!
//! # Invariants
//!
//! 1. A response is complete iff every field except `prayer_focus` is present
//!    and every multi-select field is non-empty
//! 2. Stored values come only from the option registry
//! 3. Sliders are within 1-5, defaulting to 3
//! 4. Prayer focus is at most 300 characters

mod errors;
mod normalizer;
mod options;
mod personalization;
mod response;

pub use errors::OnboardingError;
pub use normalizer::{default_preferences, is_complete, missing_fields, normalize_prayer_focus, validate};
pub use options::{
    DailyChallenge, Dimension, EmotionalState, FaithJourney, GrowthArea, LifeStage, OptionEntry,
    PreferenceSlider, PreferredTime, QuestionnaireOption, SensitiveArea, SpiritualInterest,
};
pub use personalization::{Leaning, PersonalizationBrief, ToneDirective, DEFAULT_READ_TIME_MINUTES};
pub use response::{
    DevotionalPreferences, OnboardingResponse, PartialOnboardingResponse, MAX_PRAYER_FOCUS_CHARS,
    PREFERENCE_MAX, PREFERENCE_MIN, PREFERENCE_NEUTRAL,
};
