//! Preference defaults, completeness and submission validation.
//!
//! Completeness is structural only: it asks whether every required answer is
//! there, not whether the answers are registered options. The intake flow
//! runs [`is_complete`] on every step transition and [`validate`] once, at
//! submission.

use std::collections::BTreeSet;

use super::{
    DevotionalPreferences, OnboardingError, OnboardingResponse, PartialOnboardingResponse,
    QuestionnaireOption, MAX_PRAYER_FOCUS_CHARS, PREFERENCE_NEUTRAL,
};
use crate::domain::foundation::ValidationError;

/// Every slider at the neutral midpoint.
pub fn default_preferences() -> DevotionalPreferences {
    DevotionalPreferences::uniform(PREFERENCE_NEUTRAL)
}

/// Required fields that are absent or empty, in questionnaire order.
pub fn missing_fields(partial: &PartialOnboardingResponse) -> Vec<&'static str> {
    fn set_answered(values: &Option<Vec<String>>) -> bool {
        values.as_ref().is_some_and(|v| !v.is_empty())
    }

    let checks = [
        ("faith_journey", partial.faith_journey.is_some()),
        ("life_stage", set_answered(&partial.life_stage)),
        ("daily_challenges", set_answered(&partial.daily_challenges)),
        ("growth_areas", set_answered(&partial.growth_areas)),
        ("devotional_preferences", partial.devotional_preferences.is_some()),
        ("preferred_time", partial.preferred_time.is_some()),
        ("emotional_state", set_answered(&partial.emotional_state)),
        ("spiritual_interests", set_answered(&partial.spiritual_interests)),
        ("sensitive_areas", set_answered(&partial.sensitive_areas)),
    ];

    checks
        .into_iter()
        .filter_map(|(field, answered)| (!answered).then_some(field))
        .collect()
}

/// True iff every required field is present and every set is non-empty.
///
/// `prayer_focus` is optional and never affects the result.
pub fn is_complete(partial: &PartialOnboardingResponse) -> bool {
    missing_fields(partial).is_empty()
}

/// Turns a finished questionnaire into its canonical form.
///
/// Fails with [`OnboardingError::Incomplete`] listing every missing field,
/// then with the first unknown option or out-of-range value found.
pub fn validate(partial: &PartialOnboardingResponse) -> Result<OnboardingResponse, OnboardingError> {
    let missing = missing_fields(partial);
    if !missing.is_empty() {
        return Err(OnboardingError::Incomplete { missing });
    }

    let devotional_preferences = partial
        .devotional_preferences
        .ok_or(OnboardingError::Incomplete {
            missing: vec!["devotional_preferences"],
        })?;
    devotional_preferences.validate()?;

    Ok(OnboardingResponse {
        faith_journey: parse_single(&partial.faith_journey)?,
        life_stage: parse_set(&partial.life_stage)?,
        daily_challenges: parse_set(&partial.daily_challenges)?,
        growth_areas: parse_set(&partial.growth_areas)?,
        devotional_preferences,
        preferred_time: parse_single(&partial.preferred_time)?,
        emotional_state: parse_set(&partial.emotional_state)?,
        spiritual_interests: parse_set(&partial.spiritual_interests)?,
        sensitive_areas: parse_set(&partial.sensitive_areas)?,
        prayer_focus: normalize_prayer_focus(partial.prayer_focus.as_deref())?,
    })
}

/// Trims the prayer focus, drops it when blank and enforces the length cap.
pub fn normalize_prayer_focus(text: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    let length = text.chars().count();
    if length > MAX_PRAYER_FOCUS_CHARS {
        return Err(ValidationError::too_long(
            "prayer_focus",
            MAX_PRAYER_FOCUS_CHARS,
            length,
        ));
    }
    Ok(Some(text.to_string()))
}

fn parse_single<T: QuestionnaireOption>(value: &Option<String>) -> Result<T, OnboardingError> {
    match value {
        Some(value) => T::parse(value),
        None => Err(OnboardingError::Incomplete {
            missing: vec![T::DIMENSION.field_name()],
        }),
    }
}

fn parse_set<T: QuestionnaireOption>(
    values: &Option<Vec<String>>,
) -> Result<BTreeSet<T>, OnboardingError> {
    let values = values
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| OnboardingError::Incomplete {
            missing: vec![T::DIMENSION.field_name()],
        })?;
    values.iter().map(|value| T::parse(value)).collect()
}
