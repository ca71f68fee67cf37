//! Onboarding response shapes.
//!
//! `PartialOnboardingResponse` is what the intake flow holds while the user
//! is still answering: raw values, nothing checked. `OnboardingResponse` is
//! the canonical, validated shape stored on the profile; the only ways to get
//! one are [`validate`](super::validate) and its `TryFrom`/serde equivalents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{
    DailyChallenge, Dimension, EmotionalState, FaithJourney, GrowthArea, LifeStage,
    OnboardingError, PreferenceSlider, PreferredTime, QuestionnaireOption, SensitiveArea,
    SpiritualInterest,
};
use crate::domain::foundation::ValidationError;

/// Lowest slider position.
pub const PREFERENCE_MIN: u8 = 1;
/// Highest slider position.
pub const PREFERENCE_MAX: u8 = 5;
/// Midpoint used when the user has not moved a slider.
pub const PREFERENCE_NEUTRAL: u8 = 3;
/// Maximum prayer focus length, in characters.
pub const MAX_PRAYER_FOCUS_CHARS: usize = 300;

/// Devotional style sliders, each on a 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevotionalPreferences {
    pub gentle_challenging: u8,
    pub encouraging_convicting: u8,
    pub simple_deep: u8,
    pub practical_theological: u8,
    pub stories_concepts: u8,
    pub reflection_action: u8,
}

impl DevotionalPreferences {
    /// All six sliders at the same position.
    pub fn uniform(value: u8) -> Self {
        Self {
            gentle_challenging: value,
            encouraging_convicting: value,
            simple_deep: value,
            practical_theological: value,
            stories_concepts: value,
            reflection_action: value,
        }
    }

    /// Position of one slider.
    pub fn get(&self, slider: PreferenceSlider) -> u8 {
        match slider {
            PreferenceSlider::GentleChallenging => self.gentle_challenging,
            PreferenceSlider::EncouragingConvicting => self.encouraging_convicting,
            PreferenceSlider::SimpleDeep => self.simple_deep,
            PreferenceSlider::PracticalTheological => self.practical_theological,
            PreferenceSlider::StoriesConcepts => self.stories_concepts,
            PreferenceSlider::ReflectionAction => self.reflection_action,
        }
    }

    /// Moves one slider, rejecting positions outside 1-5.
    pub fn set(&mut self, slider: PreferenceSlider, value: u8) -> Result<(), ValidationError> {
        check_slider(slider, value)?;
        let slot = match slider {
            PreferenceSlider::GentleChallenging => &mut self.gentle_challenging,
            PreferenceSlider::EncouragingConvicting => &mut self.encouraging_convicting,
            PreferenceSlider::SimpleDeep => &mut self.simple_deep,
            PreferenceSlider::PracticalTheological => &mut self.practical_theological,
            PreferenceSlider::StoriesConcepts => &mut self.stories_concepts,
            PreferenceSlider::ReflectionAction => &mut self.reflection_action,
        };
        *slot = value;
        Ok(())
    }

    /// Checks every slider is within 1-5.
    pub fn validate(&self) -> Result<(), ValidationError> {
        PreferenceSlider::ALL
            .iter()
            .try_for_each(|slider| check_slider(*slider, self.get(*slider)))
    }
}

impl Default for DevotionalPreferences {
    fn default() -> Self {
        Self::uniform(PREFERENCE_NEUTRAL)
    }
}

fn check_slider(slider: PreferenceSlider, value: u8) -> Result<(), ValidationError> {
    if !(PREFERENCE_MIN..=PREFERENCE_MAX).contains(&value) {
        return Err(ValidationError::out_of_range(
            slider.field_name(),
            PREFERENCE_MIN as i64,
            PREFERENCE_MAX as i64,
            value as i64,
        ));
    }
    Ok(())
}

/// In-progress questionnaire answers, held without value checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialOnboardingResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faith_journey: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub life_stage: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_challenges: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_areas: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devotional_preferences: Option<DevotionalPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotional_state: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spiritual_interests: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitive_areas: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prayer_focus: Option<String>,
}

impl PartialOnboardingResponse {
    /// Creates an empty response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw answers recorded for a dimension, if any.
    ///
    /// Single-select dimensions yield at most one value.
    pub fn answers(&self, dimension: Dimension) -> Option<Vec<&str>> {
        fn single(value: &Option<String>) -> Option<Vec<&str>> {
            value.as_deref().map(|v| vec![v])
        }
        fn many(values: &Option<Vec<String>>) -> Option<Vec<&str>> {
            values
                .as_ref()
                .map(|vs| vs.iter().map(String::as_str).collect())
        }

        match dimension {
            Dimension::FaithJourney => single(&self.faith_journey),
            Dimension::LifeStage => many(&self.life_stage),
            Dimension::DailyChallenges => many(&self.daily_challenges),
            Dimension::GrowthAreas => many(&self.growth_areas),
            Dimension::PreferredTime => single(&self.preferred_time),
            Dimension::EmotionalState => many(&self.emotional_state),
            Dimension::SpiritualInterests => many(&self.spiritual_interests),
            Dimension::SensitiveAreas => many(&self.sensitive_areas),
        }
    }

    /// Replaces the answers for a dimension.
    ///
    /// For single-select dimensions the first value wins and an empty list
    /// clears the answer.
    pub fn set_answers<I, S>(&mut self, dimension: Dimension, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        match dimension {
            Dimension::FaithJourney => self.faith_journey = values.into_iter().next(),
            Dimension::PreferredTime => self.preferred_time = values.into_iter().next(),
            Dimension::LifeStage => self.life_stage = Some(values),
            Dimension::DailyChallenges => self.daily_challenges = Some(values),
            Dimension::GrowthAreas => self.growth_areas = Some(values),
            Dimension::EmotionalState => self.emotional_state = Some(values),
            Dimension::SpiritualInterests => self.spiritual_interests = Some(values),
            Dimension::SensitiveAreas => self.sensitive_areas = Some(values),
        }
    }
}

/// A complete, validated questionnaire.
///
/// Deserializing goes through the same validation as [`super::validate`], so
/// a stored row with an unknown value fails to load instead of being
/// silently trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PartialOnboardingResponse")]
pub struct OnboardingResponse {
    pub(super) faith_journey: FaithJourney,
    pub(super) life_stage: BTreeSet<LifeStage>,
    pub(super) daily_challenges: BTreeSet<DailyChallenge>,
    pub(super) growth_areas: BTreeSet<GrowthArea>,
    pub(super) devotional_preferences: DevotionalPreferences,
    pub(super) preferred_time: PreferredTime,
    pub(super) emotional_state: BTreeSet<EmotionalState>,
    pub(super) spiritual_interests: BTreeSet<SpiritualInterest>,
    pub(super) sensitive_areas: BTreeSet<SensitiveArea>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) prayer_focus: Option<String>,
}

impl OnboardingResponse {
    pub fn faith_journey(&self) -> FaithJourney {
        self.faith_journey
    }

    pub fn life_stage(&self) -> &BTreeSet<LifeStage> {
        &self.life_stage
    }

    pub fn daily_challenges(&self) -> &BTreeSet<DailyChallenge> {
        &self.daily_challenges
    }

    pub fn growth_areas(&self) -> &BTreeSet<GrowthArea> {
        &self.growth_areas
    }

    pub fn devotional_preferences(&self) -> &DevotionalPreferences {
        &self.devotional_preferences
    }

    pub fn preferred_time(&self) -> PreferredTime {
        self.preferred_time
    }

    pub fn emotional_state(&self) -> &BTreeSet<EmotionalState> {
        &self.emotional_state
    }

    pub fn spiritual_interests(&self) -> &BTreeSet<SpiritualInterest> {
        &self.spiritual_interests
    }

    pub fn sensitive_areas(&self) -> &BTreeSet<SensitiveArea> {
        &self.sensitive_areas
    }

    pub fn prayer_focus(&self) -> Option<&str> {
        self.prayer_focus.as_deref()
    }
}

impl TryFrom<PartialOnboardingResponse> for OnboardingResponse {
    type Error = OnboardingError;

    fn try_from(partial: PartialOnboardingResponse) -> Result<Self, Self::Error> {
        super::validate(&partial)
    }
}

fn raw_set<T: QuestionnaireOption>(values: &BTreeSet<T>) -> Option<Vec<String>> {
    Some(values.iter().map(|v| v.value().to_string()).collect())
}

impl From<&OnboardingResponse> for PartialOnboardingResponse {
    /// Reopens a completed questionnaire for editing.
    fn from(response: &OnboardingResponse) -> Self {
        Self {
            faith_journey: Some(response.faith_journey.value().to_string()),
            life_stage: raw_set(&response.life_stage),
            daily_challenges: raw_set(&response.daily_challenges),
            growth_areas: raw_set(&response.growth_areas),
            devotional_preferences: Some(response.devotional_preferences),
            preferred_time: Some(response.preferred_time.value().to_string()),
            emotional_state: raw_set(&response.emotional_state),
            spiritual_interests: raw_set(&response.spiritual_interests),
            sensitive_areas: raw_set(&response.sensitive_areas),
            prayer_focus: response.prayer_focus.clone(),
        }
    }
}
