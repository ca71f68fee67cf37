//! Mapping from onboarding answers to a content brief.
//!
//! The devotional text itself is produced by an external generator. This
//! module fixes what that generator is told about the user: tone per slider,
//! topics to draw from, and areas to handle gently.

use serde::Serialize;
use std::fmt;

use super::{
    DailyChallenge, EmotionalState, FaithJourney, LifeStage, OnboardingResponse,
    PreferenceSlider, PreferredTime, QuestionnaireOption, SensitiveArea,
};

/// Default devotional length in minutes.
pub const DEFAULT_READ_TIME_MINUTES: u32 = 6;

/// Which pole of a slider the user leans toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Leaning {
    StronglyLeft,
    Left,
    Balanced,
    Right,
    StronglyRight,
}

impl Leaning {
    /// Reads a 1-5 slider position. Positions outside the scale clamp.
    pub fn from_position(position: u8) -> Self {
        match position {
            0 | 1 => Leaning::StronglyLeft,
            2 => Leaning::Left,
            3 => Leaning::Balanced,
            4 => Leaning::Right,
            _ => Leaning::StronglyRight,
        }
    }
}

/// Tone instruction derived from one slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToneDirective {
    pub slider: PreferenceSlider,
    pub leaning: Leaning,
}

impl ToneDirective {
    /// Short phrase such as "strongly gentle" or "deep".
    pub fn describe(&self) -> String {
        let left = self.slider.left_label().to_lowercase();
        let right = self.slider.right_label().to_lowercase();
        match self.leaning {
            Leaning::StronglyLeft => format!("strongly {}", left),
            Leaning::Left => left,
            Leaning::Balanced => format!("balanced between {} and {}", left, right),
            Leaning::Right => right,
            Leaning::StronglyRight => format!("strongly {}", right),
        }
    }
}

impl fmt::Display for ToneDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

/// Everything the content generator needs to personalize one devotional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonalizationBrief {
    pub faith_journey: FaithJourney,
    pub life_stage: Vec<LifeStage>,
    /// One directive per slider the user moved off the midpoint.
    pub tone: Vec<ToneDirective>,
    /// Growth areas followed by spiritual interests, as display labels.
    pub focus_topics: Vec<&'static str>,
    pub current_challenges: Vec<&'static str>,
    pub emotional_context: Vec<&'static str>,
    /// Topics to approach with care. Empty when the user chose "none apply".
    pub handle_gently: Vec<&'static str>,
    pub preferred_time: PreferredTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prayer_focus: Option<String>,
    pub estimated_read_time: u32,
}

impl PersonalizationBrief {
    /// Builds the brief for a completed questionnaire.
    pub fn from_response(response: &OnboardingResponse, estimated_read_time: u32) -> Self {
        let prefs = response.devotional_preferences();
        let tone = PreferenceSlider::ALL
            .iter()
            .map(|slider| ToneDirective {
                slider: *slider,
                leaning: Leaning::from_position(prefs.get(*slider)),
            })
            .filter(|directive| directive.leaning != Leaning::Balanced)
            .collect();

        let mut focus_topics: Vec<&'static str> =
            response.growth_areas().iter().map(|a| a.label()).collect();
        for interest in response.spiritual_interests() {
            if !focus_topics.contains(&interest.label()) {
                focus_topics.push(interest.label());
            }
        }

        Self {
            faith_journey: response.faith_journey(),
            life_stage: response.life_stage().iter().copied().collect(),
            tone,
            focus_topics,
            current_challenges: response
                .daily_challenges()
                .iter()
                .filter(|c| **c != DailyChallenge::NoneMajorChallenges)
                .map(|c| c.label())
                .collect(),
            emotional_context: response
                .emotional_state()
                .iter()
                .map(EmotionalState::label)
                .collect(),
            handle_gently: response
                .sensitive_areas()
                .iter()
                .filter(|a| **a != SensitiveArea::NoneApply)
                .map(|a| a.label())
                .collect(),
            preferred_time: response.preferred_time(),
            prayer_focus: response.prayer_focus().map(str::to_string),
            estimated_read_time,
        }
    }

    /// Tone directives rendered as phrases.
    pub fn tone_summary(&self) -> Vec<String> {
        self.tone.iter().map(ToneDirective::describe).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::onboarding::{default_preferences, validate, PartialOnboardingResponse};

    fn response(
        prefs: crate::domain::onboarding::DevotionalPreferences,
        sensitive: &[&str],
    ) -> OnboardingResponse {
        let partial = PartialOnboardingResponse {
            faith_journey: Some("mature_believer".into()),
            life_stage: Some(vec!["caregiver".into()]),
            daily_challenges: Some(vec!["none_major_challenges".into(), "health_wellness".into()]),
            growth_areas: Some(vec!["prayer".into(), "peace".into()]),
            devotional_preferences: Some(prefs),
            preferred_time: Some("evening".into()),
            emotional_state: Some(vec!["grieving".into()]),
            spiritual_interests: Some(vec!["prayer".into(), "healing".into()]),
            sensitive_areas: Some(sensitive.iter().map(|s| s.to_string()).collect()),
            prayer_focus: Some("my mother".into()),
        };
        validate(&partial).unwrap()
    }

    #[test]
    fn leaning_maps_each_position() {
        assert_eq!(Leaning::from_position(1), Leaning::StronglyLeft);
        assert_eq!(Leaning::from_position(2), Leaning::Left);
        assert_eq!(Leaning::from_position(3), Leaning::Balanced);
        assert_eq!(Leaning::from_position(4), Leaning::Right);
        assert_eq!(Leaning::from_position(5), Leaning::StronglyRight);
    }

    #[test]
    fn neutral_preferences_produce_no_tone_directives() {
        let brief = PersonalizationBrief::from_response(
            &response(default_preferences(), &["none_apply"]),
            DEFAULT_READ_TIME_MINUTES,
        );
        assert!(brief.tone.is_empty());
        assert_eq!(brief.estimated_read_time, 6);
    }

    #[test]
    fn moved_sliders_become_directives() {
        let mut prefs = default_preferences();
        prefs.gentle_challenging = 1;
        prefs.simple_deep = 4;

        let brief = PersonalizationBrief::from_response(&response(prefs, &["none_apply"]), 6);
        assert_eq!(brief.tone_summary(), vec!["strongly gentle", "deep"]);
    }

    #[test]
    fn focus_topics_merge_growth_and_interests_without_duplicates() {
        let brief = PersonalizationBrief::from_response(
            &response(default_preferences(), &["none_apply"]),
            6,
        );
        assert_eq!(brief.focus_topics, vec!["Prayer", "Peace", "Healing"]);
    }

    #[test]
    fn none_options_are_left_out() {
        let brief = PersonalizationBrief::from_response(
            &response(default_preferences(), &["none_apply"]),
            6,
        );
        assert_eq!(brief.current_challenges, vec!["Health & wellness"]);
        assert!(brief.handle_gently.is_empty());
    }

    #[test]
    fn sensitive_areas_are_passed_as_labels() {
        let brief = PersonalizationBrief::from_response(
            &response(default_preferences(), &["mental_health", "past_trauma"]),
            6,
        );
        assert_eq!(
            brief.handle_gently,
            vec![
                "Past trauma or difficult experiences",
                "Mental health & emotional struggles"
            ]
        );
        assert_eq!(brief.prayer_focus.as_deref(), Some("my mother"));
    }

    #[test]
    fn balanced_directive_names_both_poles() {
        let directive = ToneDirective {
            slider: PreferenceSlider::StoriesConcepts,
            leaning: Leaning::Balanced,
        };
        assert_eq!(directive.to_string(), "balanced between stories and concepts");
    }
}
