//! Option registry for the onboarding questionnaire.
//!
//! Every questionnaire dimension is a closed enumeration. The variant order is
//! the display order, the `value` is what gets stored, and the `label` is what
//! the intake screens render. Adding an option means adding one line to the
//! relevant `questionnaire_options!` block; nothing else hardcodes values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::OnboardingError;

/// A questionnaire dimension backed by a closed option set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    FaithJourney,
    LifeStage,
    DailyChallenges,
    GrowthAreas,
    PreferredTime,
    EmotionalState,
    SpiritualInterests,
    SensitiveAreas,
}

impl Dimension {
    /// All dimensions in questionnaire order.
    pub const ALL: [Dimension; 8] = [
        Dimension::FaithJourney,
        Dimension::LifeStage,
        Dimension::DailyChallenges,
        Dimension::GrowthAreas,
        Dimension::PreferredTime,
        Dimension::EmotionalState,
        Dimension::SpiritualInterests,
        Dimension::SensitiveAreas,
    ];

    /// Name of the response field this dimension fills.
    pub fn field_name(&self) -> &'static str {
        match self {
            Dimension::FaithJourney => "faith_journey",
            Dimension::LifeStage => "life_stage",
            Dimension::DailyChallenges => "daily_challenges",
            Dimension::GrowthAreas => "growth_areas",
            Dimension::PreferredTime => "preferred_time",
            Dimension::EmotionalState => "emotional_state",
            Dimension::SpiritualInterests => "spiritual_interests",
            Dimension::SensitiveAreas => "sensitive_areas",
        }
    }

    /// True when the user may pick more than one option.
    pub fn is_multi_select(&self) -> bool {
        !matches!(self, Dimension::FaithJourney | Dimension::PreferredTime)
    }

    /// Ordered `(value, label)` entries for rendering this dimension.
    pub fn options(&self) -> Vec<OptionEntry> {
        match self {
            Dimension::FaithJourney => entries::<FaithJourney>(),
            Dimension::LifeStage => entries::<LifeStage>(),
            Dimension::DailyChallenges => entries::<DailyChallenge>(),
            Dimension::GrowthAreas => entries::<GrowthArea>(),
            Dimension::PreferredTime => entries::<PreferredTime>(),
            Dimension::EmotionalState => entries::<EmotionalState>(),
            Dimension::SpiritualInterests => entries::<SpiritualInterest>(),
            Dimension::SensitiveAreas => entries::<SensitiveArea>(),
        }
    }

    /// True when `value` is a registered option of this dimension.
    pub fn accepts(&self, value: &str) -> bool {
        self.options().iter().any(|entry| entry.value == value)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

/// A single renderable option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionEntry {
    pub value: &'static str,
    pub label: &'static str,
}

/// Common behaviour of every option enumeration.
pub trait QuestionnaireOption: Copy + Ord + Sized + 'static {
    /// The dimension this enumeration belongs to.
    const DIMENSION: Dimension;

    /// Every option, in display order.
    fn all() -> &'static [Self];

    /// Stored value.
    fn value(&self) -> &'static str;

    /// Display label.
    fn label(&self) -> &'static str;

    /// Looks up an option by its stored value.
    fn parse(value: &str) -> Result<Self, OnboardingError> {
        Self::all()
            .iter()
            .copied()
            .find(|option| option.value() == value)
            .ok_or_else(|| OnboardingError::unknown_option(Self::DIMENSION, value))
    }
}

fn entries<T: QuestionnaireOption>() -> Vec<OptionEntry> {
    T::all()
        .iter()
        .map(|option| OptionEntry {
            value: option.value(),
            label: option.label(),
        })
        .collect()
}

macro_rules! questionnaire_options {
    (
        $(#[$meta:meta])*
        $name:ident in $dimension:expr => {
            $($variant:ident = $value:literal : $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every option, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl QuestionnaireOption for $name {
            const DIMENSION: Dimension = $dimension;

            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn value(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.value())
            }
        }

        impl FromStr for $name {
            type Err = OnboardingError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$name as QuestionnaireOption>::parse(s)
            }
        }
    };
}

questionnaire_options! {
    /// Where the user is in their faith.
    FaithJourney in Dimension::FaithJourney => {
        NewToFaith = "new_to_faith" : "New to faith - just starting to learn about God",
        GrowingBeliever = "growing_believer" : "Growing believer - know the basics but want to grow",
        EstablishedInFaith = "established_in_faith" : "Established in faith - comfortable with deeper spiritual topics",
        MatureBeliever = "mature_believer" : "Mature believer - enjoy theological discussions and study",
        ReturningAfterTimeAway = "returning_after_time_away" : "Returning after time away",
        ExploringQuestioning = "exploring_questioning" : "Exploring/questioning",
    }
}

questionnaire_options! {
    LifeStage in Dimension::LifeStage => {
        Student = "student" : "Student",
        Single = "single" : "Single",
        Married = "married" : "Married",
        Parent = "parent" : "Parent",
        Caregiver = "caregiver" : "Caregiver",
        Retired = "retired" : "Retired",
        MajorLifeTransition = "major_life_transition" : "In a major life transition",
    }
}

questionnaire_options! {
    DailyChallenge in Dimension::DailyChallenges => {
        WorkCareerStress = "work_career_stress" : "Work/career stress",
        RelationshipsFamily = "relationships_family" : "Relationships & family",
        HealthWellness = "health_wellness" : "Health & wellness",
        FinancesProvision = "finances_provision" : "Finances & provision",
        AnxietyEmotionalStruggles = "anxiety_emotional_struggles" : "Anxiety & emotional struggles",
        NoneMajorChallenges = "none_major_challenges" : "None of these major challenges",
    }
}

questionnaire_options! {
    GrowthArea in Dimension::GrowthAreas => {
        Prayer = "prayer" : "Prayer",
        BibleKnowledge = "bible_knowledge" : "Bible knowledge",
        Patience = "patience" : "Patience",
        Forgiveness = "forgiveness" : "Forgiveness",
        Faith = "faith" : "Faith",
        Love = "love" : "Love",
        Purpose = "purpose" : "Purpose",
        Peace = "peace" : "Peace",
        Generosity = "generosity" : "Generosity",
        Leadership = "leadership" : "Leadership",
    }
}

questionnaire_options! {
    /// When the user would like to receive their devotional.
    PreferredTime in Dimension::PreferredTime => {
        Morning = "morning" : "Morning",
        Midday = "midday" : "Midday",
        Evening = "evening" : "Evening",
        Night = "night" : "Night",
        VariesDayToDay = "varies_day_to_day" : "It varies day to day",
    }
}

questionnaire_options! {
    EmotionalState in Dimension::EmotionalState => {
        Peaceful = "peaceful" : "Peaceful",
        Stressed = "stressed" : "Stressed",
        Grieving = "grieving" : "Grieving",
        Anxious = "anxious" : "Anxious",
        Grateful = "grateful" : "Grateful",
        Confused = "confused" : "Confused",
        Hopeful = "hopeful" : "Hopeful",
        Overwhelmed = "overwhelmed" : "Overwhelmed",
        Content = "content" : "Content",
        Uncertain = "uncertain" : "Uncertain",
    }
}

questionnaire_options! {
    SpiritualInterest in Dimension::SpiritualInterests => {
        GodsLove = "gods_love" : "God's love",
        Prayer = "prayer" : "Prayer",
        Relationships = "relationships" : "Relationships",
        Calling = "calling" : "Calling",
        Healing = "healing" : "Healing",
        BibleStories = "bible_stories" : "Bible stories",
        Worship = "worship" : "Worship",
        Service = "service" : "Service",
        Growth = "growth" : "Growth",
        Community = "community" : "Community",
    }
}

questionnaire_options! {
    /// Topics the user wants handled with extra care.
    SensitiveArea in Dimension::SensitiveAreas => {
        PastTrauma = "past_trauma" : "Past trauma or difficult experiences",
        MentalHealth = "mental_health" : "Mental health & emotional struggles",
        FamilyChallenges = "family_challenges" : "Family challenges or dysfunction",
        HealthIssues = "health_issues" : "Health issues or chronic illness",
        FinancialHardship = "financial_hardship" : "Financial hardship or loss",
        NoneApply = "none_apply" : "None of these apply",
    }
}

/// The six devotional-style sliders, each a 1-5 scale between two poles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceSlider {
    GentleChallenging,
    EncouragingConvicting,
    SimpleDeep,
    PracticalTheological,
    StoriesConcepts,
    ReflectionAction,
}

impl PreferenceSlider {
    pub const ALL: [PreferenceSlider; 6] = [
        PreferenceSlider::GentleChallenging,
        PreferenceSlider::EncouragingConvicting,
        PreferenceSlider::SimpleDeep,
        PreferenceSlider::PracticalTheological,
        PreferenceSlider::StoriesConcepts,
        PreferenceSlider::ReflectionAction,
    ];

    pub fn field_name(&self) -> &'static str {
        match self {
            PreferenceSlider::GentleChallenging => "gentle_challenging",
            PreferenceSlider::EncouragingConvicting => "encouraging_convicting",
            PreferenceSlider::SimpleDeep => "simple_deep",
            PreferenceSlider::PracticalTheological => "practical_theological",
            PreferenceSlider::StoriesConcepts => "stories_concepts",
            PreferenceSlider::ReflectionAction => "reflection_action",
        }
    }

    /// Label of the low (1) end of the scale.
    pub fn left_label(&self) -> &'static str {
        match self {
            PreferenceSlider::GentleChallenging => "Gentle",
            PreferenceSlider::EncouragingConvicting => "Encouraging",
            PreferenceSlider::SimpleDeep => "Simple",
            PreferenceSlider::PracticalTheological => "Practical",
            PreferenceSlider::StoriesConcepts => "Stories",
            PreferenceSlider::ReflectionAction => "Reflection",
        }
    }

    /// Label of the high (5) end of the scale.
    pub fn right_label(&self) -> &'static str {
        match self {
            PreferenceSlider::GentleChallenging => "Challenging",
            PreferenceSlider::EncouragingConvicting => "Convicting",
            PreferenceSlider::SimpleDeep => "Deep",
            PreferenceSlider::PracticalTheological => "Theological",
            PreferenceSlider::StoriesConcepts => "Concepts",
            PreferenceSlider::ReflectionAction => "Action",
        }
    }
}

impl fmt::Display for PreferenceSlider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_dimension_has_options_with_unique_values() {
        for dimension in Dimension::ALL {
            let options = dimension.options();
            assert!(!options.is_empty(), "{} has no options", dimension);

            let values: HashSet<_> = options.iter().map(|o| o.value).collect();
            assert_eq!(values.len(), options.len(), "{} has duplicates", dimension);
        }
    }

    #[test]
    fn option_counts_match_questionnaire() {
        assert_eq!(Dimension::FaithJourney.options().len(), 6);
        assert_eq!(Dimension::LifeStage.options().len(), 7);
        assert_eq!(Dimension::DailyChallenges.options().len(), 6);
        assert_eq!(Dimension::GrowthAreas.options().len(), 10);
        assert_eq!(Dimension::PreferredTime.options().len(), 5);
        assert_eq!(Dimension::EmotionalState.options().len(), 10);
        assert_eq!(Dimension::SpiritualInterests.options().len(), 10);
        assert_eq!(Dimension::SensitiveAreas.options().len(), 6);
    }

    #[test]
    fn options_keep_display_order() {
        let values: Vec<_> = Dimension::PreferredTime
            .options()
            .into_iter()
            .map(|o| o.value)
            .collect();
        assert_eq!(
            values,
            vec!["morning", "midday", "evening", "night", "varies_day_to_day"]
        );
    }

    #[test]
    fn parse_finds_registered_value() {
        assert_eq!(LifeStage::parse("student").unwrap(), LifeStage::Student);
        assert_eq!("gods_love".parse::<SpiritualInterest>().unwrap(), SpiritualInterest::GodsLove);
    }

    #[test]
    fn parse_rejects_unknown_value_naming_dimension() {
        let err = LifeStage::parse("astronaut").unwrap_err();
        assert_eq!(
            err,
            OnboardingError::UnknownOption {
                dimension: Dimension::LifeStage,
                value: "astronaut".to_string(),
            }
        );
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!(PreferredTime::parse("Morning").is_err());
    }

    #[test]
    fn serde_uses_stored_values() {
        assert_eq!(
            serde_json::to_string(&FaithJourney::ReturningAfterTimeAway).unwrap(),
            "\"returning_after_time_away\""
        );
        let parsed: GrowthArea = serde_json::from_str("\"bible_knowledge\"").unwrap();
        assert_eq!(parsed, GrowthArea::BibleKnowledge);
    }

    #[test]
    fn labels_come_from_registry() {
        assert_eq!(SpiritualInterest::GodsLove.label(), "God's love");
        assert_eq!(LifeStage::MajorLifeTransition.label(), "In a major life transition");
    }

    #[test]
    fn accepts_checks_membership() {
        assert!(Dimension::SensitiveAreas.accepts("none_apply"));
        assert!(!Dimension::SensitiveAreas.accepts("prayer"));
    }

    #[test]
    fn single_select_dimensions() {
        assert!(!Dimension::FaithJourney.is_multi_select());
        assert!(!Dimension::PreferredTime.is_multi_select());
        assert!(Dimension::LifeStage.is_multi_select());
    }

    #[test]
    fn sliders_expose_pole_labels() {
        assert_eq!(PreferenceSlider::SimpleDeep.left_label(), "Simple");
        assert_eq!(PreferenceSlider::SimpleDeep.right_label(), "Deep");
        assert_eq!(PreferenceSlider::ALL.len(), 6);
    }
}
