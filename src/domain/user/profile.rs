//! UserProfile record and the partial-update shape used to upsert it

use serde::{Deserialize, Serialize};

use super::UserHistory;
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::onboarding::{OnboardingResponse, PersonalizationBrief};

/// Canonical per-user profile.
///
/// `display_name` and `email` come from the identity provider and are stored
/// as given. `onboarding_responses` stays empty until the questionnaire is
/// submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,

    #[serde(default)]
    pub display_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding_responses: Option<OnboardingResponse>,

    #[serde(default)]
    pub user_history: UserHistory,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserProfile {
    /// Store table holding profiles, keyed by `user_id`.
    pub const TABLE: &'static str = "user_profiles";

    /// True once a validated questionnaire is stored.
    pub fn has_completed_onboarding(&self) -> bool {
        self.onboarding_responses.is_some()
    }

    /// Content brief for this user, if onboarding is done.
    pub fn personalization_brief(&self, estimated_read_time: u32) -> Option<PersonalizationBrief> {
        self.onboarding_responses
            .as_ref()
            .map(|r| PersonalizationBrief::from_response(r, estimated_read_time))
    }
}

/// Fields to merge into a profile. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_responses: Option<OnboardingResponse>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_history: Option<UserHistory>,
}

impl ProfilePatch {
    /// Patch carrying what the identity provider returned at sign-in.
    pub fn from_identity(display_name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            display_name: Some(display_name.into()),
            email,
            ..Default::default()
        }
    }

    /// True when the patch would only touch `updated_at`.
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.email.is_none()
            && self.onboarding_responses.is_none()
            && self.user_history.is_none()
    }
}
