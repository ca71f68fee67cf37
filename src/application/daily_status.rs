//! DailyStatus - What a user needs when they open the app today.
//!
//! Composes the two persistence services: onboarding state from the profile,
//! today's devotional from the content table, and the personalization brief
//! the content generator needs when nothing has been issued yet.

use chrono::FixedOffset;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use super::{DevotionalError, DevotionalService, ProfileError, ProfileService};
use crate::domain::devotional::DevotionalContent;
use crate::domain::foundation::{DayKey, ErrorCode, TimeOfDay, UserId};
use crate::domain::onboarding::PersonalizationBrief;
use crate::ports::Clock;

#[derive(Debug, Error)]
pub enum DailyStatusError {
    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Devotional(#[from] DevotionalError),
}

impl DailyStatusError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DailyStatusError::Profile(e) => e.code(),
            DailyStatusError::Devotional(e) => e.code(),
        }
    }
}

/// Snapshot of a user's day.
#[derive(Debug, Clone)]
pub struct DailyStatus {
    pub user_id: UserId,
    pub date: DayKey,
    pub time_of_day: TimeOfDay,
    pub has_profile: bool,
    pub has_completed_onboarding: bool,
    pub todays_devotional: Option<DevotionalContent>,
    /// Present only when onboarding is done and today's devotional is missing.
    pub brief: Option<PersonalizationBrief>,
}

impl DailyStatus {
    pub fn needs_onboarding(&self) -> bool {
        !self.has_completed_onboarding
    }

    /// True when a devotional should be generated for today.
    pub fn needs_devotional(&self) -> bool {
        self.brief.is_some()
    }
}

/// Handler assembling [`DailyStatus`].
pub struct DailyStatusHandler {
    profiles: Arc<ProfileService>,
    devotionals: Arc<DevotionalService>,
    clock: Arc<dyn Clock>,
    estimated_read_time: u32,
}

impl DailyStatusHandler {
    pub fn new(
        profiles: Arc<ProfileService>,
        devotionals: Arc<DevotionalService>,
        clock: Arc<dyn Clock>,
        estimated_read_time: u32,
    ) -> Self {
        Self {
            profiles,
            devotionals,
            clock,
            estimated_read_time,
        }
    }

    /// Assembles the status for `user_id`.
    ///
    /// `offset` is the caller's UTC offset. It only picks the part of the
    /// day; the day key stays the UTC date.
    pub async fn handle(
        &self,
        user_id: &UserId,
        offset: FixedOffset,
    ) -> Result<DailyStatus, DailyStatusError> {
        let now = self.clock.now();
        let profile = self.profiles.get_profile(user_id).await?;
        let todays_devotional = self.devotionals.get_todays_devotional(user_id).await?;

        let brief = match (&profile, &todays_devotional) {
            (Some(profile), None) => profile.personalization_brief(self.estimated_read_time),
            _ => None,
        };

        let status = DailyStatus {
            user_id: user_id.clone(),
            date: self.clock.today(),
            time_of_day: TimeOfDay::of(&now.with_offset(offset)),
            has_profile: profile.is_some(),
            has_completed_onboarding: profile
                .as_ref()
                .map_or(false, |p| p.has_completed_onboarding()),
            todays_devotional,
            brief,
        };
        debug!(
            user_id = %user_id,
            onboarded = status.has_completed_onboarding,
            needs_devotional = status.needs_devotional(),
            "Daily status assembled"
        );
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, InMemoryRecordStore};
    use crate::domain::devotional::{NewDevotional, Scripture};
    use crate::domain::foundation::Timestamp;
    use crate::domain::onboarding::{PartialOnboardingResponse, DEFAULT_READ_TIME_MINUTES};
    use crate::domain::user::ProfilePatch;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    struct Fixture {
        handler: DailyStatusHandler,
        profiles: Arc<ProfileService>,
        devotionals: Arc<DevotionalService>,
        clock: Arc<FixedClock>,
    }

    fn fixture() -> Fixture {
        let clock = Arc::new(FixedClock::new(Timestamp::from_datetime(
            Utc.with_ymd_and_hms(2024, 6, 1, 19, 0, 0).unwrap(),
        )));
        let store = Arc::new(InMemoryRecordStore::with_default_schema(clock.clone()));
        let profiles = Arc::new(ProfileService::new(store.clone(), clock.clone()));
        let devotionals = Arc::new(DevotionalService::new(store, clock.clone()));
        let handler = DailyStatusHandler::new(
            profiles.clone(),
            devotionals.clone(),
            clock.clone(),
            DEFAULT_READ_TIME_MINUTES,
        );
        Fixture {
            handler,
            profiles,
            devotionals,
            clock,
        }
    }

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn answers() -> PartialOnboardingResponse {
        serde_json::from_value(json!({
            "faith_journey": "new_to_faith",
            "life_stage": ["student"],
            "daily_challenges": ["none_major_challenges"],
            "growth_areas": ["prayer"],
            "devotional_preferences": {
                "gentle_challenging": 1,
                "encouraging_convicting": 3,
                "simple_deep": 3,
                "practical_theological": 3,
                "stories_concepts": 3,
                "reflection_action": 3
            },
            "preferred_time": "evening",
            "emotional_state": ["peaceful"],
            "spiritual_interests": ["prayer"],
            "sensitive_areas": ["none_apply"]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn unknown_user_needs_onboarding() {
        let f = fixture();
        let status = f.handler.handle(&user(), utc()).await.unwrap();

        assert!(!status.has_profile);
        assert!(status.needs_onboarding());
        assert!(!status.needs_devotional());
        assert_eq!(status.time_of_day, TimeOfDay::Evening);
        assert_eq!(status.date.to_string(), "2024-06-01");
    }

    #[tokio::test]
    async fn part_of_day_follows_the_callers_offset() {
        let f = fixture();
        f.clock.set(Timestamp::from_datetime(
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        ));

        let new_york = FixedOffset::west_opt(4 * 3600).unwrap();
        let status = f.handler.handle(&user(), new_york).await.unwrap();
        assert_eq!(status.time_of_day, TimeOfDay::Morning);
        assert_eq!(status.date.to_string(), "2024-06-01");

        let status = f.handler.handle(&user(), utc()).await.unwrap();
        assert_eq!(status.time_of_day, TimeOfDay::Afternoon);
    }

    #[tokio::test]
    async fn local_evening_keeps_the_utc_day() {
        let f = fixture();
        f.clock.set(Timestamp::from_datetime(
            Utc.with_ymd_and_hms(2024, 6, 2, 1, 30, 0).unwrap(),
        ));

        let los_angeles = FixedOffset::west_opt(7 * 3600).unwrap();
        let status = f.handler.handle(&user(), los_angeles).await.unwrap();
        assert_eq!(status.time_of_day, TimeOfDay::Evening);
        assert_eq!(status.date.to_string(), "2024-06-02");
    }

    #[tokio::test]
    async fn onboarded_user_without_devotional_gets_brief() {
        let f = fixture();
        f.profiles
            .upsert_profile(&user(), ProfilePatch::from_identity("Ruth", None))
            .await
            .unwrap();
        f.profiles.submit_onboarding(&user(), &answers()).await.unwrap();

        let status = f.handler.handle(&user(), utc()).await.unwrap();

        assert!(!status.needs_onboarding());
        assert!(status.needs_devotional());
        let brief = status.brief.unwrap();
        assert_eq!(brief.estimated_read_time, DEFAULT_READ_TIME_MINUTES);
    }

    #[tokio::test]
    async fn devotional_issued_today_clears_brief() {
        let f = fixture();
        f.profiles
            .upsert_profile(&user(), ProfilePatch::from_identity("Ruth", None))
            .await
            .unwrap();
        f.profiles.submit_onboarding(&user(), &answers()).await.unwrap();
        f.devotionals
            .create_devotional(NewDevotional {
                user_id: user(),
                date: f.clock.today(),
                scripture: Scripture::new("Psalm 4:8", "In peace I will lie down and sleep...", "NIV"),
                reflection: "Rest in Him tonight.".to_string(),
                prayer: "Give me rest.".to_string(),
                theme: "Rest".to_string(),
                estimated_read_time: 5,
            })
            .await
            .unwrap();

        let status = f.handler.handle(&user(), utc()).await.unwrap();

        assert!(status.todays_devotional.is_some());
        assert!(!status.needs_devotional());
    }
}
