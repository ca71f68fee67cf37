//! Engagement history kept on the user profile

use crate::domain::foundation::{DayKey, DevotionalId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Devotionals issued to the user and free-form engagement metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserHistory {
    /// Devotional ids in the order they were issued.
    #[serde(default)]
    pub previous_devotions: Vec<DevotionalId>,

    /// Opaque engagement data (streaks, favourite themes, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_patterns: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_last_updated: Option<DayKey>,
}

impl UserHistory {
    /// Records that a devotional was issued on `day`.
    ///
    /// Returns false when the id was already recorded; the list is left
    /// unchanged so repeated calls converge.
    pub fn record_devotional(&mut self, id: DevotionalId, day: DayKey) -> bool {
        self.date_last_updated = Some(day);
        if self.has_issued(&id) {
            return false;
        }
        self.previous_devotions.push(id);
        true
    }

    pub fn has_issued(&self, id: &DevotionalId) -> bool {
        self.previous_devotions.contains(id)
    }

    /// Sets one key of the engagement metadata.
    ///
    /// Non-object metadata is replaced by an object holding only this key.
    pub fn record_engagement(&mut self, key: impl Into<String>, value: Value, day: DayKey) {
        let mut patterns = match self.engagement_patterns.take() {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        patterns.insert(key.into(), value);
        self.engagement_patterns = Some(Value::Object(patterns));
        self.date_last_updated = Some(day);
    }

    /// Number of devotionals issued so far.
    pub fn devotional_count(&self) -> usize {
        self.previous_devotions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(d: u32) -> DayKey {
        DayKey::from_ymd(2024, 5, d).unwrap()
    }

    #[test]
    fn record_devotional_appends_and_stamps_day() {
        let mut history = UserHistory::default();
        let id = DevotionalId::new();

        assert!(history.record_devotional(id, day(1)));
        assert_eq!(history.previous_devotions, vec![id]);
        assert_eq!(history.date_last_updated, Some(day(1)));
    }

    #[test]
    fn record_devotional_is_idempotent() {
        let mut history = UserHistory::default();
        let id = DevotionalId::new();

        history.record_devotional(id, day(1));
        let before = history.clone();
        assert!(!history.record_devotional(id, day(1)));
        assert_eq!(history, before);
    }

    #[test]
    fn record_engagement_merges_keys() {
        let mut history = UserHistory::default();
        history.record_engagement("streak", json!(3), day(2));
        history.record_engagement("favorite_theme", json!("peace"), day(3));

        assert_eq!(
            history.engagement_patterns,
            Some(json!({ "streak": 3, "favorite_theme": "peace" }))
        );
        assert_eq!(history.date_last_updated, Some(day(3)));
    }

    #[test]
    fn record_engagement_replaces_non_object_metadata() {
        let mut history = UserHistory {
            engagement_patterns: Some(json!([1, 2])),
            ..Default::default()
        };
        history.record_engagement("streak", json!(1), day(4));
        assert_eq!(history.engagement_patterns, Some(json!({ "streak": 1 })));
    }

    #[test]
    fn deserializes_sparse_rows() {
        let history: UserHistory = serde_json::from_value(json!({})).unwrap();
        assert_eq!(history, UserHistory::default());
    }

    #[test]
    fn serializes_day_key_as_date_string() {
        let mut history = UserHistory::default();
        history.record_devotional(DevotionalId::new(), day(9));
        let value = serde_json::to_value(&history).unwrap();
        assert_eq!(value["date_last_updated"], json!("2024-05-09"));
        assert!(value.get("engagement_patterns").is_none());
    }
}
