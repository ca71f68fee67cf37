//! Devotional content record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DayKey, DevotionalId, Timestamp, UserId, ValidationError};

/// Scripture passage quoted by a devotional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scripture {
    /// e.g. "Philippians 4:6-7"
    pub reference: String,
    pub text: String,
    /// e.g. "NIV"
    pub translation: String,
}

impl Scripture {
    pub fn new(
        reference: impl Into<String>,
        text: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            reference: reference.into(),
            text: text.into(),
            translation: translation.into(),
        }
    }
}

/// A devotional as handed over by the content generator, before storage.
///
/// The id and creation time are assigned when it is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDevotional {
    pub user_id: UserId,
    pub date: DayKey,
    pub scripture: Scripture,
    pub reflection: String,
    pub prayer: String,
    pub theme: String,
    pub estimated_read_time: u32,
}

impl NewDevotional {
    /// Checks the fields a reader cannot do without.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.scripture.reference.trim().is_empty() {
            return Err(ValidationError::empty_field("scripture.reference"));
        }
        if self.reflection.trim().is_empty() {
            return Err(ValidationError::empty_field("reflection"));
        }
        if self.estimated_read_time == 0 {
            return Err(ValidationError::out_of_range(
                "estimated_read_time",
                1,
                u32::MAX as i64,
                0,
            ));
        }
        Ok(())
    }

    /// Attaches the storage-assigned identity.
    pub fn into_content(self, id: DevotionalId, created_at: Timestamp) -> DevotionalContent {
        DevotionalContent {
            id,
            user_id: self.user_id,
            date: self.date,
            scripture: self.scripture,
            reflection: self.reflection,
            prayer: self.prayer,
            theme: self.theme,
            estimated_read_time: self.estimated_read_time,
            created_at,
        }
    }
}

/// A stored devotional. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevotionalContent {
    id: DevotionalId,
    user_id: UserId,
    date: DayKey,
    scripture: Scripture,
    reflection: String,
    prayer: String,
    theme: String,
    estimated_read_time: u32,
    created_at: Timestamp,
}

impl DevotionalContent {
    /// Store table holding devotionals, unique on `(user_id, date)`.
    pub const TABLE: &'static str = "devotional_content";

    pub fn id(&self) -> DevotionalId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn date(&self) -> DayKey {
        self.date
    }

    pub fn scripture(&self) -> &Scripture {
        &self.scripture
    }

    pub fn reflection(&self) -> &str {
        &self.reflection
    }

    pub fn prayer(&self) -> &str {
        &self.prayer
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn estimated_read_time(&self) -> u32 {
        self.estimated_read_time
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// "1 minute read" / "6 minutes read".
    pub fn read_time_label(&self) -> String {
        if self.estimated_read_time == 1 {
            "1 minute read".to_string()
        } else {
            format!("{} minutes read", self.estimated_read_time)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_devotional() -> NewDevotional {
        NewDevotional {
            user_id: UserId::new("user-1").unwrap(),
            date: DayKey::from_ymd(2024, 4, 2).unwrap(),
            scripture: Scripture::new("Psalm 23:1", "The Lord is my shepherd...", "ESV"),
            reflection: "Rest is a gift.".to_string(),
            prayer: "Lord, lead me.".to_string(),
            theme: "Rest".to_string(),
            estimated_read_time: 6,
        }
    }

    #[test]
    fn valid_devotional_passes() {
        assert!(new_devotional().validate().is_ok());
    }

    #[test]
    fn blank_reference_is_rejected() {
        let mut d = new_devotional();
        d.scripture.reference = "  ".to_string();
        assert_eq!(
            d.validate().unwrap_err(),
            ValidationError::empty_field("scripture.reference")
        );
    }

    #[test]
    fn blank_reflection_is_rejected() {
        let mut d = new_devotional();
        d.reflection = String::new();
        assert!(d.validate().is_err());
    }

    #[test]
    fn zero_read_time_is_rejected() {
        let mut d = new_devotional();
        d.estimated_read_time = 0;
        assert!(d.validate().is_err());
    }

    #[test]
    fn into_content_keeps_fields_and_assigns_identity() {
        let id = DevotionalId::new();
        let created_at = Timestamp::now();
        let content = new_devotional().into_content(id, created_at);

        assert_eq!(content.id(), id);
        assert_eq!(content.created_at(), created_at);
        assert_eq!(content.date().to_string(), "2024-04-02");
        assert_eq!(content.scripture().translation, "ESV");
    }

    #[test]
    fn serializes_to_row_shape() {
        let content = new_devotional().into_content(DevotionalId::new(), Timestamp::now());
        let row = serde_json::to_value(&content).unwrap();

        assert_eq!(row["user_id"], json!("user-1"));
        assert_eq!(row["date"], json!("2024-04-02"));
        assert_eq!(row["scripture"]["reference"], json!("Psalm 23:1"));
        assert_eq!(row["estimated_read_time"], json!(6));
    }

    #[test]
    fn read_time_label_pluralizes() {
        let mut d = new_devotional();
        d.estimated_read_time = 1;
        let one = d.clone().into_content(DevotionalId::new(), Timestamp::now());
        assert_eq!(one.read_time_label(), "1 minute read");

        d.estimated_read_time = 6;
        let six = d.into_content(DevotionalId::new(), Timestamp::now());
        assert_eq!(six.read_time_label(), "6 minutes read");
    }
}
