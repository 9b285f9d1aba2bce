//! Day-scoped artifacts - notes and topics attached to a plan day.

use serde::{Deserialize, Serialize};

use crate::id::{DayKey, PlanId};
use crate::Time;

/// A learner's free-form note for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Owning plan
    pub plan_id: PlanId,

    /// Day the note belongs to
    pub day: u32,

    /// Note body
    pub content: String,

    /// When created
    pub created_at: Time,

    /// Last edited
    pub updated_at: Time,
}

impl Note {
    /// Create a new note.
    pub fn new(plan_id: PlanId, day: u32, content: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            plan_id,
            day,
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Storage key of the note.
    pub fn key(&self) -> DayKey {
        DayKey::new(self.plan_id, self.day)
    }

    /// Replace the body, bumping `updated_at`.
    pub fn edit(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.updated_at = chrono::Utc::now();
    }
}

/// The study topic assigned to one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Owning plan
    pub plan_id: PlanId,

    /// Day the topic belongs to
    pub day: u32,

    /// Short title
    pub title: String,

    /// Longer description
    pub summary: String,

    /// When created
    pub created_at: Time,

    /// Last edited
    pub updated_at: Time,
}

impl Topic {
    /// Create a new topic.
    pub fn new(
        plan_id: PlanId,
        day: u32,
        title: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        let now = chrono::Utc::now();
        Self {
            plan_id,
            day,
            title: title.into(),
            summary: summary.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Storage key of the topic.
    pub fn key(&self) -> DayKey {
        DayKey::new(self.plan_id, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_edit_bumps_updated_at() {
        let mut note = Note::new(PlanId::new(), 2, "first");
        let created = note.created_at;
        note.edit("second");
        assert_eq!(note.content, "second");
        assert_eq!(note.created_at, created);
        assert!(note.updated_at >= created);
    }

    #[test]
    fn test_artifact_keys() {
        let plan_id = PlanId::new();
        assert_eq!(Note::new(plan_id, 2, "x").key(), DayKey::new(plan_id, 2));
        assert_eq!(Topic::new(plan_id, 3, "Traits", "").key(), DayKey::new(plan_id, 3));
    }

    #[test]
    fn test_topic_json_fields() {
        let topic = Topic::new(PlanId::new(), 1, "Ownership", "Moves and borrows");
        let json = serde_json::to_value(&topic).unwrap();
        assert_eq!(json["day"], 1);
        assert_eq!(json["title"], "Ownership");
    }
}
