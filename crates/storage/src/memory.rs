//! In-memory storage, used by tests and short-lived sessions.

use std::collections::{BTreeMap, HashMap};

use skillplan_core::{DayKey, Note, PlanId, SkillPlan, Topic};

use super::{PlanStore, Result, StorageError};

/// Volatile plan store backed by maps.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    plans: HashMap<PlanId, SkillPlan>,
    notes: BTreeMap<DayKey, Note>,
    topics: BTreeMap<DayKey, Topic>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored plans.
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// Whether no plans are stored.
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

#[async_trait::async_trait]
impl PlanStore for MemoryStorage {
    async fn save_plan(&mut self, plan: &SkillPlan) -> Result<()> {
        self.plans.insert(plan.id, plan.clone());
        Ok(())
    }

    async fn load_plan(&self, id: PlanId) -> Result<Option<SkillPlan>> {
        Ok(self.plans.get(&id).cloned())
    }

    async fn list_plans(&self) -> Result<Vec<SkillPlan>> {
        let mut plans: Vec<_> = self.plans.values().cloned().collect();
        plans.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(plans)
    }

    async fn delete_plan(&mut self, id: PlanId) -> Result<()> {
        if self.plans.remove(&id).is_none() {
            return Err(StorageError::NotFound(format!("plan {}", id)));
        }
        self.notes.retain(|key, _| key.plan_id != id);
        self.topics.retain(|key, _| key.plan_id != id);
        Ok(())
    }

    async fn save_note(&mut self, note: &Note) -> Result<()> {
        self.notes.insert(note.key(), note.clone());
        Ok(())
    }

    async fn load_note(&self, plan_id: PlanId, day: u32) -> Result<Option<Note>> {
        Ok(self.notes.get(&DayKey::new(plan_id, day)).cloned())
    }

    async fn list_notes(&self, plan_id: PlanId) -> Result<Vec<Note>> {
        Ok(self
            .notes
            .range(DayKey::plan_range(plan_id))
            .map(|(_, note)| note.clone())
            .collect())
    }

    async fn save_topic(&mut self, topic: &Topic) -> Result<()> {
        self.topics.insert(topic.key(), topic.clone());
        Ok(())
    }

    async fn load_topic(&self, plan_id: PlanId, day: u32) -> Result<Option<Topic>> {
        Ok(self.topics.get(&DayKey::new(plan_id, day)).cloned())
    }

    async fn list_topics(&self, plan_id: PlanId) -> Result<Vec<Topic>> {
        Ok(self
            .topics
            .range(DayKey::plan_range(plan_id))
            .map(|(_, topic)| topic.clone())
            .collect())
    }
}
