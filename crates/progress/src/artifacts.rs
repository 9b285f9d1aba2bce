//! Gate-checked writes of day notes and topics.

use std::sync::Arc;

use skillplan_core::{DayAction, Note, PlanId, SkillPlan, Topic};
use skillplan_storage::PlanStore;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{ProgressError, Result};
use crate::gate::DayArtifactGate;
use crate::progression::SharedStore;

/// Note and topic operations for plan days.
///
/// The plan is read and the artifact written under one store lock, so a
/// concurrent day completion cannot slip between the gate check and the write.
pub struct DayArtifactService<S: PlanStore> {
    storage: SharedStore<S>,
}

impl<S: PlanStore> DayArtifactService<S> {
    /// Create a service owning `storage`.
    pub fn new(storage: S) -> Self {
        Self::with_shared(Arc::new(Mutex::new(storage)))
    }

    /// Create a service over an existing shared handle.
    pub fn with_shared(storage: SharedStore<S>) -> Self {
        Self { storage }
    }

    /// Create or edit the note for `day`.
    pub async fn write_note(&self, plan_id: PlanId, day: i64, content: impl Into<String>) -> Result<Note> {
        let mut storage = self.storage.lock().await;
        let plan = load(&*storage, plan_id).await?;
        let gate = DayArtifactGate::new(&plan);

        let existing = match u32::try_from(day) {
            Ok(d) => storage.load_note(plan_id, d).await?,
            Err(_) => None,
        };
        let note = match existing {
            Some(mut note) => {
                gate.check(DayAction::EditNote, day).map_err(|e| denied(plan_id, e))?;
                note.edit(content);
                note
            }
            None => {
                let day = gate.check(DayAction::CreateNote, day).map_err(|e| denied(plan_id, e))?;
                Note::new(plan_id, day, content)
            }
        };

        storage.save_note(&note).await?;
        debug!("Saved note for plan {} day {}", plan_id, note.day);
        Ok(note)
    }

    /// Replace the topic for `day`; only the current day is editable.
    pub async fn set_topic(
        &self,
        plan_id: PlanId,
        day: i64,
        title: impl Into<String>,
        summary: impl Into<String>,
    ) -> Result<Topic> {
        let mut storage = self.storage.lock().await;
        let plan = load(&*storage, plan_id).await?;
        let day = DayArtifactGate::new(&plan)
            .check(DayAction::EditTopic, day)
            .map_err(|e| denied(plan_id, e))?;

        let mut topic = Topic::new(plan_id, day, title, summary);
        if let Some(previous) = storage.load_topic(plan_id, day).await? {
            topic.created_at = previous.created_at;
        }

        storage.save_topic(&topic).await?;
        debug!("Saved topic for plan {} day {}", plan_id, day);
        Ok(topic)
    }

    /// Topic to render for `day`; `None` for locked days.
    pub async fn view_topic(&self, plan_id: PlanId, day: i64) -> Result<Option<Topic>> {
        let storage = self.storage.lock().await;
        let plan = load(&*storage, plan_id).await?;
        let gate = DayArtifactGate::new(&plan);
        let day_idx = gate.check(DayAction::ViewTopic, day)?;

        if !gate.status(day).is_unlocked() {
            return Ok(None);
        }
        Ok(storage.load_topic(plan_id, day_idx).await?)
    }

    /// Note for `day`, if any.
    pub async fn note(&self, plan_id: PlanId, day: u32) -> Result<Option<Note>> {
        Ok(self.storage.lock().await.load_note(plan_id, day).await?)
    }

    /// All notes of a plan, ordered by day.
    pub async fn notes(&self, plan_id: PlanId) -> Result<Vec<Note>> {
        Ok(self.storage.lock().await.list_notes(plan_id).await?)
    }
}

async fn load<S: PlanStore>(storage: &S, plan_id: PlanId) -> Result<SkillPlan> {
    storage
        .load_plan(plan_id)
        .await?
        .ok_or(ProgressError::PlanNotFound(plan_id))
}

fn denied(plan_id: PlanId, err: skillplan_core::PlanError) -> ProgressError {
    warn!("Plan {}: {}", plan_id, err);
    err.into()
}
