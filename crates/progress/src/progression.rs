//! Plan progression - the only write path for plan progress.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use skillplan_core::{DayAction, PlanError, PlanId, SkillPlan};
use skillplan_storage::PlanStore;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{ProgressError, Result};
use crate::gate::DayArtifactGate;

/// Store handle shared by the controller and the read-side services.
pub type SharedStore<S> = Arc<Mutex<S>>;

/// Complete the current day of `plan`, returning the next snapshot.
///
/// The input is never modified. Fails with `InvalidState` when the plan is
/// already completed or its current day is past the duration, and with
/// `Validation` when the snapshot breaks a plan invariant.
pub fn advance(plan: &SkillPlan, now: DateTime<Utc>) -> skillplan_core::Result<SkillPlan> {
    if plan.is_completed {
        return Err(PlanError::invalid_state(format!("plan {} is already completed", plan.id)));
    }
    if plan.current_day > plan.duration_in_days {
        return Err(PlanError::invalid_state(format!(
            "current day {} is past the {}-day plan",
            plan.current_day, plan.duration_in_days
        )));
    }
    plan.validate()?;

    let mut next = plan.clone();
    next.completed_days.insert(plan.current_day);
    next.current_day = plan.current_day + 1;
    next.is_completed = next.current_day > next.duration_in_days;
    next.updated_at = now;
    Ok(next)
}

/// Store-backed progression controller.
///
/// Each transition runs as fetch, advance, save while holding the store lock,
/// so readers sharing the handle never see a half-applied completion. Writers
/// in other processes must be serialized by the store itself.
pub struct PlanProgressionController<S: PlanStore> {
    storage: SharedStore<S>,
}

impl<S: PlanStore> PlanProgressionController<S> {
    /// Create a controller owning `storage`.
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
        }
    }

    /// Create a controller over an existing shared handle.
    pub fn with_shared(storage: SharedStore<S>) -> Self {
        Self { storage }
    }

    /// The shared store handle.
    pub fn storage(&self) -> SharedStore<S> {
        Arc::clone(&self.storage)
    }

    /// Create and persist a new plan.
    pub async fn create_plan(&self, skill: impl Into<String>, duration_in_days: u32) -> Result<SkillPlan> {
        let plan = SkillPlan::new(skill, duration_in_days)?;
        self.storage.lock().await.save_plan(&plan).await?;
        info!("Created plan {} ({} days)", plan.id, plan.duration_in_days);
        Ok(plan)
    }

    /// Fetch a plan snapshot.
    pub async fn fetch_plan(&self, plan_id: PlanId) -> Result<SkillPlan> {
        let storage = self.storage.lock().await;
        storage
            .load_plan(plan_id)
            .await?
            .ok_or(ProgressError::PlanNotFound(plan_id))
    }

    /// Mark the plan's current day finished and advance to the next one.
    ///
    /// Not idempotent: two calls complete two days. A rejected call leaves
    /// the stored plan untouched.
    pub async fn complete_current_day(&self, plan_id: PlanId) -> Result<SkillPlan> {
        let mut storage = self.storage.lock().await;
        let plan = storage
            .load_plan(plan_id)
            .await?
            .ok_or(ProgressError::PlanNotFound(plan_id))?;

        let next = advance(&plan, Utc::now()).map_err(|e| {
            warn!("Rejected completion for plan {}: {}", plan_id, e);
            e
        })?;
        storage.save_plan(&next).await?;

        if next.is_completed {
            info!("Plan {} completed after {} days", plan_id, next.duration_in_days);
        } else {
            debug!("Plan {} advanced to day {}", plan_id, next.current_day);
        }
        Ok(next)
    }

    /// Complete `day`, which must be the plan's current day.
    ///
    /// For callers that act on a day the learner picked rather than on
    /// "whatever is current".
    pub async fn complete_day(&self, plan_id: PlanId, day: i64) -> Result<SkillPlan> {
        let mut storage = self.storage.lock().await;
        let plan = storage
            .load_plan(plan_id)
            .await?
            .ok_or(ProgressError::PlanNotFound(plan_id))?;

        if plan.is_completed {
            return Err(PlanError::invalid_state(format!("plan {} is already completed", plan_id)).into());
        }
        DayArtifactGate::new(&plan).check(DayAction::CompleteDay, day)?;

        let next = advance(&plan, Utc::now())?;
        storage.save_plan(&next).await?;
        debug!("Plan {} completed day {}", plan_id, day);
        Ok(next)
    }

    /// Delete a plan and its artifacts.
    pub async fn delete_plan(&self, plan_id: PlanId) -> Result<()> {
        self.storage.lock().await.delete_plan(plan_id).await?;
        info!("Deleted plan {}", plan_id);
        Ok(())
    }
}
