//! Skill plan model - a time-boxed learning commitment.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::id::PlanId;
use crate::Time;

/// A learner's plan spanning `duration_in_days` days.
///
/// Invariants (checked by [`SkillPlan::validate`]):
/// - `1 <= current_day <= duration_in_days + 1`
/// - every completed day is in `1..current_day`
/// - `is_completed` iff `current_day > duration_in_days`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillPlan {
    /// Unique identifier
    pub id: PlanId,

    /// Skill being learned
    pub skill: String,

    /// Plan length in days
    pub duration_in_days: u32,

    /// Active day, 1-indexed
    pub current_day: u32,

    /// Days explicitly marked finished
    pub completed_days: BTreeSet<u32>,

    /// Set once the last day is completed
    pub is_completed: bool,

    /// When created
    pub created_at: Time,

    /// Last updated
    pub updated_at: Time,
}

/// Coarse lifecycle state of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanState {
    /// Days remain
    InProgress,
    /// Every day has been completed; terminal
    Completed,
}

impl SkillPlan {
    /// Create a fresh plan starting at day 1.
    pub fn new(skill: impl Into<String>, duration_in_days: u32) -> Result<Self> {
        let skill = skill.into();
        if skill.trim().is_empty() {
            return Err(PlanError::validation("skill name must not be empty"));
        }
        if duration_in_days == 0 {
            return Err(PlanError::validation("duration must be at least 1 day"));
        }

        let now = chrono::Utc::now();
        Ok(Self {
            id: PlanId::new(),
            skill,
            duration_in_days,
            current_day: 1,
            completed_days: BTreeSet::new(),
            is_completed: false,
            created_at: now,
            updated_at: now,
        })
    }

    /// Check every structural invariant, reporting the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.duration_in_days == 0 {
            return Err(PlanError::validation("duration must be at least 1 day"));
        }
        if self.current_day == 0 || self.current_day > self.duration_in_days + 1 {
            return Err(PlanError::validation(format!(
                "current day {} outside 1..={}",
                self.current_day,
                self.duration_in_days + 1
            )));
        }
        if let Some(day) = self.completed_days.iter().find(|d| **d == 0 || **d >= self.current_day) {
            return Err(PlanError::validation(format!(
                "completed day {} is not before current day {}",
                day, self.current_day
            )));
        }
        if self.is_completed != (self.current_day > self.duration_in_days) {
            return Err(PlanError::validation(format!(
                "completion flag {} disagrees with current day {} of {}",
                self.is_completed, self.current_day, self.duration_in_days
            )));
        }
        Ok(())
    }

    /// Lifecycle state.
    pub fn state(&self) -> PlanState {
        if self.is_completed {
            PlanState::Completed
        } else {
            PlanState::InProgress
        }
    }

    /// Whether `day` is a valid index for this plan.
    pub fn contains_day(&self, day: i64) -> bool {
        day >= 1 && day <= i64::from(self.duration_in_days)
    }

    /// Whether `day` has been marked finished.
    pub fn is_day_completed(&self, day: i64) -> bool {
        u32::try_from(day)
            .map(|d| self.completed_days.contains(&d))
            .unwrap_or(false)
    }

    /// Days not yet completed, counted from the current day.
    ///
    /// Signed: a finished plan reports `-1`.
    pub fn remaining_days(&self) -> i64 {
        i64::from(self.duration_in_days) - i64::from(self.current_day)
    }

    /// Share of days completed (0-100).
    pub fn completion_percentage(&self) -> f32 {
        if self.duration_in_days == 0 {
            return 0.0;
        }
        (self.completed_days.len() as f32 / self.duration_in_days as f32) * 100.0
    }

    /// Identity of this snapshot's progress fields, for memoizing derivations.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.id.hash(&mut hasher);
        self.duration_in_days.hash(&mut hasher);
        self.current_day.hash(&mut hasher);
        self.completed_days.hash(&mut hasher);
        self.is_completed.hash(&mut hasher);
        self.created_at.hash(&mut hasher);
        hasher.finish()
    }
}
