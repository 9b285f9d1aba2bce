//! Permission policy for day-scoped notes and topics.
//!
//! Pure predicates over a plan snapshot. Storage goes through
//! [`crate::artifacts::DayArtifactService`], which calls [`DayArtifactGate::check`]
//! before every write.

use skillplan_core::{DayAction, DayStatus, PlanError, Result, SkillPlan};

use crate::resolver::resolve_day_status;

/// Topics are editable only on the active day.
pub fn topic_editable(status: DayStatus) -> bool {
    status == DayStatus::Current
}

/// Notes may be written on the active day and any day behind it.
pub fn note_writable(status: DayStatus) -> bool {
    matches!(status, DayStatus::Current | DayStatus::Completed)
}

/// Gate bound to one plan snapshot.
#[derive(Debug, Clone, Copy)]
pub struct DayArtifactGate<'a> {
    plan: &'a SkillPlan,
}

impl<'a> DayArtifactGate<'a> {
    /// Create a gate for `plan`.
    pub fn new(plan: &'a SkillPlan) -> Self {
        Self { plan }
    }

    /// Resolved status of `day`.
    pub fn status(&self, day: i64) -> DayStatus {
        resolve_day_status(self.plan, day)
    }

    /// Topics can always be viewed; locked days just render empty.
    pub fn can_view_topic(&self, _day: i64) -> bool {
        true
    }

    /// Whether the day's topic can be replaced.
    pub fn can_edit_topic(&self, day: i64) -> bool {
        topic_editable(self.status(day))
    }

    /// Whether a note can be created for the day.
    pub fn can_create_note(&self, day: i64) -> bool {
        note_writable(self.status(day))
    }

    /// Whether the day's note can be edited.
    pub fn can_edit_note(&self, day: i64) -> bool {
        note_writable(self.status(day))
    }

    /// Whether the day can be marked finished.
    pub fn can_complete_day(&self, day: i64) -> bool {
        day == i64::from(self.plan.current_day) && !self.plan.is_completed
    }

    /// Whether `action` is permitted on `day`.
    pub fn permits(&self, action: DayAction, day: i64) -> bool {
        match action {
            DayAction::ViewTopic => self.can_view_topic(day),
            DayAction::EditTopic => self.can_edit_topic(day),
            DayAction::CreateNote => self.can_create_note(day),
            DayAction::EditNote => self.can_edit_note(day),
            DayAction::CompleteDay => self.can_complete_day(day),
        }
    }

    /// Require `action` on `day`, returning the validated day index.
    ///
    /// Fails with `Validation` for a day outside the plan and with
    /// `PermissionDenied` when the policy rejects a write. Reads only need
    /// an in-range day.
    pub fn check(&self, action: DayAction, day: i64) -> Result<u32> {
        if !self.plan.contains_day(day) {
            return Err(PlanError::validation(format!(
                "day {} outside 1..={}",
                day, self.plan.duration_in_days
            )));
        }
        if action.is_write() && !self.permits(action, day) {
            return Err(PlanError::PermissionDenied {
                action,
                day: day as u32,
                status: self.status(day),
            });
        }
        Ok(day as u32)
    }
}
