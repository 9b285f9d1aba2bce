//! Day status and day-scoped actions.

use serde::{Deserialize, Serialize};

/// Derived accessibility of a single plan day. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayStatus {
    /// Not reachable yet
    Locked,
    /// The active day the learner is expected to act on
    Current,
    /// Finished, or behind the active day
    Completed,
}

impl DayStatus {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Locked => "locked",
            DayStatus::Current => "current",
            DayStatus::Completed => "completed",
        }
    }

    /// Whether the day is reachable (current or behind it).
    pub fn is_unlocked(&self) -> bool {
        !matches!(self, DayStatus::Locked)
    }
}

impl std::fmt::Display for DayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day-scoped operations checked by the artifact gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayAction {
    /// Read the day's topic
    ViewTopic,
    /// Replace the day's topic
    EditTopic,
    /// Create the day's note
    CreateNote,
    /// Edit an existing note
    EditNote,
    /// Mark the day finished
    CompleteDay,
}

impl DayAction {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayAction::ViewTopic => "view topic",
            DayAction::EditTopic => "edit topic",
            DayAction::CreateNote => "create note",
            DayAction::EditNote => "edit note",
            DayAction::CompleteDay => "complete day",
        }
    }

    /// Whether the action writes.
    pub fn is_write(&self) -> bool {
        !matches!(self, DayAction::ViewTopic)
    }
}

impl std::fmt::Display for DayAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
