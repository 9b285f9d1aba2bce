//! Recoverable errors raised by plan mutations and gated writes.

use crate::day::{DayAction, DayStatus};

/// Result type for plan operations.
pub type Result<T> = std::result::Result<T, PlanError>;

/// Errors surfaced to the caller as user-visible messages.
///
/// Pure derivations (status, streaks, consistency, forecast) never produce
/// these; only the progression controller and the artifact gate do.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Malformed input such as a day outside `1..=duration`
    #[error("Validation error: {0}")]
    Validation(String),

    /// The gate rejected a day-scoped write
    #[error("Permission denied: cannot {action} on day {day} ({status})")]
    PermissionDenied {
        /// Attempted action
        action: DayAction,
        /// Target day
        day: u32,
        /// Status the day resolved to
        status: DayStatus,
    },

    /// Transition attempted from a state that does not allow it
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl PlanError {
    /// Shorthand for a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Shorthand for an invalid state error.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }
}
