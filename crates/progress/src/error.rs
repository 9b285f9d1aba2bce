//! Errors from store-backed progress operations.

use skillplan_core::{PlanError, PlanId};
use skillplan_storage::StorageError;

/// Result type for progress services.
pub type Result<T> = std::result::Result<T, ProgressError>;

/// Failure of a controller or artifact service call.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// Rejected by plan rules (validation, permission, state)
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Backing store failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// No plan with this ID
    #[error("Plan not found: {0}")]
    PlanNotFound(PlanId),
}
