//! Skill plan progress (day gating and analytics).
//!
//! Pure derivations over a plan snapshot (day status, streaks, consistency,
//! completion forecast, artifact gate) plus the one store-backed transition
//! that advances a plan.

#![warn(missing_docs)]

pub mod resolver;
pub mod streak;
pub mod consistency;
pub mod estimator;
pub mod gate;
pub mod progression;
pub mod analytics;
pub mod tracker;
pub mod artifacts;
pub mod error;

pub use resolver::{resolve_day_status, day_statuses};
pub use streak::{compute_streaks, current_streak, longest_streak, Streaks};
pub use consistency::{compute_consistency, consistency_window, ConsistencyWindow, WINDOW_DAYS};
pub use estimator::{
    forecast_completion, forecast_completion_at, CompletionEstimator, Forecast, ForecastMethod,
};
pub use gate::{note_writable, topic_editable, DayArtifactGate};
pub use progression::{advance, PlanProgressionController, SharedStore};
pub use analytics::{summarize, AnalyticsCache, PlanAnalytics};
pub use tracker::{BasicProgressTracker, ProgressSnapshot, ProgressTracker};
pub use artifacts::DayArtifactService;
pub use error::{ProgressError, Result};
