//! Skill plan core data models.
//!
//! This crate defines the plan snapshot, the derived day status and the
//! day-scoped artifacts that the progress crate reasons about.

#![warn(missing_docs)]

mod id;
mod plan;
mod day;
mod artifact;
mod error;

pub use id::{PlanId, DayKey};
pub use plan::{SkillPlan, PlanState};
pub use day::{DayStatus, DayAction};
pub use artifact::{Note, Topic};
pub use error::{PlanError, Result};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
