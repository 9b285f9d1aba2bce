//! Trailing seven-day consistency.

use serde::{Deserialize, Serialize};
use skillplan_core::SkillPlan;

/// Number of days in the consistency window.
pub const WINDOW_DAYS: i64 = 7;

/// Per-day marks of the trailing window plus the resulting score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyWindow {
    /// `(day, completed)` for `current_day - 6 ..= current_day`, oldest first
    pub days: Vec<(i64, bool)>,
    /// Rounded share of completed window days (0-100)
    pub percentage: u8,
}

/// Marks for the window ending at (and including) the current day.
///
/// Days at or below zero are always unmarked.
pub fn consistency_window(plan: &SkillPlan) -> ConsistencyWindow {
    let current = i64::from(plan.current_day);
    let days: Vec<(i64, bool)> = (current - (WINDOW_DAYS - 1)..=current)
        .map(|day| (day, day > 0 && plan.is_day_completed(day)))
        .collect();

    let hits = days.iter().filter(|(_, done)| *done).count();
    let percentage = (100.0 * hits as f64 / WINDOW_DAYS as f64).round() as u8;

    ConsistencyWindow { days, percentage }
}

/// Share of the trailing window completed, as a whole percentage.
///
/// The current day sits in the denominator even though it cannot be
/// completed yet, so an on-track learner mid-plan tops out at 86%.
pub fn compute_consistency(plan: &SkillPlan) -> u8 {
    consistency_window(plan).percentage
}
