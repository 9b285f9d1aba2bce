//! Completed-day streaks.

use serde::{Deserialize, Serialize};
use skillplan_core::SkillPlan;

/// Current and longest completed-day runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    /// Run ending immediately before the current day
    pub current: u32,
    /// Longest run anywhere in the plan
    pub longest: u32,
}

/// Consecutive completed days ending at `current_day - 1`.
///
/// The current and future days never count. Stops at the first gap.
pub fn current_streak(plan: &SkillPlan) -> u32 {
    let mut day = i64::from(plan.current_day.saturating_sub(1).min(plan.duration_in_days));
    let mut streak = 0;
    while day >= 1 && plan.is_day_completed(day) {
        streak += 1;
        day -= 1;
    }
    streak
}

/// Longest run of consecutive completed days; 0 for an empty plan.
///
/// Walks the completed set as stored, without validating it against the
/// current day.
pub fn longest_streak(plan: &SkillPlan) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<u32> = None;

    for &day in &plan.completed_days {
        run = match prev {
            Some(p) if p.checked_add(1) == Some(day) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }
    longest
}

/// Both streaks at once.
pub fn compute_streaks(plan: &SkillPlan) -> Streaks {
    Streaks {
        current: current_streak(plan),
        longest: longest_streak(plan),
    }
}
