//! Day status resolution.
//!
//! The one place that decides whether a day is locked, current or completed.
//! Every other component (gate, display, analytics) goes through here.

use skillplan_core::{DayStatus, SkillPlan};

/// Classify `day` against the plan snapshot.
///
/// Priority order:
/// 1. a completed day is `Completed`
/// 2. a day after the current one is `Locked`
/// 3. the current day of an unfinished plan is `Current`
/// 4. anything else (a day behind the current one) is `Completed`
///
/// Out-of-range days (`<= 0` or past the duration) resolve to `Locked`
/// instead of failing.
pub fn resolve_day_status(plan: &SkillPlan, day: i64) -> DayStatus {
    if !plan.contains_day(day) {
        return DayStatus::Locked;
    }
    let current = i64::from(plan.current_day);

    if plan.is_day_completed(day) {
        DayStatus::Completed
    } else if day > current {
        DayStatus::Locked
    } else if day == current && !plan.is_completed {
        DayStatus::Current
    } else {
        DayStatus::Completed
    }
}

/// Status of every day `1..=duration`, in order.
pub fn day_statuses(plan: &SkillPlan) -> Vec<(u32, DayStatus)> {
    (1..=plan.duration_in_days)
        .map(|day| (day, resolve_day_status(plan, i64::from(day))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(duration: u32, current: u32, completed: &[u32]) -> SkillPlan {
        let mut plan = SkillPlan::new("Spanish", duration).unwrap();
        plan.current_day = current;
        plan.completed_days = completed.iter().copied().collect();
        plan.is_completed = current > duration;
        plan
    }

    #[test]
    fn test_mid_plan_statuses() {
        let p = plan(5, 3, &[1, 2]);
        assert_eq!(resolve_day_status(&p, 1), DayStatus::Completed);
        assert_eq!(resolve_day_status(&p, 2), DayStatus::Completed);
        assert_eq!(resolve_day_status(&p, 3), DayStatus::Current);
        assert_eq!(resolve_day_status(&p, 4), DayStatus::Locked);
        assert_eq!(resolve_day_status(&p, 5), DayStatus::Locked);
    }

    #[test]
    fn test_malformed_day_is_locked() {
        let p = plan(5, 3, &[1, 2]);
        assert_eq!(resolve_day_status(&p, 0), DayStatus::Locked);
        assert_eq!(resolve_day_status(&p, -4), DayStatus::Locked);
        assert_eq!(resolve_day_status(&p, 6), DayStatus::Locked);
    }

    #[test]
    fn test_skipped_past_day_reads_completed() {
        // Day 1 was never recorded but is behind the current day.
        let p = plan(5, 3, &[2]);
        assert_eq!(resolve_day_status(&p, 1), DayStatus::Completed);
    }

    #[test]
    fn test_completed_plan_has_no_current_day() {
        let p = plan(3, 4, &[1, 2, 3]);
        let statuses = day_statuses(&p);
        assert_eq!(statuses.len(), 3);
        assert!(statuses.iter().all(|(_, s)| *s == DayStatus::Completed));
    }

    #[test]
    fn test_locked_iff_ahead_and_not_completed() {
        for duration in 1..=6u32 {
            for current in 1..=duration + 1 {
                let completed: Vec<u32> = (1..current).filter(|d| d % 2 == 1).collect();
                let p = plan(duration, current, &completed);
                for day in 1..=i64::from(duration) {
                    let locked = resolve_day_status(&p, day) == DayStatus::Locked;
                    let expected = day > i64::from(current) && !p.is_day_completed(day);
                    assert_eq!(locked, expected, "duration={duration} current={current} day={day}");
                }
            }
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let p = plan(7, 4, &[1, 3]);
        assert_eq!(day_statuses(&p), day_statuses(&p));
    }
}
