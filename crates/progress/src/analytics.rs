//! Plan analytics summary and its memoization.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use skillplan_core::{DayStatus, PlanId, PlanState, SkillPlan};

use crate::consistency::compute_consistency;
use crate::estimator::{forecast_completion_at, Forecast};
use crate::resolver::day_statuses;
use crate::streak::{compute_streaks, Streaks};

/// Everything a display needs about one plan snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanAnalytics {
    /// Plan the summary describes
    pub plan_id: PlanId,

    /// Lifecycle state
    pub state: PlanState,

    /// Status of each day, in order
    pub statuses: Vec<(u32, DayStatus)>,

    /// Current and longest streaks
    pub streaks: Streaks,

    /// Trailing seven-day consistency (0-100)
    pub consistency: u8,

    /// Projected completion
    pub forecast: Forecast,

    /// Share of days completed (0-100)
    pub percentage: f32,
}

/// Derive the full summary for `plan` as seen at `now`.
pub fn summarize(plan: &SkillPlan, now: DateTime<Utc>) -> PlanAnalytics {
    PlanAnalytics {
        plan_id: plan.id,
        state: plan.state(),
        statuses: day_statuses(plan),
        streaks: compute_streaks(plan),
        consistency: compute_consistency(plan),
        forecast: forecast_completion_at(plan, now),
        percentage: plan.completion_percentage(),
    }
}

/// Inputs the summary depends on besides the plan fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheKey {
    fingerprint: u64,
    today: NaiveDate,
    elapsed_days: i64,
}

impl CacheKey {
    fn new(plan: &SkillPlan, now: DateTime<Utc>) -> Self {
        Self {
            fingerprint: plan.fingerprint(),
            today: now.date_naive(),
            elapsed_days: (now - plan.created_at).num_seconds().div_euclid(86_400),
        }
    }
}

/// Memoizes [`summarize`] per plan, keyed by snapshot fingerprint.
///
/// Holds one entry per plan; a new snapshot replaces the old one.
#[derive(Debug, Default)]
pub struct AnalyticsCache {
    entries: HashMap<PlanId, (CacheKey, PlanAnalytics)>,
    hits: u64,
    misses: u64,
}

impl AnalyticsCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached summary for `plan`, computing it on a miss.
    pub fn get_or_compute(&mut self, plan: &SkillPlan, now: DateTime<Utc>) -> PlanAnalytics {
        let key = CacheKey::new(plan, now);
        if let Some((cached_key, analytics)) = self.entries.get(&plan.id) {
            if *cached_key == key {
                self.hits += 1;
                return analytics.clone();
            }
        }

        self.misses += 1;
        let analytics = summarize(plan, now);
        self.entries.insert(plan.id, (key, analytics.clone()));
        analytics
    }

    /// Drop the entry for a plan.
    pub fn invalidate(&mut self, plan_id: PlanId) {
        self.entries.remove(&plan_id);
    }

    /// Keep only entries for the given plans.
    pub fn retain_plans(&mut self, plan_ids: &HashSet<PlanId>) {
        self.entries.retain(|id, _| plan_ids.contains(id));
    }

    /// Number of cached plans.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` so far.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::ForecastMethod;
    use crate::progression::advance;

    #[test]
    fn test_summary_of_mid_plan() {
        let mut plan = SkillPlan::new("Rust", 5).unwrap();
        plan.current_day = 3;
        plan.completed_days = [1, 2].into_iter().collect();

        let summary = summarize(&plan, plan.created_at);
        assert_eq!(summary.state, PlanState::InProgress);
        assert_eq!(summary.statuses[2], (3, DayStatus::Current));
        assert_eq!(summary.streaks, Streaks { current: 2, longest: 2 });
        assert_eq!(summary.consistency, 29);
        assert_eq!(summary.forecast.method, ForecastMethod::Simple);
        assert!((summary.percentage - 40.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_cache_hits_until_snapshot_changes() {
        let plan = SkillPlan::new("Rust", 5).unwrap();
        let now = plan.created_at;
        let mut cache = AnalyticsCache::new();

        let first = cache.get_or_compute(&plan, now);
        let second = cache.get_or_compute(&plan, now);
        assert_eq!(first, second);
        assert_eq!(cache.stats(), (1, 1));

        let next = advance(&plan, now).unwrap();
        let third = cache.get_or_compute(&next, now);
        assert_eq!(third.streaks.current, 1);
        assert_eq!(cache.stats(), (1, 2));
    }

    #[test]
    fn test_retain_plans_evicts_others() {
        let a = SkillPlan::new("Rust", 5).unwrap();
        let b = SkillPlan::new("Go", 5).unwrap();
        let mut cache = AnalyticsCache::new();
        cache.get_or_compute(&a, a.created_at);
        cache.get_or_compute(&b, b.created_at);

        cache.retain_plans(&[a.id].into_iter().collect());
        assert_eq!(cache.len(), 1);
        cache.get_or_compute(&a, a.created_at);
        assert_eq!(cache.stats(), (1, 2));

        cache.retain_plans(&HashSet::new());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_misses_on_new_day() {
        let plan = SkillPlan::new("Rust", 5).unwrap();
        let mut cache = AnalyticsCache::new();

        cache.get_or_compute(&plan, plan.created_at);
        cache.get_or_compute(&plan, plan.created_at + chrono::Duration::days(1));
        assert_eq!(cache.stats(), (0, 2));

        cache.invalidate(plan.id);
        cache.get_or_compute(&plan, plan.created_at);
        assert_eq!(cache.stats(), (0, 3));
    }
}
