//! Completion date forecasting.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use skillplan_core::SkillPlan;

/// How a forecast was produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ForecastMethod {
    /// One calendar day per remaining plan day
    Simple,
    /// Remaining days scaled by observed days-per-completion
    Pace {
        /// Calendar days elapsed per completed plan day
        pace: f64,
    },
}

/// Estimated finishing date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Projected completion date
    pub date: NaiveDate,
    /// Method used
    pub method: ForecastMethod,
}

/// Completion date estimator.
pub struct CompletionEstimator;

impl CompletionEstimator {
    /// Forecast against the wall clock.
    pub fn forecast(&self, plan: &SkillPlan) -> Forecast {
        self.forecast_at(plan, Utc::now())
    }

    /// Forecast as seen at `now`.
    ///
    /// Uses the pace estimate once more than one day is completed and the
    /// pace is a positive finite number; otherwise the simple estimate.
    pub fn forecast_at(&self, plan: &SkillPlan, now: DateTime<Utc>) -> Forecast {
        let today = now.date_naive();
        let remaining = plan.remaining_days();

        if let Some(pace) = self.pace(plan, now) {
            let offset = (remaining as f64 * pace).ceil() as i64;
            return Forecast {
                date: add_days(today, offset),
                method: ForecastMethod::Pace { pace },
            };
        }

        Forecast {
            date: add_days(today, remaining),
            method: ForecastMethod::Simple,
        }
    }

    /// Calendar days per completed day, if usable.
    fn pace(&self, plan: &SkillPlan, now: DateTime<Utc>) -> Option<f64> {
        let completed = plan.completed_days.len();
        if completed <= 1 {
            return None;
        }

        let days_since_start = (now - plan.created_at).num_seconds().div_euclid(86_400);
        let pace = days_since_start as f64 / completed as f64;
        (pace.is_finite() && pace > 0.0).then_some(pace)
    }
}

impl Default for CompletionEstimator {
    fn default() -> Self {
        Self
    }
}

/// Forecast with the default estimator against the wall clock.
pub fn forecast_completion(plan: &SkillPlan) -> Forecast {
    CompletionEstimator.forecast(plan)
}

/// Forecast with the default estimator as seen at `now`.
pub fn forecast_completion_at(plan: &SkillPlan, now: DateTime<Utc>) -> Forecast {
    CompletionEstimator.forecast_at(plan, now)
}

fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|d| date.checked_add_signed(d))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, 15, 0, 0).unwrap()
    }

    fn plan(duration: u32, current: u32, completed: &[u32], started_days_ago: i64) -> SkillPlan {
        let mut plan = SkillPlan::new("Calculus", duration).unwrap();
        plan.current_day = current;
        plan.completed_days = completed.iter().copied().collect();
        plan.is_completed = current > duration;
        plan.created_at = now() - Duration::days(started_days_ago);
        plan
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_simple_for_fresh_plan() {
        let f = forecast_completion_at(&plan(10, 1, &[], 0), now());
        assert_eq!(f.method, ForecastMethod::Simple);
        assert_eq!(f.date, date(2024, 3, 29));
    }

    #[test]
    fn test_single_completion_stays_simple() {
        let f = forecast_completion_at(&plan(10, 2, &[1], 30), now());
        assert_eq!(f.method, ForecastMethod::Simple);
        assert_eq!(f.date, date(2024, 3, 28));
    }

    #[test]
    fn test_pace_based_projection() {
        // 8 days elapsed, 4 completed: two calendar days per plan day.
        let f = forecast_completion_at(&plan(10, 5, &[1, 2, 3, 4], 8), now());
        assert_eq!(f.method, ForecastMethod::Pace { pace: 2.0 });
        assert_eq!(f.date, date(2024, 3, 30));
    }

    #[test]
    fn test_pace_rounds_up() {
        // 5 days / 3 completed = 1.67; 8 remaining * 1.67 = 13.33 -> 14.
        let f = forecast_completion_at(&plan(12, 4, &[1, 2, 3], 5), now());
        assert!(matches!(f.method, ForecastMethod::Pace { .. }));
        assert_eq!(f.date, date(2024, 4, 3));
    }

    #[test]
    fn test_zero_pace_falls_back() {
        // Two completions on the day the plan was created.
        let f = forecast_completion_at(&plan(10, 3, &[1, 2], 0), now());
        assert_eq!(f.method, ForecastMethod::Simple);
        assert_eq!(f.date, date(2024, 3, 27));
    }

    #[test]
    fn test_future_created_at_falls_back() {
        let f = forecast_completion_at(&plan(10, 3, &[1, 2], -3), now());
        assert_eq!(f.method, ForecastMethod::Simple);
    }

    #[test]
    fn test_partial_day_is_floored() {
        let mut p = plan(10, 3, &[1, 2], 0);
        p.created_at = now() - Duration::hours(47);
        let f = forecast_completion_at(&p, now());
        // 1 elapsed day / 2 completed = 0.5; 7 * 0.5 = 3.5 -> 4.
        assert_eq!(f.method, ForecastMethod::Pace { pace: 0.5 });
        assert_eq!(f.date, date(2024, 3, 24));
    }
}
