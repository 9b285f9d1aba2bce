//! Unique identifiers for skill plan entities.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a SkillPlan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlanId(Ulid);

impl PlanId {
    /// Generate a new PlanId
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for PlanId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for PlanId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Key of a day-scoped artifact: one note and one topic per (plan, day).
///
/// Orders by plan, then day, so a plan's artifacts form one contiguous range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DayKey {
    /// Owning plan
    pub plan_id: PlanId,

    /// 1-indexed day
    pub day: u32,
}

impl DayKey {
    /// Create a key for `day` of `plan_id`.
    pub fn new(plan_id: PlanId, day: u32) -> Self {
        Self { plan_id, day }
    }

    /// Every key of `plan_id`, for range scans over ordered maps.
    pub fn plan_range(plan_id: PlanId) -> std::ops::RangeInclusive<DayKey> {
        Self::new(plan_id, 0)..=Self::new(plan_id, u32::MAX)
    }
}

impl std::fmt::Display for DayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-day{}", self.plan_id, self.day)
    }
}
