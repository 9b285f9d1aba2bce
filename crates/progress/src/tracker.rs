//! Progress tracking service.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use skillplan_core::PlanId;
use skillplan_storage::PlanStore;
use tokio::sync::Mutex;
use tracing::warn;

use crate::analytics::{AnalyticsCache, PlanAnalytics};
use crate::progression::SharedStore;

/// Progress tracking service.
#[async_trait]
pub trait ProgressTracker: Send + Sync {
    /// Get analytics for one plan.
    async fn get_plan_progress(&self, plan_id: PlanId) -> Option<PlanAnalytics>;

    /// Take a progress snapshot of every plan.
    async fn snapshot(&self) -> ProgressSnapshot;
}

/// A snapshot of progress at a point in time.
#[derive(Debug, Clone)]
pub struct ProgressSnapshot {
    /// When snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Analytics by plan ID, oldest plan first
    pub plan_progress: Vec<(PlanId, PlanAnalytics)>,
}

/// Basic progress tracker implementation.
pub struct BasicProgressTracker<S: PlanStore> {
    storage: SharedStore<S>,
    cache: Mutex<AnalyticsCache>,
}

impl<S: PlanStore> BasicProgressTracker<S> {
    /// Create a new progress tracker.
    pub fn new(storage: S) -> Self {
        Self::with_shared(Arc::new(Mutex::new(storage)))
    }

    /// Create a tracker over an existing shared handle.
    pub fn with_shared(storage: SharedStore<S>) -> Self {
        Self {
            storage,
            cache: Mutex::new(AnalyticsCache::new()),
        }
    }
}

#[async_trait]
impl<S: PlanStore + 'static> ProgressTracker for BasicProgressTracker<S> {
    async fn get_plan_progress(&self, plan_id: PlanId) -> Option<PlanAnalytics> {
        let loaded = self.storage.lock().await.load_plan(plan_id).await;
        match loaded {
            Ok(Some(plan)) => Some(self.cache.lock().await.get_or_compute(&plan, Utc::now())),
            Ok(None) => {
                self.cache.lock().await.invalidate(plan_id);
                None
            }
            Err(e) => {
                warn!("Could not load plan {} for progress: {}", plan_id, e);
                None
            }
        }
    }

    async fn snapshot(&self) -> ProgressSnapshot {
        let now = Utc::now();
        let listed = self.storage.lock().await.list_plans().await;
        let mut cache = self.cache.lock().await;
        let plans = match listed {
            Ok(plans) => {
                let ids: HashSet<PlanId> = plans.iter().map(|p| p.id).collect();
                cache.retain_plans(&ids);
                plans
            }
            Err(e) => {
                warn!("Could not list plans for snapshot: {}", e);
                Vec::new()
            }
        };

        let plan_progress = plans
            .iter()
            .map(|plan| (plan.id, cache.get_or_compute(plan, now)))
            .collect();

        ProgressSnapshot {
            timestamp: now,
            plan_progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::PlanProgressionController;
    use skillplan_core::{Note, SkillPlan, Topic};
    use skillplan_storage::{MemoryStorage, Result as StorageResult, StorageError};

    #[tokio::test]
    async fn test_tracker_sees_controller_writes() {
        let controller = PlanProgressionController::new(MemoryStorage::new());
        let tracker = BasicProgressTracker::with_shared(controller.storage());

        let plan = controller.create_plan("Latin", 4).await.unwrap();
        let before = tracker.get_plan_progress(plan.id).await.unwrap();
        assert_eq!(before.streaks.current, 0);

        controller.complete_current_day(plan.id).await.unwrap();
        let after = tracker.get_plan_progress(plan.id).await.unwrap();
        assert_eq!(after.streaks.current, 1);
        assert!((after.percentage - 25.0).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_deleted_plan_leaves_cache() {
        let controller = PlanProgressionController::new(MemoryStorage::new());
        let tracker = BasicProgressTracker::with_shared(controller.storage());
        let kept = controller.create_plan("Latin", 4).await.unwrap();
        let gone = controller.create_plan("Greek", 6).await.unwrap();
        let other = controller.create_plan("Hebrew", 3).await.unwrap();

        tracker.snapshot().await;
        assert_eq!(tracker.cache.lock().await.len(), 3);

        controller.delete_plan(gone.id).await.unwrap();
        assert!(tracker.get_plan_progress(gone.id).await.is_none());
        assert_eq!(tracker.cache.lock().await.len(), 2);

        controller.delete_plan(other.id).await.unwrap();
        let snapshot = tracker.snapshot().await;
        assert_eq!(snapshot.plan_progress.len(), 1);
        assert_eq!(snapshot.plan_progress[0].0, kept.id);
        assert_eq!(tracker.cache.lock().await.len(), 1);
    }

    /// Store whose plan reads always fail.
    struct UnreadableStore;

    #[async_trait::async_trait]
    impl PlanStore for UnreadableStore {
        async fn save_plan(&mut self, _plan: &SkillPlan) -> StorageResult<()> { Ok(()) }
        async fn load_plan(&self, _id: PlanId) -> StorageResult<Option<SkillPlan>> {
            Err(StorageError::Other("corrupt plan file".to_string()))
        }
        async fn list_plans(&self) -> StorageResult<Vec<SkillPlan>> {
            Err(StorageError::Other("unreadable directory".to_string()))
        }
        async fn delete_plan(&mut self, _id: PlanId) -> StorageResult<()> { Ok(()) }
        async fn save_note(&mut self, _note: &Note) -> StorageResult<()> { Ok(()) }
        async fn load_note(&self, _plan_id: PlanId, _day: u32) -> StorageResult<Option<Note>> { Ok(None) }
        async fn list_notes(&self, _plan_id: PlanId) -> StorageResult<Vec<Note>> { Ok(vec![]) }
        async fn save_topic(&mut self, _topic: &Topic) -> StorageResult<()> { Ok(()) }
        async fn load_topic(&self, _plan_id: PlanId, _day: u32) -> StorageResult<Option<Topic>> { Ok(None) }
        async fn list_topics(&self, _plan_id: PlanId) -> StorageResult<Vec<Topic>> { Ok(vec![]) }
    }

    #[tokio::test]
    async fn test_storage_failure_reports_no_progress() {
        let tracker = BasicProgressTracker::new(UnreadableStore);
        assert!(tracker.get_plan_progress(PlanId::new()).await.is_none());
        assert!(tracker.snapshot().await.plan_progress.is_empty());
    }

    #[tokio::test]
    async fn test_failed_listing_keeps_cache() {
        let plan = SkillPlan::new("Latin", 4).unwrap();
        let tracker = BasicProgressTracker::new(UnreadableStore);
        tracker.cache.lock().await.get_or_compute(&plan, Utc::now());

        tracker.snapshot().await;
        assert_eq!(tracker.cache.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_plan_has_no_progress() {
        let tracker = BasicProgressTracker::new(MemoryStorage::new());
        assert!(tracker.get_plan_progress(PlanId::new()).await.is_none());
    }

    #[tokio::test]
    async fn test_snapshot_covers_all_plans() {
        let controller = PlanProgressionController::new(MemoryStorage::new());
        let tracker = BasicProgressTracker::with_shared(controller.storage());
        controller.create_plan("Latin", 4).await.unwrap();
        controller.create_plan("Greek", 6).await.unwrap();

        let snapshot = tracker.snapshot().await;
        assert_eq!(snapshot.plan_progress.len(), 2);
    }
}
