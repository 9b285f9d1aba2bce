//! Plan store trait abstraction.

use async_trait::async_trait;
use skillplan_core::{Note, PlanId, SkillPlan, Topic};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Storage abstraction for plans and their day artifacts.
///
/// Implementations must persist a saved plan as one unit: a reader never
/// observes a partially written snapshot. Serializing writers for the same
/// plan is the caller's job (see the progression controller).
#[async_trait]
pub trait PlanStore: Send + Sync {
    // === Plan operations ===

    /// Save a plan (create or update).
    async fn save_plan(&mut self, plan: &SkillPlan) -> Result<()>;

    /// Load a plan by ID.
    async fn load_plan(&self, id: PlanId) -> Result<Option<SkillPlan>>;

    /// List all plans, oldest first.
    async fn list_plans(&self) -> Result<Vec<SkillPlan>>;

    /// Delete a plan together with its notes and topics.
    async fn delete_plan(&mut self, id: PlanId) -> Result<()>;

    // === Note operations ===

    /// Save a note (create or update), keyed by (plan, day).
    async fn save_note(&mut self, note: &Note) -> Result<()>;

    /// Load the note for a plan day.
    async fn load_note(&self, plan_id: PlanId, day: u32) -> Result<Option<Note>>;

    /// List a plan's notes ordered by day.
    async fn list_notes(&self, plan_id: PlanId) -> Result<Vec<Note>>;

    // === Topic operations ===

    /// Save a topic (create or update), keyed by (plan, day).
    async fn save_topic(&mut self, topic: &Topic) -> Result<()>;

    /// Load the topic for a plan day.
    async fn load_topic(&self, plan_id: PlanId, day: u32) -> Result<Option<Topic>>;

    /// List a plan's topics ordered by day.
    async fn list_topics(&self, plan_id: PlanId) -> Result<Vec<Topic>>;
}
