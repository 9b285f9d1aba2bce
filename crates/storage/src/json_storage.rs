//! JSON file storage implementation.
//!
//! Stores plans, notes and topics as JSON files under a root directory and
//! keeps small per-plan meta markers (version + updated_at). Every document
//! is written to a temporary sibling first and renamed into place, so a
//! reader never sees a half-written plan.

use std::path::{Path, PathBuf};

use skillplan_core::{DayKey, Note, PlanId, SkillPlan, Topic};
use tokio::fs;
use tracing::{debug, warn};

use super::{PlanStore, Result, StorageError};

/// Configuration for [`JsonStorage`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding all store files
    pub root: PathBuf,

    /// Pretty-print JSON documents
    pub pretty: bool,
}

impl StoreConfig {
    /// Config rooted at `root` with pretty output.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            pretty: true,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(".skillplan")
    }
}

/// File-based JSON storage backend.
pub struct JsonStorage {
    config: StoreConfig,
}

impl JsonStorage {
    /// Create storage rooted at `root`, creating the directory layout.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_config(StoreConfig::new(root)).await
    }

    /// Create storage from an explicit config.
    pub async fn with_config(config: StoreConfig) -> Result<Self> {
        let root = &config.root;

        fs::create_dir_all(root.join("plans")).await?;
        fs::create_dir_all(root.join("notes")).await?;
        fs::create_dir_all(root.join("topics")).await?;
        fs::create_dir_all(root.join("meta").join("plans")).await?;

        debug!("Opened JSON plan store at {}", root.display());
        Ok(Self { config })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.config.root
    }

    fn plan_path(&self, id: PlanId) -> PathBuf {
        self.config.root.join("plans").join(format!("{}.json", id))
    }
    fn notes_dir(&self, plan_id: PlanId) -> PathBuf {
        self.config.root.join("notes").join(plan_id.to_string())
    }
    fn topics_dir(&self, plan_id: PlanId) -> PathBuf {
        self.config.root.join("topics").join(plan_id.to_string())
    }
    fn note_path(&self, key: DayKey) -> PathBuf {
        self.notes_dir(key.plan_id).join(format!("{}.json", key.day))
    }
    fn topic_path(&self, key: DayKey) -> PathBuf {
        self.topics_dir(key.plan_id).join(format!("{}.json", key.day))
    }
    fn meta_path(&self, id: PlanId) -> PathBuf {
        self.config.root.join("meta").join("plans").join(format!("{}.meta.json", id))
    }

    fn encode<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.config.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }

    /// Current stored version of a plan (0 when never saved).
    pub async fn plan_version(&self, id: PlanId) -> Result<u64> {
        let meta: Option<serde_json::Value> = read_json(&self.meta_path(id)).await?;
        Ok(meta
            .and_then(|json| json.get("version").and_then(|v| v.as_u64()))
            .unwrap_or(0))
    }

    /// Read and increment per-plan version, return new version.
    async fn bump_version(&self, id: PlanId) -> Result<u64> {
        let version = self.plan_version(id).await? + 1;
        let meta = serde_json::json!({"version": version, "updated_at": chrono::Utc::now()});
        write_atomic(&self.meta_path(id), self.encode(&meta)?.as_bytes()).await?;
        Ok(version)
    }
}

#[async_trait::async_trait]
impl PlanStore for JsonStorage {
    async fn save_plan(&mut self, plan: &SkillPlan) -> Result<()> {
        let json = self.encode(plan)?;
        write_atomic(&self.plan_path(plan.id), json.as_bytes()).await?;

        // The plan is committed once renamed; the marker must not fail the save.
        match self.bump_version(plan.id).await {
            Ok(version) => debug!("Saved plan {} (version {})", plan.id, version),
            Err(e) => warn!("Saved plan {} but could not update its version marker: {}", plan.id, e),
        }
        Ok(())
    }

    async fn load_plan(&self, id: PlanId) -> Result<Option<SkillPlan>> {
        read_json(&self.plan_path(id)).await
    }

    async fn list_plans(&self) -> Result<Vec<SkillPlan>> {
        let mut plans = list_dir(&self.config.root.join("plans")).await?;
        plans.sort_by(|a: &SkillPlan, b| a.created_at.cmp(&b.created_at));
        Ok(plans)
    }

    async fn delete_plan(&mut self, id: PlanId) -> Result<()> {
        if !ignore_missing(fs::remove_file(self.plan_path(id)).await)? {
            return Err(StorageError::NotFound(format!("plan {}", id)));
        }
        ignore_missing(fs::remove_file(self.meta_path(id)).await)?;
        ignore_missing(fs::remove_dir_all(self.notes_dir(id)).await)?;
        ignore_missing(fs::remove_dir_all(self.topics_dir(id)).await)?;

        debug!("Deleted plan {}", id);
        Ok(())
    }

    async fn save_note(&mut self, note: &Note) -> Result<()> {
        fs::create_dir_all(self.notes_dir(note.plan_id)).await?;
        let json = self.encode(note)?;
        write_atomic(&self.note_path(note.key()), json.as_bytes()).await
    }

    async fn load_note(&self, plan_id: PlanId, day: u32) -> Result<Option<Note>> {
        read_json(&self.note_path(DayKey::new(plan_id, day))).await
    }

    async fn list_notes(&self, plan_id: PlanId) -> Result<Vec<Note>> {
        let dir = self.notes_dir(plan_id);
        if fs::metadata(&dir).await.is_err() {
            return Ok(Vec::new());
        }
        let mut notes = list_dir(&dir).await?;
        notes.sort_by_key(|n: &Note| n.day);
        Ok(notes)
    }

    async fn save_topic(&mut self, topic: &Topic) -> Result<()> {
        fs::create_dir_all(self.topics_dir(topic.plan_id)).await?;
        let json = self.encode(topic)?;
        write_atomic(&self.topic_path(topic.key()), json.as_bytes()).await
    }

    async fn load_topic(&self, plan_id: PlanId, day: u32) -> Result<Option<Topic>> {
        read_json(&self.topic_path(DayKey::new(plan_id, day))).await
    }

    async fn list_topics(&self, plan_id: PlanId) -> Result<Vec<Topic>> {
        let dir = self.topics_dir(plan_id);
        if fs::metadata(&dir).await.is_err() {
            return Ok(Vec::new());
        }
        let mut topics = list_dir(&dir).await?;
        topics.sort_by_key(|t: &Topic| t.day);
        Ok(topics)
    }
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

/// Map `NotFound` to `Ok(false)`; `Ok(true)` when something was removed.
fn ignore_missing(res: std::io::Result<()>) -> Result<bool> {
    match res {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        if let Ok(Some(item)) = read_json(&entry.path()).await {
            items.push(item);
        }
    }
    Ok(items)
}
