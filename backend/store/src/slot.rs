//! The durable slot: a single named location holding the JSON-serialized
//! message log. Writes replace the whole slot (last-write-wins, no
//! versioning — concurrent writers are out of scope).

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use amiga_core::{AmigaError, Message};

/// Abstract interface for the durable history slot.
#[async_trait]
pub trait HistorySlot: Send + Sync {
    /// Read the slot. `Ok(None)` means the slot is absent; a decode
    /// failure is an error the caller may downgrade to an empty history.
    async fn load(&self) -> Result<Option<Vec<Message>>>;

    /// Replace the slot's content with the full current history.
    async fn save(&self, history: &[Message]) -> Result<()>;

    /// Remove the slot entirely.
    async fn clear(&self) -> Result<()>;
}

/// File-backed slot under the data directory.
pub struct FileHistorySlot {
    path: PathBuf,
}

impl FileHistorySlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl HistorySlot for FileHistorySlot {
    async fn load(&self) -> Result<Option<Vec<Message>>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "History slot does not exist");
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read history slot: {}", self.path.display()))?;

        let history: Vec<Message> = serde_json::from_str(&raw)
            .map_err(|e| AmigaError::PersistenceDecode(e.to_string()))?;
        Ok(Some(history))
    }

    async fn save(&self, history: &[Message]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let json =
            serde_json::to_string_pretty(history).context("Failed to serialize history")?;

        // Write to temp file, then rename for atomicity.
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json.as_bytes())
            .await
            .with_context(|| format!("Failed to write temp slot: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path)
            .await
            .with_context(|| format!("Failed to rename temp slot to: {}", self.path.display()))?;

        debug!(path = %self.path.display(), messages = history.len(), "Wrote history slot");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .await
                .with_context(|| format!("Failed to remove slot: {}", self.path.display()))?;
        }
        Ok(())
    }
}

/// In-memory slot for tests; can be seeded with raw (possibly corrupted)
/// content.
pub struct InMemorySlot {
    content: Mutex<Option<String>>,
}

impl InMemorySlot {
    pub fn new() -> Self {
        Self {
            content: Mutex::new(None),
        }
    }

    /// Seed the slot with raw content, bypassing serialization.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            content: Mutex::new(Some(raw.into())),
        }
    }
}

impl Default for InMemorySlot {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistorySlot for InMemorySlot {
    async fn load(&self) -> Result<Option<Vec<Message>>> {
        let guard = self.content.lock().unwrap();
        let Some(raw) = guard.as_ref() else {
            return Ok(None);
        };
        let history: Vec<Message> = serde_json::from_str(raw)
            .map_err(|e| AmigaError::PersistenceDecode(e.to_string()))?;
        Ok(Some(history))
    }

    async fn save(&self, history: &[Message]) -> Result<()> {
        let json = serde_json::to_string(history).context("Failed to serialize history")?;
        *self.content.lock().unwrap() = Some(json);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.content.lock().unwrap() = None;
        Ok(())
    }
}
