use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::session::HistoryEntry;

/// Recent searches and search history as persisted between sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredHistory {
    /// Most-recent-first, deduplicated.
    pub recent_searches: Vec<String>,
    /// Most-recent-first.
    pub history: Vec<HistoryEntry>,
}

impl StoredHistory {
    /// Applies the session caps to data loaded from a possibly older or
    /// hand-edited store.
    pub fn truncated(mut self, recent_limit: usize, history_limit: usize) -> Self {
        let mut seen = std::collections::HashSet::new();
        self.recent_searches.retain(|query| seen.insert(query.clone()));
        self.recent_searches.truncate(recent_limit);
        self.history.truncate(history_limit);
        self
    }
}

/// Repository port for recent searches and search history.
#[async_trait]
pub trait SearchHistoryRepository: Send + Sync + std::fmt::Debug {
    /// Load persisted history. A store that has never been written yields
    /// `StoredHistory::default()`.
    async fn load(&self) -> Result<StoredHistory>;

    /// Replace the persisted history.
    async fn save(&self, history: &StoredHistory) -> Result<()>;
}

/// Keeps history for the lifetime of the value only.
#[derive(Debug, Default)]
pub struct InMemoryHistoryRepository {
    stored: Mutex<StoredHistory>,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: StoredHistory) -> Self {
        Self {
            stored: Mutex::new(history),
        }
    }

    /// Copy of what was last saved.
    pub fn snapshot(&self) -> StoredHistory {
        self.stored.lock().clone()
    }
}

#[async_trait]
impl SearchHistoryRepository for InMemoryHistoryRepository {
    async fn load(&self) -> Result<StoredHistory> {
        Ok(self.snapshot())
    }

    async fn save(&self, history: &StoredHistory) -> Result<()> {
        *self.stored.lock() = history.clone();
        Ok(())
    }
}

/// Stores history as a single pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileHistoryRepository {
    path: PathBuf,
    // Serializes saves that share the staging file.
    write_lock: Arc<tokio::sync::Mutex<()>>,
}

impl JsonFileHistoryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SearchHistoryRepository for JsonFileHistoryRepository {
    async fn load(&self) -> Result<StoredHistory> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("no search history at {}", self.path.display());
                Ok(StoredHistory::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, history: &StoredHistory) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write then rename so a crash never leaves a truncated document.
        let encoded = serde_json::to_vec_pretty(history)?;
        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, encoded).await?;
        tokio::fs::rename(&staging, &self.path).await?;
        Ok(())
    }
}
