// libs/calendar-cell/src/services/store.rs
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::models::Filters;

/// Storage key of the persisted filter flags.
pub const FILTERS_KEY: &str = "calendar-filters";

#[derive(Error, Debug)]
pub enum FilterStoreError {
    #[error("Failed to persist calendar filters: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode calendar filters: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid user id for preference storage: {0}")]
    InvalidUser(String),
}

/// Per-user persistence of the calendar filter flags.
///
/// `load` never fails: anything unreadable degrades to "show all".
#[async_trait]
pub trait FilterStore: Send + Sync {
    async fn load(&self, user_id: &str) -> Filters;

    async fn save(&self, user_id: &str, filters: &Filters) -> Result<(), FilterStoreError>;

    /// Read-modify-write under the store's write lock; returns the stored value.
    async fn update(
        &self,
        user_id: &str,
        change: &(dyn Fn(Filters) -> Filters + Send + Sync),
    ) -> Result<Filters, FilterStoreError>;
}

/// Decodes stored filters, falling back to all-false on corrupt input.
pub fn parse_filters(raw: &str) -> Filters {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!("Discarding unreadable {} value: {}", FILTERS_KEY, e);
        Filters::default()
    })
}

fn valid_user_id(user_id: &str) -> bool {
    !user_id.is_empty()
        && user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// JSON files at `<root>/<user-id>/calendar-filters.json`.
pub struct FileFilterStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileFilterStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, user_id: &str) -> Result<PathBuf, FilterStoreError> {
        if !valid_user_id(user_id) {
            return Err(FilterStoreError::InvalidUser(user_id.to_string()));
        }
        Ok(self.root.join(user_id).join(format!("{}.json", FILTERS_KEY)))
    }

    async fn read(&self, user_id: &str, path: &Path) -> Filters {
        match tokio::fs::read_to_string(path).await {
            Ok(raw) => parse_filters(&raw),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No stored filters for user {}", user_id);
                Filters::default()
            }
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                Filters::default()
            }
        }
    }

    // caller holds `write_lock`
    async fn write(&self, user_id: &str, path: &Path, filters: &Filters) -> Result<(), FilterStoreError> {
        let encoded = serde_json::to_string(filters)?;
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        // write-then-rename; readers see old or new, never partial
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, encoded).await?;
        tokio::fs::rename(&tmp, path).await?;

        debug!("Stored filters for user {}: {:?}", user_id, filters);
        Ok(())
    }
}

#[async_trait]
impl FilterStore for FileFilterStore {
    async fn load(&self, user_id: &str) -> Filters {
        match self.path_for(user_id) {
            Ok(path) => self.read(user_id, &path).await,
            Err(e) => {
                warn!("{}", e);
                Filters::default()
            }
        }
    }

    async fn save(&self, user_id: &str, filters: &Filters) -> Result<(), FilterStoreError> {
        let path = self.path_for(user_id)?;
        let _guard = self.write_lock.lock().await;
        self.write(user_id, &path, filters).await
    }

    async fn update(
        &self,
        user_id: &str,
        change: &(dyn Fn(Filters) -> Filters + Send + Sync),
    ) -> Result<Filters, FilterStoreError> {
        let path = self.path_for(user_id)?;
        let _guard = self.write_lock.lock().await;
        let next = change(self.read(user_id, &path).await);
        self.write(user_id, &path, &next).await?;
        Ok(next)
    }
}

/// Raw string values keyed by user, mirroring the file layout in memory.
#[derive(Default)]
pub struct MemoryFilterStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryFilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_raw(&self, user_id: &str, raw: &str) {
        self.entries
            .write()
            .await
            .insert(user_id.to_string(), raw.to_string());
    }

    pub async fn raw(&self, user_id: &str) -> Option<String> {
        self.entries.read().await.get(user_id).cloned()
    }
}

#[async_trait]
impl FilterStore for MemoryFilterStore {
    async fn load(&self, user_id: &str) -> Filters {
        match self.entries.read().await.get(user_id) {
            Some(raw) => parse_filters(raw),
            None => Filters::default(),
        }
    }

    async fn save(&self, user_id: &str, filters: &Filters) -> Result<(), FilterStoreError> {
        let encoded = serde_json::to_string(filters)?;
        self.entries.write().await.insert(user_id.to_string(), encoded);
        Ok(())
    }

    async fn update(
        &self,
        user_id: &str,
        change: &(dyn Fn(Filters) -> Filters + Send + Sync),
    ) -> Result<Filters, FilterStoreError> {
        let mut entries = self.entries.write().await;
        let current = entries.get(user_id).map(|raw| parse_filters(raw)).unwrap_or_default();
        let next = change(current);
        entries.insert(user_id.to_string(), serde_json::to_string(&next)?);
        Ok(next)
    }
}
