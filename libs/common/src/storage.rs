//! Key/value storage areas
//!
//! A storage area holds string values under string keys for a single
//! origin. Every operation is atomic on its own, including the multi-key
//! `entries`, `merge` and `replace_all`, so readers in other processes
//! sharing the area never observe a partial write.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::StorageResult;

/// Snapshot of every key in an area
pub type Entries = BTreeMap<String, String>;

/// Persistent key/value area scoped to one origin
#[async_trait]
pub trait StorageArea: Send + Sync {
    /// Get a value by key
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Set a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a single key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> StorageResult<()>;

    /// Remove every key in the area
    async fn clear(&self) -> StorageResult<()>;

    /// Consistent snapshot of the whole area
    async fn entries(&self) -> StorageResult<Entries>;

    /// Set several keys in one step; other keys are kept
    async fn merge(&self, values: Entries) -> StorageResult<()>;

    /// Drop every key and store `values` in one step
    async fn replace_all(&self, values: Entries) -> StorageResult<()>;
}

/// In-process storage area
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<Entries>,
}

impl MemoryStorage {
    /// Create an empty memory storage area
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether the area holds no keys
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl StorageArea for MemoryStorage {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> StorageResult<()> {
        self.entries.lock().await.clear();
        Ok(())
    }

    async fn entries(&self) -> StorageResult<Entries> {
        Ok(self.entries.lock().await.clone())
    }

    async fn merge(&self, values: Entries) -> StorageResult<()> {
        self.entries.lock().await.extend(values);
        Ok(())
    }

    async fn replace_all(&self, values: Entries) -> StorageResult<()> {
        *self.entries.lock().await = values;
        Ok(())
    }
}

/// Storage area persisted as a JSON object in a single file
///
/// The file is the only source of truth: every operation reads its current
/// content, so several processes sharing the path see each other's writes.
/// Mutations are written to a sibling temporary file that is then renamed
/// over the file. Readers never see a half-written document.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Open a file-backed storage area, creating it lazily on first write
    ///
    /// Fails when an existing file is not a JSON object of strings.
    pub async fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let storage = Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        };

        let entries = storage.load().await?;
        info!(
            "Opened file storage at {} with {} keys",
            storage.path.display(),
            entries.len()
        );

        Ok(storage)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StorageResult<Entries> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(Entries::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, entries: &Entries) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let bytes = serde_json::to_vec_pretty(entries)?;
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!("Persisted {} keys to {}", entries.len(), self.path.display());
        Ok(())
    }

    /// Load the file, apply `change` and write the result back
    ///
    /// Nothing is written when `change` reports no modification.
    async fn update<F>(&self, change: F) -> StorageResult<()>
    where
        F: FnOnce(&mut Entries) -> bool + Send,
    {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        if change(&mut entries) {
            self.persist(&entries).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl StorageArea for FileStorage {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
        .await
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.update(|entries| entries.remove(key).is_some()).await
    }

    async fn clear(&self) -> StorageResult<()> {
        let _guard = self.lock.lock().await;
        self.persist(&Entries::new()).await
    }

    async fn entries(&self) -> StorageResult<Entries> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn merge(&self, values: Entries) -> StorageResult<()> {
        self.update(|entries| {
            entries.extend(values);
            true
        })
        .await
    }

    async fn replace_all(&self, values: Entries) -> StorageResult<()> {
        let _guard = self.lock.lock().await;
        self.persist(&values).await
    }
}
