//! Best-effort local mirror of the project list.
//!
//! The cache is never authoritative. Reads degrade to an empty list and
//! writes that fail are logged and dropped; neither ever reaches the caller.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use projboard_core::project::Project;

/// Fixed key the project list is stored under.
pub const STORAGE_KEY: &str = "kp8-projects";

/* --------------------------------------------------------------------------
   Storage backends
   -------------------------------------------------------------------------- */

/// Errors from a [`CacheStorage`] backend.
#[derive(Debug, thiserror::Error)]
pub enum CacheStorageError {
    #[error("cache storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache storage unavailable: {0}")]
    Unavailable(String),
}

/// String key/value storage in the style of browser local storage.
pub trait CacheStorage: Send + Sync {
    /// Fetch the value under `key`, `None` if it was never set.
    fn get_item(&self, key: &str) -> Result<Option<String>, CacheStorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), CacheStorageError>;
}

/// One file per key inside a directory.
///
/// Like browser local storage the calls are synchronous and block on disk;
/// [`crate::ProjectsClient`] moves its cache updates onto the blocking pool.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CacheStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, CacheStorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CacheStorageError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-process storage, for tests and hosts without a writable disk.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, CacheStorageError> {
        let items = self
            .items
            .lock()
            .map_err(|_| CacheStorageError::Unavailable("memory storage lock poisoned".into()))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CacheStorageError> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| CacheStorageError::Unavailable("memory storage lock poisoned".into()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/* --------------------------------------------------------------------------
   Project cache
   -------------------------------------------------------------------------- */

/// The cached project list under [`STORAGE_KEY`].
///
/// Cloning shares the underlying storage.
#[derive(Clone)]
pub struct ProjectCache {
    storage: Arc<dyn CacheStorage>,
}

impl ProjectCache {
    pub fn new(storage: Arc<dyn CacheStorage>) -> Self {
        Self { storage }
    }

    /// Last saved list, or empty if nothing usable is stored.
    pub fn read(&self) -> Vec<Project> {
        let raw = match self.storage.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read project cache");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Discarding corrupt project cache");
            Vec::new()
        })
    }

    /// Replace the cached list. Failures are logged, never returned.
    pub fn write(&self, projects: &[Project]) {
        let raw = match serde_json::to_string(projects) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode project cache");
                return;
            }
        };

        if let Err(e) = self.storage.set_item(STORAGE_KEY, &raw) {
            tracing::error!(error = %e, "Failed to save projects to cache");
        }
    }

    /// Append `project` to the cached snapshot.
    pub fn append(&self, project: &Project) {
        let mut projects = self.read();
        projects.push(project.clone());
        self.write(&projects);
    }

    /// Swap the cached record with the same id for `project`.
    ///
    /// A record that is not cached yet is left out; the next full list
    /// refresh brings it in.
    pub fn replace(&self, project: &Project) {
        let projects: Vec<Project> = self
            .read()
            .into_iter()
            .map(|p| if p.id == project.id { project.clone() } else { p })
            .collect();
        self.write(&projects);
    }
}
