//! JSON-file record store for projects.
//!
//! The whole collection lives in a single JSON array on disk. Every mutation
//! reads the file, changes the collection in memory and writes it back while
//! holding the store's write lock, so two requests handled by the same
//! process can never overwrite each other's changes. Separate processes
//! sharing one file are still last-write-wins.

mod file;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::Utc;
use projboard_core::project::{CreateProject, Project, UpdateProject};
use tokio::sync::Mutex;

/// Default data file location, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = ".data/projects.json";

/// Errors from reading or writing the data file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Data file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize projects: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Provides list/get/create/update over the project collection.
#[derive(Debug)]
pub struct ProjectStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl ProjectStore {
    /// Bind a store to `path`. Nothing is touched on disk until the first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing data file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check that the data file is readable and well-formed.
    pub async fn health_check(&self) -> Result<(), StoreError> {
        file::read_collection(&self.path).await.map(|_| ())
    }

    /// List all projects in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Project>, StoreError> {
        file::read_collection(&self.path).await
    }

    /// Find a project by its ID.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Project>, StoreError> {
        let projects = file::read_collection(&self.path).await?;
        Ok(projects.into_iter().find(|p| p.id == id))
    }

    /// Append a new project, returning the stored record.
    ///
    /// Assigns a fresh id and sets `created_at == updated_at`. If `status` is
    /// `None` in the input, defaults to Planned.
    pub async fn create(&self, input: &CreateProject) -> Result<Project, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut projects = file::read_collection(&self.path).await?;
        let now = Utc::now();
        let project = Project {
            id: fresh_id(&projects),
            name: input.name.clone(),
            client: input.client.clone(),
            status: input.status.unwrap_or_default(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        };
        projects.push(project.clone());

        if let Err(e) = file::write_collection(&self.path, &projects).await {
            tracing::error!(error = %e, project_id = %project.id, "Failed to persist new project");
            return Err(e);
        }

        tracing::info!(project_id = %project.id, name = %project.name, "Project created");
        Ok(project)
    }

    /// Apply a partial update to an existing project.
    ///
    /// `id` and `created_at` always come from the stored record. `updated_at`
    /// is refreshed and never moves backwards. Returns `None` if no project
    /// with the given `id` exists.
    pub async fn update(
        &self,
        id: &str,
        input: &UpdateProject,
    ) -> Result<Option<Project>, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut projects = file::read_collection(&self.path).await?;
        let Some(existing) = projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        input.apply_to(existing);
        existing.updated_at = Utc::now().max(existing.updated_at);
        let updated = existing.clone();

        if let Err(e) = file::write_collection(&self.path, &projects).await {
            tracing::error!(error = %e, project_id = %id, "Failed to persist project update");
            return Err(e);
        }

        tracing::debug!(project_id = %id, status = %updated.status, "Project updated");
        Ok(Some(updated))
    }
}

/// Generate an id not already used in `projects`.
fn fresh_id(projects: &[Project]) -> String {
    let taken: HashSet<&str> = projects.iter().map(|p| p.id.as_str()).collect();
    loop {
        let id = uuid::Uuid::new_v4().to_string();
        if !taken.contains(id.as_str()) {
            return id;
        }
    }
}
