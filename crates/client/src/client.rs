//! REST client for the `/api/projects` endpoints.
//!
//! Wraps the HTTP API using [`reqwest`] and mirrors every successful
//! response into the [`ProjectCache`]. Cache storage is synchronous, so
//! cache updates run on tokio's blocking pool. There is no cancellation: if
//! two mutations race, the one that settles last writes the cache last.

use std::sync::Arc;

use projboard_core::project::{CreateProject, Project, ProjectStatus, UpdateProject};
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::cache::{FileStorage, ProjectCache};
use crate::config::ClientConfig;
use crate::error::ClientError;

const FETCH_PROJECTS_FAILED: &str = "Failed to fetch projects";
const FETCH_PROJECT_FAILED: &str = "Failed to fetch project";
const CREATE_PROJECT_FAILED: &str = "Failed to create project";
const UPDATE_PROJECT_FAILED: &str = "Failed to update project";

/// Error payload returned by the API on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// HTTP client for the project API plus its local cache.
pub struct ProjectsClient {
    client: reqwest::Client,
    base_url: String,
    cache: ProjectCache,
}

impl ProjectsClient {
    /// Create a client for the API at `base_url`, e.g. `http://host:3000`.
    pub fn new(base_url: impl Into<String>, cache: ProjectCache) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, cache)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        cache: ProjectCache,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            cache,
        }
    }

    /// Build a client from [`ClientConfig`], caching under `cache_dir`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let cache = ProjectCache::new(Arc::new(FileStorage::new(&config.cache_dir)));
        Ok(Self::with_client(builder.build()?, &config.base_url, cache))
    }

    /// The cache this client keeps in sync.
    pub fn cache(&self) -> &ProjectCache {
        &self.cache
    }

    /// Cached snapshot for painting before [`Self::list_projects`] resolves.
    ///
    /// Reads the storage backend directly; with [`FileStorage`] this is a
    /// blocking file read.
    pub fn cached_projects(&self) -> Vec<Project> {
        self.cache.read()
    }

    /// Fetch all projects and overwrite the cache with the result.
    ///
    /// On failure the cache is left alone so the caller can keep showing it.
    pub async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        let response = self
            .client
            .get(self.projects_url())
            .send()
            .await
            .map_err(|e| fetch_failed(FETCH_PROJECTS_FAILED, &e))?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "List projects failed");
            return Err(ClientError::FetchFailed(FETCH_PROJECTS_FAILED.into()));
        }

        let projects: Vec<Project> = response
            .json()
            .await
            .map_err(|e| fetch_failed(FETCH_PROJECTS_FAILED, &e))?;

        let snapshot = projects.clone();
        self.update_cache(move |cache| cache.write(&snapshot)).await;
        Ok(projects)
    }

    /// Fetch a single project. Does not touch the cache.
    pub async fn get_project(&self, id: &str) -> Result<Project, ClientError> {
        let response = self
            .client
            .get(self.project_url(id)?)
            .send()
            .await
            .map_err(|e| fetch_failed(FETCH_PROJECT_FAILED, &e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            status if !status.is_success() => {
                tracing::warn!(%status, project_id = %id, "Get project failed");
                Err(ClientError::FetchFailed(FETCH_PROJECT_FAILED.into()))
            }
            _ => response
                .json()
                .await
                .map_err(|e| fetch_failed(FETCH_PROJECT_FAILED, &e)),
        }
    }

    /// Create a project and append it to the cached list.
    pub async fn create_project(&self, input: &CreateProject) -> Result<Project, ClientError> {
        let response = self
            .client
            .post(self.projects_url())
            .json(input)
            .send()
            .await?;

        let project: Project = Self::parse_mutation(response, CREATE_PROJECT_FAILED).await?;
        let cached = project.clone();
        self.update_cache(move |cache| cache.append(&cached)).await;
        Ok(project)
    }

    /// Change a project's status and replace it in the cached list.
    pub async fn set_project_status(
        &self,
        id: &str,
        status: ProjectStatus,
    ) -> Result<Project, ClientError> {
        let response = self
            .client
            .patch(self.project_url(id)?)
            .json(&UpdateProject::status(status))
            .send()
            .await?;

        let project: Project = Self::parse_mutation(response, UPDATE_PROJECT_FAILED).await?;
        let cached = project.clone();
        self.update_cache(move |cache| cache.replace(&cached)).await;
        Ok(project)
    }

    /// Mark a project as done.
    pub async fn mark_done(&self, id: &str) -> Result<Project, ClientError> {
        self.set_project_status(id, ProjectStatus::Done).await
    }

    // ---- private helpers ----

    fn projects_url(&self) -> String {
        format!("{}/api/projects", self.base_url)
    }

    /// URL of a single project. The id is pushed as one percent-encoded
    /// path segment, so `?`, `#` and `/` inside it stay part of the id.
    fn project_url(&self, id: &str) -> Result<Url, ClientError> {
        let invalid = || ClientError::InvalidUrl(self.base_url.clone());
        let mut url = Url::parse(&self.projects_url()).map_err(|_| invalid())?;
        url.path_segments_mut().map_err(|()| invalid())?.push(id);
        Ok(url)
    }

    /// Run a cache update off the async runtime and wait for it.
    async fn update_cache<F>(&self, update: F)
    where
        F: FnOnce(&ProjectCache) + Send + 'static,
    {
        let cache = self.cache.clone();
        if let Err(e) = tokio::task::spawn_blocking(move || update(&cache)).await {
            tracing::error!(error = %e, "Project cache update did not complete");
        }
    }

    /// Decode a mutation response, turning a non-2xx status into
    /// [`ClientError::Api`] with the server's `error` message or `fallback`.
    async fn parse_mutation<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| fallback.to_string());
        tracing::warn!(%status, error = %message, "Project mutation rejected");

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

fn fetch_failed(message: &str, cause: &reqwest::Error) -> ClientError {
    tracing::warn!(error = %cause, "{message}");
    ClientError::FetchFailed(message.to_string())
}
