//! Project entity model and DTOs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{ProjectId, Timestamp};

/* --------------------------------------------------------------------------
   Status
   -------------------------------------------------------------------------- */

/// Project lifecycle status.
///
/// Serialized as `PLANNED`, `IN_PROGRESS` or `DONE`. Any other string fails
/// to deserialize, so an unknown status can never reach the data file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    Planned,
    InProgress,
    Done,
}

impl ProjectStatus {
    /// Every valid status, in lifecycle order.
    pub const ALL: [ProjectStatus; 3] = [
        ProjectStatus::Planned,
        ProjectStatus::InProgress,
        ProjectStatus::Done,
    ];

    /// Wire representation of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Planned => "PLANNED",
            ProjectStatus::InProgress => "IN_PROGRESS",
            ProjectStatus::Done => "DONE",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the known status values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown project status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for ProjectStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/* --------------------------------------------------------------------------
   Entity
   -------------------------------------------------------------------------- */

/// A project record as persisted in the data file and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub client: String,
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
///
/// `name` and `client` are expected to be trimmed and validated already
/// (see [`crate::validation::parse_create`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub client: String,
    /// Defaults to [`ProjectStatus::Planned`] if omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// DTO for a partial update. Only `Some` fields are applied.
///
/// `description` distinguishes "leave alone" (`None`) from "clear"
/// (`Some(None)`); the latter serializes as an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

impl UpdateProject {
    /// Patch that only changes the status.
    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// True when applying this patch would change no field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.client.is_none()
            && self.status.is_none()
            && self.description.is_none()
    }

    /// Merge the present fields onto `project`.
    ///
    /// Never touches `id`, `created_at` or `updated_at`; the store owns those.
    pub fn apply_to(&self, project: &mut Project) {
        if let Some(name) = &self.name {
            project.name = name.clone();
        }
        if let Some(client) = &self.client {
            project.client = client.clone();
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(description) = &self.description {
            project.description = description.clone();
        }
    }
}
