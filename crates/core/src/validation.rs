//! Request-body validation for project create and partial update.
//!
//! Works on untyped JSON so that wrong field types are handled the same way
//! as missing fields. Create is strict and reports the first failing field
//! (name, then client, then status). Partial update is lenient: invalid
//! fields are dropped silently and the rest of the patch still applies.

use serde_json::Value;

use crate::error::CoreError;
use crate::project::{CreateProject, ProjectStatus, UpdateProject};

/* --------------------------------------------------------------------------
   Validation limits
   -------------------------------------------------------------------------- */

/// Minimum trimmed length for a project name.
pub const MIN_NAME_LEN: usize = 2;

/// Minimum trimmed length for a client name.
pub const MIN_CLIENT_LEN: usize = 2;

/* --------------------------------------------------------------------------
   Field helpers
   -------------------------------------------------------------------------- */

/// Return the trimmed string value of `key` if it is a string of at least
/// `min_len` characters after trimming.
fn trimmed_with_min_len(body: &Value, key: &str, min_len: usize) -> Option<String> {
    let trimmed = body.get(key)?.as_str()?.trim();
    (trimmed.chars().count() >= min_len).then(|| trimmed.to_string())
}

fn status_list() -> String {
    ProjectStatus::ALL
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/* --------------------------------------------------------------------------
   Create
   -------------------------------------------------------------------------- */

/// Validate a create request body and build a [`CreateProject`].
///
/// A missing or `null` status defaults to [`ProjectStatus::Planned`]. A
/// non-string description is ignored.
pub fn parse_create(body: &Value) -> Result<CreateProject, CoreError> {
    let name = trimmed_with_min_len(body, "name", MIN_NAME_LEN).ok_or_else(|| {
        CoreError::Validation(format!("name must be at least {MIN_NAME_LEN} characters"))
    })?;

    let client = trimmed_with_min_len(body, "client", MIN_CLIENT_LEN).ok_or_else(|| {
        CoreError::Validation(format!(
            "client must be at least {MIN_CLIENT_LEN} characters"
        ))
    })?;

    let status = match body.get("status") {
        None | Some(Value::Null) => ProjectStatus::default(),
        Some(value) => value
            .as_str()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                CoreError::Validation(format!("status must be one of: {}", status_list()))
            })?,
    };

    let description = body
        .get("description")
        .and_then(Value::as_str)
        .map(|d| d.trim().to_string());

    Ok(CreateProject {
        name,
        client,
        status: Some(status),
        description,
    })
}

/* --------------------------------------------------------------------------
   Partial update
   -------------------------------------------------------------------------- */

/// Build an [`UpdateProject`] from a patch body, dropping invalid fields.
///
/// - `status` is kept only if it is a known status string.
/// - `name` / `client` are kept only if they meet the create minimums.
/// - `description` present as a string is trimmed; present as anything else
///   (including `null`) clears it.
///
/// Identity and timestamp keys, unknown keys, and non-object bodies are ignored.
pub fn parse_update(body: &Value) -> UpdateProject {
    let status = body
        .get("status")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok());

    let description = body
        .get("description")
        .map(|value| value.as_str().map(|d| d.trim().to_string()));

    UpdateProject {
        name: trimmed_with_min_len(body, "name", MIN_NAME_LEN),
        client: trimmed_with_min_len(body, "client", MIN_CLIENT_LEN),
        status,
        description,
    }
}
