//! Handlers for the `/projects` resource.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use projboard_core::error::CoreError;
use projboard_core::project::Project;
use projboard_core::types::ProjectId;
use projboard_core::validation;

use crate::error::{AppError, AppResult};
use crate::handlers::parse_json_body;
use crate::state::AppState;

fn not_found(id: ProjectId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// POST /api/projects
///
/// Rejects the first invalid field (name, client, status) with 400.
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<Project>)> {
    let body = parse_json_body(&body)?;
    let input = validation::parse_create(&body)?;
    let project = state.store.create(&input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = state.store.list_all().await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> AppResult<Json<Project>> {
    match state.store.get_by_id(&id).await? {
        Some(project) => Ok(Json(project)),
        None => Err(not_found(id)),
    }
}

/// PATCH /api/projects/{id}
///
/// Invalid or unknown fields are dropped rather than rejected; see
/// [`validation::parse_update`].
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
    body: Bytes,
) -> AppResult<Json<Project>> {
    let body = parse_json_body(&body)?;
    let input = validation::parse_update(&body);
    match state.store.update(&id, &input).await? {
        Some(project) => Ok(Json(project)),
        None => Err(not_found(id)),
    }
}
