pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /projects                 list, create
/// /projects/{id}            get, partial update
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/projects", project::router())
}
