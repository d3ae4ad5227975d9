use std::sync::Arc;

use projboard_store::ProjectStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the store lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// JSON-file project store. Owns the single-writer lock, so there must be
    /// exactly one instance per data file in the process.
    pub store: Arc<ProjectStore>,
}
