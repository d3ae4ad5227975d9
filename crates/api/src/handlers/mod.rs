//! Request handlers.
//!
//! Handlers parse and validate the request, delegate to the
//! [`projboard_store::ProjectStore`] held in [`crate::state::AppState`] and map
//! errors via [`crate::error::AppError`].

pub mod project;

use axum::body::Bytes;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Parse a raw request body as untyped JSON.
///
/// Field-level checks happen afterwards, so a body with the wrong shape still
/// produces a field-specific validation message instead of a decode error.
pub(crate) fn parse_json_body(body: &Bytes) -> AppResult<Value> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        AppError::BadRequest("Request body must be valid JSON".to_string())
    })
}
