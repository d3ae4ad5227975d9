use crate::types::ProjectId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound {
        entity: &'static str,
        id: ProjectId,
    },

    #[error("Validation failed: {0}")]
    Validation(String),
}
