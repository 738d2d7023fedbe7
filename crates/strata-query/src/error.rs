//! Query service errors

use thiserror::Error;
use uuid::Uuid;

pub type QueryServiceResult<T> = Result<T, QueryServiceError>;

/// Query service errors with user-friendly messages
#[derive(Debug, Error)]
pub enum QueryServiceError {
    #[error("A saved query named '{0}' already exists")]
    DuplicateSavedQuery(String),

    #[error("Saved query not found: {0}")]
    SavedQueryNotFound(Uuid),
}
