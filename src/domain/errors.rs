//! Domain errors for the warsztat client.

use thiserror::Error;

/// Domain-level errors surfaced by the store, services and adapters.
///
/// `load` records backend failures in the collection state and returns them;
/// mutations propagate them to the caller and leave the cache untouched.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Record not found in {entity}: {id}")]
    NotFound { entity: String, id: String },

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for DomainError {
    fn from(err: reqwest::Error) -> Self {
        DomainError::Backend(err.to_string())
    }
}
