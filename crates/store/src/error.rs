use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by the record store and identity provider.
///
/// HTTP statuses are mapped once, at the response boundary; callers match on
/// these variants instead of status codes.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no active session")]
    NoSession,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid row: {0}")]
    InvalidRow(String),
}

impl From<engine::EngineError> for StoreError {
    fn from(err: engine::EngineError) -> Self {
        StoreError::InvalidRow(err.to_string())
    }
}
