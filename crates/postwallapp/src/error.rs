use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WallError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl WallError {
    /// Name of the offending request field, when the error is about one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            WallError::Validation(e) => Some(e.field()),
            _ => None,
        }
    }

    /// Validation, authorization and lookup failures are the caller's to fix.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            WallError::Validation(_) | WallError::Unauthorized(_) | WallError::NotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, WallError>;
