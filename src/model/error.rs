//! Model store error types
//!
//! Errors raised while loading or persisting the training corpus. The store
//! recovers from all of them locally; they surface only in logs and in the
//! explicit `persist`/`try_load` calls.

use thiserror::Error;

/// Errors that can occur in the model store
#[derive(Error, Debug)]
pub enum ModelError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serialization(err.to_string())
    }
}

/// Result type alias for model store operations
pub type ModelResult<T> = Result<T, ModelError>;
