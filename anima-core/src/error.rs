//! Error types for the ANIMA workspace.

use thiserror::Error;

/// Errors that can occur in anima operations.
#[derive(Error, Debug)]
pub enum AnimaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("No event at index {0}")]
    EventNotFound(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Chat provider error: {0}")]
    Chat(String),
}

/// Result type alias for anima operations.
pub type AnimaResult<T> = Result<T, AnimaError>;
