//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Store answered with a non-success status
    #[error("Store error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Row failed boundary validation
    #[error("Invalid row: {0}")]
    InvalidRow(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Snapshot file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let message = err.to_string();
        match err {
            ClientError::Http(e) if e.is_timeout() => {
                AppError::with_message(ErrorCode::TimeoutError, message)
            }
            ClientError::Http(_) => AppError::network(message),
            ClientError::Api { status, .. } => AppError::store(message).with_detail("status", status),
            ClientError::NotFound(resource) => {
                AppError::with_message(ErrorCode::NotFound, message).with_detail("resource", resource)
            }
            ClientError::Config(_) => AppError::config(message),
            ClientError::InvalidRow(_) | ClientError::Serialization(_) => {
                AppError::invalid_format(message)
            }
            ClientError::Io(_) => AppError::internal(message),
        }
    }
}
