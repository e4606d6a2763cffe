//! Error types for the Moorcheh client

use terminal_core::TerminalError;
use thiserror::Error;

const SERVICE: &str = "Moorcheh";

/// Errors that can occur when talking to Moorcheh
#[derive(Debug, Error)]
pub enum MoorchehError {
    /// HTTP request failed before a response arrived
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error body returned by the API
        message: String,
    },

    /// Resource already exists (HTTP 409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// API key rejected (HTTP 401/403)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to parse API response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<reqwest::Error> for MoorchehError {
    fn from(e: reqwest::Error) -> Self {
        MoorchehError::RequestFailed(e.to_string())
    }
}

impl From<MoorchehError> for TerminalError {
    fn from(e: MoorchehError) -> Self {
        match e {
            MoorchehError::RequestFailed(msg) => TerminalError::network(msg),
            MoorchehError::Unauthorized(msg) => TerminalError::auth(msg),
            MoorchehError::ParseError(msg) => TerminalError::parse(msg),
            MoorchehError::InvalidConfig(msg) => TerminalError::config(msg),
            MoorchehError::ApiError { status, message } => {
                TerminalError::upstream(SERVICE, status, message)
            }
            MoorchehError::Conflict(message) => TerminalError::upstream(SERVICE, 409, message),
        }
    }
}
