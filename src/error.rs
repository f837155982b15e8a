//! Error types for the community client
//!
//! This module defines all error types used throughout the library,
//! using `thiserror` for ergonomic error handling.
//!
//! The request-level variants mirror the failure taxonomy of the backend
//! wire contract: `Auth` corresponds to an invalidated session (envelope
//! code 401 or HTTP 401), `Business` to any other non-success envelope
//! code, and the remaining request variants to transport-level failures
//! classified by the pipeline.

use thiserror::Error;

/// Main error type for community client operations
///
/// This enum encompasses all possible errors that can occur during
/// request dispatch, session management, configuration loading, and
/// local state persistence.
#[derive(Error, Debug)]
pub enum ClientError {
    /// No response was received (DNS failure, refused connection, etc.)
    #[error("network error: {0}")]
    Network(String),

    /// The request was aborted by the client-side timeout
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Session invalid or expired (envelope code 401 or HTTP 401)
    #[error("authentication required: {0}")]
    Auth(String),

    /// The server refused access to the resource (HTTP 403)
    #[error("permission denied: {0}")]
    Permission(String),

    /// The requested resource does not exist (HTTP 404)
    #[error("not found: {0}")]
    NotFound(String),

    /// The server failed to process the request (HTTP 500)
    #[error("server error: {0}")]
    Server(String),

    /// Business-level rejection carried in the response envelope
    #[error("request rejected ({code}): {message}")]
    Business {
        /// The non-success envelope code returned by the backend
        code: i64,
        /// The human-readable message from the envelope
        message: String,
    },

    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Local state persistence errors
    #[error("storage error: {0}")]
    Storage(String),

    /// JSON serialization/deserialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors that escaped classification
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Returns `true` when this error signals an invalidated session.
    ///
    /// The pipeline uses this to decide whether to clear the session and
    /// force navigation to a login route.
    pub fn is_session_invalid(&self) -> bool {
        matches!(self, ClientError::Auth(_))
    }
}

/// Result type alias for community client operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
