//! Error types for the Jobs API client.

use runhook_core::CoreError;
use thiserror::Error;

/// Errors that can occur when calling the Jobs API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// Client configuration is incomplete or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Domain error: payload normalization or failed-task extraction.
    #[error(transparent)]
    Content(#[from] CoreError),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
