//! Error types for the auditor and its text-generation backend.

use thiserror::Error;

/// Errors from a [`super::TextGenerator`] call.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider returned an error body.
    #[error("API error ({error_type}): {message}")]
    Api {
        /// Error type from the API.
        error_type: String,
        /// Error message.
        message: String,
    },

    /// Rate limited by the provider.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The credential was rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The credential cannot be sent as a header value.
    #[error("invalid API key header")]
    InvalidHeader,
}

/// Errors from an audit request.
///
/// Only the request-shape variants reach callers of the controller; the
/// others are replaced by the fixed fallback answer.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Please enter a question for the auditor.")]
    EmptyQuestion,

    #[error("Question is too long ({len} characters, at most {max}).")]
    QuestionTooLong { len: usize, max: usize },

    #[error("Unknown source file: {0}")]
    UnknownFile(String),

    #[error("An audit is already in progress.")]
    RequestInFlight,

    /// No API credential was configured.
    #[error("the auditor has no API key configured")]
    NotConfigured,

    /// Transport or provider failure.
    #[error("audit transport failure: {0}")]
    Transport(#[from] GenerateError),
}

/// API error response body.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Nested error details.
    pub error: ApiError,
}

/// Nested error details.
#[derive(Debug, serde::Deserialize)]
pub struct ApiError {
    /// Error type.
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message.
    pub message: String,
}
