//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` and `BadRequest` get dedicated variants because callers act on
//! them (drop a stale row, surface a validation message). The server's
//! `{"error": "..."}` message is lifted out of the body for both. Any other
//! non-success status lands in `HttpError` with the raw status and body.

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404: the addressed row (or parent list) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The server rejected the request payload (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The server returned some other unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
