//! Error types for the user API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because a 404 from `get-user` or
//! `update` means the named user does not exist. Every other status except
//! 200 lands in `HttpError` with the raw status code and body. Failures that
//! happen before a status is available (timeouts, refused connections) are
//! reported by the transport through `Timeout`, `Connection` and `Transport`.
//!
//! An `"OK"`/`"FAIL"` value in the body's `status` field is not an error at
//! this layer; see [`crate::status::is_status_ok`].

use thiserror::Error;

/// Errors returned by `ApiClient` and its transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than 200 and 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body is not a JSON object.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The base URL cannot be parsed or cannot carry a path.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    /// The transport gave up waiting for the server.
    #[error("request timed out")]
    Timeout,

    /// The server could not be reached.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Any other transport-level failure.
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Connection(err.to_string())
        } else if err.is_builder() {
            ApiError::InvalidUrl(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidUrl(err.to_string())
    }
}
