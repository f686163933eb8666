//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("\"{0}\" isn't supported")]
    InvalidProductCode(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        SdkError::Network(NetworkError::from(e))
    }
}

/// Request construction errors — raised before any network I/O.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A fluent setter rejected a value. Raised at set-time.
    #[error("field \"{field}\" violates rule: {rule}")]
    Field { field: String, rule: String },

    /// One or more required fields were never bound. Raised at
    /// submission-time and enumerates every missing key, not just the first.
    #[error("missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// The descriptor declares no field with this name.
    #[error("unknown field \"{0}\"")]
    UnknownField(String),
}

/// Transport-layer errors. Never retried by this crate — always surfaced
/// to the caller for local handling.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Credential errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("no credential stored; private operations require set_credential")]
    MissingCredential,

    #[error("API key and secret are invalid")]
    MalformedCredential,

    #[error("signing failed: {0}")]
    Signing(String),
}

/// Realtime feed errors.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("not connected")]
    NotConnected,

    #[error("send failed: {0}")]
    SendFailed(String),

    #[error("connection failed: {0}")]
    ConnectionFailed(String),
}
