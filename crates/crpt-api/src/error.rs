//! Error types for the document API client.

use thiserror::Error;

/// Errors that can occur while talking to the document API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The document failed local validation and was not sent.
    #[error("invalid document: {0}")]
    InvalidDocument(#[from] crpt_core::Error),

    /// A request body could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The configured request limit cannot build a throttle.
    #[error("invalid rate limit: {0}")]
    Throttle(#[from] crpt_throttle::ThrottleError),

    /// The API answered with a non-success status.
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// No authorization token is configured.
    #[error("no auth token configured (set CRPT_AUTH_TOKEN or auth_token in the config file)")]
    MissingToken,
}

impl ApiError {
    /// Returns `true` when the error is transient and the operation may
    /// succeed if retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Convenience alias for API results.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
