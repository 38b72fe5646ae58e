//! Error types produced by the aggregation API client.

use thiserror::Error;

/// Failure of a single request against the aggregation API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid client configuration: {0}")]
    Config(String),
}

/// Convenient alias for client results.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(feature = "server")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
