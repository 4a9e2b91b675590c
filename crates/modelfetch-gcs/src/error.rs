//! Internal error types for GCS operations.
//!
//! These errors are mapped to `ObjectStoreError` at the port boundary.

use thiserror::Error;

/// Result type alias for GCS operations.
pub type GcsResult<T> = Result<T, GcsError>;

/// Errors related to Google Cloud Storage operations.
#[derive(Debug, Error)]
pub enum GcsError {
    /// API request failed with an HTTP error status.
    #[error("GCS request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The requested object does not exist.
    #[error("object gs://{bucket}/{key} not found")]
    ObjectNotFound {
        /// Bucket name
        bucket: String,
        /// Object key
        key: String,
    },

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from GCS: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// An access token could not be obtained.
    #[error("Could not obtain access token: {message}")]
    Auth {
        /// Description of the failure
        message: String,
    },

    /// The endpoint cannot be used as a base URL.
    #[error("Endpoint cannot be used as a base URL: {endpoint}")]
    InvalidEndpoint {
        /// The offending endpoint
        endpoint: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Local file error while writing an object.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GcsError {
    /// Create an invalid response error.
    pub(crate) fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}
