//! Object store port errors.

use thiserror::Error;

/// Errors surfaced through the object store port.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ObjectStoreError {
    /// The object does not exist.
    #[error("object gs://{bucket}/{key} not found")]
    NotFound {
        /// Bucket name
        bucket: String,
        /// Object key
        key: String,
    },

    /// Credentials were missing or rejected.
    #[error("Authentication failed: {message}")]
    AuthRequired {
        /// Description of the failure
        message: String,
    },

    /// Network, transport or unexpected HTTP status error.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
        /// HTTP status code if available
        status_code: Option<u16>,
    },

    /// The store answered with something we could not interpret.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// Writing the local file failed.
    #[error("I/O error ({kind}): {message}")]
    Io {
        /// The kind of I/O error (e.g. "`StorageFull`")
        kind: String,
        /// Detailed error message
        message: String,
    },

    /// Client configuration error.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },
}

impl ObjectStoreError {
    /// Create a not found error.
    pub fn not_found(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            status_code: None,
        }
    }

    /// Create a network error with HTTP status code.
    pub fn network_with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self::Network {
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Create an I/O error from a `std::io::Error`.
    #[must_use]
    pub fn from_io_error(err: &std::io::Error) -> Self {
        Self::Io {
            kind: format!("{:?}", err.kind()),
            message: err.to_string(),
        }
    }

    /// Check if this is a not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias for object store port operations.
pub type ObjectStoreResult<T> = Result<T, ObjectStoreError>;
