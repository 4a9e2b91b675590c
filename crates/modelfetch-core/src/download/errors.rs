//! Download error types.
//!
//! Every per-item error carries the remote key it belongs to so that a
//! failure line can always name the object that failed. Causes are kept as
//! strings or port errors, never as `std::io::Error`, so reports stay
//! `Clone` and comparable in tests.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::ports::ObjectStoreError;

/// Error for a single download item.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DownloadError {
    /// Remote metadata could not be read.
    ///
    /// The fetcher recovers from this by re-downloading; it never becomes
    /// an item failure on its own.
    #[error("{remote_key}: metadata lookup failed: {source}")]
    Metadata {
        /// Object key
        remote_key: String,
        /// Cause reported by the object store
        source: ObjectStoreError,
    },

    /// Streaming the object to disk failed.
    #[error("{remote_key}: {source}")]
    Transfer {
        /// Object key
        remote_key: String,
        /// Cause reported by the object store
        source: ObjectStoreError,
    },

    /// A local file operation around the transfer failed.
    #[error("{remote_key}: {operation} {path}: {message}")]
    Filesystem {
        /// Object key
        remote_key: String,
        /// What was being done (e.g. "create_dir", "rename")
        operation: &'static str,
        /// Path the operation targeted
        path: PathBuf,
        /// Error kind name (e.g. "`PermissionDenied`")
        kind: String,
        /// Detailed error message
        message: String,
    },
}

impl DownloadError {
    /// Create a metadata error.
    pub fn metadata(remote_key: impl Into<String>, source: ObjectStoreError) -> Self {
        Self::Metadata {
            remote_key: remote_key.into(),
            source,
        }
    }

    /// Create a transfer error.
    pub fn transfer(remote_key: impl Into<String>, source: ObjectStoreError) -> Self {
        Self::Transfer {
            remote_key: remote_key.into(),
            source,
        }
    }

    /// Create a filesystem error from a `std::io::Error`.
    ///
    /// Captures the error kind name and message.
    pub fn filesystem(
        remote_key: impl Into<String>,
        operation: &'static str,
        path: impl Into<PathBuf>,
        err: &std::io::Error,
    ) -> Self {
        Self::Filesystem {
            remote_key: remote_key.into(),
            operation,
            path: path.into(),
            kind: format!("{:?}", err.kind()),
            message: err.to_string(),
        }
    }

    /// The object key this error belongs to.
    pub fn remote_key(&self) -> &str {
        match self {
            Self::Metadata { remote_key, .. }
            | Self::Transfer { remote_key, .. }
            | Self::Filesystem { remote_key, .. } => remote_key,
        }
    }

    /// Whether the fetcher handles this error by falling back to a download.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Metadata { .. })
    }
}

/// Convenience result type for download operations.
pub type DownloadResult<T> = Result<T, DownloadError>;

/// One or more items of a run failed.
///
/// Built only after every item has finished, so the failures listed here
/// never hide successes reported earlier in the same run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateFailure {
    /// Number of items submitted.
    pub total: usize,
    /// Items that never produced a report (their worker died).
    pub missing: usize,
    /// Per-item failures, in arrival order.
    pub failures: Vec<DownloadError>,
}

impl AggregateFailure {
    /// Number of items that did not succeed.
    pub fn failed_count(&self) -> usize {
        self.failures.len() + self.missing
    }
}

impl fmt::Display for AggregateFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for failure in &self.failures {
            writeln!(f, "FAIL {failure}")?;
        }
        if self.missing > 0 {
            writeln!(f, "{} item(s) produced no result", self.missing)?;
        }
        write!(
            f,
            "{} of {} downloads failed",
            self.failed_count(),
            self.total
        )
    }
}

impl std::error::Error for AggregateFailure {}
