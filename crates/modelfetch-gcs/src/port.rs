//! Port trait implementation for `GcsClient`.
//!
//! This module implements the core-owned `ObjectStorePort` trait for
//! `GcsClient`, converting internal errors into port errors.

use std::path::Path;

use async_trait::async_trait;
use modelfetch_core::ports::{ObjectStoreError, ObjectStorePort, ObjectStoreResult};

use crate::client::GcsClient;
use crate::error::GcsError;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `GcsError` to core `ObjectStoreError`.
pub(crate) fn map_error(err: GcsError) -> ObjectStoreError {
    match err {
        GcsError::ApiRequestFailed { status, url } => {
            if status == 401 || status == 403 {
                ObjectStoreError::AuthRequired {
                    message: format!("GCS rejected credentials with status {status}: {url}"),
                }
            } else {
                ObjectStoreError::network_with_status(
                    format!("GCS request failed with status {status}: {url}"),
                    status,
                )
            }
        }
        GcsError::ObjectNotFound { bucket, key } => ObjectStoreError::NotFound { bucket, key },
        GcsError::InvalidResponse { message } => ObjectStoreError::InvalidResponse { message },
        GcsError::Auth { message } => ObjectStoreError::AuthRequired { message },
        GcsError::Network(e) => ObjectStoreError::network(e.to_string()),
        err @ (GcsError::InvalidEndpoint { .. } | GcsError::InvalidUrl(_)) => {
            ObjectStoreError::Configuration {
                message: err.to_string(),
            }
        }
        GcsError::JsonParse(e) => ObjectStoreError::InvalidResponse {
            message: e.to_string(),
        },
        GcsError::Io(e) => ObjectStoreError::from_io_error(&e),
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl ObjectStorePort for GcsClient {
    async fn object_size(&self, bucket: &str, key: &str) -> ObjectStoreResult<Option<u64>> {
        Self::object_size(self, bucket, key).await.map_err(map_error)
    }

    async fn download_to_file(
        &self,
        bucket: &str,
        key: &str,
        dest: &Path,
    ) -> ObjectStoreResult<u64> {
        Self::download_to_file(self, bucket, key, dest)
            .await
            .map_err(map_error)
    }
}
