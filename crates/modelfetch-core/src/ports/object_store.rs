//! Object store port trait.

use std::path::Path;

use async_trait::async_trait;

use super::error::ObjectStoreResult;

/// Port trait for reading objects out of a bucket.
///
/// The implementation lives in `modelfetch-gcs`. A single instance is
/// shared by every worker, so implementations must tolerate concurrent
/// calls.
#[async_trait]
pub trait ObjectStorePort: Send + Sync {
    /// Fetch the size of an object in bytes.
    ///
    /// Returns `Ok(None)` when the store answers but does not report a size.
    async fn object_size(&self, bucket: &str, key: &str) -> ObjectStoreResult<Option<u64>>;

    /// Stream an object into `dest`, creating or truncating it.
    ///
    /// Returns the number of bytes written. On error `dest` may hold a
    /// partial object; cleaning it up is the caller's job.
    async fn download_to_file(&self, bucket: &str, key: &str, dest: &Path)
    -> ObjectStoreResult<u64>;
}
