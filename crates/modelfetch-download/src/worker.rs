//! Per-item fetch pipeline.
//!
//! Each item goes through the same steps:
//! 1. Ensure the destination directory exists
//! 2. If a local file is present, compare its size with the remote object
//!    and skip on a match
//! 3. Stream the object into the temporary file
//! 4. Rename the temporary file onto the destination
//!
//! Any error after step 1 removes the temporary file. Errors never escape
//! as `Err`; they become a failed `ItemReport` naming the object key.

use std::path::Path;

use modelfetch_core::download::{
    DownloadError, DownloadItem, DownloadResult, FetchOutcome, ItemReport,
};
use modelfetch_core::ports::ObjectStorePort;
use tracing::{debug, warn};

use crate::paths::DownloadDestination;

/// Bring one item up to date and report what happened.
pub async fn fetch_item(
    store: &dyn ObjectStorePort,
    bucket: &str,
    base_dir: &Path,
    item: DownloadItem,
) -> ItemReport {
    let destination = DownloadDestination::plan(base_dir, &item);
    match run_item(store, bucket, &item, &destination).await {
        Ok(outcome) => ItemReport { item, outcome },
        Err(err) => {
            debug!(key = %item.remote_key, error = %err, "Item failed");
            ItemReport::failed(item, err)
        }
    }
}

async fn run_item(
    store: &dyn ObjectStorePort,
    bucket: &str,
    item: &DownloadItem,
    destination: &DownloadDestination,
) -> DownloadResult<FetchOutcome> {
    let key = item.remote_key.as_str();
    destination.ensure_parent(key).await?;

    if let Some(local_size) = destination.existing_size().await {
        match remote_size(store, bucket, key).await {
            Ok(Some(remote)) if remote == local_size => {
                debug!(key, size = local_size, "Local file is up to date");
                return Ok(FetchOutcome::Skipped);
            }
            Ok(Some(remote)) => {
                debug!(key, local_size, remote_size = remote, "Size mismatch, re-downloading");
            }
            Ok(None) => debug!(key, "Remote size unknown, re-downloading"),
            Err(err) => warn!(error = %err, "Re-downloading after failed size check"),
        }
    }

    transfer(store, bucket, key, destination).await?;
    Ok(FetchOutcome::Downloaded)
}

async fn remote_size(
    store: &dyn ObjectStorePort,
    bucket: &str,
    key: &str,
) -> DownloadResult<Option<u64>> {
    store
        .object_size(bucket, key)
        .await
        .map_err(|e| DownloadError::metadata(key, e))
}

async fn transfer(
    store: &dyn ObjectStorePort,
    bucket: &str,
    key: &str,
    destination: &DownloadDestination,
) -> DownloadResult<()> {
    let result = async {
        let written = store
            .download_to_file(bucket, key, &destination.temp_path)
            .await
            .map_err(|e| DownloadError::transfer(key, e))?;
        debug!(key, bytes = written, "Transfer complete");
        destination.commit(key).await
    }
    .await;

    if result.is_err() {
        destination.discard_temp().await;
    }
    result
}
