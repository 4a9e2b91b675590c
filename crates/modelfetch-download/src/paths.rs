//! Destination path planning for downloads.
//!
//! Every object is streamed into a sibling temporary file first and only
//! renamed onto its final path once complete, so the destination is either
//! absent, the old file, or the finished new file.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use modelfetch_core::download::{DownloadError, DownloadItem, DownloadResult};
use tracing::warn;

/// Suffix appended to the destination file name while a transfer is running.
pub const TEMP_SUFFIX: &str = ".part";

/// A planned download destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadDestination {
    /// Where the finished file lives.
    pub final_path: PathBuf,
    /// Sibling file the transfer writes into.
    pub temp_path: PathBuf,
}

impl DownloadDestination {
    /// Plan the destination of `item` under `base_dir`.
    pub fn plan(base_dir: &Path, item: &DownloadItem) -> Self {
        let final_path = item.destination(base_dir);
        let temp_path = temp_path_for(&final_path);
        Self {
            final_path,
            temp_path,
        }
    }

    /// Ensure the destination's parent directory exists.
    pub async fn ensure_parent(&self, remote_key: &str) -> DownloadResult<()> {
        let Some(parent) = self.final_path.parent() else {
            return Ok(());
        };
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DownloadError::filesystem(remote_key, "create_dir", parent, &e))
    }

    /// Size of the file currently at the final path, if it is a regular file.
    pub async fn existing_size(&self) -> Option<u64> {
        tokio::fs::metadata(&self.final_path)
            .await
            .ok()
            .filter(std::fs::Metadata::is_file)
            .map(|meta| meta.len())
    }

    /// Move the finished temporary file onto the final path.
    ///
    /// `rename` replaces an existing destination atomically on the same
    /// filesystem.
    pub async fn commit(&self, remote_key: &str) -> DownloadResult<()> {
        tokio::fs::rename(&self.temp_path, &self.final_path)
            .await
            .map_err(|e| DownloadError::filesystem(remote_key, "rename", &self.final_path, &e))
    }

    /// Best-effort removal of the temporary file.
    pub async fn discard_temp(&self) {
        match tokio::fs::remove_file(&self.temp_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.temp_path.display(),
                error = %e,
                "Failed to remove temporary file"
            ),
        }
    }
}

fn temp_path_for(final_path: &Path) -> PathBuf {
    let mut name = OsString::from(final_path.as_os_str());
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}
