//! Download items, outcomes and run summaries.

use std::fmt;
use std::path::{Path, PathBuf};

use super::errors::{AggregateFailure, DownloadError};

/// A remote object and where it lands locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DownloadItem {
    /// Object key inside the bucket.
    pub remote_key: String,
    /// Destination path relative to the base directory.
    pub local_path: String,
}

impl DownloadItem {
    /// Create a new item.
    pub fn new(remote_key: impl Into<String>, local_path: impl Into<String>) -> Self {
        Self {
            remote_key: remote_key.into(),
            local_path: local_path.into(),
        }
    }

    /// Absolute destination under `base_dir`.
    pub fn destination(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.local_path)
    }
}

/// What happened to one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Local file already matched the remote size.
    Skipped,
    /// Object was downloaded and moved into place.
    Downloaded,
    /// The item could not be fetched.
    Failed(DownloadError),
}

impl FetchOutcome {
    /// Check if this outcome counts as a success.
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// An item paired with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    /// The item that was processed.
    pub item: DownloadItem,
    /// What happened to it.
    pub outcome: FetchOutcome,
}

impl ItemReport {
    /// Report a skipped item.
    pub const fn skipped(item: DownloadItem) -> Self {
        Self {
            item,
            outcome: FetchOutcome::Skipped,
        }
    }

    /// Report a downloaded item.
    pub const fn downloaded(item: DownloadItem) -> Self {
        Self {
            item,
            outcome: FetchOutcome::Downloaded,
        }
    }

    /// Report a failed item.
    pub const fn failed(item: DownloadItem, error: DownloadError) -> Self {
        Self {
            item,
            outcome: FetchOutcome::Failed(error),
        }
    }
}

/// Status line for a report, without any prefix.
impl fmt::Display for ItemReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            FetchOutcome::Skipped => write!(f, "SKIP {} (already present)", self.item.remote_key),
            FetchOutcome::Downloaded => write!(
                f,
                "OK   {} -> {}",
                self.item.remote_key, self.item.local_path
            ),
            FetchOutcome::Failed(err) => write!(f, "FAIL {err}"),
        }
    }
}

/// Aggregated result of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of items submitted.
    pub total: usize,
    /// Reports in the order they arrived.
    pub reports: Vec<ItemReport>,
}

impl RunSummary {
    /// Create an empty summary for `total` submitted items.
    pub const fn new(total: usize) -> Self {
        Self {
            total,
            reports: Vec::new(),
        }
    }

    /// Record a report.
    pub fn push(&mut self, report: ItemReport) {
        self.reports.push(report);
    }

    /// Number of skipped items.
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FetchOutcome::Skipped))
    }

    /// Number of downloaded items.
    pub fn downloaded(&self) -> usize {
        self.count(|o| matches!(o, FetchOutcome::Downloaded))
    }

    /// Failures in arrival order.
    pub fn failures(&self) -> Vec<&DownloadError> {
        self.reports
            .iter()
            .filter_map(|r| match &r.outcome {
                FetchOutcome::Failed(err) => Some(err),
                _ => None,
            })
            .collect()
    }

    /// Items that never reported.
    pub fn missing(&self) -> usize {
        self.total.saturating_sub(self.reports.len())
    }

    /// True when every submitted item reported and none failed.
    pub fn is_success(&self) -> bool {
        self.missing() == 0 && self.reports.iter().all(|r| r.outcome.is_success())
    }

    /// Convert into a result, failing if any item failed or went missing.
    pub fn into_result(self) -> Result<Self, AggregateFailure> {
        if self.is_success() {
            return Ok(self);
        }
        Err(AggregateFailure {
            total: self.total,
            missing: self.missing(),
            failures: self.failures().into_iter().cloned().collect(),
        })
    }

    fn count(&self, pred: impl Fn(&FetchOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.outcome)).count()
    }
}
