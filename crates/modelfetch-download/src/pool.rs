//! Fixed-size worker pool.
//!
//! # Concurrency Model
//!
//! - `min(worker_count, items)` tasks are spawned up front
//! - Workers pop items from a shared queue until it is empty
//! - Each finished item is sent over an mpsc channel; the caller's callback
//!   runs on the receiving side only, so reports are never interleaved
//! - A worker that panics stops reporting; its unreported items show up as
//!   `RunSummary::missing`

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use modelfetch_core::FetchConfig;
use modelfetch_core::download::{DownloadItem, ItemReport, RunSummary};
use modelfetch_core::ports::ObjectStorePort;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::worker::fetch_item;

type WorkQueue = Arc<Mutex<VecDeque<DownloadItem>>>;

/// Fetches a batch of items through an object store.
pub struct Fetcher {
    store: Arc<dyn ObjectStorePort>,
    config: FetchConfig,
}

impl Fetcher {
    /// Create a fetcher over `store`.
    pub fn new(store: Arc<dyn ObjectStorePort>, config: FetchConfig) -> Self {
        Self { store, config }
    }

    /// Configuration this fetcher runs with.
    pub const fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch every item, calling `on_report` as each one finishes.
    ///
    /// Always returns once all workers have stopped. Per-item failures are
    /// recorded in the summary rather than aborting the run.
    pub async fn run<F>(&self, items: Vec<DownloadItem>, mut on_report: F) -> RunSummary
    where
        F: FnMut(&ItemReport),
    {
        let total = items.len();
        let workers = self.config.pool_size(total);
        let mut summary = RunSummary::new(total);
        if workers == 0 {
            return summary;
        }

        info!(
            bucket = %self.config.bucket_name,
            items = total,
            workers,
            "Starting fetch"
        );

        let queue: WorkQueue = Arc::new(Mutex::new(VecDeque::from(items)));
        let (tx, mut rx) = mpsc::channel(total);
        let mut tasks = JoinSet::new();

        for worker_id in 0..workers {
            let queue = Arc::clone(&queue);
            let tx = tx.clone();
            let store = Arc::clone(&self.store);
            let bucket = self.config.bucket_name.clone();
            let base_dir: PathBuf = self.config.base_dir.clone();

            tasks.spawn(async move {
                while let Some(item) = next_item(&queue) {
                    debug!(worker_id, key = %item.remote_key, "Fetching item");
                    let report = fetch_item(store.as_ref(), &bucket, &base_dir, item).await;
                    if tx.send(report).await.is_err() {
                        break;
                    }
                }
            });
        }
        // Only workers hold senders now; the loop below ends when they finish.
        drop(tx);

        while let Some(report) = rx.recv().await {
            on_report(&report);
            summary.push(report);
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Fetch worker terminated abnormally");
            }
        }

        info!(
            downloaded = summary.downloaded(),
            skipped = summary.skipped(),
            failed = summary.failures().len(),
            missing = summary.missing(),
            "Fetch finished"
        );
        summary
    }
}

fn next_item(queue: &Mutex<VecDeque<DownloadItem>>) -> Option<DownloadItem> {
    // A poisoned lock only means another worker panicked; the queue itself is intact.
    queue
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pop_front()
}
