//! Bounded-concurrency fetcher.
//!
//! Takes a list of `DownloadItem`s and brings each destination up to date
//! through an `ObjectStorePort`:
//!
//! - `paths` - destination and temporary-file planning
//! - `worker` - the per-item skip / download / fail pipeline
//! - `pool` - the fixed-size worker pool and result aggregation

// Re-export core types for convenience
pub use modelfetch_core::download::{
    AggregateFailure, DownloadError, DownloadItem, FetchOutcome, ItemReport, RunSummary,
};
pub use modelfetch_core::{FetchConfig, ObjectStorePort};

mod paths;
mod pool;
mod worker;

pub use paths::{DownloadDestination, TEMP_SUFFIX};
pub use pool::Fetcher;
pub use worker::fetch_item;
