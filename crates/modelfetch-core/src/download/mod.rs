//! Download domain types.
//!
//! Items describe what to fetch, outcomes and reports describe what
//! happened to each item, and `RunSummary` aggregates a whole run.

mod errors;
mod manifest;
mod types;

pub use errors::{AggregateFailure, DownloadError, DownloadResult};
pub use manifest::{DEFAULT_ITEMS, default_items};
pub use types::{DownloadItem, FetchOutcome, ItemReport, RunSummary};
