//! Core domain types and port definitions for modelfetch.
//!
//! This crate owns everything the fetcher reasons about without touching
//! the network: the download items, their outcomes, the run configuration
//! and the object-store port that adapters implement.
//!
//! # Modules
//!
//! - `config` - `FetchConfig` read once from the environment
//! - `download` - items, outcomes, reports and download errors
//! - `ports` - the `ObjectStorePort` trait and its error type

#![deny(unused_crate_dependencies)]

pub mod config;
pub mod download;
pub mod ports;

// Re-export commonly used types for convenience
pub use config::{
    BASE_DIR_ENV, BUCKET_NAME_ENV, CHUNK_SIZE_ENV, ConfigError, DEFAULT_BASE_DIR,
    DEFAULT_BUCKET_NAME, DEFAULT_CHUNK_SIZE, DEFAULT_WORKER_COUNT, FetchConfig, WORKERS_ENV,
};
pub use download::{
    AggregateFailure, DownloadError, DownloadItem, DownloadResult, FetchOutcome, ItemReport,
    RunSummary, default_items,
};
pub use ports::{ObjectStoreError, ObjectStorePort, ObjectStoreResult};
