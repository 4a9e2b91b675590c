//! Fetch configuration.
//!
//! `FetchConfig` is built once at startup from environment variables and
//! handed to the client and the fetcher explicitly. Parsing goes through a
//! lookup function so callers (and tests) can supply values without
//! touching the process environment.

use std::path::PathBuf;

use thiserror::Error;

/// Environment variable naming the source bucket.
pub const BUCKET_NAME_ENV: &str = "BUCKET_NAME";
/// Environment variable holding the transfer chunk size in bytes.
pub const CHUNK_SIZE_ENV: &str = "GCS_CHUNK_SIZE";
/// Environment variable holding the worker pool size.
pub const WORKERS_ENV: &str = "GCS_WORKERS";
/// Environment variable overriding the local base directory.
pub const BASE_DIR_ENV: &str = "MODELS_BASE_DIR";

/// Bucket used when `BUCKET_NAME` is unset.
pub const DEFAULT_BUCKET_NAME: &str = "ecreatemodels-cloud-run-data";
/// 64 MiB. Bigger chunks mean fewer HTTP round trips for large files.
pub const DEFAULT_CHUNK_SIZE: u64 = 64 * 1024 * 1024;
/// Worker pool size used when `GCS_WORKERS` is unset.
pub const DEFAULT_WORKER_COUNT: usize = 3;
/// Directory the item table's relative paths are resolved against.
pub const DEFAULT_BASE_DIR: &str = "/opt/ComfyUI";

/// Errors raised while reading the configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A numeric variable did not parse as an unsigned integer.
    #[error("{var} must be a non-negative integer, got '{value}'")]
    InvalidInteger {
        /// Variable name
        var: &'static str,
        /// Raw value found in the environment
        value: String,
    },

    /// A numeric variable was zero where a positive value is required.
    #[error("{var} must be greater than zero")]
    Zero {
        /// Variable name
        var: &'static str,
    },
}

/// Configuration for one fetch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Source bucket.
    pub bucket_name: String,
    /// Size of each ranged request used when streaming an object.
    pub chunk_size_bytes: u64,
    /// Configured worker pool size (the effective size is capped by item count).
    pub worker_count: usize,
    /// Local directory that item paths are joined onto.
    pub base_dir: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            bucket_name: DEFAULT_BUCKET_NAME.to_string(),
            chunk_size_bytes: DEFAULT_CHUNK_SIZE,
            worker_count: DEFAULT_WORKER_COUNT,
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
        }
    }
}

impl FetchConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    ///
    /// Empty or whitespace-only values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(bucket) = get(BUCKET_NAME_ENV) {
            config.bucket_name = bucket;
        }
        if let Some(raw) = get(CHUNK_SIZE_ENV) {
            config.chunk_size_bytes = parse_positive(CHUNK_SIZE_ENV, &raw)?;
        }
        if let Some(raw) = get(WORKERS_ENV) {
            config.worker_count = parse_positive(WORKERS_ENV, &raw)?;
        }
        if let Some(dir) = get(BASE_DIR_ENV) {
            config.base_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Set the bucket name.
    #[must_use]
    pub fn with_bucket_name(mut self, bucket: impl Into<String>) -> Self {
        self.bucket_name = bucket.into();
        self
    }

    /// Set the transfer chunk size.
    #[must_use]
    pub const fn with_chunk_size(mut self, bytes: u64) -> Self {
        self.chunk_size_bytes = bytes;
        self
    }

    /// Set the configured worker count.
    #[must_use]
    pub const fn with_worker_count(mut self, workers: usize) -> Self {
        self.worker_count = workers;
        self
    }

    /// Set the local base directory.
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Effective pool size for a run over `item_count` items.
    pub fn pool_size(&self, item_count: usize) -> usize {
        self.worker_count.min(item_count)
    }
}

fn parse_positive<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + Default + PartialEq,
{
    let value: T = raw.parse().map_err(|_| ConfigError::InvalidInteger {
        var,
        value: raw.to_string(),
    })?;
    if value == T::default() {
        return Err(ConfigError::Zero { var });
    }
    Ok(value)
}
