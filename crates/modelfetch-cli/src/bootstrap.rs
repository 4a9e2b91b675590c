//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where the GCS adapter is wired to the
//! fetcher. Handlers receive a composed `CliContext` and never construct
//! infrastructure themselves.

use std::sync::Arc;

use modelfetch_core::{FetchConfig, ObjectStorePort};
use modelfetch_download::Fetcher;
use modelfetch_gcs::{GcsClient, GcsClientConfig};
use tracing::debug;

use crate::error::CliError;

/// Fully composed context for a run.
pub struct CliContext {
    fetcher: Fetcher,
}

impl CliContext {
    /// Compose a context over an arbitrary object store.
    pub fn new(config: FetchConfig, store: Arc<dyn ObjectStorePort>) -> Self {
        Self {
            fetcher: Fetcher::new(store, config),
        }
    }

    /// Run configuration.
    pub const fn config(&self) -> &FetchConfig {
        self.fetcher.config()
    }

    /// The fetcher.
    pub const fn fetcher(&self) -> &Fetcher {
        &self.fetcher
    }
}

/// Bootstrap from the process environment.
pub fn bootstrap() -> Result<CliContext, CliError> {
    bootstrap_from_lookup(|key| std::env::var(key).ok())
}

/// Bootstrap through an arbitrary variable lookup.
pub fn bootstrap_from_lookup<F>(lookup: F) -> Result<CliContext, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = FetchConfig::from_lookup(&lookup)?;
    let gcs_config = GcsClientConfig::from_lookup(&lookup).with_chunk_size(config.chunk_size_bytes);
    let client = GcsClient::new(&gcs_config).map_err(|e| CliError::Client(e.to_string()))?;
    debug!(
        endpoint = %client.endpoint(),
        credentials = ?gcs_config.credentials(),
        "Storage client ready"
    );

    Ok(CliContext::new(config, Arc::new(client)))
}
