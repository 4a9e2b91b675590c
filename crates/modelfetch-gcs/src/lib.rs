//! Google Cloud Storage adapter for modelfetch.
//!
//! Implements `ObjectStorePort` on top of the GCS JSON API:
//!
//! - object metadata via `GET /storage/v1/b/{bucket}/o/{key}`
//! - media download via ranged `?alt=media` requests of a fixed chunk size
//! - bearer tokens from a static value or the instance metadata server,
//!   or no auth at all when talking to an emulator
//!
//! Construct a client with [`GcsClient::new`] and use it through the port.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod auth;
mod client;
mod config;
mod endpoints;
mod error;
mod models;
mod port;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::GcsClient;

// Configuration
pub use config::{
    Credentials, DEFAULT_ENDPOINT, DEFAULT_METADATA_HOST, EMULATOR_HOST_ENV, GcsClientConfig,
    METADATA_HOST_ENV, STATIC_TOKEN_ENV,
};

// Errors
pub use error::{GcsError, GcsResult};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use wiremock as _;
