//! Command-line front end for modelfetch.
//!
//! Wires the GCS adapter into the fetcher and turns run results into
//! `[models] ...` lines and process exit codes.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use tempfile as _;

// Used by the binary only
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod report;

pub use bootstrap::{CliContext, bootstrap, bootstrap_from_lookup};
pub use error::CliError;
pub use parser::Cli;
pub use report::{LINE_PREFIX, ReportWriter};
