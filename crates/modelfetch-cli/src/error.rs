//! CLI-specific error types and exit code mapping.

use modelfetch_core::{AggregateFailure, ConfigError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid environment configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The storage client could not be constructed.
    #[error("Storage client error: {0}")]
    Client(String),

    /// One or more items failed; the message lists every failure.
    #[error("{0}")]
    Fetch(#[from] AggregateFailure),

    /// Writing report lines failed.
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: One or more downloads failed
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Fetch(_) => 1,
            Self::Io(_) => 74,                       // EX_IOERR
            Self::Config(_) | Self::Client(_) => 78, // EX_CONFIG
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
