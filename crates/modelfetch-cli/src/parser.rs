//! Command-line definition.
//!
//! The tool takes no arguments; everything is read from the environment.

use clap::Parser;

/// Sync model weights from a Google Cloud Storage bucket into a local tree.
///
/// Environment:
///   BUCKET_NAME                 source bucket
///   GCS_CHUNK_SIZE              bytes per ranged request
///   GCS_WORKERS                 parallel downloads
///   MODELS_BASE_DIR             destination root
///   STORAGE_EMULATOR_HOST       talk to an emulator without credentials
///   GOOGLE_OAUTH_ACCESS_TOKEN   static bearer token
///   GCE_METADATA_HOST           metadata server used for tokens
///   RUST_LOG                    diagnostic log filter (stderr)
#[derive(Debug, Parser)]
#[command(name = "modelfetch", version, verbatim_doc_comment)]
pub struct Cli {}
