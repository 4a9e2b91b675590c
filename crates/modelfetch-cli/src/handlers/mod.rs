//! Command handlers.
//!
//! Handlers receive a composed `CliContext`, drive the fetcher and format
//! output. They never build infrastructure themselves.

pub mod fetch;
