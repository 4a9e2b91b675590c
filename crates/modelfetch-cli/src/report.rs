//! Line-oriented progress output.
//!
//! Stdout carries only these lines; diagnostics go to stderr through
//! `tracing`. Each line is written and flushed in one call so concurrent
//! results never interleave.

use std::fmt;
use std::io::{self, Write};

use modelfetch_core::{FetchConfig, ItemReport};

/// Prefix of every report line.
pub const LINE_PREFIX: &str = "[models]";

/// Writes `[models] ...` lines to any sink.
#[derive(Debug)]
pub struct ReportWriter<W: Write> {
    out: W,
}

impl<W: Write> ReportWriter<W> {
    /// Wrap a sink.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Run header: bucket, worker count and chunk size.
    pub fn banner(&mut self, config: &FetchConfig) -> io::Result<()> {
        self.line(format_args!(
            "bucket={} workers={} chunk={}",
            config.bucket_name, config.worker_count, config.chunk_size_bytes
        ))
    }

    /// One item's status line.
    pub fn item(&mut self, report: &ItemReport) -> io::Result<()> {
        self.line(format_args!("{report}"))
    }

    /// Final line of a fully successful run.
    pub fn done(&mut self) -> io::Result<()> {
        self.line(format_args!("done"))
    }

    /// Give back the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, body: fmt::Arguments<'_>) -> io::Result<()> {
        writeln!(self.out, "{LINE_PREFIX} {body}")?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelfetch_core::DownloadItem;

    fn written(writer: ReportWriter<Vec<u8>>) -> String {
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn banner_uses_configured_values() {
        let config = FetchConfig::default()
            .with_bucket_name("my-bucket")
            .with_worker_count(5)
            .with_chunk_size(1024);
        let mut writer = ReportWriter::new(Vec::new());

        writer.banner(&config).unwrap();

        assert_eq!(written(writer), "[models] bucket=my-bucket workers=5 chunk=1024\n");
    }

    #[test]
    fn default_banner() {
        let mut writer = ReportWriter::new(Vec::new());
        writer.banner(&FetchConfig::default()).unwrap();
        assert_eq!(
            written(writer),
            "[models] bucket=ecreatemodels-cloud-run-data workers=3 chunk=67108864\n"
        );
    }

    #[test]
    fn item_and_done_lines() {
        let item = DownloadItem::new(
            "text_encoders/clip_l.safetensors",
            "models/text_encoders/clip_l.safetensors",
        );
        let mut writer = ReportWriter::new(Vec::new());

        writer.item(&ItemReport::skipped(item.clone())).unwrap();
        writer.item(&ItemReport::downloaded(item)).unwrap();
        writer.done().unwrap();

        assert_eq!(
            written(writer),
            "[models] SKIP text_encoders/clip_l.safetensors (already present)\n\
             [models] OK   text_encoders/clip_l.safetensors -> models/text_encoders/clip_l.safetensors\n\
             [models] done\n"
        );
    }
}
