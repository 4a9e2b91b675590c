//! Fetch handler: run every item and print status lines.

use std::io::{self, Write};

use modelfetch_core::{DownloadItem, RunSummary};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::report::ReportWriter;

/// Fetch `items` and report through `out`.
///
/// Successful items are printed as they finish. Failures are collected and
/// returned as `CliError::Fetch` once every item has finished, in which case
/// the `done` line is not written.
pub async fn execute<W: Write>(
    ctx: &CliContext,
    items: Vec<DownloadItem>,
    out: &mut ReportWriter<W>,
) -> Result<RunSummary, CliError> {
    out.banner(ctx.config())?;

    let mut write_error: Option<io::Error> = None;
    let summary = ctx
        .fetcher()
        .run(items, |report| {
            if write_error.is_some() || !report.outcome.is_success() {
                return;
            }
            if let Err(e) = out.item(report) {
                write_error = Some(e);
            }
        })
        .await;

    if let Some(e) = write_error {
        return Err(e.into());
    }

    let summary = summary.into_result()?;
    out.done()?;
    Ok(summary)
}
