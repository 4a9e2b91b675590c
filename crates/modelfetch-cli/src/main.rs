//! CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use modelfetch_cli::{Cli, CliError, ReportWriter, bootstrap, handlers};
use modelfetch_core::default_items;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present, before anything reads the environment
    dotenvy::dotenv().ok();

    // Diagnostics go to stderr; stdout is reserved for report lines
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let _cli = Cli::parse();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), CliError> {
    let ctx = bootstrap()?;
    let mut out = ReportWriter::new(std::io::stdout());
    handlers::fetch::execute(&ctx, default_items(), &mut out).await?;
    Ok(())
}
