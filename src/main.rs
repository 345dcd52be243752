//! CLI entry point for the archive downloader.

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Result;
use archive_downloader::execute;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs).
    // Missing or invalid flags exit with status 2 here.
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.default_log_level()));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(filter)
        .init();

    debug!(?args, "CLI arguments parsed");
    info!("Archive downloader starting");

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling downloads");
            interrupt.cancel();
        }
    });

    let options = args.into_options();
    let outcome = execute(&options, &cancel).await;

    Ok(ExitCode::from(u8::try_from(outcome.code())?))
}
