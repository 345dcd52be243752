//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use archive_downloader::Options;
use archive_downloader::download::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use clap::Parser;

/// Download every file linked from a directory listing page.
///
/// Fetches one HTML listing produced by a static file server and downloads
/// each linked file into the destination directory with a pool of workers.
/// Files that already exist with content are skipped.
#[derive(Parser, Debug)]
#[command(name = "archive-downloader")]
#[command(author, version, about)]
pub struct Args {
    /// The URL of the directory listing page
    #[arg(long, value_parser = clap::builder::NonEmptyStringValueParser::new())]
    pub url: String,

    /// The destination directory for the downloaded files
    #[arg(long)]
    pub dest: PathBuf,

    /// Number of concurrent download workers (0 uses the default of 4)
    #[arg(long, default_value_t = 4)]
    pub work: usize,

    /// Only download files whose names end with this suffix (e.g. ".zip")
    #[arg(long, default_value = "")]
    pub ext: String,

    /// HTTP connect timeout in seconds (1-3600)
    #[arg(long, default_value_t = CONNECT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout: u64,

    /// HTTP read timeout in seconds (1-3600)
    #[arg(long, default_value_t = READ_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub read_timeout: u64,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Default log level when `RUST_LOG` is not set.
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "info",
                1 => "debug",
                _ => "trace",
            }
        }
    }

    /// Converts parsed arguments into run options.
    pub fn into_options(self) -> Options {
        Options {
            url: self.url,
            destination: self.dest,
            workers: self.work,
            required_suffix: self.ext,
            connect_timeout_secs: self.connect_timeout,
            read_timeout_secs: self.read_timeout,
        }
    }
}
