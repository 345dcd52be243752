//! Archive Downloader Library
//!
//! Crawls a single HTML directory listing page (the kind rendered by static
//! file servers) and downloads every file it links into a local directory
//! using a fixed-size pool of concurrent workers.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Run options and their validated, normalized form
//! - [`entry`] - One downloadable row of a listing
//! - [`listing`] - Listing page fetch and HTML extraction
//! - [`download`] - HTTP client, file fetcher, existence filter and the
//!   worker-pool orchestrator

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod download;
pub mod entry;
pub mod listing;
mod user_agent;

// Re-export commonly used types
pub use config::{Config, ConfigError, DEFAULT_WORKERS, Options};
pub use download::{
    DownloadError, DownloadStats, HttpClient, ProcessExit, RunError, RunSummary, TransferError,
    execute, fetch, file_exists, run,
};
pub use entry::Entry;
pub use listing::{ListingError, extract, parse_listing};
