//! Concurrent download of listing entries.
//!
//! # Features
//!
//! - Fixed-size worker pool fed from a single queue in listing order
//! - Streaming downloads (memory-efficient for large files)
//! - Skips names lacking a required suffix and files already on disk
//! - Cancellation of idle workers, the feeder and in-flight requests
//! - Partial files are removed when a transfer fails
//!
//! # Example
//!
//! ```no_run
//! use archive_downloader::download::{HttpClient, fetch};
//! use archive_downloader::Entry;
//! use std::path::Path;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let mut entry = Entry::new("readme.txt", "https://example.com/files/readme.txt")
//!     .ok_or("empty entry")?;
//! let path = fetch(&client, &mut entry, Path::new("./downloads"), &CancellationToken::new()).await?;
//! println!("Downloaded: {}", path.display());
//! # Ok(())
//! # }
//! ```

mod client;
pub(crate) mod constants;
mod error;
mod exists;
mod fetcher;
mod orchestrator;

pub use client::HttpClient;
pub use constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
pub use error::{DownloadError, TransferError};
pub use exists::file_exists;
pub use fetcher::fetch;
pub use orchestrator::{DownloadStats, ProcessExit, RunError, RunSummary, execute, run};
