//! Download orchestrator: crawls the listing once, then fans its entries out
//! to a fixed pool of worker tasks.
//!
//! # Overview
//!
//! A run moves through `Initializing → Crawling → Dispatching → Draining →
//! Done`. Configuration and crawl failures abort the run before any worker
//! exists. Once dispatching starts, failures are per entry: they are logged,
//! counted in [`DownloadStats`] and never stop other workers.
//!
//! # Example
//!
//! ```no_run
//! use archive_downloader::{HttpClient, Options, run};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = Options::new("https://example.com/files/", "./downloads").with_workers(8);
//! let summary = run(&options, &HttpClient::new(), &CancellationToken::new()).await?;
//! println!("Downloaded: {}, Failed: {}", summary.stats().downloaded(), summary.stats().failed());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use super::client::HttpClient;
use super::constants::QUEUE_CAPACITY;
use super::exists::file_exists;
use super::fetcher::fetch;
use crate::config::{Config, ConfigError, Options};
use crate::entry::Entry;
use crate::listing::{self, ListingError};

/// Receiving half of the work queue, shared by every worker.
type SharedQueue = Arc<Mutex<mpsc::Receiver<Entry>>>;

/// Fatal errors that end a run before any download is attempted.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Options could not be turned into a usable configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The listing page could not be fetched or parsed.
    #[error(transparent)]
    Listing(#[from] ListingError),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Process status derived from a run.
///
/// Invalid command-line arguments exit with status `2`; that case is handled
/// by argument parsing before a run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessExit {
    /// Crawl and dispatch completed, whatever happened to individual files.
    Success,
    /// Configuration or crawl failed.
    Failure,
}

impl ProcessExit {
    /// Numeric exit code for this outcome.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

/// Statistics from a run.
///
/// Uses atomic counters for thread-safe updates from concurrent workers.
#[derive(Debug, Default)]
pub struct DownloadStats {
    offered: AtomicUsize,
    downloaded: AtomicUsize,
    skipped_suffix: AtomicUsize,
    skipped_existing: AtomicUsize,
    failed: AtomicUsize,
}

impl DownloadStats {
    /// Creates a new stats tracker with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries handed to a worker.
    #[must_use]
    pub fn offered(&self) -> usize {
        self.offered.load(Ordering::SeqCst)
    }

    /// Returns the number of successfully downloaded files.
    #[must_use]
    pub fn downloaded(&self) -> usize {
        self.downloaded.load(Ordering::SeqCst)
    }

    /// Returns the number of entries skipped by the suffix filter.
    #[must_use]
    pub fn skipped_suffix(&self) -> usize {
        self.skipped_suffix.load(Ordering::SeqCst)
    }

    /// Returns the number of entries skipped because the file already exists.
    #[must_use]
    pub fn skipped_existing(&self) -> usize {
        self.skipped_existing.load(Ordering::SeqCst)
    }

    /// Returns the number of failed downloads.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    /// Returns the number of entries a worker finished with, in any outcome.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.downloaded() + self.skipped_suffix() + self.skipped_existing() + self.failed()
    }

    fn record(&self, outcome: EntryOutcome) {
        let counter = match outcome {
            EntryOutcome::Downloaded => &self.downloaded,
            EntryOutcome::SkippedSuffix => &self.skipped_suffix,
            EntryOutcome::SkippedExisting => &self.skipped_existing,
            EntryOutcome::Failed => &self.failed,
        };
        counter.fetch_add(1, Ordering::SeqCst);
    }

    fn increment_offered(&self) {
        self.offered.fetch_add(1, Ordering::SeqCst);
    }
}

/// Result of a completed run.
#[derive(Debug)]
pub struct RunSummary {
    stats: Arc<DownloadStats>,
    downloaded: Vec<Entry>,
    interrupted: bool,
}

impl RunSummary {
    /// Per-outcome counters.
    #[must_use]
    pub fn stats(&self) -> &DownloadStats {
        &self.stats
    }

    /// Entries fetched in this run, each with its local path set. Order is
    /// unspecified.
    #[must_use]
    pub fn downloaded(&self) -> &[Entry] {
        &self.downloaded
    }

    /// Whether cancellation was requested before the run finished.
    #[must_use]
    pub fn interrupted(&self) -> bool {
        self.interrupted
    }
}

/// What a worker did with one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryOutcome {
    Downloaded,
    SkippedSuffix,
    SkippedExisting,
    Failed,
}

/// Builds the HTTP client from `options`, runs, and maps the outcome to a
/// process status.
///
/// Per-file failures and interruption still yield [`ProcessExit::Success`].
pub async fn execute(options: &Options, cancel: &CancellationToken) -> ProcessExit {
    let result = match HttpClient::with_timeouts(
        options.connect_timeout_secs,
        options.read_timeout_secs,
    ) {
        Ok(client) => run(options, &client, cancel).await,
        Err(e) => Err(RunError::Client(e)),
    };

    match result {
        Ok(summary) => {
            let stats = summary.stats();
            info!(
                offered = stats.offered(),
                downloaded = stats.downloaded(),
                skipped_suffix = stats.skipped_suffix(),
                skipped_existing = stats.skipped_existing(),
                failed = stats.failed(),
                "Run complete"
            );
            if summary.interrupted() {
                warn!("Interrupted. Run again to fetch the remaining files.");
            }
            ProcessExit::Success
        }
        Err(e) => {
            error!(error = %e, "Run aborted");
            ProcessExit::Failure
        }
    }
}

/// Resolves the configuration, extracts the listing and downloads every
/// entry with a pool of workers.
///
/// # Errors
///
/// Returns [`RunError::Config`] if the destination or URL is unusable and
/// [`RunError::Listing`] if the listing page cannot be fetched or parsed.
/// Individual download failures do NOT cause this function to error.
#[instrument(skip(options, client, cancel), fields(url = %options.url))]
pub async fn run(
    options: &Options,
    client: &HttpClient,
    cancel: &CancellationToken,
) -> Result<RunSummary, RunError> {
    let config = Config::resolve(options)?;

    let entries = listing::extract(client, config.base_url(), cancel).await?;
    info!(entries = entries.len(), "listing extracted");

    Ok(dispatch(config, client, entries, cancel).await)
}

/// Starts the workers and the feeder, then waits for every worker to exit.
async fn dispatch(
    config: Config,
    client: &HttpClient,
    entries: Vec<Entry>,
    cancel: &CancellationToken,
) -> RunSummary {
    let stats = Arc::new(DownloadStats::new());
    let config = Arc::new(config);
    let (sender, receiver) = mpsc::channel::<Entry>(QUEUE_CAPACITY);
    let queue: SharedQueue = Arc::new(Mutex::new(receiver));

    debug!(workers = config.workers(), "starting workers");
    let workers: Vec<_> = (1..=config.workers())
        .map(|id| {
            tokio::spawn(worker(
                id,
                Arc::clone(&queue),
                client.clone(),
                Arc::clone(&config),
                Arc::clone(&stats),
                cancel.clone(),
            ))
        })
        .collect();
    // Workers hold the only receivers, so the feeder sees a closed queue if
    // they all exit early.
    drop(queue);

    let feeder = tokio::spawn(feed(entries, sender, Arc::clone(&stats), cancel.clone()));

    let mut downloaded = Vec::new();
    for (index, handle) in workers.into_iter().enumerate() {
        match handle.await {
            Ok(mut fetched) => downloaded.append(&mut fetched),
            Err(e) => error!(worker = index + 1, error = %e, "worker task failed"),
        }
    }
    if let Err(e) = feeder.await {
        error!(error = %e, "feeder task failed");
    }

    RunSummary {
        stats,
        downloaded,
        interrupted: cancel.is_cancelled(),
    }
}

/// Offers every entry to the workers in extraction order, then closes the
/// queue by dropping the sender. Stops early on cancellation.
async fn feed(
    entries: Vec<Entry>,
    sender: mpsc::Sender<Entry>,
    stats: Arc<DownloadStats>,
    cancel: CancellationToken,
) {
    for entry in entries {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("feeder stopping due to cancellation");
                return;
            }
            sent = sender.send(entry) => {
                if sent.is_err() {
                    debug!("all workers gone; feeder stopping");
                    return;
                }
                stats.increment_offered();
            }
        }
    }
    debug!("all entries offered");
}

/// Pulls entries until the queue is closed and drained, or cancellation fires
/// while waiting. Returns the entries this worker downloaded.
async fn worker(
    id: usize,
    queue: SharedQueue,
    client: HttpClient,
    config: Arc<Config>,
    stats: Arc<DownloadStats>,
    cancel: CancellationToken,
) -> Vec<Entry> {
    let mut fetched = Vec::new();

    loop {
        let next = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                info!(worker = id, "shutting down due to cancellation");
                break;
            }
            next = next_entry(&queue) => next,
        };
        let Some(mut entry) = next else {
            debug!(worker = id, "queue closed");
            break;
        };

        let outcome = handle_entry(id, &client, &config, &mut entry, &cancel).await;
        stats.record(outcome);
        if outcome == EntryOutcome::Downloaded {
            fetched.push(entry);
        }
    }

    fetched
}

async fn next_entry(queue: &Mutex<mpsc::Receiver<Entry>>) -> Option<Entry> {
    queue.lock().await.recv().await
}

/// Applies the suffix and existence filters, then fetches.
async fn handle_entry(
    id: usize,
    client: &HttpClient,
    config: &Config,
    entry: &mut Entry,
    cancel: &CancellationToken,
) -> EntryOutcome {
    if !config.accepts_name(entry.name()) {
        info!(
            worker = id,
            name = %entry.name(),
            suffix = config.required_suffix().unwrap_or_default(),
            "file name doesn't have expected extension"
        );
        return EntryOutcome::SkippedSuffix;
    }

    if file_exists(entry.name(), config.destination()) {
        info!(worker = id, name = %entry.name(), "file already exists, skipping");
        return EntryOutcome::SkippedExisting;
    }

    info!(worker = id, name = %entry.name(), "downloading");
    match fetch(client, entry, config.destination(), cancel).await {
        Ok(path) => {
            info!(worker = id, path = %path.display(), "finished downloading");
            EntryOutcome::Downloaded
        }
        Err(e) if e.is_cancelled() => {
            info!(worker = id, name = %entry.name(), "download interrupted");
            EntryOutcome::Failed
        }
        Err(e) => {
            warn!(worker = id, name = %entry.name(), error = %e, "download failed");
            EntryOutcome::Failed
        }
    }
}
