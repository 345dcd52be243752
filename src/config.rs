//! Run configuration: raw options from the CLI and their resolved form.
//!
//! [`Options`] is what the command line supplies. [`Config::resolve`] turns it
//! into an immutable [`Config`] snapshot: the listing URL is validated and
//! given a trailing `/`, the destination is made absolute and created, and
//! unset values receive their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, instrument};
use url::Url;

use crate::download::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};

/// Worker count used when none (or zero) is requested.
pub const DEFAULT_WORKERS: usize = 4;

/// Errors raised while resolving options into a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The listing URL could not be parsed or is not HTTP(S).
    #[error("invalid listing URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL as supplied.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The destination path could not be made absolute.
    #[error("cannot resolve destination '{path}': {source}")]
    InvalidDestination {
        /// The destination as supplied.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The destination directory could not be created.
    #[error("error making directory '{path}': {source}")]
    CreateDestination {
        /// The absolute destination path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Options for one run, as supplied by the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// URL of the directory listing page.
    pub url: String,
    /// Directory the files are written to.
    pub destination: PathBuf,
    /// Number of concurrent workers; `0` selects [`DEFAULT_WORKERS`].
    pub workers: usize,
    /// Only names ending with this suffix are downloaded; empty accepts all.
    pub required_suffix: String,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// HTTP read timeout in seconds.
    pub read_timeout_secs: u64,
}

impl Options {
    /// Creates options with default worker count, no suffix filter and
    /// default timeouts.
    #[must_use]
    pub fn new(url: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            destination: destination.into(),
            workers: 0,
            required_suffix: String::new(),
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            read_timeout_secs: READ_TIMEOUT_SECS,
        }
    }

    /// Sets the worker count.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the required filename suffix.
    #[must_use]
    pub fn with_required_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.required_suffix = suffix.into();
        self
    }
}

/// Immutable, validated configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_url: String,
    destination: PathBuf,
    workers: usize,
    required_suffix: Option<String>,
}

impl Config {
    /// Validates and normalizes `options`, creating the destination directory
    /// (and its parents) if it does not exist.
    ///
    /// The destination is created before the URL is checked, so it exists
    /// after any failure other than its own creation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] for an unparsable or non-HTTP URL,
    /// [`ConfigError::InvalidDestination`] if the destination cannot be made
    /// absolute, and [`ConfigError::CreateDestination`] if it cannot be created.
    #[instrument(level = "debug", skip(options), fields(url = %options.url))]
    pub fn resolve(options: &Options) -> Result<Self, ConfigError> {
        let destination = absolute_destination(&options.destination)?;
        fs::create_dir_all(&destination).map_err(|source| ConfigError::CreateDestination {
            path: destination.clone(),
            source,
        })?;
        info!(dir = %destination.display(), "destination ready");

        let base_url = normalize_base_url(&options.url)?;

        let workers = if options.workers == 0 {
            DEFAULT_WORKERS
        } else {
            options.workers
        };
        let required_suffix =
            Some(options.required_suffix.clone()).filter(|suffix| !suffix.is_empty());

        debug!(workers, ?required_suffix, "configuration resolved");

        Ok(Self {
            base_url,
            destination,
            workers,
            required_suffix,
        })
    }

    /// Listing URL, always ending in `/`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute destination directory.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Number of concurrent workers (at least one).
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Required filename suffix, if any.
    #[must_use]
    pub fn required_suffix(&self) -> Option<&str> {
        self.required_suffix.as_deref()
    }

    /// Returns true when `name` passes the suffix filter.
    #[must_use]
    pub fn accepts_name(&self, name: &str) -> bool {
        self.required_suffix
            .as_deref()
            .is_none_or(|suffix| name.ends_with(suffix))
    }
}

/// Validates the listing URL and appends a trailing `/` so relative hrefs can
/// be joined by concatenation.
fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::invalid_url(raw, "URL is empty"));
    }
    let parsed = Url::parse(trimmed).map_err(|e| ConfigError::invalid_url(raw, e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::invalid_url(
            raw,
            format!("unsupported scheme '{}'", parsed.scheme()),
        ));
    }

    let mut base = trimmed.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(base)
}

fn absolute_destination(path: &Path) -> Result<PathBuf, ConfigError> {
    std::path::absolute(path).map_err(|source| ConfigError::InvalidDestination {
        path: path.to_path_buf(),
        source,
    })
}
