//! HTTP client wrapper shared by the listing extractor and the file fetcher.
//!
//! Every request is raced against the run's [`CancellationToken`] so an
//! interrupt aborts outstanding requests instead of waiting for them.

use std::time::Duration;

use reqwest::{Client, Response};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::TransferError;
use crate::user_agent;

/// HTTP client for listing pages and file downloads.
///
/// Created once per run and cloned into every worker; clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Read timeout: 5 minutes (for large files)
    /// - Gzip decompression: enabled
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
            .expect("failed to build HTTP client with static configuration")
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Errors
    ///
    /// Returns the builder error if the TLS backend cannot be initialized.
    #[instrument(level = "debug")]
    pub fn with_timeouts(
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .read_timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()?;
        Ok(Self { client })
    }

    /// Sends a GET request and waits for the response headers.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Cancelled`] if `cancel` fires first,
    /// [`TransferError::Network`] or [`TransferError::Timeout`] if the request
    /// fails, and [`TransferError::HttpStatus`] for a non-success status.
    pub async fn get(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Response, TransferError> {
        debug!(url, "sending GET");

        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(TransferError::cancelled(url)),
            result = self.client.get(url).send() => {
                result.map_err(|e| TransferError::from_reqwest(url, e))?
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::http_status(url, status.as_u16()));
        }

        Ok(response)
    }
}
