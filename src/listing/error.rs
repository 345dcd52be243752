//! Error types for listing extraction.

use thiserror::Error;

use crate::download::TransferError;

/// Errors that abort a run during the crawl phase.
#[derive(Debug, Error)]
pub enum ListingError {
    /// The listing page could not be retrieved.
    #[error("error fetching listing page: {0}")]
    Fetch(#[from] TransferError),

    /// The listing page body could not be read to the end.
    #[error("error parsing HTML from {url}: {source}")]
    Parse {
        /// The listing page URL.
        url: String,
        /// The body read error.
        #[source]
        source: reqwest::Error,
    },
}

impl ListingError {
    /// Creates a parse error.
    pub fn parse(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Parse {
            url: url.into(),
            source,
        }
    }
}
