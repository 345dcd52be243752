//! Listing page fetch and row extraction.

use std::borrow::Cow;

use scraper::{ElementRef, Html};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use super::error::ListingError;
use super::walk::{child_elements, find_first, is_tag, walk};
use crate::download::{HttpClient, TransferError};
use crate::entry::Entry;

/// Class that marks the listing table.
pub const LISTING_TABLE_CLASS: &str = "directory-listing-table";

/// Anchor text of the navigation row that links to the parent directory.
pub const PARENT_DIRECTORY_LABEL: &str = "Go to parent directory";

/// Fetches the listing at `page_url` and extracts its entries.
///
/// `page_url` must end in `/`; hrefs are appended to it verbatim.
///
/// # Errors
///
/// Returns [`ListingError::Fetch`] if the page cannot be retrieved (including
/// cancellation) and [`ListingError::Parse`] if its body cannot be read.
/// Bytes that are not valid UTF-8 are replaced rather than rejected, and a
/// page without a listing table yields no entries.
#[instrument(skip(client, cancel))]
pub async fn extract(
    client: &HttpClient,
    page_url: &str,
    cancel: &CancellationToken,
) -> Result<Vec<Entry>, ListingError> {
    info!("fetching page");
    let response = client.get(page_url, cancel).await?;

    let body = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(TransferError::cancelled(page_url).into()),
        body = response.bytes() => body.map_err(|e| ListingError::parse(page_url, e))?,
    };

    info!(bytes = body.len(), "parsing");
    let html = String::from_utf8_lossy(&body);
    if matches!(html, Cow::Owned(_)) {
        debug!("listing body is not valid UTF-8, invalid bytes replaced");
    }

    Ok(parse_listing(&html, page_url))
}

/// Extracts entries from listing HTML, resolving hrefs against `base_url`.
///
/// Rows are taken from the first `table` with class
/// [`LISTING_TABLE_CLASS`], preferring its `tbody`. In each row only the first
/// `td > a` among the row's immediate cells counts. The parent directory row
/// and rows lacking a name or href are dropped.
#[must_use]
pub fn parse_listing(html: &str, base_url: &str) -> Vec<Entry> {
    let document = Html::parse_document(html);
    if !document.errors.is_empty() {
        debug!(errors = document.errors.len(), "recovered from HTML parse errors");
    }

    let Some(table) = find_first(document.root_element(), is_listing_table) else {
        debug!("no listing table found");
        return Vec::new();
    };
    let rows = find_first(table, |element| is_tag(element, "tbody")).unwrap_or(table);

    let mut entries = Vec::new();
    walk(rows, |row| {
        if is_tag(&row, "tr")
            && let Some(entry) = entry_from_row(row, base_url)
        {
            entries.push(entry);
        }
    });

    debug!(entries = entries.len(), "rows extracted");
    entries
}

fn is_listing_table(element: &ElementRef<'_>) -> bool {
    is_tag(element, "table") && element.value().classes().any(|c| c == LISTING_TABLE_CLASS)
}

fn entry_from_row(row: ElementRef<'_>, base_url: &str) -> Option<Entry> {
    let anchor = child_elements(row)
        .filter(|cell| is_tag(cell, "td"))
        .find_map(|cell| child_elements(cell).find(|child| is_tag(child, "a")))?;

    let name: String = anchor.text().collect();
    if name.trim() == PARENT_DIRECTORY_LABEL {
        return None;
    }

    let source_url = anchor
        .value()
        .attr("href")
        .map(|href| format!("{base_url}{href}"))
        .unwrap_or_default();

    Entry::new(name, source_url)
}
