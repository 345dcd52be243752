//! Existence check deciding whether an entry still needs downloading.

use std::path::Path;

/// Returns true if `destination/name` exists and is non-empty.
///
/// A zero-byte file counts as absent so that a download interrupted before
/// any data was written is attempted again on the next run. Any metadata
/// error also reports absent; the fetcher then surfaces the real IO error.
#[must_use]
pub fn file_exists(name: &str, destination: &Path) -> bool {
    std::fs::metadata(destination.join(name)).is_ok_and(|meta| meta.len() > 0)
}
