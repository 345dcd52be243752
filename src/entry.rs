//! A single downloadable item discovered on a listing page.

use std::path::{Path, PathBuf};

/// One row of a directory listing.
///
/// Entries are only constructed by the listing extractor, which guarantees
/// that `name` and `source_url` are non-empty. Each entry is handed to exactly
/// one worker, so `local_path` is never written concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: String,
    source_url: String,
    local_path: Option<PathBuf>,
}

impl Entry {
    /// Creates an entry, returning `None` when either field is empty.
    #[must_use]
    pub fn new(name: impl Into<String>, source_url: impl Into<String>) -> Option<Self> {
        let name = name.into();
        let source_url = source_url.into();
        if name.is_empty() || source_url.is_empty() {
            return None;
        }
        Some(Self {
            name,
            source_url,
            local_path: None,
        })
    }

    /// Display name from the listing, used verbatim as the file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully resolved URL of the file.
    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Absolute path of the downloaded file, once a fetch has succeeded.
    #[must_use]
    pub fn local_path(&self) -> Option<&Path> {
        self.local_path.as_deref()
    }

    pub(crate) fn set_local_path(&mut self, path: PathBuf) {
        self.local_path = Some(path);
    }
}
