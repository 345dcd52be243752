//! User-Agent string sent with listing and file requests.

/// Product token placed in front of the crate version.
const PRODUCT: &str = "archive-downloader";

/// Default User-Agent for all requests (identifies the tool and version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("{PRODUCT}/{version}")
}
