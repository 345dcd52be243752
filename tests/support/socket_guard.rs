//! Skips socket-bound tests in sandboxes that forbid binding localhost.

#![allow(dead_code)]

use std::net::TcpListener;

use wiremock::MockServer;

const REQUIRE_ENV: &str = "ARCHIVE_DOWNLOADER_REQUIRE_SOCKET_TESTS";

/// True when localhost cannot be bound and the caller should return early.
/// Panics instead when `ARCHIVE_DOWNLOADER_REQUIRE_SOCKET_TESTS` is truthy.
pub fn localhost_unavailable() -> bool {
    if TcpListener::bind("127.0.0.1:0").is_ok() {
        return false;
    }
    let required = std::env::var(REQUIRE_ENV)
        .is_ok_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"));
    assert!(!required, "cannot bind 127.0.0.1 but {REQUIRE_ENV} is set");
    eprintln!("skipping: cannot bind 127.0.0.1 in this environment");
    true
}

pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if localhost_unavailable() {
        return None;
    }
    Some(MockServer::start().await)
}
