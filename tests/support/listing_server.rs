//! Builds directory listing pages and mounts them on a mock server.

#![allow(dead_code)]

use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the listing page is served from.
pub const LISTING_PATH: &str = "/files/";

/// Renders a listing page whose rows link to `names` (href equal to name),
/// preceded by the parent directory row.
pub fn listing_html(names: &[&str]) -> String {
    let rows: String = names
        .iter()
        .map(|name| {
            format!(
                "<tr><td><a href=\"{name}\">{name}</a></td><td>1 KB</td><td>2024-01-01</td></tr>\n"
            )
        })
        .collect();
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Index of /files/</title></head>
<body>
<table class="directory-listing-table">
<thead><tr><th>Name</th><th>Size</th><th>Modified</th></tr></thead>
<tbody>
<tr><td><a href="..">Go to parent directory</a></td><td></td><td></td></tr>
{rows}</tbody>
</table>
</body>
</html>"#
    )
}

/// URL of the listing page on `server`.
pub fn listing_url(server: &MockServer) -> String {
    format!("{}{LISTING_PATH}", server.uri())
}

/// Serves `html` as the listing page, expecting exactly `times` requests.
pub async fn mount_listing(server: &MockServer, html: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .expect(times)
        .mount(server)
        .await;
}

/// Serves `body` for `name` under the listing, expecting exactly `times`
/// requests.
pub async fn mount_file(server: &MockServer, name: &str, body: &[u8], times: u64) {
    Mock::given(method("GET"))
        .and(path(format!("{LISTING_PATH}{name}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .expect(times)
        .mount(server)
        .await;
}

/// Serves `name` with a status code and no body.
pub async fn mount_status(server: &MockServer, name: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("{LISTING_PATH}{name}")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Serves `name` only after `delay`.
pub async fn mount_slow_file(server: &MockServer, name: &str, body: &[u8], delay: Duration) {
    Mock::given(method("GET"))
        .and(path(format!("{LISTING_PATH}{name}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body.to_vec())
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

/// Deterministic file body for `name`.
pub fn body_for(name: &str) -> Vec<u8> {
    format!("contents of {name}\n").into_bytes()
}
