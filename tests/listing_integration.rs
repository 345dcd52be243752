//! Integration tests for listing page fetch and extraction.

use std::time::Duration;

use archive_downloader::{HttpClient, ListingError, TransferError, extract};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::listing_server::{LISTING_PATH, listing_html, listing_url, mount_listing};
use support::socket_guard::start_mock_server_or_skip;

#[tokio::test]
async fn test_extract_returns_entries_in_listing_order() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_listing(&server, listing_html(&["b.iso", "a.iso", "readme.txt"]), 1).await;
    let url = listing_url(&server);

    let entries = extract(&HttpClient::new(), &url, &CancellationToken::new())
        .await
        .expect("listing should extract");

    let names: Vec<_> = entries.iter().map(|e| e.name()).collect();
    assert_eq!(names, ["b.iso", "a.iso", "readme.txt"]);
    assert_eq!(entries[2].source_url(), format!("{url}readme.txt"));
    assert!(entries.iter().all(|e| e.local_path().is_none()));
}

#[tokio::test]
async fn test_extract_page_without_listing_table_is_empty() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_listing(
        &server,
        "<html><body><p>Nothing to see</p></body></html>".to_string(),
        1,
    )
    .await;

    let entries = extract(
        &HttpClient::new(),
        &listing_url(&server),
        &CancellationToken::new(),
    )
    .await
    .expect("a page without a table is not an error");

    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_extract_http_error_is_fetch_error() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = extract(
        &HttpClient::new(),
        &listing_url(&server),
        &CancellationToken::new(),
    )
    .await
    .unwrap_err();

    assert!(
        matches!(
            err,
            ListingError::Fetch(TransferError::HttpStatus { status: 404, .. })
        ),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_extract_latin1_listing_yields_entries() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let mut body = br#"<html><body><table class="directory-listing-table"><tbody>
<tr><td><a href="caf"#.to_vec();
    body.push(0xe9);
    body.extend_from_slice(br#".txt">caf"#);
    body.push(0xe9);
    body.extend_from_slice(
        br#".txt</a></td></tr>
<tr><td><a href="a.txt">a.txt</a></td></tr>
</tbody></table></body></html>"#,
    );
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=iso-8859-1"),
        )
        .mount(&server)
        .await;

    let entries = extract(
        &HttpClient::new(),
        &listing_url(&server),
        &CancellationToken::new(),
    )
    .await
    .expect("a Latin-1 listing is still a listing");

    assert_eq!(entries.len(), 2);
    assert!(entries[0].name().starts_with("caf"), "{}", entries[0].name());
    assert!(entries[0].name().ends_with(".txt"), "{}", entries[0].name());
    assert_eq!(entries[1].name(), "a.txt");
    assert_eq!(entries[1].source_url(), format!("{}a.txt", listing_url(&server)));
}

#[tokio::test]
async fn test_extract_unreachable_host_is_fetch_error() {
    // Port 9 (discard) on localhost is closed in test environments.
    let err = extract(
        &HttpClient::new(),
        "http://127.0.0.1:9/files/",
        &CancellationToken::new(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ListingError::Fetch(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn test_extract_aborts_promptly_on_cancellation() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_html(&["a.iso"]))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        extract(&HttpClient::new(), &listing_url(&server), &cancel),
    )
    .await
    .expect("extraction should stop well before the server responds");

    let err = result.unwrap_err();
    assert!(
        matches!(err, ListingError::Fetch(ref e) if e.is_cancelled()),
        "unexpected error: {err}"
    );
}
