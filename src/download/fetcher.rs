//! Downloads one listing entry to a file on disk.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use super::client::HttpClient;
use super::error::{DownloadError, TransferError};
use crate::entry::Entry;

/// Downloads `entry` into `destination` and records the resulting path on the
/// entry.
///
/// Any file already at the target path is removed first, then recreated and
/// filled from the response body. If the body cannot be copied completely
/// (transport error, write error, or cancellation between chunks) the partial
/// file is deleted before the error is returned.
///
/// # Errors
///
/// Returns [`DownloadError::Transfer`] if the request fails or is cancelled,
/// and [`DownloadError::Io`] if the file cannot be removed, created or written.
#[instrument(skip(client, entry, cancel), fields(name = %entry.name(), url = %entry.source_url()))]
pub async fn fetch(
    client: &HttpClient,
    entry: &mut Entry,
    destination: &Path,
    cancel: &CancellationToken,
) -> Result<PathBuf, DownloadError> {
    let url = entry.source_url().to_string();
    let response = client.get(&url, cancel).await?;

    let file_path = std::path::absolute(destination.join(entry.name()))
        .map_err(|e| DownloadError::io(destination.join(entry.name()), e))?;

    // File::create truncates in place; start from a fresh inode instead.
    match tokio::fs::remove_file(&file_path).await {
        Ok(()) => debug!(path = %file_path.display(), "removed existing file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(DownloadError::io(file_path, e)),
    }

    let mut file = File::create(&file_path)
        .await
        .map_err(|e| DownloadError::io(file_path.clone(), e))?;

    let stream_result = stream_to_file(&mut file, response, &url, &file_path, cancel).await;
    drop(file);

    let bytes = match stream_result {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(path = %file_path.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(&file_path).await;
            return Err(e);
        }
    };

    info!(path = %file_path.display(), bytes, "download complete");

    entry.set_local_path(file_path.clone());
    Ok(file_path)
}

/// Streams response body to file, returning bytes written.
///
/// Cancellation is checked before every chunk and reported as a transfer
/// error so the caller's cleanup runs.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
    cancel: &CancellationToken,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    loop {
        let next = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(TransferError::cancelled(url).into()),
            next = stream.next() => next,
        };
        let Some(chunk_result) = next else {
            break;
        };
        let chunk = chunk_result.map_err(|e| TransferError::from_reqwest(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    // Ensure all data is flushed to disk
    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}
