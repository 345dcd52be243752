//! Hand-written HTTP responses that wiremock cannot produce: a body that
//! stops short of its `Content-Length`.

#![allow(dead_code)]

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Bytes promised by the `Content-Length` header.
pub const PROMISED_LEN: usize = 100_000;

/// Bytes actually sent before the server stalls or hangs up.
pub const SENT_LEN: usize = 512;

/// What the server does after the first [`SENT_LEN`] body bytes.
#[derive(Debug, Clone, Copy)]
pub enum AfterPartialBody {
    /// Keeps the connection open without sending more.
    Stall,
    /// Closes the connection.
    HangUp,
}

/// Serves one request for `/files/{name}` with a truncated body. Returns the
/// file URL and the server task.
pub async fn serve_partial_body(name: &str, after: AfterPartialBody) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };

        // Drain the request head so closing does not reset the connection.
        let mut request = Vec::new();
        let mut buf = [0_u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }

        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: {PROMISED_LEN}\r\n\r\n"
        );
        if socket.write_all(head.as_bytes()).await.is_err()
            || socket.write_all(&[0x42; SENT_LEN]).await.is_err()
            || socket.flush().await.is_err()
        {
            return;
        }

        match after {
            AfterPartialBody::Stall => tokio::time::sleep(Duration::from_secs(60)).await,
            AfterPartialBody::HangUp => {
                let _ = socket.shutdown().await;
            }
        }
    });

    (format!("http://{addr}/files/{name}"), handle)
}
