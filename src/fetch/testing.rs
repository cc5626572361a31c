// src/fetch/testing.rs
// =============================================================================
// Test helpers for HTTP failures wiremock can't produce.
//
// serve_truncated_body() answers one request with a Content-Length larger
// than what it actually sends, then closes the socket. The client sees the
// headers fine and then a broken body.
// =============================================================================

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Starts a one-shot server and returns a URL pointing at it.
pub async fn serve_truncated_body(content_type: &str, declared_len: usize, sent: &[u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let head = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: {content_type}\r\nContent-Length: {declared_len}\r\n\r\n"
    );
    let sent = sent.to_vec();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        // Read the whole request first; closing with unread input would
        // reset the connection before the client sees our headers
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&buf[..n]);
        }

        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(&sent).await.unwrap();
        socket.flush().await.unwrap();
        // Dropping the socket ends the body early
    });

    format!("http://{addr}/cut.pdf")
}
