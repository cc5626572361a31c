// src/fetch/http.rs
// =============================================================================
// HTTP retrieval with reqwest.
//
// A fetch can fail in three different places, and callers care which:
// - Transport: we never got a response (DNS, connect, TLS, timeout)
// - Status:    we got a response, but it was not 2xx
// - Body:      the response started fine but reading the body failed
//
// send_get() covers the first two, read_body() the third. fetch_bytes()
// chains them for callers that just want the bytes. The downloader calls
// them separately because it has to look at headers in between.
//
// Rust concepts:
// - thiserror: #[derive(Error)] writes the Display and source() impls
// - map_err: turns a reqwest::Error into our own FetchError variant
// - Streams: bytes_stream() yields the body chunk by chunk
// =============================================================================

use futures::StreamExt; // gives us .next() on the body stream
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Redirects followed before a request is given up on.
const MAX_REDIRECTS: usize = 10;

/// Upper bound on what a Content-Length header may make us preallocate.
const MAX_PREALLOC: u64 = 16 * 1024 * 1024;

/// Why a fetch did not produce bytes.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No response at all
    #[error("{reason} fetching {url}: {source}")]
    Transport {
        url: String,
        reason: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: StatusCode },

    /// The body stream broke off
    #[error("failed to read body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    fn transport(url: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            reason: transport_reason(&source),
            source,
        }
    }

    /// True when the request hit the client timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport { source, .. } | Self::Body { source, .. } => source.is_timeout(),
            Self::Status { .. } => false,
        }
    }
}

/// Builds the one client used for the whole run.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
}

/// Sends a GET and fails on anything other than a 2xx status.
///
/// The returned response has not had its body read yet.
pub async fn send_get(client: &Client, url: &str) -> Result<Response, FetchError> {
    // send() resolves once the status line and headers are in
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::transport(url, e))?;

    let status = response.status();
    if !status.is_success() {
        // Dropping the response here releases the connection
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    Ok(response)
}

/// Drains a response body into memory.
///
/// Takes the response by value, so the body is always consumed or dropped
/// before this returns.
pub async fn read_body(response: Response, url: &str) -> Result<Vec<u8>, FetchError> {
    // Size the buffer from Content-Length when the server sends one
    let capacity = response.content_length().unwrap_or(0).min(MAX_PREALLOC);
    let mut buffer = Vec::with_capacity(usize::try_from(capacity).unwrap_or(0));
    let mut stream = response.bytes_stream();

    // Each item is Result<Bytes>; an Err means the connection broke
    // (or timed out) after the headers were already received
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;
        buffer.extend_from_slice(&chunk);
    }

    Ok(buffer)
}

/// GETs a URL and returns the whole body.
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = send_get(client, url).await?;
    read_body(response, url).await
}

// Puts a short label on a reqwest error for log lines
fn transport_reason(error: &reqwest::Error) -> &'static str {
    if error.is_timeout() {
        "timed out"
    } else if error.is_redirect() {
        "too many redirects"
    } else if error.is_connect() {
        "connection failed"
    } else if error.is_builder() {
        "invalid request"
    } else {
        "request failed"
    }
}
