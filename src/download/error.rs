// src/download/error.rs
// =============================================================================
// Why a single document download failed.
//
// These errors never leave the download module: Downloader::download()
// turns them into a Failed report so one bad link cannot stop the run.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

use crate::fetch::FetchError;

#[derive(Debug, Error)]
pub enum DownloadError {
    /// The URL gave no usable filename
    #[error("cannot derive a filename from {url}")]
    NoFilename { url: String },

    /// Transport, HTTP status, or body read failure
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Content-Type missing or not the document MIME type
    #[error("invalid content type for {url}: {found} (expected {expected})")]
    ContentType {
        url: String,
        found: String,
        expected: String,
    },

    /// 200 OK but nothing in the body
    #[error("downloaded 0 bytes for {url}; not creating file")]
    EmptyBody { url: String },

    /// Writing the file failed
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Short category for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoFilename { .. } => "filename",
            Self::Fetch(e) if e.is_timeout() => "timeout",
            Self::Fetch(FetchError::Transport { .. }) => "transport",
            Self::Fetch(FetchError::Status { .. }) => "status",
            Self::Fetch(FetchError::Body { .. }) => "body",
            Self::ContentType { .. } | Self::EmptyBody { .. } => "validation",
            Self::Io { .. } => "filesystem",
        }
    }
}
