// src/download/mod.rs
// =============================================================================
// This module downloads document links to disk.
//
// Submodules:
// - filename: URL -> safe local filename
// - downloader: the per-link fetch, validate and write sequence
// - report: DownloadReport / Outcome, the tagged result of one link
// - error: DownloadError, the reasons a link can fail
// =============================================================================

mod downloader;
mod error;
mod filename;
mod report;

pub use downloader::Downloader;
pub use error::DownloadError;
pub use filename::filename_from_url;
pub use report::{DownloadReport, Outcome};
