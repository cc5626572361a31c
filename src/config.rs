// src/config.rs
// =============================================================================
// Run configuration.
//
// Everything the pipeline needs to know is in one Config value that gets
// passed into pipeline::run(). Nothing is read from globals.
//
// Config::default() reproduces the behaviour of the tool with no flags:
// mirror the US Chemical SDS listing into ./PDFs.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LISTING_URL: &str = "https://www.uschemical.com/sds-tabs/";
pub const DEFAULT_CACHE_PATH: &str = "uschemical.html";
pub const DEFAULT_OUTPUT_DIR: &str = "PDFs";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_EXTENSION: &str = "pdf";
pub const DEFAULT_MIME: &str = "application/pdf";

/// The kind of document we are mirroring: which links to pick up, and which
/// Content-Type a response must declare before we keep it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentType {
    /// File extension without the leading dot (e.g. "pdf")
    pub extension: String,
    /// MIME type expected in the Content-Type header (e.g. "application/pdf")
    pub mime: String,
}

impl DocumentType {
    pub fn new(extension: impl Into<String>, mime: impl Into<String>) -> Self {
        let extension: String = extension.into();
        Self {
            extension: extension.trim_start_matches('.').to_string(),
            mime: mime.into(),
        }
    }

    /// Returns true if a Content-Type header value declares our MIME type.
    ///
    /// This is a case-insensitive substring check, so parameters such as
    /// "application/pdf; charset=binary" are accepted.
    pub fn accepts_content_type(&self, content_type: &str) -> bool {
        !self.mime.is_empty()
            && content_type
                .to_ascii_lowercase()
                .contains(&self.mime.to_ascii_lowercase())
    }
}

impl Default for DocumentType {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION, DEFAULT_MIME)
    }
}

/// Everything one run of the mirror needs.
#[derive(Debug, Clone)]
pub struct Config {
    /// The page that gets scanned for document links
    pub listing_url: String,
    /// Local copy of the listing page
    pub cache_path: PathBuf,
    /// Flat directory that receives the downloaded documents
    pub output_dir: PathBuf,
    /// Timeout applied to every HTTP request
    pub timeout: Duration,
    pub document: DocumentType,
    /// Fetch the listing again even if the cache file exists
    pub refresh_listing: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            document: DocumentType::default(),
            refresh_listing: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = Config::default();
        assert_eq!(config.listing_url, DEFAULT_LISTING_URL);
        assert_eq!(config.cache_path, PathBuf::from("uschemical.html"));
        assert_eq!(config.output_dir, PathBuf::from("PDFs"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.document, DocumentType::new("pdf", "application/pdf"));
        assert!(!config.refresh_listing);
    }

    #[test]
    fn test_extension_leading_dot_is_dropped() {
        assert_eq!(DocumentType::new(".pdf", "application/pdf").extension, "pdf");
    }

    #[test]
    fn test_accepts_content_type() {
        let pdf = DocumentType::default();
        assert!(pdf.accepts_content_type("application/pdf"));
        assert!(pdf.accepts_content_type("Application/PDF; charset=binary"));
        assert!(!pdf.accepts_content_type("text/html; charset=utf-8"));
        assert!(!pdf.accepts_content_type(""));
    }
}
