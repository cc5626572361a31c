// src/download/report.rs
// =============================================================================
// The result of one download attempt, as data.
//
// Every link ends up as exactly one DownloadReport. Success and "already
// there" are outcomes like any other; only Failed means something went wrong.
// =============================================================================

use std::path::PathBuf;

use super::DownloadError;

/// What happened to one link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Validated and written to disk
    Success,
    /// The file was already present; nothing was requested
    Skipped,
    /// Some step failed; nothing was written
    Failed,
}

/// The outcome of downloading a single link, with a human-readable detail.
#[derive(Debug, Clone)]
pub struct DownloadReport {
    pub url: String,
    pub outcome: Outcome,
    pub detail: String,
    /// Destination path, when a filename could be derived
    pub path: Option<PathBuf>,
    /// Bytes written (0 unless Success)
    pub bytes: u64,
    /// Failure category from DownloadError::kind(), for log fields
    pub kind: Option<&'static str>,
}

impl DownloadReport {
    pub fn success(url: &str, path: PathBuf, bytes: u64) -> Self {
        Self {
            url: url.to_string(),
            outcome: Outcome::Success,
            detail: format!(
                "successfully downloaded {} bytes: {} -> {}",
                bytes,
                url,
                path.display()
            ),
            path: Some(path),
            bytes,
            kind: None,
        }
    }

    pub fn skipped(url: &str, path: PathBuf) -> Self {
        Self {
            url: url.to_string(),
            outcome: Outcome::Skipped,
            detail: format!("file already exists, skipping: {}", path.display()),
            path: Some(path),
            bytes: 0,
            kind: None,
        }
    }

    /// A different link already saved a file under the same name.
    pub fn skipped_duplicate(url: &str, path: PathBuf, first_url: &str) -> Self {
        Self {
            url: url.to_string(),
            outcome: Outcome::Skipped,
            detail: format!(
                "file already exists, skipping: {} (saved from {})",
                path.display(),
                first_url
            ),
            path: Some(path),
            bytes: 0,
            kind: None,
        }
    }

    pub fn failed(url: &str, path: Option<PathBuf>, error: &DownloadError) -> Self {
        Self {
            url: url.to_string(),
            outcome: Outcome::Failed,
            detail: error.to_string(),
            path,
            bytes: 0,
            kind: Some(error.kind()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.outcome == Outcome::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_detail_mentions_bytes_and_path() {
        let report = DownloadReport::success(
            "https://example.com/a.pdf",
            PathBuf::from("PDFs/a.pdf"),
            42,
        );
        assert_eq!(report.outcome, Outcome::Success);
        assert!(!report.is_failed());
        assert!(report.detail.contains("42 bytes"));
        assert!(report.detail.contains("PDFs/a.pdf"));
    }

    #[test]
    fn test_skipped_is_not_a_failure() {
        let report = DownloadReport::skipped("https://example.com/a.pdf", PathBuf::from("PDFs/a.pdf"));
        assert_eq!(report.outcome, Outcome::Skipped);
        assert!(!report.is_failed());
    }

    #[test]
    fn test_failed_carries_error_text() {
        let error = DownloadError::EmptyBody {
            url: "https://example.com/a.pdf".to_string(),
        };
        let report = DownloadReport::failed("https://example.com/a.pdf", None, &error);
        assert!(report.is_failed());
        assert_eq!(report.detail, error.to_string());
        assert_eq!(report.kind, Some("validation"));
    }

    #[test]
    fn test_duplicate_skip_names_the_first_link() {
        let report = DownloadReport::skipped_duplicate(
            "https://example.com/a.pdf?x=1",
            PathBuf::from("PDFs/a.pdf"),
            "https://example.com/a.pdf",
        );
        assert_eq!(report.outcome, Outcome::Skipped);
        assert!(report.detail.ends_with("(saved from https://example.com/a.pdf)"));
        assert_eq!(report.kind, None);
    }
}
