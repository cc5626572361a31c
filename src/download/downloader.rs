// src/download/downloader.rs
// =============================================================================
// Downloads one document link into the output directory.
//
// Steps for each link, stopping at the first one that fails:
// 1. Derive the filename
// 2. If the file is already on disk, skip (no request is made)
// 3. GET the URL; anything but 2xx fails
// 4. Content-Type must contain the document MIME type
// 5. Read the whole body into memory; an empty body fails
// 6. Write it with storage::write_atomic (temp file + rename)
//
// Nothing touches the output directory before step 6, so every failure
// leaves the disk exactly as it was.
//
// Rust concepts:
// - &mut self: download() records which link produced each saved file
// - Result + ?: the steps that can fail are chained in fetch_and_save()
// - HashMap: filename -> the link that first saved it
// =============================================================================

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{filename_from_url, DownloadError, DownloadReport};
use crate::config::DocumentType;
use crate::fetch::{read_body, send_get};
use crate::storage;

/// Downloads document links one at a time into a flat directory.
///
/// Remembers which link saved (or found) each filename during this run, so a
/// later link with the same name is reported as a skip naming the first one.
#[derive(Debug)]
pub struct Downloader {
    client: Client,
    output_dir: PathBuf,
    document: DocumentType,
    // filename -> link whose file is on disk under that name
    saved_by: HashMap<String, String>,
}

impl Downloader {
    pub fn new(client: Client, output_dir: impl Into<PathBuf>, document: DocumentType) -> Self {
        Self {
            client,
            output_dir: output_dir.into(),
            document,
            saved_by: HashMap::new(),
        }
    }

    /// Downloads a single link. Never returns an error: failures come back
    /// as a report with Outcome::Failed.
    pub async fn download(&mut self, url: &str) -> DownloadReport {
        // Step 1: no usable filename means we have nowhere to write
        let filename = match filename_from_url(url) {
            Some(name) => name,
            None => {
                let error = DownloadError::NoFilename {
                    url: url.to_string(),
                };
                return DownloadReport::failed(url, None, &error);
            }
        };
        let dest = self.output_dir.join(&filename);

        // Step 2: whatever is on disk wins, whether a previous run or an
        // earlier link in this run put it there
        if storage::file_exists(&dest).await {
            let first_url = self
                .saved_by
                .entry(filename)
                .or_insert_with(|| url.to_string());

            return if first_url.as_str() == url {
                DownloadReport::skipped(url, dest)
            } else {
                DownloadReport::skipped_duplicate(url, dest, first_url)
            };
        }

        // Steps 3-6. A failed link does not reserve the name, so a later
        // link with the same filename still gets its chance
        match self.fetch_and_save(url, &dest).await {
            Ok(bytes) => {
                self.saved_by.insert(filename, url.to_string());
                DownloadReport::success(url, dest, bytes)
            }
            Err(error) => DownloadReport::failed(url, Some(dest), &error),
        }
    }

    // Steps 3-6. Returns the number of bytes written.
    async fn fetch_and_save(&self, url: &str, dest: &Path) -> Result<u64, DownloadError> {
        let response = send_get(&self.client, url).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !self.document.accepts_content_type(&content_type) {
            // The unread response is dropped on return
            return Err(DownloadError::ContentType {
                url: url.to_string(),
                found: if content_type.is_empty() {
                    "<missing>".to_string()
                } else {
                    content_type
                },
                expected: self.document.mime.clone(),
            });
        }

        let body = read_body(response, url).await?;
        if body.is_empty() {
            return Err(DownloadError::EmptyBody {
                url: url.to_string(),
            });
        }

        // Only now does anything touch the output directory
        storage::write_atomic(dest, &body)
            .await
            .map_err(|source| DownloadError::Io {
                path: dest.to_path_buf(),
                source,
            })?;

        Ok(body.len() as u64)
    }
}
