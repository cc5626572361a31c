// src/pipeline/stages.rs
// =============================================================================
// The stage sequence.
//
// Run-level problems (no client, no listing, no output directory) end the
// run with an error: carrying on would just download nothing. Per-link
// problems are logged and counted, and the loop moves on to the next link.
//
// Rust concepts:
// - anyhow::Context: .context() adds a readable line on top of an error
// - ? operator: returns early from run() on the first run-level error
// - Derive Default: RunSummary::default() starts every counter at zero
// =============================================================================

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::listing::{ensure_listing_cached, load_listing};
use crate::config::Config;
use crate::download::{DownloadReport, Downloader, Outcome};
use crate::extract::{dedup_links, LinkExtractor};
use crate::fetch::build_client;
use crate::storage;

/// Tally of one run, plus the per-link reports in download order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub reports: Vec<DownloadReport>,
}

impl RunSummary {
    fn record(&mut self, report: DownloadReport) {
        self.attempted += 1;
        match report.outcome {
            Outcome::Success => self.succeeded += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed => self.failed += 1,
        }
        self.reports.push(report);
    }

    /// 0 when nothing failed, 1 when at least one link failed.
    pub fn exit_code(&self) -> i32 {
        if self.failed > 0 {
            1
        } else {
            0
        }
    }
}

/// Mirrors every document linked from the listing page.
pub async fn run(config: &Config) -> Result<RunSummary> {
    let client = build_client(config.timeout).context("failed to build HTTP client")?;
    let extractor = LinkExtractor::new(&config.document.extension).with_context(|| {
        format!(
            "invalid link pattern for extension {:?}",
            config.document.extension
        )
    })?;

    // EnsureListingCached + LoadListing: the page only comes from the
    // network when there is no local copy (or a refresh was asked for)
    ensure_listing_cached(&client, config).await?;
    let listing = load_listing(&config.cache_path).await?;

    // ExtractLinks + Dedup: keep the count before dedup for the log line
    let found = extractor.extract_links(&listing);
    let found_count = found.len();
    let links = dedup_links(found);
    info!(
        found = found_count,
        unique = links.len(),
        extension = %config.document.extension,
        "extracted document links"
    );

    // EnsureOutputDir: created once, never cleaned
    let created = storage::ensure_dir(&config.output_dir)
        .await
        .with_context(|| {
            format!(
                "failed to create output directory {}",
                config.output_dir.display()
            )
        })?;
    if created {
        info!(path = %config.output_dir.display(), "created output directory");
    }

    let mut downloader = Downloader::new(client, &config.output_dir, config.document.clone());
    let mut summary = RunSummary::default();

    // DownloadEach: one link at a time, in page order
    for (index, link) in links.iter().enumerate() {
        debug!(n = index + 1, total = links.len(), url = %link, "downloading");

        // download() never fails; a bad link just comes back as Failed
        let report = downloader.download(link).await;
        log_report(&report);

        // Count it and move on, whatever happened
        summary.record(report);
    }

    info!(
        attempted = summary.attempted,
        succeeded = summary.succeeded,
        skipped = summary.skipped,
        failed = summary.failed,
        "mirror finished"
    );

    Ok(summary)
}

// One log line per link; failures go to warn so they show at the default level
fn log_report(report: &DownloadReport) {
    // Display the path when there is one, otherwise log an empty field
    let path = report
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    match report.outcome {
        Outcome::Success => info!(url = %report.url, %path, bytes = report.bytes, "downloaded"),
        Outcome::Skipped => debug!(url = %report.url, %path, "{}", report.detail),
        Outcome::Failed => warn!(
            url = %report.url,
            kind = report.kind.unwrap_or("unknown"),
            "{}",
            report.detail
        ),
    }
}
