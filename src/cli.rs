// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every flag has a default, so running `doc-mirror` with no arguments
// mirrors the US Chemical SDS listing into ./PDFs. The flags only exist to
// point the same pipeline at another page, directory or document type.
//
// The parsed Cli is turned into a Config right away; nothing past main.rs
// knows about clap.
// =============================================================================

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{
    Config, DocumentType, DEFAULT_CACHE_PATH, DEFAULT_EXTENSION, DEFAULT_LISTING_URL,
    DEFAULT_MIME, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT_SECS,
};

// #[derive(Parser)] tells clap to generate the parsing code for this struct
#[derive(Parser, Debug)]
#[command(
    name = "doc-mirror",
    version = "0.1.0",
    about = "Download every document linked from a listing page",
    long_about = "doc-mirror fetches one listing page, finds the links to documents of one type \
                  (PDF by default), and downloads each of them into a flat directory. \
                  Files that are already there are skipped, so it is safe to run again."
)]
pub struct Cli {
    /// Page to scan for document links
    #[arg(default_value = DEFAULT_LISTING_URL)]
    pub listing_url: String,

    /// Where the listing page is cached between runs
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CACHE_PATH)]
    pub cache: PathBuf,

    /// Directory the documents are written to
    #[arg(long, short = 'o', value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// File extension of the documents to download
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Content-Type a response must declare to be saved
    #[arg(long, default_value = DEFAULT_MIME)]
    pub mime: String,

    /// Fetch the listing page again even if it is cached
    #[arg(long)]
    pub refresh_listing: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Log level used when RUST_LOG is not set.
    pub fn default_log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    pub fn into_config(self) -> Config {
        Config {
            listing_url: self.listing_url,
            cache_path: self.cache,
            output_dir: self.output_dir,
            timeout: Duration::from_secs(self.timeout),
            document: DocumentType::new(self.extension, self.mime),
            refresh_listing: self.refresh_listing,
        }
    }
}
