// src/main.rs
// =============================================================================
// This is the entry point of doc-mirror.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, to stderr)
// 3. Run the pipeline with the resulting Config
// 4. Print a summary and exit with a proper code
//    (0 = everything mirrored or already there, 1 = some links failed,
//     2 = the run itself failed)
//
// Downloads happen one after another, so a single-threaded tokio runtime
// is all we need.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - the Config the pipeline runs with
mod download; // src/download/ - per-link download and validation
mod extract; // src/extract/ - finding document links in the listing
mod fetch; // src/fetch/ - HTTP GET helpers
mod pipeline; // src/pipeline/ - the stages, start to finish
mod storage; // src/storage.rs - filesystem probes and atomic writes

use clap::Parser; // Parser trait enables the parse() method
use cli::Cli;
use pipeline::RunSummary;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse first, so --help and --version work without any log noise
    let cli = Cli::parse();
    init_logging(cli.default_log_level());

    let config = cli.into_config();
    tracing::debug!(?config, "configuration");

    let exit_code = match pipeline::run(&config).await {
        Ok(summary) => {
            print_summary(&summary);
            summary.exit_code()
        }
        Err(e) => {
            // {:#} prints the whole context chain on one line
            error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG wins over the -v / -q flags when it is set
fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Prints failures (if any) and the totals to stdout
fn print_summary(summary: &RunSummary) {
    let failures: Vec<_> = summary
        .reports
        .iter()
        .filter(|r| r.is_failed())
        .collect();

    if !failures.is_empty() {
        println!("Failed downloads:");
        for report in failures {
            println!("  {}", report.detail);
        }
        println!();
    }

    println!("Summary:");
    println!("  Downloaded: {}", summary.succeeded);
    println!("  Skipped:    {}", summary.skipped);
    println!("  Failed:     {}", summary.failed);
    println!("  Total:      {}", summary.attempted);
}
