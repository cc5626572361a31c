// src/extract/mod.rs
// =============================================================================
// This module finds document links in the text of the listing page.
//
// Submodules:
// - links: regex scan for absolute document URLs, plus order-preserving
//   deduplication
//
// We deliberately do not parse the HTML. A document link is anything that
// looks like "http(s)://....<ext>" optionally followed by a query string.
// Links built by JavaScript or written as relative paths are not found.
// =============================================================================

mod links;

pub use links::{dedup_links, LinkExtractor};
