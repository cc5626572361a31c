// src/fetch/mod.rs
// =============================================================================
// This module performs HTTP GET requests and returns raw bytes.
//
// Submodules:
// - http: client construction, the GET itself, and body buffering
// - testing: (tests only) a server that breaks off mid-body
//
// Both the listing page and every document go through the same client, so
// they share one timeout and one redirect policy.
// =============================================================================

mod http;
#[cfg(test)]
pub(crate) mod testing;

pub use http::{build_client, fetch_bytes, read_body, send_get, FetchError};
