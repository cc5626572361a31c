// src/pipeline/mod.rs
// =============================================================================
// This module runs the mirror from start to finish.
//
// Stages, always in this order and never repeated:
//   EnsureListingCached -> LoadListing -> ExtractLinks -> Dedup
//     -> EnsureOutputDir -> DownloadEach -> Done
//
// Submodules:
// - listing: keeping a local copy of the listing page and reading it back
// - stages: the stage sequence and the RunSummary it produces
// =============================================================================

mod listing;
mod stages;

pub use stages::{run, RunSummary};
