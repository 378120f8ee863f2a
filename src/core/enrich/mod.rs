//! Enrichment orchestration
//!
//! - [`EnrichmentEngine`] - per-kind enrichment runs
//! - [`ResourceListing`] - output of a run, tagged by kind
//! - [`EnrichmentSummary`] - counts and timings of a run

pub mod engine;
pub mod listing;
pub mod summary;

pub use engine::EnrichmentEngine;
pub use listing::ResourceListing;
pub use summary::EnrichmentSummary;
