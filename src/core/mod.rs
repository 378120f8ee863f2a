//! Core enrichment logic for Holonet.
//!
//! # Modules
//!
//! - [`cache`] - TTL cache for SWAPI catalogs and records
//! - [`matcher`] - name matching between the two sources
//! - [`resolver`] - reference URL resolution
//! - [`enrich`] - per-kind orchestration
//!
//! # Enrichment Workflow
//!
//! 1. **Load**: fetch the canonical listing and the needed SWAPI catalogs
//!    concurrently, catalogs through the cache
//! 2. **Match**: pair each canonical record with a catalog entry
//! 3. **Resolve**: fetch the records the matched entry refers to
//! 4. **Report**: log an [`enrich::EnrichmentSummary`]
//!
//! # Example
//!
//! ```rust,no_run
//! use holonet::config::load_config;
//! use holonet::core::enrich::EnrichmentEngine;
//! use holonet::domain::ResourceKind;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("holonet.toml")?;
//! let engine = EnrichmentEngine::from_config(&config)?;
//!
//! let (listing, summary) = engine.resource_with_summary(ResourceKind::Species).await;
//! println!("{} species, {} matched", listing.len(), summary.matched);
//! println!("{}", serde_json::to_string_pretty(&listing)?);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod enrich;
pub mod matcher;
pub mod resolver;
