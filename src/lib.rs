// Holonet - Star Wars Databank and SWAPI Enrichment Engine
// Copyright (c) 2025 Holonet Contributors
// Licensed under the MIT License

//! # Holonet - cross-source enrichment for Star Wars data
//!
//! Holonet lists records from the Star Wars Databank (the canonical source)
//! and enriches each one with its counterpart from SWAPI (the reference
//! source), including the SWAPI records that counterpart links to.
//!
//! ## Overview
//!
//! This library provides:
//! - **Listing** canonical characters, locations, species, vehicles, droids
//!   and organizations from the databank
//! - **Matching** them by name against SWAPI catalogs
//! - **Resolving** relation URLs (homeworlds, films, pilots, ...) into records
//! - **Caching** catalogs and records with a time-to-live
//!
//! ## Architecture
//!
//! - [`core`] - Enrichment logic (cache, matcher, resolver, engine)
//! - [`adapters`] - Databank and SWAPI HTTP clients
//! - [`domain`] - Record types, kinds and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use holonet::config::HolonetConfig;
//! use holonet::core::enrich::EnrichmentEngine;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = EnrichmentEngine::from_config(&HolonetConfig::default())?;
//!
//!     for location in engine.locations().await {
//!         println!("{}: {} residents", location.location.name, location.residents.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Degradation
//!
//! Source failures never fail a run. An unavailable catalog is served from
//! the cache when a stale copy exists and treated as empty otherwise;
//! unresolvable relations are dropped; a failed canonical listing yields an
//! empty result. Each run logs an [`core::enrich::EnrichmentSummary`]
//! recording what was degraded.
//!
//! ## Error Handling
//!
//! Construction and configuration return [`domain::HolonetError`]:
//!
//! ```rust,no_run
//! use holonet::domain::HolonetError;
//!
//! fn example() -> Result<(), HolonetError> {
//!     let config = holonet::config::load_config("holonet.toml")?;
//!     let _engine = holonet::core::enrich::EnrichmentEngine::from_config(&config)?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
