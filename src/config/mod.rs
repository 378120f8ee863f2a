//! Configuration management for Holonet.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Holonet uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `HOLONET_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use holonet::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("holonet.toml")?;
//!
//! println!("Databank: {}", config.databank.base_url);
//! println!("SWAPI: {}", config.swapi.base_url);
//! println!("Cache TTL: {}s", config.cache.ttl_seconds);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`DatabankConfig`] - Canonical source URL, page size, timeout, retries
//! - [`SwapiConfig`] - Reference source URL, timeout, retries
//! - [`CacheConfig`] - Catalog cache TTL and fetch deadline
//! - [`EnrichmentConfig`] - Concurrency limit and alias table
//! - [`LoggingConfig`] - Local JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [databank]
//! base_url = "https://starwars-databank-server.vercel.app/api/v1"
//! page_size = 50
//!
//! [swapi]
//! base_url = "${HOLONET_SWAPI_MIRROR}"
//!
//! [cache]
//! ttl_seconds = 300
//!
//! [[enrichment.aliases]]
//! token = "vader"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    AliasRule, ApplicationConfig, CacheConfig, DatabankConfig, EnrichmentConfig, HolonetConfig,
    LoggingConfig, RetryConfig, SwapiConfig,
};
