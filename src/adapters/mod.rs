//! External system integrations for Holonet.
//!
//! - [`databank`] - canonical source ([`databank::SourceFeed`])
//! - [`swapi`] - reference source ([`swapi::ReferenceCatalog`])
//! - [`http`] - shared JSON client, retry loop and status mapping
//!
//! # Design Pattern
//!
//! The engine depends only on the two traits, so either source can be
//! replaced by an in-memory implementation in tests.
//!
//! ```rust,no_run
//! use holonet::adapters::databank::DatabankClient;
//! use holonet::adapters::swapi::SwapiClient;
//! use holonet::config::HolonetConfig;
//!
//! # fn example() -> holonet::domain::Result<()> {
//! let config = HolonetConfig::default();
//! let feed = DatabankClient::new(&config.databank)?;
//! let catalog = SwapiClient::new(&config.swapi)?;
//! # Ok(())
//! # }
//! ```

pub mod databank;
pub mod http;
pub mod swapi;
