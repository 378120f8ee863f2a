//! Canonical source adapter
//!
//! The databank lists the records that enrichment runs are driven from.
//! [`SourceFeed`] is the boundary the engine depends on; [`DatabankClient`]
//! is its HTTP implementation.

pub mod client;

use crate::domain::{CanonicalRecord, ResourceKind};
use async_trait::async_trait;

pub use client::DatabankClient;

/// Source of canonical records
///
/// Listing is infallible at this boundary: implementations degrade to an
/// empty listing and log the cause.
#[async_trait]
pub trait SourceFeed: Send + Sync {
    /// Lists every canonical record of `kind`, in source order
    async fn fetch_listing(&self, kind: ResourceKind) -> Vec<CanonicalRecord>;
}
