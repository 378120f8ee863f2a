//! Reference source adapter
//!
//! SWAPI supplies the catalogs canonical records are matched against and
//! the records reached through relation URLs. The engine talks to it
//! through [`ReferenceCatalog`].

pub mod client;

use crate::domain::{ReferenceId, ReferenceKind, ReferenceRecord, Result};
use async_trait::async_trait;

pub use client::SwapiClient;

/// Source of reference records
#[async_trait]
pub trait ReferenceCatalog: Send + Sync {
    /// Fetches the full catalog for `kind`
    ///
    /// # Errors
    ///
    /// Fails only when nothing could be fetched. A failure part way through
    /// a paged catalog returns the records collected so far.
    async fn fetch_catalog(&self, kind: ReferenceKind) -> Result<Vec<ReferenceRecord>>;

    /// Fetches a single record
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` source error for unknown ids.
    async fn fetch_by_id(&self, kind: ReferenceKind, id: ReferenceId) -> Result<ReferenceRecord>;
}
