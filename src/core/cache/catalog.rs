//! Typed cache handle shared by enrichment runs

use super::ttl::TtlCache;
use crate::config::CacheConfig;
use crate::domain::{ReferenceKind, ReferenceRecord};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Cache for SWAPI catalogs and single reference records
///
/// Catalog listings are keyed `catalog:<kind>`; single records are keyed by
/// their reference URL. Entries outlive individual runs, so one handle is
/// meant to be shared (`Arc<CatalogCache>`) across an engine's lifetime.
///
/// Record fetches are bounded by the fetch timeout. Catalog fetches are not:
/// a catalog spans many pages, each already bounded by the client's request
/// timeout, and cutting the drain short would discard the pages collected.
#[derive(Debug)]
pub struct CatalogCache {
    listings: TtlCache<Arc<Vec<ReferenceRecord>>>,
    items: TtlCache<ReferenceRecord>,
}

impl CatalogCache {
    /// Creates an empty cache from configuration
    pub fn new(config: &CacheConfig) -> Self {
        Self::with_ttl(config.ttl(), config.fetch_timeout())
    }

    /// Creates an empty cache with explicit timings
    pub fn with_ttl(ttl: Duration, item_fetch_timeout: Duration) -> Self {
        Self {
            listings: TtlCache::new(ttl),
            items: TtlCache::new(ttl).with_fetch_timeout(item_fetch_timeout),
        }
    }

    /// Returns the catalog for `kind`, loading it through `fetch` when needed
    pub async fn catalog<F, Fut, E>(
        &self,
        kind: ReferenceKind,
        fetch: F,
    ) -> Option<Arc<Vec<ReferenceRecord>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<ReferenceRecord>, E>>,
        E: Display,
    {
        let key = kind.catalog_key();
        self.listings
            .get_or_fetch(&key, || async move { fetch().await.map(Arc::new) })
            .await
    }

    /// Returns the record behind `url`, loading it through `fetch` when needed
    pub async fn item<F, Fut, E>(&self, url: &str, fetch: F) -> Option<ReferenceRecord>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<ReferenceRecord, E>>,
        E: Display,
    {
        self.items.get_or_fetch(url, fetch).await
    }

    /// Number of cached catalogs and records
    pub fn len(&self) -> usize {
        self.listings.len() + self.items.len()
    }

    /// Whether nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty() && self.items.is_empty()
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
