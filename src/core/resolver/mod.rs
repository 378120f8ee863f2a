//! Relation resolution
//!
//! SWAPI records point at each other through reference URLs. The resolver
//! turns a list of such URLs into the records behind them, going through
//! the shared [`CatalogCache`] so a record reached from many places is
//! fetched once per TTL window.

use crate::adapters::swapi::ReferenceCatalog;
use crate::core::cache::CatalogCache;
use crate::domain::{ReferenceEntity, ReferenceId};
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// Resolves reference URLs into typed records
#[derive(Clone)]
pub struct RelationResolver {
    catalog: Arc<dyn ReferenceCatalog>,
    cache: Arc<CatalogCache>,
    max_concurrency: usize,
}

impl RelationResolver {
    /// Creates a resolver with at most `max_concurrency` fetches in flight
    /// per call
    pub fn new(
        catalog: Arc<dyn ReferenceCatalog>,
        cache: Arc<CatalogCache>,
        max_concurrency: usize,
    ) -> Self {
        Self {
            catalog,
            cache,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Resolves every URL in `urls`
    ///
    /// URLs without a trailing numeric id are skipped and records that
    /// cannot be fetched are dropped. The rest keep the order of `urls`.
    pub async fn resolve<T: ReferenceEntity>(&self, urls: &[String]) -> Vec<T> {
        if urls.is_empty() {
            return Vec::new();
        }

        let resolved: Vec<Option<T>> = stream::iter(urls)
            .map(|url| self.fetch::<T>(url))
            .buffered(self.max_concurrency)
            .collect()
            .await;

        let found: Vec<T> = resolved.into_iter().flatten().collect();
        if found.len() < urls.len() {
            tracing::debug!(
                kind = %T::KIND,
                requested = urls.len(),
                resolved = found.len(),
                "Some relations did not resolve"
            );
        }
        found
    }

    /// Resolves a single-valued relation such as a homeworld
    pub async fn resolve_one<T: ReferenceEntity>(&self, url: Option<&str>) -> Option<T> {
        match url {
            Some(url) => self.fetch(url).await,
            None => None,
        }
    }

    async fn fetch<T: ReferenceEntity>(&self, url: &str) -> Option<T> {
        let id = match ReferenceId::from_url(url) {
            Ok(id) => id,
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "Skipping unparsable reference URL");
                return None;
            }
        };

        let catalog = Arc::clone(&self.catalog);
        let record = self
            .cache
            .item(url, || async move { catalog.fetch_by_id(T::KIND, id).await })
            .await?;

        let kind = record.kind();
        let typed = T::from_record(record);
        if typed.is_none() {
            tracing::warn!(url = %url, expected = %T::KIND, got = %kind, "Reference record of unexpected kind");
        }
        typed
    }
}
