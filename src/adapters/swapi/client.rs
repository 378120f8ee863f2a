//! HTTP client for SWAPI

use super::ReferenceCatalog;
use crate::adapters::http::JsonClient;
use crate::config::SwapiConfig;
use crate::domain::{ReferenceId, ReferenceKind, ReferenceRecord, Result, SourceError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Hard stop for runaway `next` chains
const MAX_PAGES: usize = 100;

/// One page of a SWAPI catalog
#[derive(Debug, Deserialize)]
struct CatalogPage {
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    results: Vec<Value>,
}

/// SWAPI client
#[derive(Debug, Clone)]
pub struct SwapiClient {
    http: JsonClient,
    base_url: String,
}

impl SwapiClient {
    /// Creates a client from configuration
    pub fn new(config: &SwapiConfig) -> Result<Self> {
        Ok(Self {
            http: JsonClient::new(config.timeout(), config.retry.clone())?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are made against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves a `next` link, which SWAPI may give absolute or relative
    fn absolute(&self, link: &str) -> String {
        if link.starts_with("http://") || link.starts_with("https://") {
            link.to_string()
        } else {
            format!("{}/{}", self.base_url, link.trim_start_matches('/'))
        }
    }

    async fn fetch_page(&self, url: &str) -> std::result::Result<CatalogPage, SourceError> {
        let body = self.http.get_json(url).await?;
        serde_json::from_value(body)
            .map_err(|e| SourceError::InvalidFormat(format!("{url}: not a catalog page: {e}")))
    }
}

fn decode_items(kind: ReferenceKind, items: Vec<Value>, out: &mut Vec<ReferenceRecord>) {
    for item in items {
        match ReferenceRecord::from_value(kind, item) {
            Ok(record) => out.push(record),
            Err(e) => tracing::warn!(catalog = %kind, error = %e, "Skipping malformed SWAPI item"),
        }
    }
}

#[async_trait]
impl ReferenceCatalog for SwapiClient {
    async fn fetch_catalog(&self, kind: ReferenceKind) -> Result<Vec<ReferenceRecord>> {
        let mut url = format!("{}/{}/?page=1", self.base_url, kind.as_str());
        let mut records = Vec::new();

        let first = self.fetch_page(&url).await?;
        decode_items(kind, first.results, &mut records);
        let mut next = first.next;
        let mut pages = 1;

        while let Some(link) = next.take() {
            let link = self.absolute(&link);
            if link == url || pages >= MAX_PAGES {
                tracing::warn!(catalog = %kind, next = %link, "Stopping catalog pagination");
                break;
            }
            url = link;

            match self.fetch_page(&url).await {
                Ok(page) => {
                    decode_items(kind, page.results, &mut records);
                    next = page.next;
                    pages += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        catalog = %kind,
                        url = %url,
                        collected = records.len(),
                        error = %e,
                        "Catalog page failed, keeping earlier pages"
                    );
                    break;
                }
            }
        }

        tracing::debug!(catalog = %kind, pages = pages, count = records.len(), "Catalog loaded");
        Ok(records)
    }

    async fn fetch_by_id(&self, kind: ReferenceKind, id: ReferenceId) -> Result<ReferenceRecord> {
        let url = format!("{}/{}/{}/", self.base_url, kind.as_str(), id);
        tracing::debug!(url = %url, "Fetching reference record");

        let body = self.http.get_json(&url).await?;
        let record = ReferenceRecord::from_value(kind, body)
            .map_err(|e| SourceError::InvalidFormat(format!("{url}: {e}")))?;
        Ok(record)
    }
}
