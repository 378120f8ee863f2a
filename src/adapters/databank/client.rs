//! HTTP client for the Star Wars databank

use super::SourceFeed;
use crate::adapters::http::JsonClient;
use crate::config::DatabankConfig;
use crate::domain::{CanonicalRecord, ResourceKind, Result, SourceError};
use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;

/// Hard stop for runaway pagination
const MAX_PAGES: usize = 200;

/// Databank listing client
///
/// # Example
///
/// ```no_run
/// use holonet::adapters::databank::{DatabankClient, SourceFeed};
/// use holonet::config::DatabankConfig;
/// use holonet::domain::ResourceKind;
///
/// # async fn example() -> holonet::domain::Result<()> {
/// let client = DatabankClient::new(&DatabankConfig::default())?;
/// let droids = client.fetch_listing(ResourceKind::Droids).await;
/// println!("{} droids", droids.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DatabankClient {
    http: JsonClient,
    base_url: String,
    page_size: usize,
}

impl DatabankClient {
    /// Creates a client from configuration
    pub fn new(config: &DatabankConfig) -> Result<Self> {
        Ok(Self {
            http: JsonClient::new(config.timeout(), config.retry.clone())?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        })
    }

    /// Base URL requests are made against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches every raw item listed under `endpoint`
    async fn fetch_all_pages(&self, endpoint: &str) -> std::result::Result<Vec<Value>, SourceError> {
        let base = format!("{}{}", self.base_url, endpoint);
        let page_size = self.page_size;

        drain_pages(page_size, |page| {
            let url = match page {
                Some(page) => format!("{base}?page={page}&limit={page_size}"),
                None => base.clone(),
            };
            async move {
                let body = self.http.get_json(&url).await?;
                extract_items(body)
            }
        })
        .await
    }
}

#[async_trait]
impl SourceFeed for DatabankClient {
    async fn fetch_listing(&self, kind: ResourceKind) -> Vec<CanonicalRecord> {
        let Some(endpoint) = kind.databank_endpoint() else {
            tracing::debug!(kind = %kind, "No databank listing for kind");
            return Vec::new();
        };

        let items = match self.fetch_all_pages(&endpoint).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(kind = %kind, error = %e, "Databank listing failed");
                return Vec::new();
            }
        };

        let raw_count = items.len();
        let records: Vec<CanonicalRecord> = items
            .into_iter()
            .filter_map(|item| match CanonicalRecord::from_value(kind, item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(kind = %kind, error = %e, "Skipping malformed databank item");
                    None
                }
            })
            .collect();

        tracing::debug!(
            kind = %kind,
            fetched = raw_count,
            decoded = records.len(),
            "Databank listing loaded"
        );

        records
    }
}

/// Collects items page by page
///
/// `fetch_page(Some(n))` requests page `n`, `fetch_page(None)` requests the
/// unpaginated listing. An empty page, or one shorter than `page_size`,
/// ends the listing. If the first page fails the unpaginated listing is
/// tried instead; a failure after the first page keeps what was collected.
async fn drain_pages<F, Fut>(
    page_size: usize,
    mut fetch_page: F,
) -> std::result::Result<Vec<Value>, SourceError>
where
    F: FnMut(Option<usize>) -> Fut,
    Fut: Future<Output = std::result::Result<Vec<Value>, SourceError>>,
{
    let mut collected = Vec::new();

    for page in 1..=MAX_PAGES {
        let items = match fetch_page(Some(page)).await {
            Ok(items) => items,
            Err(e) if page == 1 => {
                tracing::debug!(error = %e, "Paginated listing failed, retrying without pagination");
                return fetch_page(None).await;
            }
            Err(e) => {
                tracing::warn!(
                    page = page,
                    collected = collected.len(),
                    error = %e,
                    "Listing page failed, keeping earlier pages"
                );
                return Ok(collected);
            }
        };

        let count = items.len();
        collected.extend(items);

        if count == 0 || count < page_size {
            return Ok(collected);
        }
    }

    tracing::warn!(max_pages = MAX_PAGES, "Listing still paging at page limit, stopping");
    Ok(collected)
}

/// Pulls the item array out of a listing body
///
/// Accepts a bare array, `{"data": [...]}` or `{"results": [...]}`.
fn extract_items(body: Value) -> std::result::Result<Vec<Value>, SourceError> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => {
            for key in ["data", "results"] {
                if let Some(Value::Array(items)) = map.remove(key) {
                    return Ok(items);
                }
            }
            Err(SourceError::InvalidFormat(
                "listing body has no item array".to_string(),
            ))
        }
        other => Err(SourceError::InvalidFormat(format!(
            "unexpected listing body: {other}"
        ))),
    }
}
