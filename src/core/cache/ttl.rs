//! Generic keyed cache with time-to-live expiry

use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// A cached value and when it was fetched
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    fetched_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

/// Read-through cache that serves stale values when a refresh fails
///
/// The map lock is taken for the lookup and for the store, never while a
/// fetch is in flight. Concurrent misses on one key each fetch; the last
/// store wins.
///
/// Fetches are unbounded unless a deadline is set with
/// [`TtlCache::with_fetch_timeout`].
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    ttl: Duration,
    fetch_timeout: Option<Duration>,
}

impl<V: Clone> TtlCache<V> {
    /// Creates an empty cache
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            fetch_timeout: None,
        }
    }

    /// Bounds every fetch by `timeout`; an elapsed fetch counts as failed
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Returns the value for `key`, fetching it if absent or stale
    ///
    /// A fresh entry is returned without calling `fetch`. A fetch that
    /// fails, or outlives the fetch timeout when one is set, is logged and
    /// the stale value (if any) is returned in its place.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Option<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: Display,
    {
        let stale = {
            let entries = self.lock();
            match entries.get(key) {
                Some(entry) if entry.is_fresh(self.ttl) => {
                    tracing::trace!(key = %key, "Cache hit");
                    return Some(entry.value.clone());
                }
                Some(entry) => Some(entry.value.clone()),
                None => None,
            }
        };

        let fetched = match self.fetch_timeout {
            Some(limit) => match tokio::time::timeout(limit, fetch()).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        key = %key,
                        timeout_ms = limit.as_millis() as u64,
                        serving_stale = stale.is_some(),
                        "Cache fetch timed out"
                    );
                    return stale;
                }
            },
            None => fetch().await,
        };

        match fetched {
            Ok(value) => {
                self.lock().insert(
                    key.to_string(),
                    CacheEntry {
                        value: value.clone(),
                        fetched_at: Instant::now(),
                    },
                );
                Some(value)
            }
            Err(e) => {
                tracing::warn!(
                    key = %key,
                    error = %e,
                    serving_stale = stale.is_some(),
                    "Cache fetch failed"
                );
                stale
            }
        }
    }

    /// Number of stored entries, fresh or stale
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been stored yet
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TTL: Duration = Duration::from_secs(300);
    const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

    fn cache() -> TtlCache<String> {
        TtlCache::new(TTL).with_fetch_timeout(FETCH_TIMEOUT)
    }

    async fn fetch_counted(
        cache: &TtlCache<String>,
        calls: &AtomicUsize,
        result: Result<&str, &str>,
    ) -> Option<String> {
        cache
            .get_or_fetch("catalog:people", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                result.map(str::to_string)
            })
            .await
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_entry_skips_fetch() {
        let cache = cache();
        let calls = AtomicUsize::new(0);

        assert_eq!(fetch_counted(&cache, &calls, Ok("v1")).await.as_deref(), Some("v1"));
        tokio::time::advance(Duration::from_secs(299)).await;
        assert_eq!(fetch_counted(&cache, &calls, Ok("v2")).await.as_deref(), Some("v1"));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_entry_is_refetched() {
        let cache = cache();
        let calls = AtomicUsize::new(0);

        fetch_counted(&cache, &calls, Ok("v1")).await;
        tokio::time::advance(TTL).await;
        let value = fetch_counted(&cache, &calls, Ok("v2")).await;

        assert_eq!(value.as_deref(), Some("v2"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refresh_serves_stale_value() {
        let cache = cache();
        let calls = AtomicUsize::new(0);

        fetch_counted(&cache, &calls, Ok("v1")).await;
        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        let value = fetch_counted(&cache, &calls, Err("unavailable")).await;

        assert_eq!(value.as_deref(), Some("v1"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_without_entry_is_absent() {
        let cache = cache();
        let calls = AtomicUsize::new(0);

        let value = fetch_counted(&cache, &calls, Err("unavailable")).await;

        assert!(value.is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_fetch_serves_stale_value() {
        let cache = cache();
        let calls = AtomicUsize::new(0);
        fetch_counted(&cache, &calls, Ok("v1")).await;
        tokio::time::advance(TTL).await;

        let value = cache
            .get_or_fetch("catalog:people", || async {
                tokio::time::sleep(FETCH_TIMEOUT * 10).await;
                Ok::<_, String>("late".to_string())
            })
            .await;

        assert_eq!(value.as_deref(), Some("v1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_fetch_without_entry_is_absent() {
        let cache = cache();

        let value = cache
            .get_or_fetch("catalog:films", || async {
                tokio::time::sleep(FETCH_TIMEOUT * 10).await;
                Ok::<_, String>("late".to_string())
            })
            .await;

        assert!(value.is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_without_timeout_may_run_long() {
        let cache: TtlCache<String> = TtlCache::new(TTL);

        let value = cache
            .get_or_fetch("catalog:people", || async {
                tokio::time::sleep(Duration::from_secs(600)).await;
                Ok::<_, String>("slow but complete".to_string())
            })
            .await;

        assert_eq!(value.as_deref(), Some("slow but complete"));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let cache = cache();

        cache
            .get_or_fetch("a", || async { Ok::<_, String>("1".to_string()) })
            .await;
        let b = cache
            .get_or_fetch("b", || async { Ok::<_, String>("2".to_string()) })
            .await;

        assert_eq!(b.as_deref(), Some("2"));
        assert_eq!(cache.len(), 2);
    }
}
