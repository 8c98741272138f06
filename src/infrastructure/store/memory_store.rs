//! In-memory store implementation.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::domain::store::{KeyValueStore, StoreError, StoreResult};

/// A stored value and its optional expiry deadline.
#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

/// In-process store backend.
///
/// Used by the test suite and as the startup fallback when no Redis URL is
/// configured. Expired entries are dropped lazily on access instead of by a
/// background sweeper, which keeps behavior deterministic under tokio's
/// paused test clock ([`tokio::time::Instant`] drives all expiry decisions).
///
/// # Cloning
///
/// `MemoryStore` is cheaply cloneable via [`Arc`]; all clones share the same
/// underlying map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a live entry, evicting it if its TTL has elapsed.
    fn get_live(&self, key: &str) -> Option<Entry> {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        let entry = entries.get(key)?.clone();

        if entry.is_expired(now) {
            entries.remove(key);
            return None;
        }

        Some(entry)
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.get_live(key).map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> StoreResult<()> {
        let expires_at = ttl
            .filter(|ttl| !ttl.is_zero())
            .map(|ttl| Instant::now() + ttl);

        self.entries.lock().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );

        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get_live(key).is_some())
    }

    async fn scan_keys(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let now = Instant::now();
        let entries = self.entries.lock();

        Ok(entries
            .iter()
            .filter(|(key, entry)| key.starts_with(prefix) && !entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect())
    }

    async fn ttl_remaining(&self, key: &str) -> StoreResult<Option<Duration>> {
        let now = Instant::now();

        Ok(self
            .get_live(key)
            .and_then(|entry| entry.expires_at)
            .map(|deadline| deadline.saturating_duration_since(now)))
    }

    async fn decrement(&self, key: &str) -> StoreResult<i64> {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
        }

        match entries.get_mut(key) {
            Some(entry) => {
                let current: i64 = entry.value.parse().map_err(|_| {
                    StoreError::Operation(format!("value under '{}' is not an integer", key))
                })?;
                let next = current - 1;
                entry.value = next.to_string();
                Ok(next)
            }
            None => {
                // Mirrors Redis DECR: an absent key starts from zero and
                // keeps no expiry.
                entries.insert(
                    key.to_string(),
                    Entry {
                        value: "-1".to_string(),
                        expires_at: None,
                    },
                );
                Ok(-1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let store = MemoryStore::new();

        store.set("k", "v", None).await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), Some("v".to_string()));
        assert!(store.exists("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = MemoryStore::new();

        assert_eq!(store.get("missing").await.unwrap(), None);
        assert!(!store.exists("missing").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let store = MemoryStore::new();

        store
            .set("k", "v", Some(Duration::from_secs(60)))
            .await
            .unwrap();
        assert!(store.exists("k").await.unwrap());

        advance(Duration::from_secs(61)).await;

        assert_eq!(store.get("k").await.unwrap(), None);
        assert!(!store.exists("k").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overwrite_resets_ttl() {
        let store = MemoryStore::new();

        store
            .set("k", "v1", Some(Duration::from_secs(60)))
            .await
            .unwrap();
        advance(Duration::from_secs(50)).await;

        store
            .set("k", "v2", Some(Duration::from_secs(60)))
            .await
            .unwrap();
        advance(Duration::from_secs(50)).await;

        // 100s after the first write, but only 50s after the second.
        assert_eq!(store.get("k").await.unwrap(), Some("v2".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_remaining_counts_down() {
        let store = MemoryStore::new();

        store
            .set("k", "v", Some(Duration::from_secs(120)))
            .await
            .unwrap();
        advance(Duration::from_secs(30)).await;

        let remaining = store.ttl_remaining("k").await.unwrap().unwrap();
        assert_eq!(remaining, Duration::from_secs(90));
    }

    #[tokio::test]
    async fn test_ttl_remaining_none_without_expiry() {
        let store = MemoryStore::new();

        store.set("k", "v", None).await.unwrap();

        assert_eq!(store.ttl_remaining("k").await.unwrap(), None);
        assert_eq!(store.ttl_remaining("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryStore::new();

        store.set("k", "v", None).await.unwrap();
        store.delete("k").await.unwrap();
        store.delete("k").await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_decrement_counts_down() {
        let store = MemoryStore::new();

        store.set("n", "3", None).await.unwrap();

        assert_eq!(store.decrement("n").await.unwrap(), 2);
        assert_eq!(store.decrement("n").await.unwrap(), 1);
        assert_eq!(store.decrement("n").await.unwrap(), 0);
        assert_eq!(store.decrement("n").await.unwrap(), -1);
    }

    #[tokio::test]
    async fn test_decrement_missing_key_starts_at_minus_one() {
        let store = MemoryStore::new();

        assert_eq!(store.decrement("n").await.unwrap(), -1);
        assert_eq!(store.ttl_remaining("n").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_decrement_preserves_ttl() {
        let store = MemoryStore::new();

        store
            .set("n", "5", Some(Duration::from_secs(100)))
            .await
            .unwrap();
        advance(Duration::from_secs(40)).await;

        store.decrement("n").await.unwrap();

        let remaining = store.ttl_remaining("n").await.unwrap().unwrap();
        assert_eq!(remaining, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_decrement_non_numeric_value() {
        let store = MemoryStore::new();

        store.set("n", "not-a-number", None).await.unwrap();

        assert!(store.decrement("n").await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scan_keys_filters_prefix_and_expired() {
        let store = MemoryStore::new();

        store.set("link:a", "1", None).await.unwrap();
        store
            .set("link:b", "2", Some(Duration::from_secs(10)))
            .await
            .unwrap();
        store.set("quota:c", "3", None).await.unwrap();

        advance(Duration::from_secs(11)).await;

        let mut keys = store.scan_keys("link:").await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["link:a".to_string()]);
    }
}
