//! Redis-backed store implementation.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::info;

use crate::domain::store::{KeyValueStore, StoreError, StoreResult};

/// Production store backend over a shared Redis instance.
///
/// Uses `ConnectionManager` for connection reuse and automatic reconnection.
/// Unlike a cache, this backend is the system of record: errors propagate to
/// callers instead of degrading silently.
pub struct RedisStore {
    client: ConnectionManager,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> StoreResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url)
            .map_err(|e| StoreError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self { client: manager })
    }
}

fn op_err(e: redis::RedisError) -> StoreError {
    StoreError::Operation(e.to_string())
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.client.clone();
        conn.get::<_, Option<String>>(key).await.map_err(op_err)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> StoreResult<()> {
        let mut conn = self.client.clone();

        match ttl {
            Some(ttl) if !ttl.is_zero() => conn
                .set_ex::<_, _, ()>(key, value, ttl.as_secs())
                .await
                .map_err(op_err),
            _ => conn.set::<_, _, ()>(key, value).await.map_err(op_err),
        }
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut conn = self.client.clone();
        conn.del::<_, ()>(key).await.map_err(op_err)
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let mut conn = self.client.clone();
        conn.exists::<_, bool>(key).await.map_err(op_err)
    }

    async fn scan_keys(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let mut conn = self.client.clone();
        conn.keys::<_, Vec<String>>(format!("{}*", prefix))
            .await
            .map_err(op_err)
    }

    async fn ttl_remaining(&self, key: &str) -> StoreResult<Option<Duration>> {
        let mut conn = self.client.clone();
        let secs: i64 = conn.ttl(key).await.map_err(op_err)?;

        // Redis answers -2 for a missing key and -1 for a key without expiry.
        if secs > 0 {
            Ok(Some(Duration::from_secs(secs as u64)))
        } else {
            Ok(None)
        }
    }

    async fn decrement(&self, key: &str) -> StoreResult<i64> {
        let mut conn = self.client.clone();
        conn.decr::<_, _, i64>(key, 1).await.map_err(op_err)
    }
}
