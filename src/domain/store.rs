//! Key-value store trait and error types.
//!
//! The whole service state — link records and quota counters — lives behind
//! this interface. All operations are atomic at single-key granularity; no
//! multi-key transactions are assumed. Callers always state the intended TTL
//! on writes (`None` = no expiry), because a write may reset or clear the
//! key's existing expiry.

use async_trait::async_trait;
use std::time::Duration;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store operation error: {0}")]
    Operation(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for the shared key-value store.
///
/// Implementations must be thread-safe; the store is the only synchronization
/// point between concurrent requests (and between service instances sharing
/// one backend). Read-then-write sequences built on top of this trait are
/// subject to check-then-act races; callers accept and document those rather
/// than wrapping the store in process-local locks.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - production Redis backend
/// - [`crate::infrastructure::store::MemoryStore`] - in-process backend for
///   tests and redis-less development
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Retrieves the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent or its TTL has elapsed.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`.
    ///
    /// `ttl` is always explicit: `Some(d)` arms the store-enforced expiry,
    /// `None` stores without expiry. Overwriting a key replaces any previous
    /// TTL with the one given here.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> StoreResult<()>;

    /// Removes `key`. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Returns whether a live (non-expired) value exists under `key`.
    async fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Lists all live keys starting with `prefix`.
    async fn scan_keys(&self, prefix: &str) -> StoreResult<Vec<String>>;

    /// Returns the remaining TTL of `key`.
    ///
    /// `None` when the key is absent or carries no expiry.
    async fn ttl_remaining(&self, key: &str) -> StoreResult<Option<Duration>>;

    /// Atomically decrements the integer value under `key` by one and
    /// returns the new value.
    ///
    /// Mirrors Redis `DECR`: an absent key is created at `-1` (with no
    /// expiry), and a non-numeric value is an error.
    async fn decrement(&self, key: &str) -> StoreResult<i64>;
}
