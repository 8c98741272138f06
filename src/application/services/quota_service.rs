//! Per-client creation quota tracking.
//!
//! One decrementing counter per client identity, held in the shared store
//! under the quota namespace with the window length as its TTL. The counter
//! moves through two states: absent (no request this window, or the window
//! elapsed) and active. Admission and consumption are deliberately separate
//! calls — admission gates the request, consumption charges it only after
//! the guarded operation actually succeeded, so rejected requests cost
//! nothing.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::QuotaUsage;
use crate::domain::store::KeyValueStore;
use crate::error::AppError;

/// Store key prefix for quota counters.
const QUOTA_KEY_PREFIX: &str = "quota:";

/// Quota parameters, fixed at startup from configuration.
#[derive(Debug, Clone)]
pub struct QuotaSettings {
    /// Creations allowed per client per window.
    pub ceiling: u32,
    /// Window length; doubles as the counter TTL.
    pub window: Duration,
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy)]
pub enum Admission {
    /// The request may proceed. `remaining` is the counter value before any
    /// consumption — admission itself never decrements.
    Allowed { remaining: i64 },
    /// The window budget is spent; `reset_in` is the counter's remaining TTL.
    Denied { reset_in: Duration },
}

/// Service tracking per-client creation quotas in the shared store.
pub struct QuotaService {
    store: Arc<dyn KeyValueStore>,
    settings: QuotaSettings,
}

impl QuotaService {
    /// Creates a new quota service.
    pub fn new(store: Arc<dyn KeyValueStore>, settings: QuotaSettings) -> Self {
        Self { store, settings }
    }

    fn quota_key(client_key: &str) -> String {
        format!("{}{}", QUOTA_KEY_PREFIX, client_key)
    }

    /// Checks whether `client_key` may perform another creation.
    ///
    /// A client with no live counter gets a fresh one seeded to the ceiling
    /// with the window as TTL, and is admitted. An existing counter admits
    /// while it is positive and denies at zero or below.
    ///
    /// The admission check and a later [`consume`](Self::consume) are two
    /// separate store round-trips; a window expiring between them is an
    /// accepted race handled on the consume side.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store failures.
    pub async fn admit(&self, client_key: &str) -> Result<Admission, AppError> {
        let key = Self::quota_key(client_key);

        let Some(raw) = self.store.get(&key).await? else {
            self.store
                .set(
                    &key,
                    &self.settings.ceiling.to_string(),
                    Some(self.settings.window),
                )
                .await?;

            return Ok(Admission::Allowed {
                remaining: i64::from(self.settings.ceiling),
            });
        };

        // A counter that fails to parse counts as exhausted; it heals itself
        // when the window TTL clears it.
        let remaining: i64 = raw.trim().parse().unwrap_or(0);

        if remaining <= 0 {
            let reset_in = self
                .store
                .ttl_remaining(&key)
                .await?
                .unwrap_or(self.settings.window);

            return Ok(Admission::Denied { reset_in });
        }

        Ok(Admission::Allowed { remaining })
    }

    /// Charges one creation to `client_key` and reports the counter state.
    ///
    /// Call only after the guarded operation succeeded. The decrement is a
    /// single atomic store operation; if it comes back negative, the window
    /// expired (or a photo-finish race spent the last slot) between the
    /// admission check and now, and a fresh window is seeded already charged
    /// for this request — the behavior the public contract documents for
    /// that race.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store failures.
    pub async fn consume(&self, client_key: &str) -> Result<QuotaUsage, AppError> {
        let key = Self::quota_key(client_key);

        let mut remaining = self.store.decrement(&key).await?;

        if remaining < 0 {
            remaining = i64::from(self.settings.ceiling) - 1;
            self.store
                .set(&key, &remaining.to_string(), Some(self.settings.window))
                .await?;
        }

        let reset_in = self
            .store
            .ttl_remaining(&key)
            .await?
            .unwrap_or(self.settings.window);

        Ok(QuotaUsage {
            remaining,
            reset_in,
        })
    }
}
