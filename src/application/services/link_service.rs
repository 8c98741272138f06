//! Short link lifecycle service.
//!
//! Orchestrates the quota tracker, URL rules, and identifier allocation into
//! the externally visible operations: create, resolve, update, delete. The
//! store is re-read before every mutation; no link state is cached in
//! process.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use crate::application::services::quota_service::{Admission, QuotaService};
use crate::domain::entities::{CreatedLink, NewLink, ShortLink};
use crate::domain::store::KeyValueStore;
use crate::error::AppError;
use crate::utils::id_generator::generate_id;
use crate::utils::url_rules::{ensure_http_prefix, is_own_domain, validate_syntax};

/// Store key prefix for link records.
const LINK_KEY_PREFIX: &str = "link:";

/// Collision retry budget for generated identifiers. Custom identifiers are
/// never retried — a collision there is the caller's to resolve.
const MAX_GENERATE_ATTEMPTS: usize = 10;

/// Link policy parameters, fixed at startup from configuration.
#[derive(Debug, Clone)]
pub struct LinkSettings {
    /// This service's own domain; shortening URLs that point back at it is
    /// refused to prevent redirect loops.
    pub own_domain: String,
    /// Lifetime applied when a creation request asks for zero hours.
    pub default_expiry_hours: u64,
}

/// Service for creating and resolving short links.
pub struct LinkService {
    store: Arc<dyn KeyValueStore>,
    quota: Arc<QuotaService>,
    settings: LinkSettings,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        quota: Arc<QuotaService>,
        settings: LinkSettings,
    ) -> Self {
        Self {
            store,
            quota,
            settings,
        }
    }

    fn link_key(id: &str) -> String {
        format!("{}{}", LINK_KEY_PREFIX, id)
    }

    /// Creates a short link on behalf of `client_key`.
    ///
    /// # Flow
    ///
    /// 1. Quota admission for the client — denial ends the request before
    ///    any validation work.
    /// 2. URL normalization (scheme prefix), syntax validation, and the
    ///    own-domain rejection.
    /// 3. Identifier allocation: a custom id is used verbatim and must not
    ///    collide with a live record; a generated id retries up to
    ///    [`MAX_GENERATE_ATTEMPTS`] times on collision.
    /// 4. The record is written with its TTL (zero requested hours selects
    ///    the configured default).
    /// 5. The quota is charged — only now, so failed requests cost nothing.
    ///
    /// The id availability check and the write are two store operations;
    /// concurrent creators racing for the same id are serialized by the
    /// store per key, but the check-then-set window itself is an accepted
    /// best-effort guarantee (process-local locking would not help across
    /// service instances sharing one store).
    ///
    /// # Errors
    ///
    /// [`AppError::QuotaExceeded`] with a `rate_limit_reset` hint,
    /// [`AppError::Validation`] for malformed URLs,
    /// [`AppError::RejectedDomain`] for self-referential URLs,
    /// [`AppError::DuplicateId`] when a custom id is already live,
    /// [`AppError::Internal`] on store failures or retry exhaustion.
    pub async fn create_short_link(
        &self,
        client_key: &str,
        new_link: NewLink,
    ) -> Result<CreatedLink, AppError> {
        let admission = self.quota.admit(client_key).await?;

        if let Admission::Denied { reset_in } = admission {
            return Err(AppError::quota_exceeded(
                "Rate limit exceeded",
                json!({ "rate_limit_reset": reset_in.as_secs() / 60 }),
            ));
        }

        let target_url = self.check_target_url(&new_link.url)?;

        let id = match new_link.custom_id {
            Some(custom) => {
                if self.store.exists(&Self::link_key(&custom)).await? {
                    return Err(AppError::duplicate_id(
                        "Short id already exists",
                        json!({ "id": custom }),
                    ));
                }
                custom
            }
            None => self.generate_unique_id().await?,
        };

        let expiry_hours = if new_link.expiry_hours == 0 {
            self.settings.default_expiry_hours
        } else {
            new_link.expiry_hours
        };

        self.store
            .set(
                &Self::link_key(&id),
                &target_url,
                Some(Duration::from_secs(expiry_hours * 3600)),
            )
            .await?;

        let quota = self.quota.consume(client_key).await?;

        tracing::info!(id = %id, expiry_hours, "Short link created");

        let short_url = format!(
            "{}/{}",
            self.settings.own_domain.trim_end_matches('/'),
            id
        );

        Ok(CreatedLink {
            link: ShortLink::new(id, target_url),
            short_url,
            expiry_hours,
            quota,
        })
    }

    /// Resolves a short id to its live target.
    ///
    /// Pure store read — the resolution path is unthrottled by design.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no live record exists (including
    /// records that have silently expired out of the store).
    pub async fn resolve(&self, id: &str) -> Result<ShortLink, AppError> {
        match self.store.get(&Self::link_key(id)).await? {
            Some(target_url) => Ok(ShortLink::new(id, target_url)),
            None => Err(AppError::not_found(
                "Short link not found",
                json!({ "id": id }),
            )),
        }
    }

    /// Re-points a live short link and resets its expiry.
    ///
    /// The new target is prefix-normalized and syntax-checked so stored
    /// values stay valid absolute URLs; the own-domain rule is deliberately
    /// not re-applied here — only creation enforces it. `expiry_hours == 0`
    /// stores the record without expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the id has no live record.
    pub async fn update_link(
        &self,
        id: &str,
        url: &str,
        expiry_hours: u64,
    ) -> Result<ShortLink, AppError> {
        let key = Self::link_key(id);

        if !self.store.exists(&key).await? {
            return Err(AppError::not_found(
                "Short link not found",
                json!({ "id": id }),
            ));
        }

        let target_url = ensure_http_prefix(url.trim());
        validate_syntax(&target_url).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        let ttl = (expiry_hours > 0).then(|| Duration::from_secs(expiry_hours * 3600));
        self.store.set(&key, &target_url, ttl).await?;

        tracing::info!(id = %id, expiry_hours, "Short link updated");

        Ok(ShortLink::new(id, target_url))
    }

    /// Deletes a short link. Idempotent: deleting an absent id succeeds.
    pub async fn delete_link(&self, id: &str) -> Result<(), AppError> {
        self.store.delete(&Self::link_key(id)).await?;

        tracing::info!(id = %id, "Short link deleted");

        Ok(())
    }

    /// Counts live link records, for health reporting.
    pub async fn count_live_links(&self) -> Result<usize, AppError> {
        Ok(self.store.scan_keys(LINK_KEY_PREFIX).await?.len())
    }

    /// Normalizes and validates a creation target.
    fn check_target_url(&self, raw: &str) -> Result<String, AppError> {
        let target_url = ensure_http_prefix(raw.trim());

        validate_syntax(&target_url).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        if is_own_domain(&target_url, &self.settings.own_domain) {
            return Err(AppError::rejected_domain(
                "Refusing to shorten a URL pointing at this service",
                json!({ "domain": self.settings.own_domain }),
            ));
        }

        Ok(target_url)
    }

    /// Generates an identifier with no live record, with bounded retries.
    async fn generate_unique_id(&self) -> Result<String, AppError> {
        for _ in 0..MAX_GENERATE_ATTEMPTS {
            let id = generate_id();

            if !self.store.exists(&Self::link_key(&id)).await? {
                return Ok(id);
            }
        }

        Err(AppError::internal(
            "Failed to generate a unique short id",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}
