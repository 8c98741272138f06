//! Link entities for the short identifier → target URL mapping.

use std::time::Duration;

/// A live short link.
///
/// The store holds the target URL as the record value under the link key;
/// expiry is store-enforced and therefore not part of the entity. Once the
/// TTL elapses the record silently disappears and the identifier is free for
/// reuse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: String,
    pub target_url: String,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(id: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            target_url: target_url.into(),
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    /// Raw URL as submitted; normalized before storage.
    pub url: String,
    /// Caller-supplied identifier. `None` requests a generated one.
    pub custom_id: Option<String>,
    /// Requested lifetime in hours. Zero selects the configured default.
    pub expiry_hours: u64,
}

/// Post-consumption snapshot of a client's quota counter.
#[derive(Debug, Clone, Copy)]
pub struct QuotaUsage {
    /// Creations left in the current window.
    pub remaining: i64,
    /// Time until the window resets and the counter disappears.
    pub reset_in: Duration,
}

impl QuotaUsage {
    /// Reset time in whole minutes, the unit the public API reports.
    pub fn reset_in_minutes(&self) -> u64 {
        self.reset_in.as_secs() / 60
    }
}

/// A freshly created link together with the quota state after charging it.
#[derive(Debug, Clone)]
pub struct CreatedLink {
    pub link: ShortLink,
    /// Public short URL, `<own domain>/<id>`.
    pub short_url: String,
    /// Effective lifetime in hours (after defaulting).
    pub expiry_hours: u64,
    pub quota: QuotaUsage,
}
