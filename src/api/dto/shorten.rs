//! DTOs for the link creation endpoint.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// Compiled regex for custom identifier validation.
static CUSTOM_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Request body for `POST /api/v1`.
///
/// The URL is accepted with or without a scheme — `example.com` is promoted
/// to `http://example.com` before storage.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The URL to shorten.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// Optional custom short identifier, used verbatim when supplied.
    #[validate(length(min = 1, max = 64))]
    #[validate(regex(path = "*CUSTOM_ID_REGEX"))]
    pub short: Option<String>,

    /// Requested lifetime in hours. Zero or absent selects the configured
    /// default.
    #[serde(default)]
    #[validate(range(max = 87600, message = "expiry must be at most 87600 hours"))]
    pub expiry: u64,
}

/// Response body for a successful creation.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    /// Normalized target URL as stored.
    pub url: String,
    /// Public short URL, `<domain>/<id>`.
    pub short: String,
    /// Effective lifetime in hours.
    pub expiry: u64,
    /// Creations left in the client's current quota window.
    pub rate_limit: i64,
    /// Whole minutes until the quota window resets.
    pub rate_limit_reset: u64,
}
