//! DTO for the link update endpoint.

use serde::Deserialize;
use validator::Validate;

/// Request body for `PUT /api/v1/{id}`.
///
/// # `expiry` semantics
///
/// Unlike creation, zero (or absent) does not select the default lifetime —
/// it stores the record without expiry. An update always states the full new
/// state of the record.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    /// New destination URL for this link.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// New lifetime in hours; zero stores without expiry.
    #[serde(default)]
    #[validate(range(max = 87600, message = "expiry must be at most 87600 hours"))]
    pub expiry: u64,
}
