//! Handler for the link creation endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::domain::entities::NewLink;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::ClientIp;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /api/v1`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "short": "my-link",   // optional custom identifier
///   "expiry": 48          // optional lifetime in hours
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "short": "s.example.com/my-link",
///   "expiry": 48,
///   "rate_limit": 9,
///   "rate_limit_reset": 29
/// }
/// ```
///
/// `rate_limit` and `rate_limit_reset` describe the caller's quota window
/// *after* this creation was charged against it.
///
/// # Errors
///
/// - 400 for malformed bodies or URLs
/// - 403 when the custom identifier is already live
/// - 503 when the quota is exhausted or the URL points at this service
pub async fn shorten_handler(
    State(state): State<AppState>,
    client_ip: ClientIp,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let created = state
        .link_service
        .create_short_link(
            &client_ip.0,
            NewLink {
                url: payload.url,
                custom_id: payload.short,
                expiry_hours: payload.expiry,
            },
        )
        .await?;

    Ok(Json(ShortenResponse {
        url: created.link.target_url,
        short: created.short_url,
        expiry: created.expiry_hours,
        rate_limit: created.quota.remaining,
        rate_limit_reset: created.quota.reset_in_minutes(),
    }))
}
