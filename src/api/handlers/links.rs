//! Handlers for link management endpoints (update, delete).

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::message::MessageResponse;
use crate::api::dto::update_link::UpdateLinkRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Re-points a short link and resets its expiry.
///
/// # Endpoint
///
/// `PUT /api/v1/{id}` (Bearer token required)
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://new-destination.com",
///   "expiry": 12   // hours; zero stores without expiry
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the identifier has no live record.
/// Returns 400 Bad Request if validation fails.
pub async fn update_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;

    state
        .link_service
        .update_link(&id, &payload.url, payload.expiry)
        .await?;

    Ok(Json(MessageResponse::new("Short link updated")))
}

/// Deletes a short link.
///
/// # Endpoint
///
/// `DELETE /api/v1/{id}` (Bearer token required)
///
/// Idempotent: deleting an identifier with no live record still reports
/// success, matching the store's delete semantics.
pub async fn delete_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    state.link_service.delete_link(&id).await?;

    Ok(Json(MessageResponse::new("Short link deleted")))
}
