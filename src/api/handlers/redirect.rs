//! Handler for short link resolution.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short identifier to its target URL.
///
/// # Endpoint
///
/// `GET /api/v1/{id}`
///
/// The resolution path is a single store read with no quota check — reads
/// are unthrottled by design. Expired records have already vanished from the
/// store, so expiry needs no handling here beyond the 404.
///
/// # Errors
///
/// Returns 404 Not Found if no live record exists under the identifier.
pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let link = state.link_service.resolve(&id).await?;

    debug!(id = %id, target = %link.target_url, "Redirecting");

    Ok(Redirect::temporary(&link.target_url))
}
