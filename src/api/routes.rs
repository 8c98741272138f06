//! API route configuration.
//!
//! Split into a public group and a token-protected group; the composition
//! (and the auth layer on the protected group) happens in
//! [`crate::routes::app_router`]. Both groups address the same `/api/v1`
//! namespace — the split exists so authentication wraps exactly the
//! mutating methods.

use crate::api::handlers::{
    delete_link_handler, redirect_handler, shorten_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Public routes: creation (quota-gated inside the service) and resolution.
///
/// # Endpoints
///
/// - `POST /api/v1`       - Create a short link
/// - `GET  /api/v1/{id}`  - Redirect to the target URL
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1", post(shorten_handler))
        .route("/api/v1/{id}", get(redirect_handler))
}

/// Mutating routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `PUT    /api/v1/{id}` - Re-point a link and reset its expiry
/// - `DELETE /api/v1/{id}` - Delete a link
pub fn protected_routes() -> Router<AppState> {
    Router::new().route(
        "/api/v1/{id}",
        put(update_link_handler).delete(delete_link_handler),
    )
}
