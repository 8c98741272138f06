//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST   /api/v1`        - Create a short link (public, quota-gated)
//! - `GET    /api/v1/{id}`   - Redirect to the target URL (public)
//! - `PUT    /api/v1/{id}`   - Re-point a link (Bearer token required)
//! - `DELETE /api/v1/{id}`   - Delete a link (Bearer token required)
//! - `GET    /health`        - Store and version report (public)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer token on mutating link routes
//! - **Path normalization** - Trailing slash handling
//!
//! Creation throttling is not a middleware concern here: the per-client
//! quota lives in the store and is enforced inside the link service, so it
//! holds across every instance sharing that store.

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = api::routes::public_routes().merge(
        api::routes::protected_routes()
            .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
    );

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
