//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, service wiring, and Axum server lifecycle.

use crate::application::services::{
    AuthService, LinkService, LinkSettings, QuotaService, QuotaSettings,
};
use crate::config::Config;
use crate::domain::store::KeyValueStore;
use crate::infrastructure::store::{MemoryStore, RedisStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The key-value store backend (Redis, or in-memory when unconfigured)
/// - Quota, link, and auth services
/// - Axum HTTP server
///
/// Unlike a cache, the store is the system of record: a configured Redis
/// that cannot be reached aborts startup instead of degrading.
///
/// # Errors
///
/// Returns an error if:
/// - The Redis connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(redis_url) => {
            let redis = RedisStore::connect(redis_url)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to the store: {}", e))?;
            Arc::new(redis)
        }
        None => {
            tracing::warn!(
                "No Redis configured; using the in-process store. \
                 State is lost on restart and not shared between instances."
            );
            Arc::new(MemoryStore::new())
        }
    };

    let quota_service = Arc::new(QuotaService::new(
        store.clone(),
        QuotaSettings {
            ceiling: config.api_quota,
            window: Duration::from_secs(config.quota_window_seconds),
        },
    ));

    let link_service = Arc::new(LinkService::new(
        store,
        quota_service,
        LinkSettings {
            own_domain: config.own_domain.clone(),
            default_expiry_hours: config.default_expiry_hours,
        },
    ));

    let auth_service = Arc::new(AuthService::new(&config.token_signing_secret));

    let state = AppState::new(link_service, auth_service, config.behind_proxy);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
