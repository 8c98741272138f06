#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use linksnap::application::services::{
    AuthService, LinkService, LinkSettings, QuotaService, QuotaSettings,
};
use linksnap::infrastructure::store::MemoryStore;
use linksnap::state::AppState;

/// Own domain wired into every test state; self-domain rejection tests
/// target it.
pub const TEST_DOMAIN: &str = "short.test";

pub const TEST_SIGNING_SECRET: &str = "test-signing-secret";

/// Builds an [`AppState`] over a fresh in-memory store.
///
/// Returns the store alongside the state so tests can seed records directly
/// and inspect what handlers wrote.
///
/// `behind_proxy` is enabled so tests can choose their client identity per
/// request via the `X-Forwarded-For` header.
pub fn create_test_state(quota_ceiling: u32, window_seconds: u64) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());

    let quota_service = Arc::new(QuotaService::new(
        store.clone(),
        QuotaSettings {
            ceiling: quota_ceiling,
            window: Duration::from_secs(window_seconds),
        },
    ));

    let link_service = Arc::new(LinkService::new(
        store.clone(),
        quota_service,
        LinkSettings {
            own_domain: TEST_DOMAIN.to_string(),
            default_expiry_hours: 24,
        },
    ));

    let auth_service = Arc::new(AuthService::new(TEST_SIGNING_SECRET));

    let state = AppState::new(link_service, auth_service, true);

    (state, store)
}

/// Test state with a roomy quota nothing but the quota tests exhaust.
pub fn default_test_state() -> (AppState, Arc<MemoryStore>) {
    create_test_state(10, 1800)
}

/// Issues a valid bearer token against the test signing secret.
pub fn bearer_token(state: &AppState) -> String {
    state
        .auth_service
        .issue_token("tests@example.com", Duration::from_secs(3600))
        .unwrap()
}

/// Seeds a live link record directly into the store.
pub async fn create_test_link(store: &MemoryStore, id: &str, url: &str) {
    use linksnap::domain::store::KeyValueStore;

    store
        .set(
            &format!("link:{}", id),
            url,
            Some(Duration::from_secs(3600)),
        )
        .await
        .unwrap();
}

/// Reads a link record straight from the store.
pub async fn read_link(store: &MemoryStore, id: &str) -> Option<String> {
    use linksnap::domain::store::KeyValueStore;

    store.get(&format!("link:{}", id)).await.unwrap()
}
