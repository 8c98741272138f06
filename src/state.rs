//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService};

/// Application state shared across all request handlers.
///
/// Holds `Arc`'d services only — the services own the store handle, and
/// cloning the state is cheap.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub auth_service: Arc<AuthService>,
    /// Whether client identity may be read from proxy forwarding headers.
    pub behind_proxy: bool,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        link_service: Arc<LinkService>,
        auth_service: Arc<AuthService>,
        behind_proxy: bool,
    ) -> Self {
        Self {
            link_service,
            auth_service,
            behind_proxy,
        }
    }
}
