//! Client network identity extraction.
//!
//! The quota tracker keys counters by client IP. Behind a trusted reverse
//! proxy the peer address is the proxy, so the identity comes from
//! `X-Forwarded-For` / `X-Real-IP` instead — but only when `BEHIND_PROXY`
//! is enabled, since those headers are client-forgeable on direct exposure.

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{HeaderMap, request::Parts},
};
use serde_json::json;
use std::net::SocketAddr;

use crate::{error::AppError, state::AppState};

/// Extractor yielding the client identity string used as the quota key.
#[derive(Debug, Clone)]
pub struct ClientIp(pub String);

impl FromRequestParts<AppState> for ClientIp {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.behind_proxy
            && let Some(ip) = forwarded_ip(&parts.headers)
        {
            return Ok(ClientIp(ip));
        }

        if let Some(ConnectInfo(addr)) = parts.extensions.get::<ConnectInfo<SocketAddr>>() {
            return Ok(ClientIp(addr.ip().to_string()));
        }

        Err(AppError::bad_request(
            "Unable to determine client address",
            json!({}),
        ))
    }
}

/// Reads the proxy-reported client IP from forwarding headers.
///
/// `X-Forwarded-For` may carry a comma-separated chain; the first entry is
/// the originating client. Falls back to `X-Real-IP`.
fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        let first = forwarded.split(',').next().unwrap_or("").trim();
        if !first.is_empty() {
            return Some(first.to_string());
        }
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
