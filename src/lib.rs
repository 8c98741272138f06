//! # linksnap
//!
//! A URL shortening service that keeps every piece of state — link mappings
//! and per-client creation quotas — in a single shared key-value store, built
//! with Axum and Redis.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities and the key-value store trait
//! - **Application Layer** ([`application`]) - Link lifecycle, quota tracking, auth
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory store backends
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random or caller-supplied short identifiers with collision handling
//! - Store-enforced link expiry (no background reaper required)
//! - Per-client creation quota backed by a decaying store counter
//! - Bearer token authentication for mutating endpoints
//! - Rate-limit observability in every creation response
//!
//! ## Quick Start
//!
//! ```bash
//! # Set required environment variables
//! export DOMAIN="s.example.com"
//! export TOKEN_SIGNING_SECRET="change-me"
//! export REDIS_URL="redis://localhost:6379"  # optional, in-memory fallback
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, LinkService, QuotaService};
    pub use crate::domain::entities::{CreatedLink, NewLink, ShortLink};
    pub use crate::domain::store::KeyValueStore;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
