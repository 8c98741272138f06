//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. The store keeps
//! only the target URL as the record value — everything else here is derived
//! at the service boundary.
//!
//! # Entity Types
//!
//! - [`ShortLink`] - a live short identifier → target URL mapping
//! - [`NewLink`] - input data for creating a mapping
//! - [`CreatedLink`] - a freshly created mapping plus quota observability
//! - [`QuotaUsage`] - post-consumption snapshot of a client's quota counter

pub mod link;

pub use link::{CreatedLink, NewLink, QuotaUsage, ShortLink};
