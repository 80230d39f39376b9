//! # API crate: typed client for the Flow Finance admin backend
//!
//! Everything the console knows about the remote admin service lives here:
//! the JSON shapes it exchanges, the query parameters it accepts and the
//! single HTTP client that talks to it.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | DTOs for sessions, users, admins, stats, broadcasts, AI usage, feedback and audit logs |
//! | [`params`] | Query-string builders for list and statistics endpoints |
//! | [`client`] | [`ApiClient`]: request builder with bearer-token injection and error normalisation |
//! | [`backend`] | [`AdminBackend`] trait, one method per endpoint, implemented by [`ApiClient`] |
//! | [`error`] | [`ApiError`] |
//!
//! The crate has no UI dependencies and compiles for both native targets and
//! `wasm32-unknown-unknown`.

pub mod backend;
pub mod client;
pub mod error;
pub mod models;
pub mod params;

pub use backend::{AdminBackend, ApiResult};
pub use client::{ApiClient, Call};
pub use error::ApiError;
pub use models::*;
pub use params::{
    DateRange, FeedbackQuery, LogQuery, UsageDetailQuery, UsageSort, UserQuery, UserUsageQuery,
};
