//! HTTP API for the EON living platform.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`POST /api/interactions`** to append an interaction and advance
//!   the platform growth level
//! - **`GET /api/platform/state`** for the singleton platform state
//! - **`GET /api/platform/changelog`** for the seed entries plus the
//!   milestones the server has crossed
//! - **`GET /health`** for liveness probes
//!
//! # Architecture
//!
//! Handlers are stateless. Everything they share lives in an
//! [`AppState`] behind an `Arc`: the [`PlatformStore`] handle, the
//! recording policy, and the values echoed by the state endpoint. The
//! singleton row inside the store is the only shared mutable resource.
//!
//! [`PlatformStore`]: eon_db::PlatformStore

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, serve, start_server};
pub use state::AppState;
