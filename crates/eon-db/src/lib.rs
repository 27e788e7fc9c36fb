//! Data layer for the EON living platform.
//!
//! Three tables back the tracking service:
//!
//! ```text
//! platform_state      singleton row (id = 1): version, total, growth
//! user_interactions   append-only interaction log
//! platform_changelog  milestone messages written as growth advances
//! ```
//!
//! [`PlatformStore`] dispatches to either the `PostgreSQL` implementation
//! or the in-memory one. Both implement the two counter update
//! strategies from [`UpdateStrategy`](eon_core::UpdateStrategy).
//!
//! # Modules
//!
//! - [`postgres`] -- `PostgreSQL` connection pool and configuration
//! - [`pg_store`] -- SQL implementation of the platform store
//! - [`memory`] -- In-process implementation of the platform store
//! - [`store`] -- [`PlatformStore`] dispatch and recording types
//! - [`error`] -- Shared error types

pub mod error;
pub mod memory;
pub mod pg_store;
pub mod postgres;
pub mod store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use memory::MemoryStore;
pub use pg_store::PgPlatformStore;
pub use postgres::{PostgresConfig, PostgresPool};
pub use store::{NewInteraction, PlatformStore, Recorded, RecordingPolicy};
