//! Store dispatch and the types shared by both implementations.
//!
//! Uses enum dispatch instead of trait objects because async methods
//! are not dyn-compatible.

use std::time::Duration;

use chrono::{DateTime, Utc};
use eon_core::config::{StoreBackend, StoreSettings};
use eon_core::{GrowthCurve, UpdateStrategy};
use eon_types::{ChangelogEntry, GrowthLevel, Interaction, InteractionId, PlatformState, SessionId};

use crate::error::DbError;
use crate::memory::MemoryStore;
use crate::pg_store::PgPlatformStore;
use crate::postgres::{PostgresConfig, PostgresPool};

/// An interaction about to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInteraction {
    /// The captured event.
    pub interaction: Interaction,
    /// Reporting session.
    pub session_id: SessionId,
    /// Client capture time.
    pub created_at: DateTime<Utc>,
}

/// How a recording advances the singleton.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordingPolicy {
    /// Curve deriving growth from the total.
    pub curve: GrowthCurve,
    /// Counter update strategy.
    pub strategy: UpdateStrategy,
}

/// Outcome of a successful recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    /// Identifier of the stored row.
    pub interaction_id: InteractionId,
    /// Total after this recording.
    pub total_interactions: u64,
    /// Growth after this recording.
    pub growth_level: GrowthLevel,
    /// Growth before this recording.
    pub previous_growth: GrowthLevel,
}

/// Next growth level: the curve value, never below what was stored.
pub(crate) fn next_growth(curve: GrowthCurve, previous: GrowthLevel, total: u64) -> GrowthLevel {
    curve.level_for(total).max(previous)
}

/// Handle to the platform store.
#[derive(Clone)]
pub enum PlatformStore {
    /// `PostgreSQL`-backed store.
    Postgres(PgPlatformStore),
    /// Process-local store.
    Memory(MemoryStore),
}

impl PlatformStore {
    /// Open the store described by the `store` config section.
    ///
    /// For `PostgreSQL` this connects the pool and, if enabled, runs
    /// migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the connection or a migration fails.
    pub async fn open(settings: &StoreSettings) -> Result<Self, DbError> {
        match settings.backend {
            StoreBackend::Memory => {
                let latency = Duration::from_millis(settings.simulated_latency_ms);
                tracing::info!(latency_ms = settings.simulated_latency_ms, "Using in-memory store");
                Ok(Self::Memory(MemoryStore::with_latency(latency)))
            }
            StoreBackend::Postgres => {
                let pool = PostgresPool::connect(&PostgresConfig::from_settings(settings)?).await?;
                if settings.run_migrations {
                    pool.run_migrations().await?;
                }
                Ok(Self::Postgres(PgPlatformStore::new(pool)))
            }
        }
    }

    /// Create the singleton row if it is missing and return the current state.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store is unreachable.
    pub async fn ensure_initialized(&self, version: &str) -> Result<PlatformState, DbError> {
        match self {
            Self::Postgres(store) => store.ensure_initialized(version).await,
            Self::Memory(store) => Ok(store.ensure_initialized(version).await),
        }
    }

    /// Read the singleton row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::StateNotFound`] if the platform was never
    /// initialized, or another [`DbError`] if the store fails.
    pub async fn platform_state(&self) -> Result<PlatformState, DbError> {
        match self {
            Self::Postgres(store) => store.platform_state().await,
            Self::Memory(store) => store.platform_state().await,
        }
    }

    /// Append an interaction and advance the singleton.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::StateNotFound`] if the platform was never
    /// initialized, or another [`DbError`] if the store fails.
    pub async fn record_interaction(
        &self,
        interaction: &NewInteraction,
        policy: RecordingPolicy,
    ) -> Result<Recorded, DbError> {
        match self {
            Self::Postgres(store) => store.record_interaction(interaction, policy).await,
            Self::Memory(store) => store.record_interaction(interaction, policy).await,
        }
    }

    /// Milestone entries written so far, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store fails.
    pub async fn growth_changelog(&self, limit: u32) -> Result<Vec<ChangelogEntry>, DbError> {
        match self {
            Self::Postgres(store) => store.growth_changelog(limit).await,
            Self::Memory(store) => Ok(store.growth_changelog(limit).await),
        }
    }

    /// Number of stored interaction rows.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store fails.
    pub async fn count_interactions(&self) -> Result<u64, DbError> {
        match self {
            Self::Postgres(store) => store.count_interactions().await,
            Self::Memory(store) => Ok(store.count_interactions().await),
        }
    }

    /// Human-readable backend name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }
}

impl From<MemoryStore> for PlatformStore {
    fn from(store: MemoryStore) -> Self {
        Self::Memory(store)
    }
}
