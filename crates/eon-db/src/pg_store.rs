//! `PostgreSQL` implementation of the platform store.
//!
//! The atomic strategy runs insert, increment, and growth write in one
//! transaction. The `UPDATE ... SET total_interactions =
//! total_interactions + 1` takes the singleton's row lock, so concurrent
//! recordings queue behind each other until commit.

use chrono::{DateTime, Utc};
use eon_core::UpdateStrategy;
use eon_core::milestone;
use eon_types::{ChangeTrigger, ChangelogEntry, GrowthLevel, InteractionId, PlatformState};
use sqlx::{PgConnection, PgPool};

use crate::error::DbError;
use crate::postgres::PostgresPool;
use crate::store::{NewInteraction, Recorded, RecordingPolicy, next_growth};

/// A row of the `platform_state` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlatformStateRow {
    /// Platform version.
    pub version: String,
    /// Counter value.
    pub total_interactions: i64,
    /// Growth percentage.
    pub growth_level: i16,
    /// Last write time.
    pub last_updated: DateTime<Utc>,
}

impl From<PlatformStateRow> for PlatformState {
    fn from(row: PlatformStateRow) -> Self {
        Self {
            version: row.version,
            total_interactions: u64::try_from(row.total_interactions).unwrap_or(0),
            growth_level: growth_from_db(row.growth_level),
            last_updated: row.last_updated,
        }
    }
}

/// A row of the `platform_changelog` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChangelogRow {
    /// Sequence id.
    pub id: i64,
    /// Message text.
    pub message: String,
    /// Trigger name.
    pub triggered_by: String,
    /// Insert time.
    pub created_at: DateTime<Utc>,
}

impl From<ChangelogRow> for ChangelogEntry {
    fn from(row: ChangelogRow) -> Self {
        Self {
            id: format!("growth-{}", row.id),
            message: row.message,
            timestamp: row.created_at,
            triggered_by: if row.triggered_by == ChangeTrigger::System.as_str() {
                ChangeTrigger::System
            } else {
                ChangeTrigger::Growth
            },
        }
    }
}

fn growth_from_db(value: i16) -> GrowthLevel {
    GrowthLevel::new(u8::try_from(value.clamp(0, 100)).unwrap_or(0))
}

fn total_to_db(total: u64) -> i64 {
    i64::try_from(total).unwrap_or(i64::MAX)
}

/// Platform store over a `PostgreSQL` pool.
#[derive(Clone)]
pub struct PgPlatformStore {
    pool: PostgresPool,
}

impl PgPlatformStore {
    /// Wrap a connected pool. Migrations are expected to have run.
    pub const fn new(pool: PostgresPool) -> Self {
        Self { pool }
    }

    fn pg(&self) -> &PgPool {
        self.pool.pool()
    }

    /// Close the underlying pool, waiting for checked-out connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Insert the singleton row if missing and return the current state.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if a query fails.
    pub async fn ensure_initialized(&self, version: &str) -> Result<PlatformState, DbError> {
        let inserted = sqlx::query(
            r"INSERT INTO platform_state (id, version, total_interactions, growth_level, last_updated)
              VALUES (1, $1, 0, 0, now())
              ON CONFLICT (id) DO NOTHING",
        )
        .bind(version)
        .execute(self.pg())
        .await?;

        if inserted.rows_affected() > 0 {
            tracing::info!(version, "Platform state initialized");
        }

        self.platform_state().await
    }

    /// Read the singleton row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::StateNotFound`] if the row is missing, or
    /// [`DbError::Postgres`] if the query fails.
    pub async fn platform_state(&self) -> Result<PlatformState, DbError> {
        let row = sqlx::query_as::<_, PlatformStateRow>(
            r"SELECT version, total_interactions, growth_level, last_updated
              FROM platform_state
              WHERE id = 1",
        )
        .fetch_optional(self.pg())
        .await?;

        row.map(PlatformState::from).ok_or(DbError::StateNotFound)
    }

    /// Append an interaction and advance the singleton.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::StateNotFound`] if the singleton row is
    /// missing, or [`DbError::Postgres`] if a query fails. The atomic
    /// strategy rolls back the insert on any failure.
    pub async fn record_interaction(
        &self,
        new: &NewInteraction,
        policy: RecordingPolicy,
    ) -> Result<Recorded, DbError> {
        match policy.strategy {
            UpdateStrategy::Atomic => self.record_atomic(new, policy).await,
            UpdateStrategy::ReadModifyWrite => self.record_read_modify_write(new, policy).await,
        }
    }

    async fn record_atomic(
        &self,
        new: &NewInteraction,
        policy: RecordingPolicy,
    ) -> Result<Recorded, DbError> {
        let mut tx = self.pg().begin().await?;

        let interaction_id = insert_interaction(&mut tx, new).await?;

        let counters: Option<(i64, i16)> = sqlx::query_as(
            r"UPDATE platform_state
              SET total_interactions = total_interactions + 1,
                  last_updated = now()
              WHERE id = 1
              RETURNING total_interactions, growth_level",
        )
        .fetch_optional(&mut *tx)
        .await?;
        let (total, stored_growth) = counters.ok_or(DbError::StateNotFound)?;

        let total = u64::try_from(total).unwrap_or(0);
        let previous = growth_from_db(stored_growth);
        let growth = next_growth(policy.curve, previous, total);

        sqlx::query("UPDATE platform_state SET growth_level = $1 WHERE id = 1")
            .bind(i16::from(growth.value()))
            .execute(&mut *tx)
            .await?;

        log_milestones(&mut tx, previous, growth).await?;

        tx.commit().await?;

        Ok(Recorded {
            interaction_id,
            total_interactions: total,
            growth_level: growth,
            previous_growth: previous,
        })
    }

    async fn record_read_modify_write(
        &self,
        new: &NewInteraction,
        policy: RecordingPolicy,
    ) -> Result<Recorded, DbError> {
        let mut conn = self.pg().acquire().await?;

        let interaction_id = insert_interaction(&mut conn, new).await?;

        let current: PlatformState = sqlx::query_as::<_, PlatformStateRow>(
            r"SELECT version, total_interactions, growth_level, last_updated
              FROM platform_state
              WHERE id = 1",
        )
        .fetch_optional(&mut *conn)
        .await?
        .map(PlatformState::from)
        .ok_or(DbError::StateNotFound)?;
        let total = current.total_interactions.saturating_add(1);
        let growth = next_growth(policy.curve, current.growth_level, total);

        sqlx::query(
            r"UPDATE platform_state
              SET total_interactions = $1, growth_level = $2, last_updated = now()
              WHERE id = 1",
        )
        .bind(total_to_db(total))
        .bind(i16::from(growth.value()))
        .execute(&mut *conn)
        .await?;

        log_milestones(&mut conn, current.growth_level, growth).await?;

        Ok(Recorded {
            interaction_id,
            total_interactions: total,
            growth_level: growth,
            previous_growth: current.growth_level,
        })
    }

    /// Milestone entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn growth_changelog(&self, limit: u32) -> Result<Vec<ChangelogEntry>, DbError> {
        let rows = sqlx::query_as::<_, ChangelogRow>(
            r"SELECT id, message, triggered_by, created_at
              FROM platform_changelog
              ORDER BY id DESC
              LIMIT $1",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pg())
        .await?;

        Ok(rows.into_iter().map(ChangelogEntry::from).collect())
    }

    /// Number of stored interaction rows.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the query fails.
    pub async fn count_interactions(&self) -> Result<u64, DbError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_interactions")
            .fetch_one(self.pg())
            .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

async fn insert_interaction(
    conn: &mut PgConnection,
    new: &NewInteraction,
) -> Result<InteractionId, DbError> {
    let id = InteractionId::new();
    let coordinates = new.interaction.coordinates();

    sqlx::query(
        r"INSERT INTO user_interactions
              (id, interaction_type, x_coordinate, y_coordinate, session_id, created_at)
          VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(id.into_inner())
    .bind(new.interaction.kind().as_str())
    .bind(coordinates.x)
    .bind(coordinates.y)
    .bind(new.session_id.as_str())
    .bind(new.created_at)
    .execute(&mut *conn)
    .await?;

    tracing::debug!(
        interaction_id = %id,
        kind = %new.interaction.kind(),
        session_id = %new.session_id,
        "Inserted interaction"
    );

    Ok(id)
}

async fn log_milestones(
    conn: &mut PgConnection,
    previous: GrowthLevel,
    current: GrowthLevel,
) -> Result<(), DbError> {
    for reached in milestone::crossed(previous, current) {
        sqlx::query(
            r"INSERT INTO platform_changelog (message, triggered_by)
              VALUES ($1, $2)
              ON CONFLICT (message) DO NOTHING",
        )
        .bind(reached.message)
        .bind(ChangeTrigger::Growth.as_str())
        .execute(&mut *conn)
        .await?;
        tracing::info!(level = reached.level.value(), "growth milestone reached");
    }
    Ok(())
}
