//! In-process platform store.
//!
//! Backs development runs and tests. An optional simulated latency is
//! awaited before every call (and between the read and the write of the
//! read-modify-write strategy) so request interleavings resemble those
//! against a remote database.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use eon_core::UpdateStrategy;
use eon_core::milestone;
use eon_types::{
    ChangeTrigger, ChangelogEntry, GrowthLevel, InteractionId, InteractionRecord, PlatformState,
    SessionId,
};
use tokio::sync::Mutex;

use crate::error::DbError;
use crate::store::{NewInteraction, Recorded, RecordingPolicy, next_growth};

#[derive(Debug, Default)]
struct Tables {
    state: Option<PlatformState>,
    interactions: Vec<InteractionRecord>,
    changelog: Vec<ChangelogEntry>,
}

impl Tables {
    fn append(&mut self, new: &NewInteraction) -> InteractionId {
        let id = InteractionId::new();
        self.interactions.push(InteractionRecord {
            id,
            interaction: new.interaction,
            session_id: new.session_id.clone(),
            created_at: new.created_at,
        });
        id
    }

    fn log_milestones(&mut self, previous: GrowthLevel, current: GrowthLevel, now: DateTime<Utc>) {
        for reached in milestone::crossed(previous, current) {
            if self.changelog.iter().any(|e| e.message == reached.message) {
                continue;
            }
            let id = self.changelog.len().saturating_add(1);
            self.changelog.push(ChangelogEntry {
                id: format!("growth-{id}"),
                message: reached.message.to_owned(),
                timestamp: now,
                triggered_by: ChangeTrigger::Growth,
            });
            tracing::info!(level = reached.level.value(), "growth milestone reached");
        }
    }
}

/// Platform store held in process memory.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    latency: Duration,
}

impl MemoryStore {
    /// An empty store with no latency.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store that waits `latency` before each operation.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            tables: Arc::default(),
            latency,
        }
    }

    /// Overwrite the singleton row, e.g. to resume from an exported state.
    pub async fn restore_state(&self, state: PlatformState) {
        self.tables.lock().await.state = Some(state);
    }

    /// Create the singleton row if it is missing and return the current state.
    pub async fn ensure_initialized(&self, version: &str) -> PlatformState {
        let mut tables = self.tables.lock().await;
        if let Some(state) = &tables.state {
            return state.clone();
        }
        let state = PlatformState::initial(version, Utc::now());
        tables.state = Some(state.clone());
        tracing::info!(version, "Platform state initialized");
        state
    }

    /// Read the singleton row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::StateNotFound`] if the platform was never initialized.
    pub async fn platform_state(&self) -> Result<PlatformState, DbError> {
        self.simulate_latency().await;
        self.tables
            .lock()
            .await
            .state
            .clone()
            .ok_or(DbError::StateNotFound)
    }

    /// Append an interaction and advance the singleton.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::StateNotFound`] if the platform was never initialized.
    pub async fn record_interaction(
        &self,
        new: &NewInteraction,
        policy: RecordingPolicy,
    ) -> Result<Recorded, DbError> {
        self.simulate_latency().await;
        match policy.strategy {
            UpdateStrategy::Atomic => {
                let mut tables = self.tables.lock().await;
                let previous = tables.state.clone().ok_or(DbError::StateNotFound)?;
                let interaction_id = tables.append(new);
                let now = Utc::now();
                let total = previous.total_interactions.saturating_add(1);
                let growth = next_growth(policy.curve, previous.growth_level, total);
                tables.state = Some(PlatformState {
                    total_interactions: total,
                    growth_level: growth,
                    last_updated: now,
                    ..previous
                });
                tables.log_milestones(previous.growth_level, growth, now);
                Ok(Recorded {
                    interaction_id,
                    total_interactions: total,
                    growth_level: growth,
                    previous_growth: previous.growth_level,
                })
            }
            UpdateStrategy::ReadModifyWrite => {
                let (interaction_id, snapshot) = {
                    let mut tables = self.tables.lock().await;
                    let snapshot = tables.state.clone().ok_or(DbError::StateNotFound)?;
                    (tables.append(new), snapshot)
                };

                self.simulate_latency().await;

                let now = Utc::now();
                let total = snapshot.total_interactions.saturating_add(1);
                let growth = next_growth(policy.curve, snapshot.growth_level, total);
                let mut tables = self.tables.lock().await;
                tables.state = Some(PlatformState {
                    total_interactions: total,
                    growth_level: growth,
                    last_updated: now,
                    ..snapshot
                });
                tables.log_milestones(snapshot.growth_level, growth, now);
                Ok(Recorded {
                    interaction_id,
                    total_interactions: total,
                    growth_level: growth,
                    previous_growth: snapshot.growth_level,
                })
            }
        }
    }

    /// Milestone entries, newest first.
    pub async fn growth_changelog(&self, limit: u32) -> Vec<ChangelogEntry> {
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        self.tables
            .lock()
            .await
            .changelog
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Number of stored interaction rows.
    pub async fn count_interactions(&self) -> u64 {
        let len = self.tables.lock().await.interactions.len();
        u64::try_from(len).unwrap_or(u64::MAX)
    }

    /// Rows recorded for one session, oldest first.
    pub async fn interactions_for(&self, session: &SessionId) -> Vec<InteractionRecord> {
        self.tables
            .lock()
            .await
            .interactions
            .iter()
            .filter(|r| &r.session_id == session)
            .cloned()
            .collect()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use eon_core::GrowthCurve;
    use eon_types::{Interaction, Point};

    use super::*;

    fn click(session: &str) -> NewInteraction {
        NewInteraction {
            interaction: Interaction::Click(Point::new(10.0, 20.0)),
            session_id: SessionId::new(session),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn record_before_init_fails() {
        let store = MemoryStore::new();
        let result = store
            .record_interaction(&click("s1"), RecordingPolicy::default())
            .await;
        assert!(matches!(result, Err(DbError::StateNotFound)));
        assert_eq!(store.count_interactions().await, 0);
    }

    #[tokio::test]
    async fn initialization_is_idempotent() {
        let store = MemoryStore::new();
        let first = store.ensure_initialized("1.0.3").await;
        let second = store.ensure_initialized("9.9.9").await;
        assert_eq!(first, second);
        assert_eq!(second.version, "1.0.3");
    }

    #[tokio::test]
    async fn sequential_recordings_count_exactly() {
        for strategy in [UpdateStrategy::Atomic, UpdateStrategy::ReadModifyWrite] {
            let store = MemoryStore::new();
            store.ensure_initialized("1.0.3").await;
            let policy = RecordingPolicy {
                strategy,
                ..RecordingPolicy::default()
            };
            for n in 1..=25_u64 {
                let recorded = store.record_interaction(&click("s1"), policy).await;
                assert_eq!(recorded.map(|r| r.total_interactions).ok(), Some(n));
            }
            assert_eq!(store.count_interactions().await, 25);
            let state = store.platform_state().await.ok();
            assert_eq!(state.map(|s| s.total_interactions), Some(25));
        }
    }

    #[tokio::test]
    async fn sqrt_curve_first_click_is_three() {
        let store = MemoryStore::new();
        store.ensure_initialized("1.0.3").await;
        let policy = RecordingPolicy {
            curve: GrowthCurve::SqrtScaled { factor: 3 },
            strategy: UpdateStrategy::Atomic,
        };
        let recorded = store.record_interaction(&click("s1"), policy).await;
        assert!(recorded.is_ok());
        if let Ok(recorded) = recorded {
            assert_eq!(recorded.growth_level.value(), 3);
            assert_eq!(recorded.total_interactions, 1);
            assert_eq!(recorded.previous_growth, GrowthLevel::ZERO);
        }
    }

    #[tokio::test]
    async fn milestones_logged_once_newest_first() {
        let store = MemoryStore::new();
        store.ensure_initialized("1.0.3").await;
        for _ in 0..25 {
            let _ = store
                .record_interaction(&click("s1"), RecordingPolicy::default())
                .await;
        }
        // 25 of 50 -> 50%: milestones 20 and 40.
        let entries = store.growth_changelog(10).await;
        let messages: Vec<&str> = entries.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Adaptive color system activated",
                "Canvas ecosystem expanding with user interactions",
            ]
        );
        assert!(entries.iter().all(|e| e.triggered_by == ChangeTrigger::Growth));
        assert_eq!(store.growth_changelog(1).await.len(), 1);
    }

    #[tokio::test]
    async fn rows_are_grouped_by_session() {
        let store = MemoryStore::new();
        store.ensure_initialized("1.0.3").await;
        let policy = RecordingPolicy::default();
        let _ = store.record_interaction(&click("a"), policy).await;
        let _ = store.record_interaction(&click("b"), policy).await;
        let _ = store.record_interaction(&click("a"), policy).await;
        assert_eq!(store.interactions_for(&SessionId::new("a")).await.len(), 2);
    }
}
