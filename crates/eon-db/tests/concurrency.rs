//! Concurrency tests for the counter update strategies.
//!
//! Run against the in-memory store with a simulated latency on a paused
//! Tokio clock, so the interleaving of two concurrent recordings is
//! deterministic: both read the counter before either writes it.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use chrono::Utc;
use eon_core::UpdateStrategy;
use eon_db::{MemoryStore, NewInteraction, PlatformStore, RecordingPolicy};
use eon_types::{GrowthLevel, Interaction, PlatformState, Point, SessionId};

const LATENCY: Duration = Duration::from_millis(20);

fn click() -> NewInteraction {
    NewInteraction {
        interaction: Interaction::Click(Point::new(1.0, 2.0)),
        session_id: SessionId::new("race"),
        created_at: Utc::now(),
    }
}

async fn store_at(total: u64) -> PlatformStore {
    let store = MemoryStore::with_latency(LATENCY);
    store
        .restore_state(PlatformState {
            total_interactions: total,
            growth_level: GrowthLevel::ZERO,
            ..PlatformState::initial("1.0.3", Utc::now())
        })
        .await;
    PlatformStore::from(store)
}

fn policy(strategy: UpdateStrategy) -> RecordingPolicy {
    RecordingPolicy {
        strategy,
        ..RecordingPolicy::default()
    }
}

#[tokio::test(start_paused = true)]
async fn read_modify_write_loses_a_concurrent_update() {
    let store = store_at(10).await;
    let rmw = policy(UpdateStrategy::ReadModifyWrite);

    let (first, second) = (click(), click());
    let (a, b) = tokio::join!(
        store.record_interaction(&first, rmw),
        store.record_interaction(&second, rmw),
    );

    assert_eq!(a.unwrap().total_interactions, 11);
    assert_eq!(b.unwrap().total_interactions, 11);

    let state = store.platform_state().await.unwrap();
    assert_eq!(state.total_interactions, 11, "second write overwrote the first");
    assert_eq!(store.count_interactions().await.unwrap(), 2);
}

#[tokio::test(start_paused = true)]
async fn atomic_increment_keeps_both_updates() {
    let store = store_at(10).await;
    let atomic = policy(UpdateStrategy::Atomic);

    let (first, second) = (click(), click());
    let (a, b) = tokio::join!(
        store.record_interaction(&first, atomic),
        store.record_interaction(&second, atomic),
    );

    let mut totals = vec![
        a.unwrap().total_interactions,
        b.unwrap().total_interactions,
    ];
    totals.sort_unstable();
    assert_eq!(totals, vec![11, 12]);

    let state = store.platform_state().await.unwrap();
    assert_eq!(state.total_interactions, 12);
}

#[tokio::test(start_paused = true)]
async fn atomic_total_matches_row_count_under_load() {
    let store = store_at(0).await;
    let atomic = policy(UpdateStrategy::Atomic);

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                let new = click();
                store.record_interaction(&new, atomic).await
            })
        })
        .collect();
    for result in futures::future::join_all(handles).await {
        assert!(result.unwrap().is_ok());
    }

    let state = store.platform_state().await.unwrap();
    assert_eq!(state.total_interactions, 50);
    assert_eq!(store.count_interactions().await.unwrap(), 50);
    assert_eq!(state.growth_level, GrowthLevel::MAX);
}
