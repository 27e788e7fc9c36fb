//! Shared application state for the HTTP API.
//!
//! [`AppState`] replaces the module-level database client and constants
//! a script-style server would keep: handlers receive it through Axum's
//! `State` extractor.

use eon_core::EonConfig;
use eon_db::{PlatformStore, RecordingPolicy};

/// Number of persisted milestone entries returned after the seed entries.
pub const CHANGELOG_LIMIT: u32 = 20;

/// Context shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Persistence handle.
    pub store: PlatformStore,
    /// Curve and counter strategy applied to each recording.
    pub policy: RecordingPolicy,
    /// Experiment names listed by the state endpoint.
    pub active_experiments: Vec<String>,
    /// Maximum persisted changelog entries returned.
    pub changelog_limit: u32,
}

impl AppState {
    /// Build state with default policy and no experiments.
    pub fn new(store: PlatformStore) -> Self {
        Self {
            store,
            policy: RecordingPolicy::default(),
            active_experiments: Vec::new(),
            changelog_limit: CHANGELOG_LIMIT,
        }
    }

    /// Build state from loaded configuration around an opened store.
    pub fn from_config(store: PlatformStore, config: &EonConfig) -> Self {
        Self {
            store,
            policy: RecordingPolicy {
                curve: config.growth,
                strategy: config.store.update_strategy,
            },
            active_experiments: config.platform.active_experiments.clone(),
            changelog_limit: CHANGELOG_LIMIT,
        }
    }

    /// Replace the recording policy.
    #[must_use]
    pub fn with_policy(mut self, policy: RecordingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the advertised experiment list.
    #[must_use]
    pub fn with_experiments(mut self, experiments: Vec<String>) -> Self {
        self.active_experiments = experiments;
        self
    }
}
