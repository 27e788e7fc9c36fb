//! Endpoint handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/interactions` | Record one interaction |
//! | `GET` | `/api/platform/state` | Current platform state |
//! | `GET` | `/api/platform/changelog` | Seed entries plus crossed milestones |
//! | `GET` | `/health` | Liveness probe |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chrono::Utc;
use eon_core::seed_entries;
use eon_db::NewInteraction;
use eon_types::{
    ChangelogResponse, HealthResponse, PlatformStateResponse, RecordInteractionRequest,
    RecordInteractionResponse,
};

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /api/interactions
// ---------------------------------------------------------------------------

/// Append an interaction and return the updated growth level.
///
/// A missing `timestamp` defaults to the server clock.
///
/// # Errors
///
/// Returns [`ApiError::BadRequest`] for a malformed body or an invalid
/// session identifier, and [`ApiError::Store`] if recording fails.
pub async fn record_interaction(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RecordInteractionRequest>, JsonRejection>,
) -> Result<Json<RecordInteractionResponse>, ApiError> {
    let Json(request) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    if !request.session_id.is_valid() {
        return Err(ApiError::BadRequest(String::from(
            "sessionId must be a non-empty token of at most 128 bytes",
        )));
    }

    tracing::debug!(
        kind = %request.kind,
        session_id = %request.session_id,
        "Recording interaction"
    );

    let new = NewInteraction {
        interaction: request.interaction(),
        session_id: request.session_id,
        created_at: request.timestamp.unwrap_or_else(Utc::now),
    };
    let recorded = state.store.record_interaction(&new, state.policy).await?;

    if recorded.growth_level != recorded.previous_growth {
        tracing::info!(
            total = recorded.total_interactions,
            growth = recorded.growth_level.value(),
            previous = recorded.previous_growth.value(),
            "Growth level advanced"
        );
    }

    Ok(Json(RecordInteractionResponse {
        success: true,
        interaction_id: recorded.interaction_id,
        growth_level: recorded.growth_level,
        total_interactions: recorded.total_interactions,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/platform/state
// ---------------------------------------------------------------------------

/// Return the singleton platform state and the active experiment names.
///
/// # Errors
///
/// Returns [`ApiError::StateUnavailable`] if the store cannot be read or
/// the platform was never initialized.
pub async fn platform_state(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PlatformStateResponse>, ApiError> {
    let current = state
        .store
        .platform_state()
        .await
        .map_err(ApiError::StateUnavailable)?;
    Ok(Json(PlatformStateResponse::from_state(
        current,
        state.active_experiments.clone(),
    )))
}

// ---------------------------------------------------------------------------
// GET /api/platform/changelog
// ---------------------------------------------------------------------------

/// Return the seed entries followed by persisted milestones, newest first.
///
/// Seed timestamps are relative to the time of the request.
///
/// # Errors
///
/// Returns [`ApiError::ChangelogUnavailable`] if the store cannot be read.
pub async fn changelog(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChangelogResponse>, ApiError> {
    let mut changelog = seed_entries(Utc::now());
    let growth = state
        .store
        .growth_changelog(state.changelog_limit)
        .await
        .map_err(ApiError::ChangelogUnavailable)?;
    changelog.extend(growth);
    Ok(Json(ChangelogResponse { changelog }))
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe. Does not touch the store.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("OK"),
        timestamp: Utc::now(),
    })
}
