//! Request and response bodies of the tracking API.
//!
//! Field names follow the JSON contract the browser client speaks
//! (`camelCase`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{InteractionId, SessionId};
use crate::interaction::{Interaction, InteractionKind, Point};
use crate::platform::{ChangelogEntry, GrowthLevel, PlatformState};

/// Body of `POST /api/interactions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct RecordInteractionRequest {
    /// The interaction kind.
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    /// Pointer position or scroll offset.
    pub coordinates: Point,
    /// The reporting session.
    pub session_id: SessionId,
    /// Client capture time. The server clock is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl RecordInteractionRequest {
    /// Build a request body for a tagged event.
    pub fn new(
        interaction: &Interaction,
        session_id: SessionId,
        timestamp: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            kind: interaction.kind(),
            coordinates: interaction.coordinates(),
            session_id,
            timestamp,
        }
    }

    /// The tagged event this body describes.
    pub const fn interaction(&self) -> Interaction {
        Interaction::from_parts(self.kind, self.coordinates)
    }
}

/// Successful response of `POST /api/interactions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct RecordInteractionResponse {
    /// Always `true` for this shape.
    pub success: bool,
    /// Identifier of the stored row.
    pub interaction_id: InteractionId,
    /// Authoritative growth after this interaction.
    pub growth_level: GrowthLevel,
    /// Total interactions after this interaction.
    #[ts(type = "number")]
    pub total_interactions: u64,
}

/// Response of `GET /api/platform/state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct PlatformStateResponse {
    /// Platform version string.
    pub version: String,
    /// Total recorded interactions.
    #[ts(type = "number")]
    pub total_interactions: u64,
    /// Current growth.
    pub growth_level: GrowthLevel,
    /// When the state last changed.
    pub last_updated: DateTime<Utc>,
    /// Experiments currently running on the page.
    pub active_experiments: Vec<String>,
}

impl PlatformStateResponse {
    /// Project a stored state together with the configured experiments.
    pub fn from_state(state: PlatformState, active_experiments: Vec<String>) -> Self {
        Self {
            version: state.version,
            total_interactions: state.total_interactions,
            growth_level: state.growth_level,
            last_updated: state.last_updated,
            active_experiments,
        }
    }
}

/// Response of `GET /api/platform/changelog`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ChangelogResponse {
    /// Entries, seed entries first.
    pub changelog: Vec<ChangelogEntry>,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HealthResponse {
    /// Always `"OK"` while the process serves requests.
    pub status: String,
    /// Server time.
    pub timestamp: DateTime<Utc>,
}

/// Error envelope returned by every endpoint on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// What went wrong.
    pub error: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_browser_body() {
        let body = r#"{"type":"click","coordinates":{"x":10,"y":20},"sessionId":"s1"}"#;
        let parsed: Result<RecordInteractionRequest, _> = serde_json::from_str(body);
        assert!(parsed.is_ok());
        if let Ok(request) = parsed {
            assert_eq!(request.interaction(), Interaction::Click(Point::new(10.0, 20.0)));
            assert_eq!(request.session_id.as_str(), "s1");
            assert!(request.timestamp.is_none());
        }
    }

    #[test]
    fn request_rejects_unknown_kind() {
        let body = r#"{"type":"drag","coordinates":{"x":0,"y":0},"sessionId":"s1"}"#;
        let parsed: Result<RecordInteractionRequest, _> = serde_json::from_str(body);
        assert!(parsed.is_err());
    }

    #[test]
    fn response_field_names() {
        let response = RecordInteractionResponse {
            success: true,
            interaction_id: InteractionId::new(),
            growth_level: GrowthLevel::new(3),
            total_interactions: 1,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["growthLevel"], 3);
        assert_eq!(json["totalInteractions"], 1);
        assert_eq!(json["success"], true);
    }
}
