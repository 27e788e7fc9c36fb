//! Shared type definitions for the EON living platform.
//!
//! This crate is the single source of truth for the types that cross the
//! wire between the browser client, the tracking API, and the store.
//! Types flow downstream to `TypeScript` via `ts-rs` so the front end
//! shares the same shapes.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifiers (interactions, sessions)
//! - [`interaction`] -- Interaction kinds and the tagged [`Interaction`] event
//! - [`platform`] -- Platform state singleton, growth level, changelog entries
//! - [`api`] -- Request and response bodies of the HTTP API

pub mod api;
pub mod ids;
pub mod interaction;
pub mod platform;

// Re-export all public types at crate root for convenience.
pub use api::{
    ChangelogResponse, ErrorResponse, HealthResponse, PlatformStateResponse,
    RecordInteractionRequest, RecordInteractionResponse,
};
pub use ids::{InteractionId, SessionId};
pub use interaction::{Interaction, InteractionKind, InteractionRecord, Point};
pub use platform::{ChangeTrigger, ChangelogEntry, GrowthLevel, PlatformState};

#[cfg(test)]
mod tests {
    //! Integration tests for type exports and `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // Calling export_all writes the `.ts` files into `bindings/`
        // relative to the crate root.
        use ts_rs::TS;

        let _ = crate::ids::InteractionId::export_all();
        let _ = crate::ids::SessionId::export_all();
        let _ = crate::interaction::Point::export_all();
        let _ = crate::interaction::InteractionKind::export_all();
        let _ = crate::platform::GrowthLevel::export_all();
        let _ = crate::platform::ChangelogEntry::export_all();
        let _ = crate::api::RecordInteractionRequest::export_all();
        let _ = crate::api::RecordInteractionResponse::export_all();
        let _ = crate::api::PlatformStateResponse::export_all();
        let _ = crate::api::ChangelogResponse::export_all();
        let _ = crate::api::HealthResponse::export_all();
        let _ = crate::api::ErrorResponse::export_all();
    }
}
