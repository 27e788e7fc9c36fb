//! Growth rules and configuration for the EON living platform.
//!
//! Both the tracking service and the browser-side recorder derive the
//! growth level from the same [`GrowthCurve`], so the client's local
//! estimate and the server's authoritative value agree whenever they
//! have seen the same number of interactions.
//!
//! # Modules
//!
//! - [`growth`] -- [`GrowthCurve`] mapping interaction totals to a [`GrowthLevel`]
//! - [`milestone`] -- Growth milestones, their messages and theme effects
//! - [`changelog`] -- Bounded change log and the seed changelog entries
//! - [`config`] -- YAML configuration with environment overrides
//!
//! [`GrowthLevel`]: eon_types::GrowthLevel

pub mod changelog;
pub mod config;
pub mod growth;
pub mod milestone;

pub use changelog::{ChangeLog, ChangeLogItem, seed_entries};
pub use config::{ConfigError, EonConfig, UpdateStrategy};
pub use growth::GrowthCurve;
pub use milestone::{MILESTONES, Milestone, ThemeEffect};
