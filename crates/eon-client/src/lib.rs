//! Client half of the EON living platform.
//!
//! Hosts feed input events and frame timestamps to a [`LivingPlatform`],
//! which gives immediate local feedback and reports every interaction to
//! the tracking service in the background.
//!
//! # Modules
//!
//! - [`config`] -- [`ClientConfig`] with YAML parsing
//! - [`session`] -- Local key/value storage and the session identifier
//! - [`recorder`] -- Local count, growth estimate, and milestone log
//! - [`reporter`] -- Best-effort, at-most-once delivery to the service
//! - [`theme`] -- Theme overrides unlocked by milestones
//! - [`platform`] -- [`LivingPlatform`] frame driver
//!
//! # Reporting contract
//!
//! Each interaction is sent once, on its own task, with no retry. A
//! successful response overwrites the displayed growth with the
//! service's value on the next frame. A failure is logged at `debug` and
//! the local estimate carries on.

pub mod config;
pub mod error;
pub mod platform;
pub mod recorder;
pub mod reporter;
pub mod session;
pub mod theme;

pub use config::ClientConfig;
pub use error::ClientError;
pub use platform::{HostEvent, LivingPlatform};
pub use recorder::{InteractionRecorder, Recorded};
pub use reporter::{ReportOutcome, Reporter};
pub use session::LocalStorage;
pub use theme::Theme;
