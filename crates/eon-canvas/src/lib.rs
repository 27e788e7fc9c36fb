//! Headless simulation of the platform's decorative canvas.
//!
//! Two components are advanced once per animation frame by the host's
//! redraw callback:
//!
//! - [`CursorFollower`] -- a dot and a ring easing toward the pointer
//! - [`ParticleField`] -- short-lived particles with mouse repulsion,
//!   friction, wall bounces, fade-out, and proximity lines
//!
//! Neither touches pixels directly. They draw through the [`Canvas`]
//! trait so a browser bridge, a native renderer, or the
//! [`RecordingCanvas`] used in tests can sit behind it.
//!
//! # Modules
//!
//! - [`canvas`] -- [`Canvas`] trait and [`RecordingCanvas`]
//! - [`color`] -- RGB/RGBA colours and the per-interaction palette
//! - [`config`] -- Tunable constants for both components
//! - [`cursor`] -- [`CursorFollower`]
//! - [`particle`] -- Single-particle physics
//! - [`field`] -- [`ParticleField`]

pub mod canvas;
pub mod color;
pub mod config;
pub mod cursor;
pub mod field;
pub mod particle;

pub use canvas::{Canvas, DrawCommand, RecordingCanvas};
pub use color::{Rgb, Rgba};
pub use config::{CursorConfig, FieldConfig};
pub use cursor::{CursorFollower, RingStyle};
pub use field::ParticleField;
pub use particle::Particle;
