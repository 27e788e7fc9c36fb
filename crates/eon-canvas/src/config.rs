//! Tunable constants for the canvas components.
//!
//! Defaults reproduce the look of the live page at 60 frames per second.

use std::time::Duration;

use crate::color::Rgb;

/// Particle field tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Pairs closer than this are joined by a line.
    pub connection_distance: f64,
    /// Line alpha at zero distance.
    pub connection_alpha: f64,
    /// Line width.
    pub connection_width: f64,
    /// Line colour.
    pub connection_color: Rgb,
    /// Radius of the pointer's repulsion zone.
    pub mouse_radius: f64,
    /// Repulsion strength at the pointer.
    pub repulsion: f64,
    /// Per-frame velocity multiplier.
    pub friction: f64,
    /// Fraction of speed kept (and reversed) on a wall hit.
    pub restitution: f64,
    /// Frames a particle lives.
    pub lifetime_frames: u32,
    /// Spawn velocity is drawn from `-max_spawn_speed..max_spawn_speed` per axis.
    pub max_spawn_speed: f64,
    /// Smallest spawn radius.
    pub min_radius: f64,
    /// Spawn radius is drawn from `min_radius..max_radius`.
    pub max_radius: f64,
    /// Live particle cap. The oldest particle is dropped past it.
    pub max_particles: usize,
    /// Particles in a celebration burst.
    pub burst_count: u32,
    /// Delay between successive burst particles.
    pub burst_stagger: Duration,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            connection_distance: 100.0,
            connection_alpha: 0.1,
            connection_width: 0.5,
            connection_color: Rgb::from_hex(0x0093_c5fd),
            mouse_radius: 100.0,
            repulsion: 0.3,
            friction: 0.96,
            restitution: 0.5,
            lifetime_frames: 120,
            max_spawn_speed: 2.0,
            min_radius: 1.0,
            max_radius: 4.0,
            max_particles: 1_000,
            burst_count: 50,
            burst_stagger: Duration::from_millis(50),
        }
    }
}

/// Cursor follower tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorConfig {
    /// Fraction of the remaining distance the dot covers per frame.
    pub dot_smoothing: f64,
    /// Fraction of the remaining distance the ring covers per frame.
    pub ring_smoothing: f64,
    /// Below this distance an element snaps onto the pointer.
    pub snap_epsilon: f64,
    /// Dot radius.
    pub dot_radius: f64,
    /// Ring radius at scale 1.
    pub ring_radius: f64,
    /// Ring scale while hovering an interactive element.
    pub hover_scale: f64,
    /// Ring colour at rest.
    pub ring_color: Rgb,
    /// Ring colour while hovering.
    pub hover_color: Rgb,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            dot_smoothing: 1.0 / 6.0,
            ring_smoothing: 1.0 / 8.0,
            snap_epsilon: 0.1,
            dot_radius: 4.0,
            ring_radius: 16.0,
            hover_scale: 1.8,
            ring_color: Rgb::from_hex(0x0067_e8f9),
            hover_color: Rgb::from_hex(0x00c0_84fc),
        }
    }
}
