//! The particle field: spawning, scheduled bursts, and the per-frame
//! update/draw pass.
//!
//! The particle list is only mutated from [`ParticleField::spawn`] and
//! [`ParticleField::frame`], both called from the host's single UI
//! thread, so no synchronisation is needed.

use std::collections::VecDeque;
use std::time::Duration;

use eon_types::{InteractionKind, Point};
use rand::Rng;

use crate::canvas::Canvas;
use crate::color::color_for;
use crate::config::FieldConfig;
use crate::particle::Particle;

/// A particle waiting for its release time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScheduledSpawn {
    due: Duration,
    kind: InteractionKind,
}

/// A growing and shrinking set of decorative particles.
#[derive(Debug, Clone)]
pub struct ParticleField {
    config: FieldConfig,
    particles: Vec<Particle>,
    pending: VecDeque<ScheduledSpawn>,
    pointer: Point,
    width: f64,
    height: f64,
}

impl ParticleField {
    /// An empty field covering a `width` x `height` canvas.
    pub fn new(config: FieldConfig, width: f64, height: f64) -> Self {
        Self {
            config,
            particles: Vec::new(),
            pending: VecDeque::new(),
            pointer: Point::ORIGIN,
            width,
            height,
        }
    }

    /// Track the canvas size.
    pub const fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Track the pointer for repulsion.
    pub const fn set_pointer(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    /// Spawn one particle coloured for `kind` at `position`.
    pub fn spawn(&mut self, position: Point, kind: InteractionKind, rng: &mut impl Rng) {
        if self.config.max_particles == 0 {
            return;
        }
        if self.particles.len() >= self.config.max_particles {
            self.particles.remove(0);
        }
        self.particles
            .push(Particle::spawn(position, color_for(kind), &self.config, rng));
    }

    /// Queue a celebration burst starting at `now`: `burst_count` click
    /// particles at random positions, one every `burst_stagger`.
    pub fn schedule_burst(&mut self, now: Duration) {
        for i in 0..self.config.burst_count {
            let offset = self.config.burst_stagger.saturating_mul(i);
            self.pending.push_back(ScheduledSpawn {
                due: now.saturating_add(offset),
                kind: InteractionKind::Click,
            });
        }
        self.pending.make_contiguous().sort_by_key(|s| s.due);
        tracing::debug!(
            count = self.config.burst_count,
            pending = self.pending.len(),
            "celebration burst scheduled"
        );
    }

    /// Render one frame at host time `now`.
    ///
    /// Releases due scheduled spawns, clears the canvas, draws the
    /// proximity lines, then advances and draws every particle. A
    /// particle whose life reaches zero is removed in the same frame.
    pub fn frame(&mut self, now: Duration, canvas: &mut impl Canvas, rng: &mut impl Rng) {
        self.width = canvas.width();
        self.height = canvas.height();
        self.release_due(now, rng);

        canvas.clear();
        self.draw_connections(canvas);

        let pointer = self.pointer;
        let bounds = (self.width, self.height);
        let config = &self.config;
        self.particles.retain_mut(|particle| {
            particle.advance(pointer, bounds, config);
            if particle.is_alive() {
                canvas.fill_circle(particle.position, particle.radius, particle.fill());
                true
            } else {
                false
            }
        });
    }

    /// Live particles.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether no particles are alive.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of scheduled spawns not yet released.
    pub fn pending_spawns(&self) -> usize {
        self.pending.len()
    }

    fn release_due(&mut self, now: Duration, rng: &mut impl Rng) {
        while let Some(next) = self.pending.front().copied() {
            if next.due > now {
                break;
            }
            self.pending.pop_front();
            let position = Point::new(
                random_coordinate(self.width, rng),
                random_coordinate(self.height, rng),
            );
            self.spawn(position, next.kind, rng);
        }
    }

    fn draw_connections(&self, canvas: &mut impl Canvas) {
        let threshold = self.config.connection_distance;
        if threshold <= 0.0 {
            return;
        }
        for (i, a) in self.particles.iter().enumerate() {
            for b in self.particles.iter().skip(i.saturating_add(1)) {
                let distance = a.position.distance_to(b.position);
                if distance < threshold {
                    let opacity = 1.0 - distance / threshold;
                    canvas.stroke_line(
                        a.position,
                        b.position,
                        self.config
                            .connection_color
                            .with_alpha(opacity * self.config.connection_alpha),
                        self.config.connection_width,
                    );
                }
            }
        }
    }
}

fn random_coordinate(extent: f64, rng: &mut impl Rng) -> f64 {
    if extent > 0.0 {
        rng.random_range(0.0..extent)
    } else {
        0.0
    }
}
