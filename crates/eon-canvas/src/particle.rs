//! Single-particle state and per-frame physics.

use eon_types::Point;
use rand::Rng;

use crate::color::{Rgb, Rgba};
use crate::config::FieldConfig;

/// A short-lived decorative particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position in canvas pixels.
    pub position: Point,
    /// Velocity in pixels per frame.
    pub velocity: Point,
    /// Draw radius.
    pub radius: f64,
    /// Base colour.
    pub color: Rgb,
    /// Frames left to live.
    pub life: u32,
    /// Opacity, `life / lifetime`.
    pub alpha: f64,
    lifetime: u32,
}

impl Particle {
    /// A particle at `position` with random velocity and radius.
    pub fn spawn(position: Point, color: Rgb, config: &FieldConfig, rng: &mut impl Rng) -> Self {
        let speed = config.max_spawn_speed;
        let velocity = if speed > 0.0 {
            Point::new(rng.random_range(-speed..speed), rng.random_range(-speed..speed))
        } else {
            Point::ORIGIN
        };
        let radius = if config.max_radius > config.min_radius {
            rng.random_range(config.min_radius..config.max_radius)
        } else {
            config.min_radius
        };
        Self::new(position, velocity, radius, color, config.lifetime_frames)
    }

    /// A particle with explicit motion.
    pub fn new(position: Point, velocity: Point, radius: f64, color: Rgb, lifetime: u32) -> Self {
        Self {
            position,
            velocity,
            radius,
            color,
            life: lifetime,
            alpha: if lifetime == 0 { 0.0 } else { 1.0 },
            lifetime,
        }
    }

    /// Whether the particle is still visible.
    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Fill colour at the current opacity.
    pub const fn fill(&self) -> Rgba {
        self.color.with_alpha(self.alpha)
    }

    /// Advance one frame: pointer repulsion, motion, friction, wall
    /// bounce, and fade.
    pub fn advance(&mut self, pointer: Point, bounds: (f64, f64), config: &FieldConfig) {
        let dx = self.position.x - pointer.x;
        let dy = self.position.y - pointer.y;
        let distance = dx.hypot(dy);
        if distance > 0.0 && distance < config.mouse_radius {
            let force = (config.mouse_radius - distance) / config.mouse_radius;
            self.velocity.x += dx / distance * force * config.repulsion;
            self.velocity.y += dy / distance * force * config.repulsion;
        }

        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;

        self.velocity.x *= config.friction;
        self.velocity.y *= config.friction;

        let (width, height) = bounds;
        if self.position.x < 0.0 || self.position.x > width {
            self.velocity.x *= -config.restitution;
        }
        if self.position.y < 0.0 || self.position.y > height {
            self.velocity.y *= -config.restitution;
        }
        self.position.x = self.position.x.clamp(0.0, width.max(0.0));
        self.position.y = self.position.y.clamp(0.0, height.max(0.0));

        self.life = self.life.saturating_sub(1);
        self.alpha = if self.lifetime == 0 {
            0.0
        } else {
            f64::from(self.life) / f64::from(self.lifetime)
        };
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const FAR: Point = Point::new(-1000.0, -1000.0);
    const BOUNDS: (f64, f64) = (800.0, 600.0);

    fn still(at: Point) -> Particle {
        Particle::new(at, Point::ORIGIN, 2.0, Rgb::from_hex(0x00ff_ffff), 120)
    }

    #[test]
    fn alpha_hits_zero_with_life() {
        let config = FieldConfig::default();
        let mut p = still(Point::new(400.0, 300.0));
        for frame in 1..=120_u32 {
            p.advance(FAR, BOUNDS, &config);
            assert_eq!(p.life, 120 - frame);
            assert_eq!(p.alpha > 0.0, p.life > 0, "frame {frame}");
        }
        assert!(!p.is_alive());
        assert!(p.alpha.abs() < f64::EPSILON);
    }

    #[test]
    fn pointer_pushes_particle_away() {
        let config = FieldConfig::default();
        let mut p = still(Point::new(410.0, 300.0));
        p.advance(Point::new(400.0, 300.0), BOUNDS, &config);
        assert!(p.velocity.x > 0.0);
        assert!(p.velocity.y.abs() < f64::EPSILON);
        assert!(p.position.x > 410.0);
    }

    #[test]
    fn pointer_on_top_applies_no_force() {
        let config = FieldConfig::default();
        let mut p = still(Point::new(400.0, 300.0));
        p.advance(Point::new(400.0, 300.0), BOUNDS, &config);
        assert!(p.velocity.x.is_finite() && p.velocity.y.is_finite());
        assert_eq!(p.position, Point::new(400.0, 300.0));
    }

    #[test]
    fn friction_damps_velocity() {
        let config = FieldConfig::default();
        let mut p = Particle::new(Point::new(400.0, 300.0), Point::new(1.0, 0.0), 2.0, Rgb::from_hex(0), 120);
        p.advance(FAR, BOUNDS, &config);
        assert!((p.velocity.x - 0.96).abs() < 1e-12);
        assert!((p.position.x - 401.0).abs() < 1e-12);
    }

    #[test]
    fn wall_hit_reverses_and_clamps() {
        let config = FieldConfig::default();
        let mut p = Particle::new(Point::new(799.0, 300.0), Point::new(4.0, 0.0), 2.0, Rgb::from_hex(0), 120);
        p.advance(FAR, BOUNDS, &config);
        assert!((p.position.x - 800.0).abs() < f64::EPSILON);
        // 4.0 * 0.96 * -0.5
        assert!((p.velocity.x + 1.92).abs() < 1e-12);
    }

    #[test]
    fn spawn_stays_within_configured_ranges() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let p = Particle::spawn(Point::ORIGIN, Rgb::from_hex(0), &config, &mut rng);
            assert!(p.velocity.x >= -2.0 && p.velocity.x < 2.0);
            assert!(p.velocity.y >= -2.0 && p.velocity.y < 2.0);
            assert!(p.radius >= 1.0 && p.radius < 4.0);
            assert_eq!(p.life, 120);
        }
    }
}
