//! Custom cursor: a small dot and a larger ring that ease toward the
//! pointer every frame.

use eon_types::Point;

use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::config::CursorConfig;

/// Visual state of the ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingStyle {
    /// Scale relative to the resting ring radius.
    pub scale: f64,
    /// Border colour.
    pub color: Rgb,
}

/// Dot and ring positions chasing the live pointer.
#[derive(Debug, Clone)]
pub struct CursorFollower {
    config: CursorConfig,
    pointer: Point,
    dot: Point,
    ring: Point,
    hovering: bool,
}

impl CursorFollower {
    /// A follower resting at the origin.
    pub const fn new(config: CursorConfig) -> Self {
        Self {
            config,
            pointer: Point::ORIGIN,
            dot: Point::ORIGIN,
            ring: Point::ORIGIN,
            hovering: false,
        }
    }

    /// The pointer moved.
    pub const fn pointer_moved(&mut self, to: Point) {
        self.pointer = to;
    }

    /// The pointer entered an interactive element.
    pub const fn pointer_entered(&mut self) {
        self.hovering = true;
    }

    /// The pointer left an interactive element.
    pub const fn pointer_left(&mut self) {
        self.hovering = false;
    }

    /// Advance one frame.
    pub fn step(&mut self) {
        self.dot = approach(
            self.dot,
            self.pointer,
            self.config.dot_smoothing,
            self.config.snap_epsilon,
        );
        self.ring = approach(
            self.ring,
            self.pointer,
            self.config.ring_smoothing,
            self.config.snap_epsilon,
        );
    }

    /// Draw the dot and ring.
    pub fn draw(&self, canvas: &mut impl Canvas) {
        let style = self.ring_style();
        canvas.fill_circle(
            self.dot,
            self.config.dot_radius,
            self.config.ring_color.with_alpha(1.0),
        );
        canvas.stroke_circle(
            self.ring,
            self.config.ring_radius * style.scale,
            style.color.with_alpha(1.0),
            1.0,
        );
    }

    /// Current dot position.
    pub const fn dot(&self) -> Point {
        self.dot
    }

    /// Current ring position.
    pub const fn ring(&self) -> Point {
        self.ring
    }

    /// Last known pointer position.
    pub const fn pointer(&self) -> Point {
        self.pointer
    }

    /// Whether the pointer is over an interactive element.
    pub const fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Ring scale and colour for the current hover state.
    pub const fn ring_style(&self) -> RingStyle {
        if self.hovering {
            RingStyle {
                scale: self.config.hover_scale,
                color: self.config.hover_color,
            }
        } else {
            RingStyle {
                scale: 1.0,
                color: self.config.ring_color,
            }
        }
    }

    /// Whether both elements sit exactly on the pointer.
    pub fn is_settled(&self) -> bool {
        self.dot.distance_to(self.pointer) < self.config.snap_epsilon
            && self.ring.distance_to(self.pointer) < self.config.snap_epsilon
    }
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::new(CursorConfig::default())
    }
}

/// Move `current` a `factor` fraction toward `target`, snapping once
/// the remaining distance is under `epsilon`.
fn approach(current: Point, target: Point, factor: f64, epsilon: f64) -> Point {
    let next = Point::new(
        current.x + (target.x - current.x) * factor,
        current.y + (target.y - current.y) * factor,
    );
    if next.distance_to(target) < epsilon {
        target
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames_until(follower: &mut CursorFollower, done: impl Fn(&CursorFollower) -> bool) -> u32 {
        let mut frames = 0;
        while !done(follower) && frames < 10_000 {
            follower.step();
            frames += 1;
        }
        frames
    }

    #[test]
    fn converges_within_bounded_frames() {
        let mut follower = CursorFollower::default();
        follower.pointer_moved(Point::new(1920.0, 1080.0));
        let frames = frames_until(&mut follower, CursorFollower::is_settled);
        assert!(frames <= 100, "took {frames} frames");
        assert_eq!(follower.dot(), follower.pointer());
        assert_eq!(follower.ring(), follower.pointer());

        // Settled elements stay put.
        follower.step();
        assert!(follower.is_settled());
    }

    #[test]
    fn dot_converges_faster_than_ring() {
        let mut follower = CursorFollower::default();
        follower.pointer_moved(Point::new(600.0, 400.0));
        follower.step();
        let target = follower.pointer();
        assert!(follower.dot().distance_to(target) < follower.ring().distance_to(target));

        let dot_frames = frames_until(&mut follower.clone(), |f| f.dot() == f.pointer());
        let ring_frames = frames_until(&mut follower, |f| f.ring() == f.pointer());
        assert!(dot_frames < ring_frames);
    }

    #[test]
    fn first_step_covers_smoothing_fraction() {
        let mut follower = CursorFollower::default();
        follower.pointer_moved(Point::new(60.0, 0.0));
        follower.step();
        assert!((follower.dot().x - 10.0).abs() < 1e-9);
        assert!((follower.ring().x - 7.5).abs() < 1e-9);
    }

    #[test]
    fn hover_scales_and_recolors_ring() {
        let mut follower = CursorFollower::default();
        assert!((follower.ring_style().scale - 1.0).abs() < f64::EPSILON);
        assert_eq!(follower.ring_style().color.to_string(), "#67e8f9");

        follower.pointer_entered();
        assert!(follower.is_hovering());
        assert!((follower.ring_style().scale - 1.8).abs() < f64::EPSILON);
        assert_eq!(follower.ring_style().color.to_string(), "#c084fc");

        follower.pointer_left();
        assert_eq!(follower.ring_style().color.to_string(), "#67e8f9");
    }
}
