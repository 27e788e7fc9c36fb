//! Drawing surface abstraction.

use eon_types::Point;
use serde::Serialize;

use crate::color::Rgba;

/// A 2D surface the simulation draws onto.
pub trait Canvas {
    /// Surface width in CSS pixels.
    fn width(&self) -> f64;

    /// Surface height in CSS pixels.
    fn height(&self) -> f64;

    /// Erase the whole surface.
    fn clear(&mut self);

    /// Stroke a straight line segment.
    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, width: f64);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    /// Stroke a circle outline.
    fn stroke_circle(&mut self, center: Point, radius: f64, color: Rgba, width: f64);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// [`Canvas::clear`].
    Clear,
    /// [`Canvas::stroke_line`].
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke colour.
        color: Rgba,
        /// Stroke width.
        width: f64,
    },
    /// [`Canvas::fill_circle`].
    Circle {
        /// Centre.
        center: Point,
        /// Radius.
        radius: f64,
        /// Fill colour.
        color: Rgba,
    },
    /// [`Canvas::stroke_circle`].
    Ring {
        /// Centre.
        center: Point,
        /// Radius.
        radius: f64,
        /// Stroke colour.
        color: Rgba,
        /// Stroke width.
        width: f64,
    },
}

/// A canvas that records draw calls instead of rasterising them.
///
/// Hosts that render elsewhere (for instance a browser bridge) can
/// serialize the command list once per frame and replay it.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// A recording surface of the given size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Change the surface size.
    pub const fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Commands since the last [`Canvas::clear`] (the clear included).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of line commands recorded.
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }

    /// Number of filled circles recorded.
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, width: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f64, color: Rgba, width: f64) {
        self.commands.push(DrawCommand::Ring {
            center,
            radius,
            color,
            width,
        });
    }
}
