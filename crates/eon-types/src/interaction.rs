//! Interaction events captured on the client.
//!
//! [`InteractionKind`] is the flat enumeration used on the wire and in
//! the store. [`Interaction`] is the tagged event used in code: each
//! variant carries only the data that kind of input produces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{InteractionId, SessionId};

/// A 2D position in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// The origin `(0, 0)`.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// The kinds of user input the platform tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum InteractionKind {
    /// Pointer movement.
    Move,
    /// Pointer click.
    Click,
    /// Document scroll.
    Scroll,
    /// Key press.
    Keypress,
    /// Pointer entering an interactive element.
    Hover,
}

impl InteractionKind {
    /// The lowercase wire name (`"move"`, `"click"`, ...).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Click => "click",
            Self::Scroll => "scroll",
            Self::Keypress => "keypress",
            Self::Hover => "hover",
        }
    }
}

impl core::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A captured user input event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Interaction {
    /// The pointer moved to a position.
    Move(Point),
    /// The pointer clicked at a position.
    Click(Point),
    /// The document scrolled; `offset` is the new scroll position.
    Scroll {
        /// Horizontal and vertical scroll offset.
        offset: Point,
    },
    /// A key was pressed. Key events carry no pointer position.
    Keypress,
    /// The pointer entered an interactive element at a position.
    Hover(Point),
}

impl Interaction {
    /// The flat kind of this event.
    pub const fn kind(&self) -> InteractionKind {
        match self {
            Self::Move(_) => InteractionKind::Move,
            Self::Click(_) => InteractionKind::Click,
            Self::Scroll { .. } => InteractionKind::Scroll,
            Self::Keypress => InteractionKind::Keypress,
            Self::Hover(_) => InteractionKind::Hover,
        }
    }

    /// The coordinates reported on the wire.
    ///
    /// Key presses report the origin.
    pub const fn coordinates(&self) -> Point {
        match self {
            Self::Move(p) | Self::Click(p) | Self::Hover(p) => *p,
            Self::Scroll { offset } => *offset,
            Self::Keypress => Point::ORIGIN,
        }
    }

    /// Rebuild a tagged event from its wire parts.
    ///
    /// Coordinates sent with a key press are discarded.
    pub const fn from_parts(kind: InteractionKind, coordinates: Point) -> Self {
        match kind {
            InteractionKind::Move => Self::Move(coordinates),
            InteractionKind::Click => Self::Click(coordinates),
            InteractionKind::Scroll => Self::Scroll {
                offset: coordinates,
            },
            InteractionKind::Keypress => Self::Keypress,
            InteractionKind::Hover => Self::Hover(coordinates),
        }
    }
}

/// A recorded interaction row. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Row identifier assigned at insert.
    pub id: InteractionId,
    /// The captured event.
    pub interaction: Interaction,
    /// The session that produced it.
    pub session_id: SessionId,
    /// When the client captured the event.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn wire_name_matches_serde() {
        for kind in [
            InteractionKind::Move,
            InteractionKind::Click,
            InteractionKind::Scroll,
            InteractionKind::Keypress,
            InteractionKind::Hover,
        ] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::from(kind.as_str()));
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn keypress_reports_origin_and_drops_coordinates() {
        let event = Interaction::from_parts(InteractionKind::Keypress, Point::new(5.0, 6.0));
        assert_eq!(event, Interaction::Keypress);
        assert_eq!(event.coordinates(), Point::ORIGIN);
    }

    #[test]
    fn scroll_carries_offset() {
        let event = Interaction::from_parts(InteractionKind::Scroll, Point::new(0.0, 640.0));
        assert_eq!(event.kind(), InteractionKind::Scroll);
        assert_eq!(event.coordinates(), Point::new(0.0, 640.0));
    }

    #[test]
    fn tagged_json_shape() {
        let json = serde_json::to_value(Interaction::Click(Point::new(10.0, 20.0))).unwrap();
        assert_eq!(json, serde_json::json!({"type": "click", "x": 10.0, "y": 20.0}));
    }

    #[test]
    fn distance_is_euclidean() {
        let d = Point::new(0.0, 0.0).distance_to(Point::new(3.0, 4.0));
        assert!((d - 5.0).abs() < f64::EPSILON);
    }
}
