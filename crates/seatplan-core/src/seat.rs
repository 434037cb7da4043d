//! Seat markers.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fill color used when a seat has no color of its own.
pub const DEFAULT_SEAT_COLOR: &str = "#0000FF";

/// Colors offered by the seat editor.
pub const SEAT_PRESET_COLORS: [&str; 4] = ["#FF0000", "#00FF00", "#0000FF", "#FFD700"];

/// Seat identifier, assigned from a per-plan counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(pub u64);

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat-{}", self.0)
    }
}

/// A labelled circular seat marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub id: SeatId,
    /// Center in world coordinates.
    pub position: Point,
    #[serde(default)]
    pub name: String,
    /// Marked by the marquee for bulk delete.
    #[serde(default)]
    pub is_selected: bool,
    #[serde(default)]
    pub color: Option<String>,
}

impl Seat {
    pub fn new(id: SeatId, position: Point) -> Self {
        Self {
            id,
            position,
            name: String::new(),
            is_selected: false,
            color: None,
        }
    }

    pub fn hit_test(&self, point: Point, radius: f64, tolerance: f64) -> bool {
        self.position.distance(point) <= radius + tolerance
    }

    /// Inclusive containment of the seat center.
    pub fn is_inside(&self, rect: Rect) -> bool {
        let p = self.position;
        p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
    }
}
