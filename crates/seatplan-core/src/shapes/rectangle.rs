//! Rectangle shape.

use super::{GeometryError, ShapeId, ShapeStyle, is_finite_point};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle.
///
/// Width and height may be negative while the rectangle is a drag preview;
/// committed rectangles are built with [`Rectangle::from_corners`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub id: ShapeId,
    /// Anchor corner (top-left once normalized).
    pub position: Point,
    pub width: f64,
    pub height: f64,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            style: ShapeStyle::default(),
        }
    }

    /// Create a rectangle with non-negative extents from two corner points.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let min_x = p1.x.min(p2.x);
        let min_y = p1.y.min(p2.y);
        Self::new(Point::new(min_x, min_y), (p2.x - p1.x).abs(), (p2.y - p1.y).abs())
    }

    /// Get the rectangle as a normalized kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
        .abs()
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let rect = self.as_rect().inflate(tolerance, tolerance);
        rect.contains(point) || on_far_edge(rect, point)
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if !is_finite_point(self.position) || !self.width.is_finite() || !self.height.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        if self.width == 0.0 || self.height == 0.0 {
            return Err(GeometryError::ZeroArea);
        }
        Ok(())
    }
}

// kurbo's `Rect::contains` excludes the right and bottom edges.
fn on_far_edge(rect: Rect, point: Point) -> bool {
    (point.x == rect.x1 && point.y >= rect.y0 && point.y <= rect.y1)
        || (point.y == rect.y1 && point.x >= rect.x0 && point.x <= rect.x1)
}
