//! Shape definitions for the floor plan.

mod circle;
mod polygon;
mod rectangle;

pub use circle::Circle;
pub use polygon::Polygon;
pub use rectangle::Rectangle;

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Fill color used when a shape has no color of its own.
pub const DEFAULT_SHAPE_COLOR: &str = "#c9cbcc";

/// Reasons a shape cannot be committed to the floor plan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("shape has zero area")]
    ZeroArea,
    #[error("circle has zero radius")]
    ZeroRadius,
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },
    #[error("geometry contains a non-finite coordinate")]
    NonFinite,
}

/// Editable, non-geometric properties shared by every shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Optional caption drawn with the shape.
    #[serde(default)]
    pub label: Option<String>,
    /// Optional CSS-style hex color.
    #[serde(default)]
    pub color: Option<String>,
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    point.distance(a + seg * t)
}

fn is_finite_point(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

/// A persisted floor plan shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rect(Rectangle),
    Circle(Circle),
    Polygon(Polygon),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Rect(s) => s.id,
            Shape::Circle(s) => s.id,
            Shape::Polygon(s) => s.id,
        }
    }

    /// Axis-aligned bounding box in world coordinates.
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rect(s) => s.as_rect(),
            Shape::Circle(s) => s.bounds(),
            Shape::Polygon(s) => s.bounds(),
        }
    }

    /// Check if a world point hits this shape.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Shape::Rect(s) => s.hit_test(point, tolerance),
            Shape::Circle(s) => s.hit_test(point, tolerance),
            Shape::Polygon(s) => s.hit_test(point, tolerance),
        }
    }

    /// Move the shape by a world-space delta. Only geometry changes.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Shape::Rect(s) => s.position += delta,
            Shape::Circle(s) => s.center += delta,
            Shape::Polygon(s) => {
                for p in &mut s.points {
                    *p += delta;
                }
            }
        }
    }

    /// Check that the geometry is fit to be stored.
    pub fn validate(&self) -> Result<(), GeometryError> {
        match self {
            Shape::Rect(s) => s.validate(),
            Shape::Circle(s) => s.validate(),
            Shape::Polygon(s) => s.validate(),
        }
    }

    /// Number of vertices for polygons, `None` for other shapes.
    pub fn vertex_count(&self) -> Option<usize> {
        match self {
            Shape::Polygon(s) => Some(s.points.len()),
            _ => None,
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        match self {
            Shape::Rect(s) => &s.style,
            Shape::Circle(s) => &s.style,
            Shape::Polygon(s) => &s.style,
        }
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        match self {
            Shape::Rect(s) => &mut s.style,
            Shape::Circle(s) => &mut s.style,
            Shape::Polygon(s) => &mut s.style,
        }
    }

    /// Short lowercase name of the variant, used in logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Rect(_) => "rect",
            Shape::Circle(_) => "circle",
            Shape::Polygon(_) => "polygon",
        }
    }
}
