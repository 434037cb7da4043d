//! Polygon shape.

use super::{GeometryError, ShapeId, ShapeStyle, is_finite_point, point_to_segment_dist};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A closed polygon. The edge from the last vertex back to the first is implied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub id: ShapeId,
    pub points: Vec<Point>,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Polygon {
    /// Create a new polygon from its vertices.
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            style: ShapeStyle::default(),
        }
    }

    pub fn bounds(&self) -> Rect {
        let mut iter = self.points.iter();
        let Some(first) = iter.next() else {
            return Rect::ZERO;
        };
        iter.fold(Rect::from_points(*first, *first), |r, p| r.union_pt(*p))
    }

    /// Even-odd containment, or within `tolerance` of an edge.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.contains(point) || self.edges().any(|(a, b)| point_to_segment_dist(point, a, b) <= tolerance)
    }

    fn contains(&self, point: Point) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > point.y) != (b.y > point.y) {
                let x_cross = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if point.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Unsigned shoelace area.
    pub fn area(&self) -> f64 {
        let twice: f64 = self.edges().map(|(a, b)| a.x * b.y - b.x * a.y).sum();
        twice.abs() / 2.0
    }

    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.points.len() < 3 {
            return Err(GeometryError::TooFewVertices {
                count: self.points.len(),
            });
        }
        if !self.points.iter().all(|p| is_finite_point(*p)) {
            return Err(GeometryError::NonFinite);
        }
        if self.area() < f64::EPSILON {
            return Err(GeometryError::ZeroArea);
        }
        Ok(())
    }
}
