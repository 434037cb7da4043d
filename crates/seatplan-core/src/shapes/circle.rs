//! Circle shape.

use super::{GeometryError, ShapeId, ShapeStyle, is_finite_point};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle given by center and radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub id: ShapeId,
    pub center: Point,
    pub radius: f64,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            style: ShapeStyle::default(),
        }
    }

    /// Create a circle centered on `center` passing through `edge`.
    pub fn through(center: Point, edge: Point) -> Self {
        Self::new(center, center.distance(edge))
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.center.distance(point) <= self.radius + tolerance
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if !is_finite_point(self.center) || !self.radius.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        if self.radius <= 0.0 {
            return Err(GeometryError::ZeroRadius);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_through_uses_euclidean_distance() {
        let circle = Circle::through(Point::new(10.0, 10.0), Point::new(13.0, 14.0));
        assert!((circle.radius - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_test() {
        let circle = Circle::new(Point::new(0.0, 0.0), 10.0);
        assert!(circle.hit_test(Point::new(3.0, 4.0), 0.0));
        assert!(circle.hit_test(Point::new(10.0, 0.0), 0.0));
        assert!(!circle.hit_test(Point::new(12.0, 0.0), 0.0));
        assert!(circle.hit_test(Point::new(12.0, 0.0), 3.0));
    }

    #[test]
    fn test_validate() {
        assert!(Circle::new(Point::ZERO, 1.0).validate().is_ok());
        assert_eq!(Circle::new(Point::ZERO, 0.0).validate(), Err(GeometryError::ZeroRadius));
        assert_eq!(
            Circle::new(Point::ZERO, f64::INFINITY).validate(),
            Err(GeometryError::NonFinite)
        );
    }
}
