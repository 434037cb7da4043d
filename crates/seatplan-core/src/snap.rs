//! Grid snapping for seat placement.

use kurbo::Point;

/// Grid size for snapping (matches the visual grid).
pub const GRID_SIZE: f64 = 25.0;

/// Snap a point to the nearest grid intersection, component-wise.
///
/// A non-positive grid size disables snapping.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    if grid_size <= 0.0 {
        return point;
    }
    Point::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_rounds_to_nearest() {
        let p = snap_to_grid(Point::new(12.4, 37.6), GRID_SIZE);
        assert!((p.x - 0.0).abs() < f64::EPSILON);
        assert!((p.y - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snap_negative_coordinates() {
        let p = snap_to_grid(Point::new(-13.0, -36.0), GRID_SIZE);
        assert!((p.x + 25.0).abs() < f64::EPSILON);
        assert!((p.y + 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snap_idempotent() {
        for &(x, y) in &[(0.0, 0.0), (12.5, -12.5), (101.3, 7.7), (-333.3, 999.9), (1e6 + 0.3, -4.2)] {
            let once = snap_to_grid(Point::new(x, y), GRID_SIZE);
            let twice = snap_to_grid(once, GRID_SIZE);
            assert_eq!(once, twice);
            assert_eq!((once.x / GRID_SIZE).fract(), 0.0);
            assert_eq!((once.y / GRID_SIZE).fract(), 0.0);
        }
    }

    #[test]
    fn test_zero_grid_is_identity() {
        let p = Point::new(3.3, 4.4);
        assert_eq!(snap_to_grid(p, 0.0), p);
    }
}
