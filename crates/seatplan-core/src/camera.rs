//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest zoom level reachable with the wheel.
pub const MIN_SCALE: f64 = 0.2;
/// Largest zoom level reachable with the wheel.
pub const MAX_SCALE: f64 = 2.0;
/// Multiplicative zoom factor applied per wheel notch.
pub const ZOOM_STEP: f64 = 1.05;

/// Camera manages the view transform for the floor plan.
///
/// Screen and world space are related by `screen = world * scale + offset`.
/// The scale always stays inside `[min_scale, max_scale]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan), in screen pixels.
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%).
    pub scale: f64,
    /// Minimum allowed zoom level.
    pub min_scale: f64,
    /// Maximum allowed zoom level.
    pub max_scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera with custom zoom limits. Inverted limits are swapped.
    pub fn with_limits(min_scale: f64, max_scale: f64) -> Self {
        let mut camera = Self {
            min_scale: min_scale.min(max_scale),
            max_scale: min_scale.max(max_scale),
            ..Self::default()
        };
        camera.scale = camera.clamp_scale(1.0);
        camera
    }

    /// Clamp `scale` into the zoom limits. Never panics, even when the
    /// limits are inverted or NaN.
    fn clamp_scale(&self, scale: f64) -> f64 {
        let lo = self.min_scale.min(self.max_scale);
        let hi = self.min_scale.max(self.max_scale);
        scale.max(lo).min(hi)
    }

    /// Get the affine transform for rendering (world -> screen).
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Get the inverse transform for input handling (screen -> world).
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        Point::new(
            (screen_point.x - self.offset.x) / self.scale,
            (screen_point.y - self.offset.y) / self.scale,
        )
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        Point::new(
            world_point.x * self.scale + self.offset.x,
            world_point.y * self.scale + self.offset.y,
        )
    }

    /// Convert a screen-space distance to a world-space distance.
    pub fn screen_distance_to_world(&self, distance: f64) -> f64 {
        distance / self.scale
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom the camera by `factor`, keeping the world point under
    /// `screen_point` fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_scale = self.clamp_scale(self.scale * factor);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }

        let world_point = self.screen_to_world(screen_point);
        self.scale = new_scale;
        self.offset = Vec2::new(
            screen_point.x - world_point.x * new_scale,
            screen_point.y - world_point.y * new_scale,
        );
    }

    /// Apply one wheel event. A positive `delta_y` (scrolling down) zooms out,
    /// anything else zooms in.
    pub fn zoom_wheel(&mut self, screen_point: Point, delta_y: f64, step: f64) {
        let factor = if delta_y > 0.0 { 1.0 / step } else { step };
        self.zoom_at(screen_point, factor);
    }

    /// World-space rectangle currently visible in a viewport of `viewport` size.
    pub fn visible_world_rect(&self, viewport: Size) -> Rect {
        let top_left = self.screen_to_world(Point::ZERO);
        let bottom_right = self.screen_to_world(Point::new(viewport.width, viewport.height));
        Rect::from_points(top_left, bottom_right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point_eq(a: Point, b: Point) {
        assert!((a.x - b.x).abs() < 1e-9, "x: {} != {}", a.x, b.x);
        assert!((a.y - b.y).abs() < 1e-9, "y: {} != {}", a.y, b.y);
    }

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.offset, Vec2::ZERO);
        assert!((camera.scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_offset_and_scale() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(50.0, 100.0);
        camera.scale = 2.0;
        let world = camera.screen_to_world(Point::new(150.0, 300.0));
        assert_point_eq(world, Point::new(50.0, 100.0));
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(30.0, -20.0);
        camera.scale = 1.5;

        for original in [
            Point::new(123.0, 456.0),
            Point::new(-7.5, 0.25),
            Point::new(0.0, 0.0),
        ] {
            let back = camera.world_to_screen(camera.screen_to_world(original));
            assert_point_eq(back, original);
        }
    }

    #[test]
    fn test_transform_matches_point_conversion() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(12.0, 34.0);
        camera.scale = 0.75;
        let world = Point::new(40.0, -10.0);
        assert_point_eq(camera.transform() * world, camera.world_to_screen(world));
        let screen = Point::new(200.0, 90.0);
        assert_point_eq(camera.inverse_transform() * screen, camera.screen_to_world(screen));
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(40.0, 25.0);
        let anchor = Point::new(310.0, 220.0);
        let before = camera.screen_to_world(anchor);

        camera.zoom_wheel(anchor, -120.0, ZOOM_STEP);
        assert!((camera.scale - ZOOM_STEP).abs() < 1e-12);
        assert_point_eq(camera.screen_to_world(anchor), before);

        camera.zoom_wheel(anchor, 120.0, ZOOM_STEP);
        camera.zoom_wheel(anchor, 120.0, ZOOM_STEP);
        assert_point_eq(camera.screen_to_world(anchor), before);
    }

    #[test]
    fn test_wheel_direction() {
        let mut camera = Camera::new();
        camera.zoom_wheel(Point::ZERO, 1.0, ZOOM_STEP);
        assert!(camera.scale < 1.0);

        let mut camera = Camera::new();
        camera.zoom_wheel(Point::ZERO, -1.0, ZOOM_STEP);
        assert!(camera.scale > 1.0);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        for _ in 0..200 {
            camera.zoom_wheel(Point::new(10.0, 10.0), 1.0, ZOOM_STEP);
        }
        assert!((camera.scale - MIN_SCALE).abs() < f64::EPSILON);

        for _ in 0..200 {
            camera.zoom_wheel(Point::new(10.0, 10.0), -1.0, ZOOM_STEP);
        }
        assert!((camera.scale - MAX_SCALE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_inverted_limits_are_ordered() {
        let camera = Camera::with_limits(3.0, 1.0);
        assert_eq!((camera.min_scale, camera.max_scale), (1.0, 3.0));
        assert!((camera.scale - 1.0).abs() < f64::EPSILON);

        let mut camera = Camera::new();
        camera.min_scale = 3.0;
        camera.max_scale = 2.5;
        camera.zoom_at(Point::ZERO, 0.5);
        assert!((camera.scale - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(10.0, 20.0));
        camera.pan(Vec2::new(-4.0, 1.0));
        assert!((camera.offset.x - 6.0).abs() < f64::EPSILON);
        assert!((camera.offset.y - 21.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_visible_world_rect() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(-100.0, -50.0);
        camera.scale = 2.0;
        let visible = camera.visible_world_rect(Size::new(800.0, 600.0));
        assert!((visible.x0 - 50.0).abs() < 1e-9);
        assert!((visible.y0 - 25.0).abs() < 1e-9);
        assert!((visible.x1 - 450.0).abs() < 1e-9);
        assert!((visible.y1 - 325.0).abs() < 1e-9);
    }
}
