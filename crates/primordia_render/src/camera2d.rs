//! 2D viewport camera
//!
//! World space matches window pixels at zoom 1 with the camera centred on
//! the window, so an untouched camera maps pixel `(x, y)` to world `(x, y)`.
//! Y grows downward in both spaces.

use primordia_input::CameraControl;
use primordia_math::{Bound2, Vec2};

/// Zoom/pan camera over the simulation plane
#[derive(Clone, Debug)]
pub struct Camera2D {
    /// World point shown at the viewport centre
    pub center: Vec2,
    /// Pixels per world unit
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    viewport: Vec2,
    home_center: Vec2,
    home_zoom: f32,
}

impl Camera2D {
    /// Create a camera showing world space 1:1 with the viewport
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        let viewport = Vec2::new(viewport_width.max(1.0), viewport_height.max(1.0));
        let center = viewport * 0.5;
        Self {
            center,
            zoom: 1.0,
            min_zoom: 0.05,
            max_zoom: 50.0,
            viewport,
            home_center: center,
            home_zoom: 1.0,
        }
    }

    /// Builder: set zoom limits
    pub fn with_zoom_limits(mut self, min_zoom: f32, max_zoom: f32) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
        self.home_zoom = self.home_zoom.clamp(min_zoom, max_zoom);
        self
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Track a window resize; the world point at the centre stays put
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
    }

    /// Centre and scale the view so `bound` fills most of the viewport,
    /// and make that the home view
    pub fn fit_bound(&mut self, bound: Bound2) {
        let scale_x = self.viewport.x / bound.width;
        let scale_y = self.viewport.y / bound.height;
        self.center = bound.center();
        self.zoom = (scale_x.min(scale_y) * 0.9).clamp(self.min_zoom, self.max_zoom);
        self.home_center = self.center;
        self.home_zoom = self.zoom;
    }

    /// Map a window pixel to a world coordinate
    pub fn pixel_to_world(&self, pixel: Vec2) -> Vec2 {
        self.center + (pixel - self.viewport * 0.5) / self.zoom
    }

    /// Map a world coordinate to a window pixel
    pub fn world_to_pixel(&self, world: Vec2) -> Vec2 {
        (world - self.center) * self.zoom + self.viewport * 0.5
    }

    /// Column-major world-to-clip matrix
    pub fn view_projection(&self) -> [[f32; 4]; 4] {
        let sx = 2.0 * self.zoom / self.viewport.x;
        let sy = 2.0 * self.zoom / self.viewport.y;
        [
            [sx, 0.0, 0.0, 0.0],
            [0.0, -sy, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [-self.center.x * sx, self.center.y * sy, 0.0, 1.0],
        ]
    }

    /// Return to the home view
    pub fn reset(&mut self) {
        self.center = self.home_center;
        self.zoom = self.home_zoom;
    }
}

impl CameraControl for Camera2D {
    fn pan_pixels(&mut self, dx: f32, dy: f32) {
        self.center -= Vec2::new(dx, dy) / self.zoom;
    }

    fn zoom(&mut self, factor: f32, anchor: Option<Vec2>) {
        let anchor = anchor.unwrap_or(self.viewport * 0.5);
        let before = self.pixel_to_world(anchor);
        self.zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        let after = self.pixel_to_world(anchor);
        self.center += before - after;
    }

    fn reset_view(&mut self) {
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < EPS
    }

    fn transform(m: [[f32; 4]; 4], p: Vec2) -> (f32, f32) {
        (
            m[0][0] * p.x + m[1][0] * p.y + m[3][0],
            m[0][1] * p.x + m[1][1] * p.y + m[3][1],
        )
    }

    #[test]
    fn test_default_view_is_identity() {
        let camera = Camera2D::new(800.0, 600.0);
        let p = Vec2::new(123.0, 456.0);
        assert!(close(camera.pixel_to_world(p), p));
        assert!(close(camera.world_to_pixel(p), p));
    }

    #[test]
    fn test_pixel_world_round_trip_after_zoom_and_pan() {
        let mut camera = Camera2D::new(800.0, 600.0);
        camera.zoom(3.0, Some(Vec2::new(100.0, 50.0)));
        camera.pan_pixels(40.0, -20.0);
        let p = Vec2::new(321.0, 77.0);
        assert!(close(camera.world_to_pixel(camera.pixel_to_world(p)), p));
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut camera = Camera2D::new(800.0, 600.0);
        let anchor = Vec2::new(600.0, 100.0);
        let before = camera.pixel_to_world(anchor);
        camera.zoom(2.0, Some(anchor));
        assert!((camera.zoom - 2.0).abs() < EPS);
        assert!(close(camera.pixel_to_world(anchor), before));
    }

    #[test]
    fn test_zoom_clamped() {
        let mut camera = Camera2D::new(800.0, 600.0).with_zoom_limits(0.5, 4.0);
        camera.zoom(100.0, None);
        assert_eq!(camera.zoom, 4.0);
        camera.zoom(0.0001, None);
        assert_eq!(camera.zoom, 0.5);
    }

    #[test]
    fn test_pan_moves_content_with_cursor() {
        let mut camera = Camera2D::new(800.0, 600.0);
        camera.zoom(2.0, None);
        let world = camera.pixel_to_world(Vec2::new(100.0, 100.0));
        camera.pan_pixels(10.0, 0.0);
        // The same world point is now 10 pixels to the right
        assert!(close(camera.world_to_pixel(world), Vec2::new(110.0, 100.0)));
    }

    #[test]
    fn test_fit_bound_and_reset() {
        let mut camera = Camera2D::new(800.0, 600.0);
        camera.fit_bound(Bound2::new(300.0, 300.0));
        assert!(close(camera.center, Vec2::new(150.0, 150.0)));
        assert!((camera.zoom - 1.8).abs() < EPS);

        camera.pan_pixels(50.0, 50.0);
        camera.reset_view();
        assert!(close(camera.center, Vec2::new(150.0, 150.0)));
        assert!((camera.zoom - 1.8).abs() < EPS);
    }

    #[test]
    fn test_view_projection_maps_viewport_to_clip() {
        let camera = Camera2D::new(800.0, 600.0);
        let m = camera.view_projection();
        let (x, y) = transform(m, Vec2::new(0.0, 0.0));
        assert!((x + 1.0).abs() < EPS && (y - 1.0).abs() < EPS);
        let (x, y) = transform(m, Vec2::new(800.0, 600.0));
        assert!((x - 1.0).abs() < EPS && (y + 1.0).abs() < EPS);
    }
}
