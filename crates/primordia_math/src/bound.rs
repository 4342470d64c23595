//! Axis-aligned simulation bound anchored at the origin

use serde::{Serialize, Deserialize};

use crate::Vec2;

/// Rectangular extent of simulated space, spanning `[0, width) x [0, height)`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bound2 {
    pub width: f32,
    pub height: f32,
}

impl Bound2 {
    /// Create a new bound
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size as a vector
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Centre point of the bound
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Whether the point lies inside the half-open rectangle
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x < self.width && p.y >= 0.0 && p.y < self.height
    }

    /// Fold a point into the bound as if the edges were joined (torus)
    pub fn wrap(&self, p: Vec2) -> Vec2 {
        Vec2::new(wrap_axis(p.x, self.width), wrap_axis(p.y, self.height))
    }

    /// Clamp a point into the closed rectangle
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }

    /// Shortest displacement equivalent to `delta` on the torus
    pub fn minimum_image(&self, delta: Vec2) -> Vec2 {
        Vec2::new(
            minimum_image_axis(delta.x, self.width),
            minimum_image_axis(delta.y, self.height),
        )
    }

    /// Bound enlarged by `step` on each axis
    pub fn grown(&self, step: Vec2) -> Self {
        Self::new(self.width + step.x, self.height + step.y)
    }

    /// Bound reduced by `step` on each axis, never below `min` per axis
    pub fn shrunk(&self, step: Vec2, min: f32) -> Self {
        Self::new(
            (self.width - step.x).max(min),
            (self.height - step.y).max(min),
        )
    }
}

impl From<[f32; 2]> for Bound2 {
    fn from(v: [f32; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

fn wrap_axis(v: f32, extent: f32) -> f32 {
    let wrapped = v.rem_euclid(extent);
    // rem_euclid can round up to `extent` for tiny negative inputs
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}

fn minimum_image_axis(d: f32, extent: f32) -> f32 {
    let half = extent * 0.5;
    if d > half {
        d - extent
    } else if d < -half {
        d + extent
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let b = Bound2::new(10.0, 5.0);
        assert!(b.contains(Vec2::new(0.0, 0.0)));
        assert!(b.contains(Vec2::new(9.99, 4.99)));
        assert!(!b.contains(Vec2::new(10.0, 1.0)));
        assert!(!b.contains(Vec2::new(1.0, -0.1)));
    }

    #[test]
    fn test_wrap() {
        let b = Bound2::new(10.0, 5.0);
        assert_eq!(b.wrap(Vec2::new(12.0, -1.0)), Vec2::new(2.0, 4.0));
        assert_eq!(b.wrap(Vec2::new(3.0, 2.0)), Vec2::new(3.0, 2.0));
        assert!(b.contains(b.wrap(Vec2::new(-1e-9, -1e-9))));
    }

    #[test]
    fn test_clamp() {
        let b = Bound2::new(10.0, 5.0);
        assert_eq!(b.clamp(Vec2::new(-3.0, 8.0)), Vec2::new(0.0, 5.0));
    }

    #[test]
    fn test_minimum_image() {
        let b = Bound2::new(10.0, 10.0);
        assert_eq!(b.minimum_image(Vec2::new(9.0, -9.0)), Vec2::new(-1.0, 1.0));
        assert_eq!(b.minimum_image(Vec2::new(2.0, -3.0)), Vec2::new(2.0, -3.0));
    }

    #[test]
    fn test_grow_and_shrink() {
        let b = Bound2::new(100.0, 50.0);
        let step = Vec2::new(10.0, 10.0);
        assert_eq!(b.grown(step), Bound2::new(110.0, 60.0));
        assert_eq!(b.shrunk(step, 0.0), Bound2::new(90.0, 40.0));
        // Floor applies per axis
        assert_eq!(b.shrunk(Vec2::new(60.0, 60.0), 20.0), Bound2::new(40.0, 20.0));
    }

    #[test]
    fn test_center_and_area() {
        let b = Bound2::new(4.0, 2.0);
        assert_eq!(b.center(), Vec2::new(2.0, 1.0));
        assert_eq!(b.area(), 8.0);
        assert_eq!(b.size(), Vec2::new(4.0, 2.0));
    }
}
