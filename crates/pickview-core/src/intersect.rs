//! Intersection primitives used for picking.

use glam::{Vec2, Vec3};

/// Squared distance from `point` to the infinite line through `q1` and `q2`.
///
/// `q1` and `q2` must be distinct.
#[must_use]
pub fn line_point_distance_squared(q1: Vec3, q2: Vec3, point: Vec3) -> f32 {
    let pq1 = q1 - point;
    let q2q1 = q1 - q2;
    pq1.cross(q2q1).length_squared() / q2q1.length_squared()
}

/// Tests whether the infinite line through `q1`/`q2` intersects a sphere.
#[must_use]
pub fn line_hits_sphere(q1: Vec3, q2: Vec3, center: Vec3, radius: f32) -> bool {
    radius * radius >= line_point_distance_squared(q1, q2, center)
}

/// An axis-aligned screen-space rectangle with `min <= max` per component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl ScreenRect {
    /// Builds a rectangle from two opposite corners in any order.
    ///
    /// This is the drag-rectangle normalization: the corners are sorted so
    /// `min` is the top-left and `max` the bottom-right.
    #[must_use]
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Builds the margin box of half-extent `margin` around `center`.
    #[must_use]
    pub fn around(center: Vec2, margin: f32) -> Self {
        Self {
            min: center - Vec2::splat(margin),
            max: center + Vec2::splat(margin),
        }
    }

    /// Tests containment with strict bounds; points on the edge are outside.
    #[must_use]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    /// Returns (width, height).
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}
