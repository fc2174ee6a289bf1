//! Drag-to-rotation trackball.

use glam::{Mat4, Quat, Vec2};

/// Maps mouse drags to an accumulated rotation.
///
/// A drag across half the window rotates the scene by 180 degrees; dragging
/// right rotates about +Y, dragging down about +X. The in-flight rotation is
/// committed when the drag ends, so successive drags compose.
#[derive(Debug, Clone)]
pub struct Trackball {
    /// Cursor position where the active drag started.
    drag_start: Vec2,
    /// Absolute cursor position to window-relative conversion factors.
    scale: Vec2,
    /// Committed rotation from completed drags.
    base: Quat,
    /// Rotation including the drag in flight.
    current: Quat,
    dragging: bool,
}

impl Trackball {
    /// Creates an identity trackball for a window of the given size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let mut tb = Self {
            drag_start: Vec2::ZERO,
            scale: Vec2::ONE,
            base: Quat::IDENTITY,
            current: Quat::IDENTITY,
            dragging: false,
        };
        tb.resize(width, height);
        tb
    }

    /// Updates the drag scaling for a new window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.scale = Vec2::new(1.0 / width.max(1) as f32, 1.0 / height.max(1) as f32);
    }

    /// Starts a drag at the given cursor position.
    pub fn begin_drag(&mut self, pos: Vec2) {
        self.dragging = true;
        self.drag_start = pos;
    }

    /// Updates the in-flight rotation for the current cursor position.
    ///
    /// Does nothing unless a drag is active.
    pub fn drag_to(&mut self, pos: Vec2) {
        if !self.dragging {
            return;
        }

        let diff = (pos - self.drag_start) * self.scale;
        let a = diff.length();
        if a <= f32::EPSILON {
            return;
        }

        let ar = a * std::f32::consts::PI;
        let s = ar.sin() / a;
        let dq = Quat::from_xyzw(diff.y * s, diff.x * s, 0.0, ar.cos());

        self.current = dq * self.base;
    }

    /// Ends the drag at the given position and commits the rotation.
    pub fn end_drag(&mut self, pos: Vec2) {
        self.drag_to(pos);
        self.base = self.current;
        self.dragging = false;
    }

    /// Returns whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Returns the accumulated rotation quaternion.
    #[must_use]
    pub fn quaternion(&self) -> Quat {
        self.current
    }

    /// Returns the rotation as a matrix, ready to post-multiply a view.
    #[must_use]
    pub fn rotation(&self) -> Mat4 {
        Mat4::from_quat(self.current)
    }

    /// Resets the trackball to the identity rotation.
    pub fn reset(&mut self) {
        self.base = Quat::IDENTITY;
        self.current = Quat::IDENTITY;
        self.dragging = false;
    }
}

impl Default for Trackball {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use proptest::prelude::*;

    #[test]
    fn identity_before_any_drag() {
        let tb = Trackball::new(720, 720);
        assert_eq!(tb.rotation(), Mat4::IDENTITY);
        assert!(!tb.is_dragging());
    }

    #[test]
    fn drag_without_begin_is_ignored() {
        let mut tb = Trackball::new(720, 720);
        tb.drag_to(Vec2::new(300.0, 300.0));
        assert_eq!(tb.quaternion(), Quat::IDENTITY);
    }

    #[test]
    fn half_width_drag_rotates_half_turn_about_y() {
        let mut tb = Trackball::new(720, 720);
        tb.begin_drag(Vec2::new(0.0, 0.0));
        tb.drag_to(Vec2::new(360.0, 0.0));

        let rotated = tb.rotation().transform_point3(Vec3::Z);
        assert!(
            (rotated - Vec3::NEG_Z).length() < 1e-4,
            "expected -Z, got {rotated}"
        );
        // Y axis is the rotation axis, so it stays put.
        let y = tb.rotation().transform_point3(Vec3::Y);
        assert!((y - Vec3::Y).length() < 1e-4);
    }

    #[test]
    fn half_height_drag_rotates_half_turn_about_x() {
        let mut tb = Trackball::new(720, 720);
        tb.begin_drag(Vec2::new(100.0, 100.0));
        tb.drag_to(Vec2::new(100.0, 460.0));

        let rotated = tb.rotation().transform_point3(Vec3::Y);
        assert!(
            (rotated - Vec3::NEG_Y).length() < 1e-4,
            "expected -Y, got {rotated}"
        );
    }

    #[test]
    fn end_drag_commits_the_rotation() {
        let mut tb = Trackball::new(720, 720);
        tb.begin_drag(Vec2::ZERO);
        tb.end_drag(Vec2::new(180.0, 0.0));
        let committed = tb.quaternion();

        // A fresh drag that never moves keeps the committed rotation.
        tb.begin_drag(Vec2::new(500.0, 500.0));
        tb.drag_to(Vec2::new(500.0, 500.0));
        assert_eq!(tb.quaternion(), committed);

        // Two quarter-turns about the same axis compose to a half-turn.
        tb.end_drag(Vec2::new(680.0, 500.0));
        let rotated = tb.rotation().transform_point3(Vec3::Z);
        assert!(
            (rotated - Vec3::NEG_Z).length() < 1e-4,
            "expected -Z, got {rotated}"
        );
    }

    #[test]
    fn reset_returns_to_identity() {
        let mut tb = Trackball::new(720, 720);
        tb.begin_drag(Vec2::ZERO);
        tb.end_drag(Vec2::new(123.0, 45.0));
        assert_ne!(tb.quaternion(), Quat::IDENTITY);

        tb.reset();
        assert_eq!(tb.quaternion(), Quat::IDENTITY);
    }

    proptest! {
        #[test]
        fn quaternion_stays_unit_length(
            drags in prop::collection::vec((0.0f32..720.0, 0.0f32..720.0, 0.0f32..720.0, 0.0f32..720.0), 1..8)
        ) {
            let mut tb = Trackball::new(720, 720);
            for (x0, y0, x1, y1) in drags {
                tb.begin_drag(Vec2::new(x0, y0));
                tb.drag_to(Vec2::new(x1, y1));
                tb.end_drag(Vec2::new(x1, y1));
            }
            prop_assert!((tb.quaternion().length() - 1.0).abs() < 1e-3);
        }
    }
}
