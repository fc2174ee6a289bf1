//! Camera and view management.

use glam::{Mat4, Vec3};
use pickview_core::PerspectiveParams;

/// A perspective camera for viewing the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Projection parameters.
    pub perspective: PerspectiveParams,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
}

impl Camera {
    /// Closest the eye can dolly toward the target.
    pub const MIN_DISTANCE: f32 = 1.0;

    /// Creates a new camera with default settings.
    #[must_use]
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 80.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            perspective: PerspectiveParams::default(),
            aspect_ratio,
        }
    }

    /// Sets the aspect ratio.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Returns the projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.perspective.projection_matrix(self.aspect_ratio)
    }

    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Returns the camera's forward direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Dollies the eye along the view direction.
    ///
    /// Positive `delta` moves toward the target; the eye never gets closer
    /// than [`Self::MIN_DISTANCE`].
    pub fn dolly(&mut self, delta: f32) {
        let forward = self.forward();
        let distance = (self.position - self.target).length();
        let new_distance = (distance - delta).max(Self::MIN_DISTANCE);
        self.position = self.target - forward * new_distance;
    }

    /// Sets the field of view in radians.
    pub fn set_fov(&mut self, fov: f32) {
        self.perspective.fov_y = fov.clamp(0.1, std::f32::consts::PI - 0.1);
    }

    /// Returns FOV in degrees.
    #[must_use]
    pub fn fov_degrees(&self) -> f32 {
        self.perspective.fov_y.to_degrees()
    }

    /// Sets FOV from degrees.
    pub fn set_fov_degrees(&mut self, degrees: f32) {
        self.set_fov(degrees.to_radians());
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1.0)
    }
}
