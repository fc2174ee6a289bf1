//! Screen/world coordinate transforms.
//!
//! A cursor position `s` relates to a world position `w` through
//! `s = Mviewport * Mproj * Mview * w`, so unprojection applies the single
//! inverse of the combined matrix rather than the product of three inverses.
//! Depth follows the wgpu convention: NDC z in [0, 1], mapped by the
//! viewport to `[min_depth, max_depth]`.

use glam::{Mat4, Vec2, Vec3, Vec4};

/// A Direct3D-style viewport rectangle.
///
/// `min_depth`/`max_depth` are normally 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Creates a viewport at the origin with the full depth range.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    /// Updates the size, clamping degenerate dimensions to one pixel.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    /// Returns width / height.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveParams {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Default for PerspectiveParams {
    fn default() -> Self {
        Self {
            fov_y: std::f32::consts::FRAC_PI_4, // 45 degrees
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl PerspectiveParams {
    /// Creates parameters from a field of view given in degrees.
    #[must_use]
    pub fn from_degrees(fov_y_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y: fov_y_degrees.to_radians(),
            near,
            far,
        }
    }

    /// Returns the projection matrix for the given aspect ratio.
    #[must_use]
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect_ratio, self.near, self.far)
    }
}

/// Builds the viewport matrix mapping NDC to screen pixels.
///
/// The Y axis flips so the screen origin is the top-left corner. Rendering
/// APIs hide this matrix behind their viewport state; it is spelled out here
/// so the full screen transform can be composed and inverted on the CPU.
#[must_use]
pub fn viewport_matrix(vp: &Viewport) -> Mat4 {
    let w = vp.width as f32;
    let h = vp.height as f32;
    Mat4::from_cols(
        Vec4::new(w * 0.5, 0.0, 0.0, 0.0),
        Vec4::new(0.0, -h * 0.5, 0.0, 0.0),
        Vec4::new(0.0, 0.0, vp.max_depth - vp.min_depth, 0.0),
        Vec4::new(
            vp.x as f32 + w * 0.5,
            vp.y as f32 + h * 0.5,
            vp.min_depth,
            1.0,
        ),
    )
}

/// Returns the matrix transforming world coordinates to screen pixels.
#[must_use]
pub fn world_to_screen(view: Mat4, proj: Mat4, vp: &Viewport) -> Mat4 {
    viewport_matrix(vp) * proj * view
}

/// Returns the matrix transforming screen pixels back to world coordinates.
///
/// A single inverse of the combined matrix, not the product of three
/// inverses.
#[must_use]
pub fn screen_to_world(view: Mat4, proj: Mat4, vp: &Viewport) -> Mat4 {
    world_to_screen(view, proj, vp).inverse()
}

/// Transforms a point by `mat` and projects the result back to w = 1.
#[must_use]
pub fn project_point(mat: Mat4, point: Vec3) -> Vec3 {
    let v = mat * point.extend(1.0);
    v.truncate() / v.w
}

/// Unprojects a screen position (pixels plus depth) to world coordinates.
///
/// For repeated conversions build [`screen_to_world`] once and use
/// [`project_point`] directly.
#[must_use]
pub fn unproject(screen: Vec3, view: Mat4, proj: Mat4, vp: &Viewport) -> Vec3 {
    project_point(screen_to_world(view, proj, vp), screen)
}

/// A world-space ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Returns the point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// The infinite line through the scene under a cursor position.
///
/// `near` and `far` are the cursor unprojected at screen depth 0 and 1; any
/// world point the cursor covers lies on the line through them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorLine {
    pub near: Vec3,
    pub far: Vec3,
}

impl CursorLine {
    /// Unprojects a cursor position through the inverse screen transform.
    ///
    /// Returns `None` when the unprojection degenerates (w near zero), which
    /// can happen for extreme cursor positions with a near-singular view.
    #[must_use]
    pub fn from_screen(cursor: Vec2, view: Mat4, proj: Mat4, vp: &Viewport) -> Option<Self> {
        let inv = screen_to_world(view, proj, vp);

        let near = inv * Vec4::new(cursor.x, cursor.y, 0.0, 1.0);
        let far = inv * Vec4::new(cursor.x, cursor.y, 1.0, 1.0);
        if near.w.abs() < 1e-6 || far.w.abs() < 1e-6 {
            return None;
        }

        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;
        if (far - near).length_squared() < 1e-12 {
            return None;
        }

        Some(Self { near, far })
    }

    /// Returns the normalized direction from near to far.
    #[must_use]
    pub fn direction(&self) -> Vec3 {
        (self.far - self.near).normalize()
    }

    /// Returns the ray starting at the near point.
    #[must_use]
    pub fn ray(&self) -> Ray {
        Ray {
            origin: self.near,
            direction: self.direction(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_setup() -> (Mat4, Mat4, Viewport) {
        let vp = Viewport::new(720, 720);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 80.0), Vec3::ZERO, Vec3::Y);
        let proj = PerspectiveParams::default().projection_matrix(vp.aspect_ratio());
        (view, proj, vp)
    }

    #[test]
    fn viewport_matrix_maps_ndc_corners() {
        let vp = Viewport::new(800, 600);
        let m = viewport_matrix(&vp);

        // NDC (-1, 1) is the top-left pixel corner, (1, -1) the bottom-right.
        let top_left = project_point(m, Vec3::new(-1.0, 1.0, 0.0));
        assert!((top_left.x - 0.0).abs() < 1e-4);
        assert!((top_left.y - 0.0).abs() < 1e-4);

        let bottom_right = project_point(m, Vec3::new(1.0, -1.0, 0.0));
        assert!((bottom_right.x - 800.0).abs() < 1e-4);
        assert!((bottom_right.y - 600.0).abs() < 1e-4);

        let center = project_point(m, Vec3::ZERO);
        assert!((center.x - 400.0).abs() < 1e-4);
        assert!((center.y - 300.0).abs() < 1e-4);
    }

    #[test]
    fn viewport_depth_range_maps_to_min_max() {
        let vp = Viewport::new(100, 100);
        let m = viewport_matrix(&vp);
        assert!((project_point(m, Vec3::new(0.0, 0.0, 0.0)).z - 0.0).abs() < 1e-6);
        assert!((project_point(m, Vec3::new(0.0, 0.0, 1.0)).z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn resize_clamps_to_one_pixel() {
        let mut vp = Viewport::new(720, 720);
        vp.resize(0, 0);
        assert_eq!(vp.width, 1);
        assert_eq!(vp.height, 1);
    }

    #[test]
    fn project_unproject_round_trip() {
        let (view, proj, vp) = test_setup();
        let to_screen = world_to_screen(view, proj, &vp);
        let to_world = screen_to_world(view, proj, &vp);

        let world = Vec3::new(3.0, -5.0, 10.0);
        let screen = project_point(to_screen, world);
        let back = project_point(to_world, screen);

        assert!(
            (back - world).length() < 1e-3,
            "round trip drifted: {world} -> {screen} -> {back}"
        );
    }

    #[test]
    fn unproject_inverts_projection() {
        let (view, proj, vp) = test_setup();
        let world = Vec3::new(-2.0, 6.0, 1.0);
        let screen = project_point(world_to_screen(view, proj, &vp), world);
        let back = unproject(screen, view, proj, &vp);
        assert!((back - world).length() < 1e-3);
    }

    #[test]
    fn cursor_line_screen_center_looks_down_view_axis() {
        let (view, proj, vp) = test_setup();
        let line = CursorLine::from_screen(Vec2::new(360.0, 360.0), view, proj, &vp)
            .expect("center cursor should unproject");

        // Camera sits on +Z looking at the origin, so the center ray runs -Z.
        let dir = line.direction();
        assert!(dir.z < -0.999, "unexpected direction {dir}");
        assert!(dir.x.abs() < 1e-3 && dir.y.abs() < 1e-3);
    }

    #[test]
    fn cursor_line_near_point_sits_on_near_plane() {
        let (view, proj, vp) = test_setup();
        let line = CursorLine::from_screen(Vec2::new(360.0, 360.0), view, proj, &vp).unwrap();

        // Eye at z = 80, near plane 0.1 along -Z.
        assert!((line.near.z - 79.9).abs() < 1e-2, "near = {}", line.near);
    }

    #[test]
    fn cursor_ray_marches_from_near_toward_far() {
        let (view, proj, vp) = test_setup();
        let line = CursorLine::from_screen(Vec2::new(360.0, 360.0), view, proj, &vp).unwrap();
        let ray = line.ray();

        assert_eq!(ray.origin, line.near);
        assert!((ray.direction.length() - 1.0).abs() < 1e-5);
        let t = line.near.distance(line.far);
        assert!((ray.at(t) - line.far).length() < 1e-2);
    }

    #[test]
    fn cursor_line_passes_through_projected_point() {
        let (view, proj, vp) = test_setup();
        let to_screen = world_to_screen(view, proj, &vp);

        let world = Vec3::new(4.0, 2.0, -7.0);
        let screen = project_point(to_screen, world);
        let line = CursorLine::from_screen(Vec2::new(screen.x, screen.y), view, proj, &vp).unwrap();

        let d2 = crate::intersect::line_point_distance_squared(line.near, line.far, world);
        assert!(d2 < 1e-4, "line misses its own projection source: {d2}");
    }

    proptest! {
        #[test]
        fn round_trip_arbitrary_points(
            x in -30.0f32..30.0,
            y in -30.0f32..30.0,
            z in -30.0f32..30.0,
        ) {
            let (view, proj, vp) = test_setup();
            let to_screen = world_to_screen(view, proj, &vp);
            let to_world = screen_to_world(view, proj, &vp);

            let world = Vec3::new(x, y, z);
            let back = project_point(to_world, project_point(to_screen, world));
            prop_assert!((back - world).length() < 1e-2);
        }
    }
}
