//! The ray-pickup demo scene, independent of any window or GPU.
//!
//! Everything the picking demo mutates in response to input lives here:
//! the point cloud, the trackball, the camera, and the pick options. The
//! windowed app and the headless renderer both drive this one type, and the
//! integration tests exercise the full click/drag selection flow through it
//! without a GPU.

use glam::{Mat4, Vec2};
use rand::Rng;

use pickview_core::cloud::PickSpace;
use pickview_core::transform::{world_to_screen, CursorLine};
use pickview_core::{Options, PointCloud, ScreenRect, Trackball, Viewport};
use pickview_render::Camera;

use crate::mouse::CLICK_THRESHOLD;

/// State of the ray-pickup demo.
pub struct PickScene {
    pub cloud: PointCloud,
    pub trackball: Trackball,
    pub camera: Camera,
    pub viewport: Viewport,
    pub options: Options,
}

impl PickScene {
    /// Creates the demo scene: a sphere of random points and a camera at
    /// the configured distance.
    pub fn new(options: Options, rng: &mut impl Rng) -> Self {
        let cloud = PointCloud::scatter_sphere(options.point_count, options.cloud_radius, rng);
        let viewport = Viewport::new(options.window_width, options.window_height);
        let camera = Camera::new(viewport.aspect_ratio());
        let trackball = Trackball::new(options.window_width, options.window_height);

        Self {
            cloud,
            trackball,
            camera,
            viewport,
            options,
        }
    }

    /// Resizes the viewport, camera aspect, and trackball scaling.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
        self.camera.set_aspect_ratio(self.viewport.aspect_ratio());
        self.trackball
            .resize(self.viewport.width, self.viewport.height);
    }

    /// Returns the view matrix: look-at composed with the trackball.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix() * self.trackball.rotation()
    }

    /// Returns the projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.camera.projection_matrix()
    }

    /// Returns the world-to-screen transform for the current view.
    #[must_use]
    pub fn to_screen(&self) -> Mat4 {
        world_to_screen(self.view_matrix(), self.projection_matrix(), &self.viewport)
    }

    /// Unprojects the cursor into the scene.
    #[must_use]
    pub fn cursor_line(&self, cursor: Vec2) -> Option<CursorLine> {
        CursorLine::from_screen(
            cursor,
            self.view_matrix(),
            self.projection_matrix(),
            &self.viewport,
        )
    }

    /// Indices currently under the cursor, in the active margin space.
    #[must_use]
    pub fn hover(&self, cursor: Vec2) -> Vec<usize> {
        match self.options.pick_space {
            PickSpace::World => self
                .cursor_line(cursor)
                .map(|line| self.cloud.pick_world(&line, self.options.world_margin))
                .unwrap_or_default(),
            PickSpace::Screen => {
                self.cloud
                    .pick_screen(self.to_screen(), cursor, self.options.screen_margin)
            }
        }
    }

    /// Applies a left-button release: a short drag toggles the points under
    /// the release position, a long one rectangle-selects.
    pub fn finish_left_drag(&mut self, press: Vec2, release: Vec2) {
        if (release - press).length() < CLICK_THRESHOLD {
            let hits = self.hover(release);
            log::debug!("click pick at {release}: {} hit(s)", hits.len());
            self.cloud.toggle(&hits);
        } else {
            let rect = ScreenRect::from_corners(press, release);
            let hits = self.cloud.pick_rect(self.to_screen(), &rect);
            log::debug!(
                "rectangle select {:?} -> {} hit(s)",
                (rect.min, rect.max),
                hits.len()
            );
            self.cloud.select_exactly(&hits);
        }
    }

    /// Dollies the camera by one wheel step.
    pub fn wheel_dolly(&mut self, scroll: f32) {
        self.camera.dolly(scroll);
    }

    /// Flips the coordinate-axes toggle and returns the new value.
    pub fn toggle_axes(&mut self) -> bool {
        self.options.draw_axes = !self.options.draw_axes;
        self.options.draw_axes
    }

    /// Switches the pick margin space.
    pub fn set_pick_space(&mut self, space: PickSpace) {
        self.options.pick_space = space;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use pickview_core::transform::project_point;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scene() -> PickScene {
        let mut rng = StdRng::seed_from_u64(42);
        PickScene::new(Options::default(), &mut rng)
    }

    /// Screen position of a given cloud point under the current view.
    fn screen_pos_of(scene: &PickScene, index: usize) -> Vec2 {
        let s = project_point(scene.to_screen(), scene.cloud.points()[index].position);
        Vec2::new(s.x, s.y)
    }

    #[test]
    fn hover_finds_point_under_cursor() {
        let scene = scene();
        let cursor = screen_pos_of(&scene, 0);
        let hits = scene.hover(cursor);
        assert!(hits.contains(&0), "cursor over point 0 should hover it");
    }

    #[test]
    fn hover_in_world_space_finds_point_too() {
        let mut scene = scene();
        scene.set_pick_space(PickSpace::World);
        let cursor = screen_pos_of(&scene, 5);
        let hits = scene.hover(cursor);
        assert!(hits.contains(&5));
    }

    #[test]
    fn click_toggles_selection() {
        let mut scene = scene();
        let cursor = screen_pos_of(&scene, 0);

        scene.finish_left_drag(cursor, cursor);
        assert!(scene.cloud.points()[0].selected);

        scene.finish_left_drag(cursor, cursor);
        assert!(!scene.cloud.points()[0].selected);
    }

    #[test]
    fn long_drag_selects_rectangle() {
        let mut scene = scene();
        let size = Vec2::new(
            scene.viewport.width as f32,
            scene.viewport.height as f32,
        );

        // Drag over the whole window: everything selected.
        scene.finish_left_drag(Vec2::ZERO, size);
        assert_eq!(scene.cloud.selected_count(), scene.cloud.len());

        // A later empty-area drag replaces the selection entirely.
        scene.finish_left_drag(Vec2::new(1.0, 1.0), Vec2::new(4.0, 4.0));
        assert_eq!(scene.cloud.selected_count(), 0);
    }

    #[test]
    fn trackball_rotation_moves_hover_target() {
        let mut scene = scene();
        let before = screen_pos_of(&scene, 0);

        scene.trackball.begin_drag(Vec2::new(100.0, 100.0));
        scene.trackball.end_drag(Vec2::new(300.0, 140.0));

        let after = screen_pos_of(&scene, 0);
        assert!(
            (after - before).length() > 1.0,
            "rotation should move the projected point"
        );

        // Picking still works against the rotated view.
        let hits = scene.hover(after);
        assert!(hits.contains(&0));
    }

    #[test]
    fn wheel_dolly_respects_min_distance() {
        let mut scene = scene();
        for _ in 0..200 {
            scene.wheel_dolly(1.0);
        }
        let distance = scene.camera.position.distance(scene.camera.target);
        assert!((distance - Camera::MIN_DISTANCE).abs() < 1e-3);
    }

    #[test]
    fn resize_keeps_picking_consistent() {
        let mut scene = scene();
        scene.resize(1280, 960);
        assert_eq!(scene.viewport.width, 1280);
        assert!((scene.camera.aspect_ratio - 1280.0 / 960.0).abs() < 1e-6);

        let cursor = screen_pos_of(&scene, 3);
        assert!(scene.hover(cursor).contains(&3));
    }

    #[test]
    fn cursor_line_spans_near_to_far() {
        let scene = scene();
        let line = scene
            .cursor_line(Vec2::new(360.0, 360.0))
            .expect("center cursor unprojects");
        // Near point close to the eye, far point far beyond the cloud.
        assert!(line.near.distance(Vec3::new(0.0, 0.0, 80.0)) < 1.0);
        assert!(line.far.length() > 100.0);
    }
}
