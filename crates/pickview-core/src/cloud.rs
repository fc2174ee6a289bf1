//! The selectable point cloud and its pick operations.
//!
//! Picking runs in one of two margin spaces. World-space picking intersects
//! the cursor's unprojected line against a small sphere around each point;
//! it suits scenes where drawn point size tracks the camera distance.
//! Screen-space picking projects each point to pixels and tests a margin box
//! around the cursor; it suits fixed-pixel-size points. Drag-rectangle
//! selection always tests in screen space.
//!
//! All pick tests are O(n) over the cloud.

use glam::{Mat4, Vec2, Vec3, Vec4};
use rand::Rng;

use crate::color;
use crate::intersect::{line_hits_sphere, ScreenRect};
use crate::transform::{project_point, CursorLine};

/// Default world-space intersection margin, in world units.
pub const DEFAULT_WORLD_MARGIN: f32 = 0.2;
/// Default screen-space intersection margin, in pixels.
pub const DEFAULT_SCREEN_MARGIN: f32 = 2.0;

/// Which space the cursor pick margin lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum PickSpace {
    /// Margin is a sphere radius in world units.
    World,
    /// Margin is a pixel box half-extent around the cursor.
    #[default]
    Screen,
}

/// One point of the cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudPoint {
    /// World position.
    pub position: Vec3,
    /// Base display color.
    pub color: Vec4,
    /// Whether the point is currently selected.
    pub selected: bool,
}

/// A cloud of selectable points.
#[derive(Debug, Clone, Default)]
pub struct PointCloud {
    points: Vec<CloudPoint>,
}

impl PointCloud {
    /// Creates a cloud from existing points.
    #[must_use]
    pub fn new(points: Vec<CloudPoint>) -> Self {
        Self { points }
    }

    /// Scatters `count` unselected points uniformly over a sphere surface.
    ///
    /// Random directions are normalized onto the sphere of the given radius.
    /// Points are colored by octant: all components positive is yellow, all
    /// negative cyan, anything else white.
    pub fn scatter_sphere(count: usize, radius: f32, rng: &mut impl Rng) -> Self {
        let mut points = Vec::with_capacity(count);
        while points.len() < count {
            let dir = Vec3::new(
                rng.gen_range(-1.0f32..=1.0),
                rng.gen_range(-1.0f32..=1.0),
                rng.gen_range(-1.0f32..=1.0),
            );
            // A zero-length sample cannot be normalized; redraw it.
            if dir.length_squared() < 1e-12 {
                continue;
            }
            let position = dir.normalize() * radius;

            let color = if position.x > 0.0 && position.y > 0.0 && position.z > 0.0 {
                color::YELLOW
            } else if position.x < 0.0 && position.y < 0.0 && position.z < 0.0 {
                color::CYAN
            } else {
                color::WHITE
            };

            points.push(CloudPoint {
                position,
                color,
                selected: false,
            });
        }
        Self { points }
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true when the cloud has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the points.
    #[must_use]
    pub fn points(&self) -> &[CloudPoint] {
        &self.points
    }

    /// Returns the point positions (for GPU upload).
    #[must_use]
    pub fn positions(&self) -> Vec<Vec3> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// Returns how many points are selected.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.points.iter().filter(|p| p.selected).count()
    }

    /// Indices whose margin sphere intersects the cursor's unprojected line.
    #[must_use]
    pub fn pick_world(&self, line: &CursorLine, margin: f32) -> Vec<usize> {
        self.points
            .iter()
            .enumerate()
            .filter(|(_, p)| line_hits_sphere(line.near, line.far, p.position, margin))
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices whose screen projection lands in the margin box at `cursor`.
    #[must_use]
    pub fn pick_screen(&self, to_screen: Mat4, cursor: Vec2, margin: f32) -> Vec<usize> {
        self.points
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                let s = project_point(to_screen, p.position);
                ScreenRect::around(Vec2::new(s.x, s.y), margin).contains(cursor)
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Indices whose screen projection falls inside the drag rectangle.
    #[must_use]
    pub fn pick_rect(&self, to_screen: Mat4, rect: &ScreenRect) -> Vec<usize> {
        self.points
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                let s = project_point(to_screen, p.position);
                rect.contains(Vec2::new(s.x, s.y))
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Click semantics: flips the selection of every hit point.
    pub fn toggle(&mut self, hits: &[usize]) {
        for &i in hits {
            if let Some(p) = self.points.get_mut(i) {
                p.selected = !p.selected;
            }
        }
    }

    /// Rectangle semantics: selection becomes exactly the hit set.
    pub fn select_exactly(&mut self, hits: &[usize]) {
        for p in &mut self.points {
            p.selected = false;
        }
        for &i in hits {
            if let Some(p) = self.points.get_mut(i) {
                p.selected = true;
            }
        }
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        for p in &mut self.points {
            p.selected = false;
        }
    }

    /// Per-frame display colors.
    ///
    /// Hovered points render magenta, selected points black, everything else
    /// its base color. Hover wins over selection.
    #[must_use]
    pub fn display_colors(&self, hovered: &[usize]) -> Vec<Vec4> {
        let mut colors: Vec<Vec4> = self
            .points
            .iter()
            .map(|p| if p.selected { color::BLACK } else { p.color })
            .collect();
        for &i in hovered {
            if let Some(c) = colors.get_mut(i) {
                *c = color::MAGENTA;
            }
        }
        colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{world_to_screen, PerspectiveParams, Viewport};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn demo_cloud() -> PointCloud {
        let mut rng = StdRng::seed_from_u64(7);
        PointCloud::scatter_sphere(1000, 10.0, &mut rng)
    }

    fn demo_view() -> (Mat4, Mat4, Viewport) {
        let vp = Viewport::new(720, 720);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 80.0), Vec3::ZERO, Vec3::Y);
        let proj = PerspectiveParams::default().projection_matrix(vp.aspect_ratio());
        (view, proj, vp)
    }

    #[test]
    fn scatter_puts_points_on_the_sphere() {
        let cloud = demo_cloud();
        assert_eq!(cloud.len(), 1000);
        for p in cloud.points() {
            assert!((p.position.length() - 10.0).abs() < 1e-4);
            assert!(!p.selected);
        }
    }

    #[test]
    fn scatter_colors_by_octant() {
        let cloud = demo_cloud();
        for p in cloud.points() {
            let pos = p.position;
            let expected = if pos.x > 0.0 && pos.y > 0.0 && pos.z > 0.0 {
                color::YELLOW
            } else if pos.x < 0.0 && pos.y < 0.0 && pos.z < 0.0 {
                color::CYAN
            } else {
                color::WHITE
            };
            assert_eq!(p.color, expected);
        }
        // A uniform scatter hits all three color classes.
        assert!(cloud.points().iter().any(|p| p.color == color::YELLOW));
        assert!(cloud.points().iter().any(|p| p.color == color::CYAN));
        assert!(cloud.points().iter().any(|p| p.color == color::WHITE));
    }

    #[test]
    fn pick_world_finds_point_on_the_line() {
        let cloud = PointCloud::new(vec![
            CloudPoint {
                position: Vec3::new(0.0, 0.0, -5.0),
                color: color::WHITE,
                selected: false,
            },
            CloudPoint {
                position: Vec3::new(3.0, 0.0, -5.0),
                color: color::WHITE,
                selected: false,
            },
        ]);
        let line = CursorLine {
            near: Vec3::new(0.0, 0.0, 10.0),
            far: Vec3::new(0.0, 0.0, -10.0),
        };

        assert_eq!(cloud.pick_world(&line, DEFAULT_WORLD_MARGIN), vec![0]);
        // A margin large enough to reach the second point picks both.
        assert_eq!(cloud.pick_world(&line, 3.5), vec![0, 1]);
    }

    #[test]
    fn pick_screen_respects_margin() {
        let (view, proj, vp) = demo_view();
        let to_screen = world_to_screen(view, proj, &vp);

        let world = Vec3::new(2.0, -1.0, 4.0);
        let cloud = PointCloud::new(vec![CloudPoint {
            position: world,
            color: color::WHITE,
            selected: false,
        }]);

        let s = project_point(to_screen, world);
        let at_point = Vec2::new(s.x, s.y);

        assert_eq!(
            cloud.pick_screen(to_screen, at_point, DEFAULT_SCREEN_MARGIN),
            vec![0]
        );
        let far_away = at_point + Vec2::new(10.0, 0.0);
        assert!(cloud
            .pick_screen(to_screen, far_away, DEFAULT_SCREEN_MARGIN)
            .is_empty());
    }

    #[test]
    fn pick_rect_selects_projected_points() {
        let (view, proj, vp) = demo_view();
        let to_screen = world_to_screen(view, proj, &vp);
        let cloud = demo_cloud();

        // The whole window rectangle catches every point in front of the camera.
        let rect = ScreenRect::from_corners(Vec2::ZERO, Vec2::new(720.0, 720.0));
        let hits = cloud.pick_rect(to_screen, &rect);
        assert_eq!(hits.len(), cloud.len());

        // An empty rectangle catches nothing.
        let rect = ScreenRect::from_corners(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0));
        assert!(cloud.pick_rect(to_screen, &rect).is_empty());
    }

    #[test]
    fn toggle_flips_only_hits() {
        let mut cloud = demo_cloud();
        cloud.toggle(&[1, 3]);
        assert!(cloud.points()[1].selected);
        assert!(cloud.points()[3].selected);
        assert!(!cloud.points()[0].selected);

        // Toggling again flips back.
        cloud.toggle(&[1]);
        assert!(!cloud.points()[1].selected);
        assert!(cloud.points()[3].selected);
        assert_eq!(cloud.selected_count(), 1);
    }

    #[test]
    fn select_exactly_is_absolute() {
        let mut cloud = demo_cloud();
        cloud.toggle(&[0, 1, 2]);

        cloud.select_exactly(&[5, 6]);
        assert_eq!(cloud.selected_count(), 2);
        assert!(!cloud.points()[0].selected);
        assert!(cloud.points()[5].selected);

        // An empty hit set clears everything.
        cloud.select_exactly(&[]);
        assert_eq!(cloud.selected_count(), 0);
    }

    #[test]
    fn display_colors_precedence() {
        let mut cloud = demo_cloud();
        cloud.toggle(&[0, 1]);

        let colors = cloud.display_colors(&[1, 2]);
        assert_eq!(colors[0], color::BLACK, "selected renders black");
        assert_eq!(colors[1], color::MAGENTA, "hover beats selection");
        assert_eq!(colors[2], color::MAGENTA, "hover renders magenta");
        assert_eq!(colors[3], cloud.points()[3].color, "others keep base color");
    }
}
