//! End-to-end selection flow tests, no GPU required.
//!
//! Drives the same [`PickScene`] + [`MouseState`] pair the windowed demo
//! uses, simulating the event sequences the window would deliver.

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

use pickview::transform::project_point;
use pickview::{MouseState, Options, PickScene, PickSpace};

fn scene() -> PickScene {
    let mut rng = StdRng::seed_from_u64(1234);
    PickScene::new(Options::default(), &mut rng)
}

/// Screen position of a cloud point under the scene's current view.
fn screen_pos_of(scene: &PickScene, index: usize) -> Vec2 {
    let s = project_point(scene.to_screen(), scene.cloud.points()[index].position);
    Vec2::new(s.x, s.y)
}

/// Simulates a full left press-move-release at the given positions.
fn left_drag(scene: &mut PickScene, mouse: &mut MouseState, press: Vec2, release: Vec2) {
    mouse.position = press;
    mouse.press_left();
    mouse.position = release;
    let (p, r) = mouse.release_left();
    scene.finish_left_drag(p, r);
}

#[test]
fn click_pick_toggles_and_untoggles() {
    let mut scene = scene();
    let mut mouse = MouseState::default();

    let target = screen_pos_of(&scene, 10);

    // Click directly on point 10.
    left_drag(&mut scene, &mut mouse, target, target);
    assert!(scene.cloud.points()[10].selected);

    // A sub-threshold wiggle still counts as a click and toggles back.
    left_drag(
        &mut scene,
        &mut mouse,
        target,
        target + Vec2::new(1.0, 0.5),
    );
    assert!(!scene.cloud.points()[10].selected);
}

#[test]
fn click_on_empty_space_changes_nothing() {
    let mut scene = scene();
    let mut mouse = MouseState::default();

    scene.cloud.toggle(&[0]);
    // The window corner has no points under it.
    left_drag(
        &mut scene,
        &mut mouse,
        Vec2::new(2.0, 2.0),
        Vec2::new(2.0, 2.0),
    );
    assert_eq!(scene.cloud.selected_count(), 1);
}

#[test]
fn rectangle_drag_replaces_selection() {
    let mut scene = scene();
    let mut mouse = MouseState::default();

    // Seed a selection that the rectangle should wipe out.
    scene.cloud.toggle(&[0, 1, 2]);

    // Drag over the left half of the window.
    let h = scene.viewport.height as f32;
    let half_w = scene.viewport.width as f32 / 2.0;
    left_drag(
        &mut scene,
        &mut mouse,
        Vec2::new(0.0, 0.0),
        Vec2::new(half_w, h),
    );

    let to_screen = scene.to_screen();
    for (i, p) in scene.cloud.points().iter().enumerate() {
        let s = project_point(to_screen, p.position);
        let inside = s.x > 0.0 && s.x < half_w && s.y > 0.0 && s.y < h;
        assert_eq!(
            p.selected, inside,
            "point {i} at screen ({}, {}) selection mismatch",
            s.x, s.y
        );
    }
}

#[test]
fn reverse_direction_drag_normalizes() {
    let mut scene = scene();
    let mut mouse = MouseState::default();

    let size = Vec2::new(
        scene.viewport.width as f32,
        scene.viewport.height as f32,
    );
    // Bottom-right to top-left selects the same full-window rectangle.
    left_drag(&mut scene, &mut mouse, size, Vec2::ZERO);
    assert_eq!(scene.cloud.selected_count(), scene.cloud.len());
}

#[test]
fn world_margin_mode_picks_through_rotation() {
    let mut scene = scene();
    scene.set_pick_space(PickSpace::World);

    // Rotate the trackball, then pick the point where it now appears.
    scene.trackball.begin_drag(Vec2::new(200.0, 300.0));
    scene.trackball.drag_to(Vec2::new(340.0, 250.0));
    scene.trackball.end_drag(Vec2::new(340.0, 250.0));

    let target = screen_pos_of(&scene, 77);
    let hits = scene.hover(target);
    assert!(hits.contains(&77), "world-space pick missed after rotation");
}

#[test]
fn hover_tracks_without_buttons() {
    let scene = scene();
    let mut mouse = MouseState::default();

    // Passive motion: position updates with no buttons pressed.
    mouse.position = screen_pos_of(&scene, 3);
    assert!(!mouse.left_pressed && !mouse.right_pressed);
    assert!(scene.hover(mouse.position).contains(&3));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // Arbitrary press/release sequences keep the cloud consistent:
        // selection counts stay in range and the flow never panics.
        #[test]
        fn arbitrary_drags_keep_selection_consistent(
            drags in prop::collection::vec(
                (0.0f32..720.0, 0.0f32..720.0, 0.0f32..720.0, 0.0f32..720.0),
                1..6,
            )
        ) {
            let mut rng = StdRng::seed_from_u64(5);
            let mut scene = PickScene::new(Options::default(), &mut rng);
            let mut mouse = MouseState::default();

            for (x0, y0, x1, y1) in drags {
                left_drag(
                    &mut scene,
                    &mut mouse,
                    Vec2::new(x0, y0),
                    Vec2::new(x1, y1),
                );
                prop_assert!(scene.cloud.selected_count() <= scene.cloud.len());
            }
        }
    }
}

#[test]
fn zoom_then_pick_still_lands() {
    let mut scene = scene();
    // Zoom in a long way (clamped), then pick.
    for _ in 0..60 {
        scene.wheel_dolly(1.0);
    }
    assert!(scene.camera.position.distance(Vec3::ZERO) >= 1.0);

    let target = screen_pos_of(&scene, 42);
    // The point may now be off-screen; only assert when visible.
    let vw = scene.viewport.width as f32;
    let vh = scene.viewport.height as f32;
    if target.x > 0.0 && target.x < vw && target.y > 0.0 && target.y < vh {
        assert!(scene.hover(target).contains(&42));
    }
}
