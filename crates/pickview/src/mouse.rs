//! Physical mouse button and cursor tracking.

use glam::Vec2;

/// A release this close (in pixels) to its press counts as a click; anything
/// farther is a drag.
pub const CLICK_THRESHOLD: f32 = 2.0;

/// Tracks the physical button state and drag anchors.
///
/// The current position updates on every cursor move, pressed or not, so
/// hover feedback works outside drags too.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    pub left_pressed: bool,
    pub right_pressed: bool,
    /// Where the left button went down.
    pub left_drag_start: Vec2,
    /// Where the right button went down.
    pub right_drag_start: Vec2,
    /// Current cursor position.
    pub position: Vec2,
}

impl MouseState {
    /// Records a left press at the current position.
    pub fn press_left(&mut self) {
        self.left_pressed = true;
        self.left_drag_start = self.position;
    }

    /// Records a left release; returns (press position, release position).
    pub fn release_left(&mut self) -> (Vec2, Vec2) {
        self.left_pressed = false;
        (self.left_drag_start, self.position)
    }

    /// Records a right press at the current position.
    pub fn press_right(&mut self) {
        self.right_pressed = true;
        self.right_drag_start = self.position;
    }

    /// Records a right release.
    pub fn release_right(&mut self) {
        self.right_pressed = false;
    }

    /// Whether a left release at the current position would be a click
    /// rather than a drag.
    #[must_use]
    pub fn is_left_click(&self) -> bool {
        (self.position - self.left_drag_start).length() < CLICK_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_within_threshold() {
        let mut mouse = MouseState::default();
        mouse.position = Vec2::new(100.0, 100.0);
        mouse.press_left();
        mouse.position = Vec2::new(101.0, 100.5);
        assert!(mouse.is_left_click());

        mouse.position = Vec2::new(110.0, 100.0);
        assert!(!mouse.is_left_click());
    }

    #[test]
    fn release_reports_press_and_release_positions() {
        let mut mouse = MouseState::default();
        mouse.position = Vec2::new(10.0, 20.0);
        mouse.press_left();
        mouse.position = Vec2::new(50.0, 60.0);
        let (press, release) = mouse.release_left();
        assert_eq!(press, Vec2::new(10.0, 20.0));
        assert_eq!(release, Vec2::new(50.0, 60.0));
        assert!(!mouse.left_pressed);
    }
}
