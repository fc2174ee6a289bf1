//! Persistent demo settings.

use glam::Vec4;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cloud::{PickSpace, DEFAULT_SCREEN_MARGIN, DEFAULT_WORLD_MARGIN};
use crate::color;
use crate::error::Result;

/// Configuration options for the pickview demos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Options {
    /// Window size in pixels.
    pub window_width: u32,
    pub window_height: u32,

    /// Background clear color.
    pub background: Vec4,

    /// Rendered point size in pixels.
    pub point_size: f32,

    /// Number of points scattered over the demo sphere.
    pub point_count: usize,

    /// Radius of the demo sphere.
    pub cloud_radius: f32,

    /// Which space the cursor pick margin lives in.
    pub pick_space: PickSpace,

    /// World-space pick margin (sphere radius).
    pub world_margin: f32,

    /// Screen-space pick margin (pixel box half-extent).
    pub screen_margin: f32,

    /// Whether to draw the coordinate axes.
    pub draw_axes: bool,

    /// Length of the drawn coordinate axes.
    pub axis_length: f32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            window_width: 720,
            window_height: 720,
            background: color::DODGER_BLUE,
            point_size: 2.0,
            point_count: 1000,
            cloud_radius: 10.0,
            pick_space: PickSpace::Screen,
            world_margin: DEFAULT_WORLD_MARGIN,
            screen_margin: DEFAULT_SCREEN_MARGIN,
            draw_axes: true,
            axis_length: 20.0,
        }
    }
}

impl Options {
    /// Returns the pick margin for the active space.
    #[must_use]
    pub fn active_margin(&self) -> f32 {
        match self.pick_space {
            PickSpace::World => self.world_margin,
            PickSpace::Screen => self.screen_margin,
        }
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(&path)?;
        let options = serde_json::from_str(&text)?;
        log::debug!("options loaded from {}", path.as_ref().display());
        Ok(options)
    }

    /// Saves options to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, text)?;
        log::debug!("options saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo_constants() {
        let opts = Options::default();
        assert_eq!(opts.window_width, 720);
        assert_eq!(opts.window_height, 720);
        assert_eq!(opts.pick_space, PickSpace::Screen);
        assert!((opts.world_margin - 0.2).abs() < f32::EPSILON);
        assert!((opts.screen_margin - 2.0).abs() < f32::EPSILON);
        assert!(opts.draw_axes);
    }

    #[test]
    fn active_margin_follows_pick_space() {
        let mut opts = Options::default();
        assert!((opts.active_margin() - 2.0).abs() < f32::EPSILON);
        opts.pick_space = PickSpace::World;
        assert!((opts.active_margin() - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn json_round_trip() {
        let mut opts = Options::default();
        opts.pick_space = PickSpace::World;
        opts.point_size = 4.0;

        let text = serde_json::to_string(&opts).unwrap();
        let back: Options = serde_json::from_str(&text).unwrap();
        assert_eq!(back.pick_space, PickSpace::World);
        assert!((back.point_size - 4.0).abs() < f32::EPSILON);
        assert_eq!(back.background, opts.background);
    }
}
