//! pickview: interactive picking, trackball, and compute-texture demos.
//!
//! Three self-contained demo programs over a shared engine:
//!
//! - **ray pickup** ([`run_ray_pickup`]) - click and drag-rectangle
//!   selection on a point cloud, with trackball rotation and a choice of
//!   world-space or screen-space pick margins;
//! - **rotation angles** ([`run_rot_angle`]) - Euler-angle extraction
//!   visualized by rotating a base direction toward a movable target;
//! - **compute texture** ([`run_compute_texture`]) - a compute shader
//!   regenerating an animated texture every frame.
//!
//! The picking math lives in `pickview-core` and the wgpu plumbing in
//! `pickview-render`; this crate wires input to both. [`PickScene`] holds
//! everything the picking demo mutates, so the whole selection flow also
//! runs headlessly (see [`headless`]).
//!
//! # Quick start
//!
//! ```no_run
//! fn main() {
//!     env_logger::init();
//!     if let Err(e) = pickview::run_ray_pickup(pickview::Options::default()) {
//!         log::error!("{e}");
//!         std::process::exit(1);
//!     }
//! }
//! ```

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]

pub mod apps;
pub mod error;
pub mod headless;
pub mod mouse;
pub mod scene;

pub use apps::{run_compute_texture, run_ray_pickup, run_rot_angle};
pub use error::{PickviewError, Result};
pub use headless::{generate_texture, render_scene_to_file, render_scene_to_image};
pub use mouse::{MouseState, CLICK_THRESHOLD};
pub use scene::PickScene;

// Re-export the core and render surface
pub use pickview_core::{
    cloud::PickSpace, color, euler, intersect, transform, CloudPoint, Options, PointCloud,
    ScreenRect, Trackball, Viewport,
};
pub use pickview_render::{Camera, ComputeTexturePass, RenderEngine};

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
