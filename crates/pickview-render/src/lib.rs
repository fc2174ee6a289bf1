//! Rendering backend for pickview.
//!
//! A deliberately small wgpu engine: a camera, a shared camera uniform
//! buffer, and one renderer per primitive kind (points, lines, the
//! screen-space overlay, and the compute-generated texture). Windowed and
//! headless targets share all of it.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// GPU code casts between float/integer sizes constantly
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

pub mod camera;
pub mod capture;
pub mod compute;
pub mod engine;
pub mod error;
pub mod lines;
pub mod overlay;
pub mod points;

pub use camera::Camera;
pub use capture::{read_texture_bytes, save_image};
pub use compute::{ComputeTexturePass, FRAME_WRAP, ROLL_STEP, TEX_HEIGHT, TEX_WIDTH};
pub use engine::{CameraUniforms, RenderEngine, DEPTH_FORMAT, HEADLESS_FORMAT};
pub use error::{RenderError, RenderResult};
pub use lines::{axis_lines, LineBuffer, LineRenderer, LineVertex};
pub use overlay::OverlayRenderer;
pub use points::{PointRenderData, PointRenderer, PointUniforms};
