//! Core picking math for pickview.
//!
//! Everything in this crate is pure CPU-side geometry: converting cursor
//! positions into world-space rays, intersecting those rays (or screen-space
//! boxes) against a selectable point cloud, and mapping mouse drags to
//! rotations. None of it touches the GPU, so all of it is unit-testable.
//!
//! - [`transform`] - viewport/world/screen matrix helpers and cursor rays
//! - [`intersect`] - line-sphere and rectangle containment primitives
//! - [`trackball`] - drag-to-rotation quaternion accumulator
//! - [`euler`] - orientation angles relative to a base direction
//! - [`cloud`] - the selectable point cloud and its pick operations
//! - [`color`] - color constants and RGB/HSV conversion
//! - [`options`] - persistent demo settings

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod cloud;
pub mod color;
pub mod error;
pub mod euler;
pub mod intersect;
pub mod options;
pub mod trackball;
pub mod transform;

pub use cloud::{CloudPoint, PickSpace, PointCloud};
pub use error::{CoreError, Result};
pub use intersect::{line_hits_sphere, line_point_distance_squared, ScreenRect};
pub use options::Options;
pub use trackball::Trackball;
pub use transform::{CursorLine, PerspectiveParams, Ray, Viewport};

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
