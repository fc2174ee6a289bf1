//! Orientation angles relative to the -Z base direction.
//!
//! The base direction is the right-handed "into the screen" unit vector
//! (0, 0, -1): with zero pitch and yaw an orientation faces -Z. Rotations
//! compose in yaw-pitch-roll order, so these angles are not unique for a
//! given direction under other conventions.

use glam::{EulerRot, Mat4, Vec3};

/// Yaw and pitch of a direction, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationAngles {
    /// Rotation about the X axis.
    pub pitch: f32,
    /// Rotation about the Y axis.
    pub yaw: f32,
}

/// Angle about Y carrying the base direction into `v`'s ZX heading.
#[must_use]
pub fn yaw_of(v: Vec3) -> f32 {
    std::f32::consts::PI + v.x.atan2(v.z)
}

/// Length of `v` projected onto the ZX plane.
#[must_use]
pub fn zx_length(v: Vec3) -> f32 {
    (v.z * v.z + v.x * v.x).sqrt()
}

/// Computes the yaw and pitch carrying the base direction into `v`.
#[must_use]
pub fn yaw_pitch_of(v: Vec3) -> OrientationAngles {
    OrientationAngles {
        pitch: v.y.atan2(zx_length(v)),
        yaw: yaw_of(v),
    }
}

/// Rotates `v` by the given Euler angles, applied in yaw-pitch-roll order.
#[must_use]
pub fn rotate_yaw_pitch_roll(v: Vec3, pitch: f32, yaw: f32, roll: f32) -> Vec3 {
    Mat4::from_euler(EulerRot::YXZ, yaw, pitch, roll).transform_point3(v)
}

/// The base direction rotated to face `v`.
///
/// The result is parallel to `v` (and unit length), which is what the
/// rot-angle demo visualizes.
#[must_use]
pub fn base_direction_toward(v: Vec3) -> Vec3 {
    let angles = yaw_pitch_of(v);
    rotate_yaw_pitch_roll(Vec3::NEG_Z, angles.pitch, angles.yaw, 0.0)
}
