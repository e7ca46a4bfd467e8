//! Rotation-matrix primitives for orientation interpretation.
//!
//! These follow the device-orientation conventions used by mobile sensor
//! stacks: matrices map device coordinates into the world frame, and angular
//! deltas are reported as yaw/pitch/roll in radians.

use crate::types::RotationSample;
use glam::{Mat3, Quat, Vec3};

/// Physical sensor axis, possibly negated, used for coordinate remapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
    MinusX,
    MinusY,
    MinusZ,
}

impl Axis {
    /// Column index of the physical axis and the sign applied to it.
    fn decompose(self) -> (usize, f32) {
        match self {
            Axis::X => (0, 1.0),
            Axis::Y => (1, 1.0),
            Axis::Z => (2, 1.0),
            Axis::MinusX => (0, -1.0),
            Axis::MinusY => (1, -1.0),
            Axis::MinusZ => (2, -1.0),
        }
    }
}

/// Rotation matrix corresponding to a rotation-vector sample.
///
/// The scalar part of the quaternion is used when the sensor reports it and
/// reconstructed from the vector part otherwise.
pub fn rotation_matrix_from_vector(sample: &RotationSample) -> Mat3 {
    let v = sample.vector;
    let w = sample
        .scalar
        .unwrap_or_else(|| (1.0 - v.length_squared()).max(0.0).sqrt());
    let q = Quat::from_xyzw(v.x, v.y, v.z, w);
    // A sensor reporting all zeroes yields the zero quaternion, which has
    // no orientation to normalize.
    if q.length_squared() > 0.0 {
        Mat3::from_quat(q.normalize())
    } else {
        Mat3::IDENTITY
    }
}

/// Re-express `m` with `new_x` and `new_y` as the logical X and Y axes.
///
/// `new_x` and `new_y` must name different physical axes. The third axis is
/// derived with the sign that keeps the result a proper rotation.
pub fn remap_coordinate_system(m: Mat3, new_x: Axis, new_y: Axis) -> Mat3 {
    let (xi, sx) = new_x.decompose();
    let (yi, sy) = new_y.decompose();
    debug_assert_ne!(xi, yi, "remap axes must be distinct");
    let zi = 3 - xi - yi;
    // Even permutations of (x, y, z) keep the handedness; odd ones flip it.
    let parity = if (xi + 1) % 3 == yi { 1.0 } else { -1.0 };
    let sz = sx * sy * parity;

    let mut cols = [Vec3::ZERO; 3];
    cols[xi] = m.col(0) * sx;
    cols[yi] = m.col(1) * sy;
    cols[zi] = m.col(2) * sz;
    Mat3::from_cols(cols[0], cols[1], cols[2])
}

/// Yaw, pitch, and roll (radians) taking `reference` to `current`.
///
/// Components lie in (-pi, pi] (pitch in [-pi/2, pi/2]).
pub fn angle_change(current: Mat3, reference: Mat3) -> Vec3 {
    let d = reference.transpose() * current;
    // Flush negative zero in the atan2 operands so half-turn deltas land
    // on the +pi end of the range, not -pi.
    Vec3::new(
        (d.y_axis.x + 0.0).atan2(d.y_axis.y),
        (-d.y_axis.z).clamp(-1.0, 1.0).asin(),
        (-d.x_axis.z + 0.0).atan2(d.z_axis.z),
    )
}
