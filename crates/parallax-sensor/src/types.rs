use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Raw reading from a rotation-vector sensor.
///
/// Carries the vector part of the unit quaternion describing device attitude.
/// Newer sensors report the scalar part as a fourth value; older ones omit it
/// and it is reconstructed when the rotation matrix is derived.
#[derive(Debug, Clone, Copy)]
pub struct RotationSample {
    /// Quaternion vector part (x, y, z).
    pub vector: Vec3,
    /// Quaternion scalar part, if the sensor reports one.
    pub scalar: Option<f32>,
}

impl RotationSample {
    /// Build a sample from a raw sensor value array.
    ///
    /// Arrays shorter than 3 values carry no attitude and yield `None`.
    pub fn from_values(values: &[f32]) -> Option<Self> {
        if values.len() < 3 {
            return None;
        }
        Some(Self {
            vector: Vec3::new(values[0], values[1], values[2]),
            scalar: values.get(3).copied(),
        })
    }

    /// Build a sample from a unit quaternion.
    pub fn from_quat(q: Quat) -> Self {
        Self {
            vector: Vec3::new(q.x, q.y, q.z),
            scalar: Some(q.w),
        }
    }
}

/// Screen rotation relative to the device's natural orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScreenRotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

/// Sensitivity-scaled tilt deltas relative to the reference orientation.
///
/// Each component is clamped to [-1, 1] and represents the fraction of the
/// maximum renderable offset along its axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TiltVector {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl TiltVector {
    pub const ZERO: TiltVector = TiltVector {
        yaw: 0.0,
        pitch: 0.0,
        roll: 0.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_from_short_array_is_rejected() {
        assert!(RotationSample::from_values(&[]).is_none());
        assert!(RotationSample::from_values(&[0.1, 0.2]).is_none());
    }

    #[test]
    fn sample_from_three_values_has_no_scalar() {
        let sample = RotationSample::from_values(&[0.1, 0.2, 0.3]).unwrap();
        assert_eq!(sample.vector, Vec3::new(0.1, 0.2, 0.3));
        assert!(sample.scalar.is_none());
    }

    #[test]
    fn sample_from_four_values_keeps_scalar() {
        let sample = RotationSample::from_values(&[0.0, 0.0, 0.0, 1.0]).unwrap();
        assert_eq!(sample.scalar, Some(1.0));
    }
}
