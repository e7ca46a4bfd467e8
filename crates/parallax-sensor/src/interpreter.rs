use crate::matrix::{angle_change, remap_coordinate_system, rotation_matrix_from_vector, Axis};
use crate::types::{RotationSample, ScreenRotation, TiltVector};
use glam::Mat3;
use std::f32::consts::PI;
use thiserror::Error;

/// Default gain applied to normalized angular deltas.
pub const DEFAULT_TILT_SENSITIVITY: f32 = 2.0;

#[derive(Debug, Error)]
pub enum TiltError {
    #[error("tilt sensitivity must be positive (got {0})")]
    InvalidSensitivity(f32),
}

/// Interprets orientation samples as tilt deltas from a reference attitude.
///
/// The first sample seen after construction or [`reset`](Self::reset)
/// captures the reference orientation and produces no output; every later
/// sample yields a clamped, sensitivity-scaled tilt vector.
pub struct TiltInterpreter {
    /// Reference orientation; `None` until the first sample calibrates it.
    reference: Option<Mat3>,
    tilt_sensitivity: f32,
}

impl TiltInterpreter {
    pub fn new() -> Self {
        Self {
            reference: None,
            tilt_sensitivity: DEFAULT_TILT_SENSITIVITY,
        }
    }

    /// Interpret one sample relative to the reference orientation.
    ///
    /// Returns `None` while no reference is set; the sample that captures
    /// the reference never produces output.
    pub fn interpret(
        &mut self,
        sample: &RotationSample,
        rotation: ScreenRotation,
    ) -> Option<TiltVector> {
        let reference = match self.reference {
            Some(reference) => reference,
            None => {
                self.set_reference(sample);
                return None;
            }
        };

        let current = rotation_matrix_from_vector(sample);

        // Compensate for the screen's rotation relative to the device's
        // natural orientation before taking the angular delta.
        let oriented = match rotation {
            ScreenRotation::Deg0 => current,
            ScreenRotation::Deg90 => remap_coordinate_system(current, Axis::Y, Axis::MinusX),
            ScreenRotation::Deg180 => {
                remap_coordinate_system(current, Axis::MinusX, Axis::MinusY)
            }
            ScreenRotation::Deg270 => remap_coordinate_system(current, Axis::MinusY, Axis::X),
        };

        let angles = angle_change(oriented, reference);

        // Map radians in (-pi, pi] to (-1, 1], apply the gain, and clamp so
        // the output never leaves the renderable range.
        let scale = |radians: f32| (radians / PI * self.tilt_sensitivity).clamp(-1.0, 1.0);
        Some(TiltVector {
            yaw: scale(angles.x),
            pitch: scale(angles.y),
            roll: scale(angles.z),
        })
    }

    /// Capture `sample` as the reference orientation for later deltas.
    pub fn set_reference(&mut self, sample: &RotationSample) {
        self.reference = Some(rotation_matrix_from_vector(sample));
    }

    /// Drop the reference orientation. The next sample recalibrates instead
    /// of producing a tilt vector.
    pub fn reset(&mut self) {
        self.reference = None;
    }

    pub fn tilt_sensitivity(&self) -> f32 {
        self.tilt_sensitivity
    }

    /// Set the gain applied to angular deltas.
    ///
    /// Gains above 1 are allowed and saturate at the clamp boundaries near
    /// the tilt extremes. Non-positive values are rejected and the previous
    /// gain is kept.
    pub fn set_tilt_sensitivity(&mut self, sensitivity: f32) -> Result<(), TiltError> {
        if !(sensitivity > 0.0) {
            return Err(TiltError::InvalidSensitivity(sensitivity));
        }
        self.tilt_sensitivity = sensitivity;
        Ok(())
    }
}

impl Default for TiltInterpreter {
    fn default() -> Self {
        Self::new()
    }
}
