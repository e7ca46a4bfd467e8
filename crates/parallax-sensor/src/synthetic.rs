use crate::types::RotationSample;
use crate::SampleSource;
use anyhow::Result;
use glam::Quat;
use std::f32::consts::TAU;
use tracing::info;

/// Synthetic device sway for development without sensor hardware.
///
/// Produces a slow elliptical wobble: sinusoidal pitch and cosinusoidal roll
/// at a fixed amplitude, advancing one step per poll. Deterministic for a
/// given step count, which makes it usable in tests as well.
pub struct SyntheticSource {
    step: u64,
    steps_per_cycle: u64,
    amplitude_radians: f32,
}

impl SyntheticSource {
    pub fn new(steps_per_cycle: u64, amplitude_radians: f32) -> Self {
        info!(steps_per_cycle, amplitude_radians, "Synthetic sensor source created");
        Self {
            step: 0,
            steps_per_cycle: steps_per_cycle.max(1),
            amplitude_radians,
        }
    }
}

impl SampleSource for SyntheticSource {
    fn poll_sample(&mut self) -> Result<Option<RotationSample>> {
        let phase = TAU * (self.step % self.steps_per_cycle) as f32
            / self.steps_per_cycle as f32;
        self.step += 1;

        let pitch = self.amplitude_radians * phase.sin();
        let roll = self.amplitude_radians * phase.cos();
        let q = Quat::from_rotation_x(pitch) * Quat::from_rotation_y(roll);
        Ok(Some(RotationSample::from_quat(q)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_deterministic() {
        let mut a = SyntheticSource::new(32, 0.2);
        let mut b = SyntheticSource::new(32, 0.2);
        for _ in 0..64 {
            let sa = a.poll_sample().unwrap().unwrap();
            let sb = b.poll_sample().unwrap().unwrap();
            assert_eq!(sa.vector, sb.vector);
            assert_eq!(sa.scalar, sb.scalar);
        }
    }

    #[test]
    fn samples_are_unit_quaternions() {
        let mut source = SyntheticSource::new(48, 0.5);
        for _ in 0..48 {
            let sample = source.poll_sample().unwrap().unwrap();
            let norm = sample.vector.length_squared()
                + sample.scalar.unwrap() * sample.scalar.unwrap();
            assert!((norm - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn wobble_stays_within_amplitude() {
        let amplitude = 0.3;
        let mut source = SyntheticSource::new(64, amplitude);
        for _ in 0..64 {
            let sample = source.poll_sample().unwrap().unwrap();
            assert!(sample.vector.is_finite());
            // Vector part magnitude is sin of the combined half-angle,
            // which the sway amplitude bounds comfortably.
            assert!(sample.vector.length() <= amplitude);
        }
    }
}
