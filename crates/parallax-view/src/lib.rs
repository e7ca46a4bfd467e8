use glam::{Mat4, Vec2};
use parallax_sensor::TiltVector;
use thiserror::Error;

/// Default content over-scale factor.
pub const DEFAULT_PARALLAX_INTENSITY: f32 = 1.1;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("parallax intensity must be at least 1 (got {0})")]
    InvalidIntensity(f32),
}

/// Maps tilt vectors to a translation offset for an over-scaled backdrop.
///
/// The content is scaled by the intensity factor so it overflows the
/// viewport; tilt then pans within the overflow margin. Roll drives the
/// horizontal offset and pitch the vertical one, so a fully tilted device
/// pins the content edge to the viewport edge.
pub struct ParallaxView {
    viewport: Vec2,
    intensity: f32,
    offset: Vec2,
}

impl ParallaxView {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            viewport: Vec2::new(viewport_width, viewport_height),
            intensity: DEFAULT_PARALLAX_INTENSITY,
            offset: Vec2::ZERO,
        }
    }

    /// Half the overflow per axis: the farthest the content may pan.
    pub fn max_offset(&self) -> Vec2 {
        self.viewport * (self.intensity - 1.0) / 2.0
    }

    /// Apply a tilt vector, returning the new translation in pixels.
    pub fn apply_tilt(&mut self, tilt: TiltVector) -> Vec2 {
        let max = self.max_offset();
        self.offset = Vec2::new(tilt.roll * max.x, tilt.pitch * max.y);
        self.offset
    }

    /// Current translation in pixels.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Translation matrix for composing into a render transform.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(self.offset.extend(0.0))
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }

    pub fn parallax_intensity(&self) -> f32 {
        self.intensity
    }

    /// Set the content over-scale factor.
    ///
    /// Values below 1 would leave no overflow to pan within and are
    /// rejected; the previous intensity is kept.
    pub fn set_parallax_intensity(&mut self, intensity: f32) -> Result<(), ViewError> {
        if !(intensity >= 1.0) {
            return Err(ViewError::InvalidIntensity(intensity));
        }
        self.intensity = intensity;
        tracing::debug!(intensity, "Parallax intensity updated");
        Ok(())
    }
}
