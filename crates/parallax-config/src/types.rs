use parallax_sensor::{ScreenRotation, DEFAULT_TILT_SENSITIVITY};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Sensor interpretation settings.
    pub sensor: SensorConfig,
    /// Parallax view settings.
    pub view: ViewConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Gain applied to normalized angular deltas. Values above 1 saturate
    /// at the tilt extremes.
    pub tilt_sensitivity: f32,
    /// Sample polling rate in Hz.
    pub sample_rate_hz: u32,
    /// Screen rotation relative to the device's natural orientation.
    pub screen_rotation: ScreenRotation,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            tilt_sensitivity: DEFAULT_TILT_SENSITIVITY,
            sample_rate_hz: 60,
            screen_rotation: ScreenRotation::Deg0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Viewport size in pixels (width, height).
    pub viewport: (u32, u32),
    /// Content over-scale factor, at least 1. The overflow margin is what
    /// the parallax offset pans within.
    pub parallax_intensity: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            viewport: (1080, 1920),
            parallax_intensity: 1.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed.sensor.tilt_sensitivity, config.sensor.tilt_sensitivity);
        assert_eq!(parsed.sensor.sample_rate_hz, config.sensor.sample_rate_hz);
        assert_eq!(parsed.sensor.screen_rotation, config.sensor.screen_rotation);
        assert_eq!(parsed.view.viewport, config.view.viewport);
        assert_eq!(parsed.view.parallax_intensity, config.view.parallax_intensity);
    }

    #[test]
    fn screen_rotation_parses_from_toml() {
        let config: SensorConfig = toml::from_str(
            "tilt_sensitivity = 1.5\nsample_rate_hz = 30\nscreen_rotation = \"Deg270\"\n",
        )
        .unwrap();
        assert_eq!(config.screen_rotation, ScreenRotation::Deg270);
    }
}
