use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GRAVITY, DEFAULT_INTEGRATIONS, DEFAULT_TARGET_FRAME_RATE};
use crate::error::ConfigError;
use crate::scale::ViewportSize;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

fn default_name() -> String {
    "simulation".into()
}
const fn default_viewport() -> [f32; 2] {
    [800.0, 600.0]
}
const fn default_gravity() -> [f32; 2] {
    DEFAULT_GRAVITY
}
const fn default_integrations() -> u32 {
    DEFAULT_INTEGRATIONS
}
const fn default_target_frame_rate() -> f32 {
    DEFAULT_TARGET_FRAME_RATE
}

// ---------------------------------------------------------------------------
// SimulationConfig
// ---------------------------------------------------------------------------

/// Construction parameters for [`crate::Simulation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Identifier used in log output.
    #[serde(default = "default_name")]
    pub name: String,

    /// Viewport [width, height] in pixels. The larger side spans the world.
    #[serde(default = "default_viewport")]
    pub viewport: [f32; 2],

    /// Gravity [x, y] in m/s^2, +Y down (default: [0, 10]).
    #[serde(default = "default_gravity")]
    pub gravity: [f32; 2],

    /// Solver iterations per step (default: 10, 0 means default).
    #[serde(default = "default_integrations")]
    pub integrations: u32,

    /// Frame rate the fixed timestep is derived from (default: 60).
    #[serde(default = "default_target_frame_rate")]
    pub target_frame_rate: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            viewport: default_viewport(),
            gravity: default_gravity(),
            integrations: default_integrations(),
            target_frame_rate: default_target_frame_rate(),
        }
    }
}

impl SimulationConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let [width, height] = self.viewport;
        let max = width.max(height);
        if !max.is_finite() || max <= 0.0 {
            return Err(ConfigError::InvalidViewport { width, height });
        }
        if !self.target_frame_rate.is_finite() || self.target_frame_rate <= 0.0 {
            return Err(ConfigError::InvalidFrameRate(self.target_frame_rate));
        }
        let [gx, gy] = self.gravity;
        if !gx.is_finite() || !gy.is_finite() {
            return Err(ConfigError::InvalidGravity(gx, gy));
        }
        Ok(())
    }

    pub fn viewport_size(&self) -> ViewportSize {
        ViewportSize::from(self.viewport)
    }

    /// Fixed timestep in seconds.
    pub fn timestep(&self) -> f32 {
        1.0 / self.target_frame_rate
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = SimulationConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.gravity, [0.0, 10.0]);
        assert_eq!(cfg.integrations, 10);
        assert!((cfg.timestep() - 1.0 / 60.0).abs() < 1.0e-7);
    }

    #[test]
    fn toml_fills_missing_fields_with_defaults() {
        let toml_str = r#"
            name = "level-1"
            viewport = [1920.0, 1080.0]
        "#;
        let cfg = SimulationConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(cfg.name, "level-1");
        assert_eq!(cfg.viewport_size(), ViewportSize::new(1920.0, 1080.0));
        assert_eq!(cfg.gravity, DEFAULT_GRAVITY);
        assert_eq!(cfg.target_frame_rate, DEFAULT_TARGET_FRAME_RATE);
    }

    #[test]
    fn toml_overrides_everything() {
        let toml_str = r#"
            name = "space"
            viewport = [640.0, 480.0]
            gravity = [0.0, 0.0]
            integrations = 20
            target_frame_rate = 120.0
        "#;
        let cfg = SimulationConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(cfg.gravity, [0.0, 0.0]);
        assert_eq!(cfg.integrations, 20);
        assert!((cfg.timestep() - 1.0 / 120.0).abs() < 1.0e-7);
    }

    #[test]
    fn empty_viewport_is_rejected() {
        let cfg = SimulationConfig {
            viewport: [0.0, 0.0],
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidViewport { .. })
        ));
    }

    #[test]
    fn non_positive_frame_rate_is_rejected() {
        let cfg = SimulationConfig {
            target_frame_rate: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidFrameRate(_))
        ));
    }

    #[test]
    fn nan_gravity_is_rejected() {
        let cfg = SimulationConfig {
            gravity: [f32::NAN, 10.0],
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidGravity(..))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("simulation-config-does-not-exist.toml");
        let err = SimulationConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = SimulationConfig::from_toml_str("viewport = \"wide\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
