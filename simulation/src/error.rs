use thiserror::Error;

use crate::handles::{BodyHandle, JointHandle};

/// Runtime errors raised by [`crate::Simulation`].
///
/// Only handle misuse is reported. Everything else falls back to defaults or
/// is left to the dynamics engine.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Body not found: {0:?} (already removed?)")]
    UnknownBody(BodyHandle),

    #[error("Joint not found: {0:?} (already removed?)")]
    UnknownJoint(JointHandle),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid viewport {width}x{height}: the larger side must be positive and finite")]
    InvalidViewport { width: f32, height: f32 },

    #[error("Invalid target frame rate: {0} (must be > 0)")]
    InvalidFrameRate(f32),

    #[error("Gravity must be finite, got [{0}, {1}]")]
    InvalidGravity(f32, f32),
}
