//! 2D rigid-body simulation for a real-time, pixel-space game loop.
//!
//! [`Simulation`] owns a rapier2d world, steps it at a fixed rate once per frame, converts
//! pixel-space input into meters, and answers point/area lookups against dynamic bodies.

pub mod config;
pub mod constants;
pub mod error;
pub mod handles;
pub mod joints;
pub mod query;
pub mod scale;
pub mod shapes;
pub mod world;

// Re-export rapier so callers can reach engine types (bodies, colliders) returned by the
// read-only accessors without depending on `rapier2d` directly.
pub use rapier2d;

pub use config::SimulationConfig;
pub use constants::{
    DEFAULT_DENSITY, DEFAULT_FRICTION, DEFAULT_GRAVITY, DEFAULT_INTEGRATIONS, DEFAULT_RESTITUTION,
    DEFAULT_TARGET_FRAME_RATE, POINT_QUERY_HALF_EXTENT, WORLD_METERS,
};
pub use error::{ConfigError, SimulationError};
pub use handles::{BodyHandle, JointHandle};
pub use joints::{JointDef, JointKind};
pub use query::Rect;
pub use scale::{Scale, ViewportSize};
pub use shapes::{BodyDef, BodyKind, BodyProperties, FixtureDef, ShapeDef};
pub use world::Simulation;
