/// Size of the simulated world along the viewport's larger axis, in meters.
///
/// The pixels-per-meter scale is derived from this:
/// `scale = max(viewport.width, viewport.height) / WORLD_METERS`.
pub const WORLD_METERS: f32 = 100.0;

/// Gravity used when the caller does not supply one (meters per second squared).
///
/// Positive Y points down, matching screen space.
pub const DEFAULT_GRAVITY: [f32; 2] = [0.0, 10.0];

/// Solver iterations per step when none (or zero) is configured.
pub const DEFAULT_INTEGRATIONS: u32 = 10;

/// Frame rate used to derive the fixed timestep until the frame loop supplies one.
pub const DEFAULT_TARGET_FRAME_RATE: f32 = 60.0;

/// Fallback restitution for the simple box/circle constructors.
///
/// Body components read this when they have no material of their own.
pub const DEFAULT_RESTITUTION: f32 = 0.2;

/// Fallback friction for the simple box/circle constructors.
pub const DEFAULT_FRICTION: f32 = 0.5;

/// Fallback density for the simple box/circle constructors (kg/m^2).
pub const DEFAULT_DENSITY: f32 = 1.0;

/// Half-size of the query box built around a point in `body_at_point` (meters).
pub const POINT_QUERY_HALF_EXTENT: f32 = 0.001;
