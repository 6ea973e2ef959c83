//! Body and fixture definitions.
//!
//! These are plain values: build one, hand it to [`crate::Simulation::add_body`], drop it.
//! Every field has a call-independent default, so nothing from a previous body can leak
//! into the next one.
//!
//! Conventions
//! - Units are meters, radians and kilograms (engine space). Pixel conversion happens in
//!   the convenience constructors on [`crate::Simulation`], not here.
//! - Positive Y points down.

use nalgebra::Vector2;
use rapier2d::prelude::*;

use crate::constants::{DEFAULT_DENSITY, DEFAULT_FRICTION, DEFAULT_RESTITUTION};

/// How a body moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyKind {
    /// Collides but never moves.
    #[default]
    Static,
    /// Integrates under gravity, forces and contacts.
    Dynamic,
    /// Moved by setting its next position; pushes dynamic bodies but ignores forces.
    Kinematic,
}

impl BodyKind {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyKind::Static => RigidBodyType::Fixed,
            BodyKind::Dynamic => RigidBodyType::Dynamic,
            BodyKind::Kinematic => RigidBodyType::KinematicPositionBased,
        }
    }
}

/// Everything needed to create a rigid body (without its shape).
#[derive(Clone, Debug, PartialEq)]
pub struct BodyDef {
    pub kind: BodyKind,
    /// World-space position of the body origin (meters).
    pub position: Vector2<f32>,
    /// Rotation (radians).
    pub angle: f32,
    pub linear_velocity: Vector2<f32>,
    pub angular_velocity: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub gravity_scale: f32,
    pub fixed_rotation: bool,
    /// Continuous collision detection for fast movers.
    pub bullet: bool,
    /// Let the solver put this body to sleep when it comes to rest.
    pub allow_sleep: bool,
    /// Opaque caller data stored on the engine body.
    pub user_data: u128,
}

impl Default for BodyDef {
    fn default() -> Self {
        Self {
            kind: BodyKind::Static,
            position: Vector2::zeros(),
            angle: 0.0,
            linear_velocity: Vector2::zeros(),
            angular_velocity: 0.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            gravity_scale: 1.0,
            fixed_rotation: false,
            bullet: false,
            allow_sleep: true,
            user_data: 0,
        }
    }
}

impl BodyDef {
    pub fn new(kind: BodyKind, position: Vector2<f32>) -> Self {
        Self {
            kind,
            position,
            ..Self::default()
        }
    }

    pub(crate) fn to_rigid_body(&self) -> RigidBody {
        RigidBodyBuilder::new(self.kind.to_rapier())
            .translation(self.position)
            .rotation(self.angle)
            .linvel(self.linear_velocity)
            .angvel(self.angular_velocity)
            .linear_damping(self.linear_damping)
            .angular_damping(self.angular_damping)
            .gravity_scale(self.gravity_scale)
            .locked_axes(if self.fixed_rotation {
                LockedAxes::ROTATION_LOCKED
            } else {
                LockedAxes::empty()
            })
            .ccd_enabled(self.bullet)
            .can_sleep(self.allow_sleep)
            .user_data(self.user_data)
            .build()
    }
}

/// Supported fixture shapes, in the body's local frame (meters).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeDef {
    /// Axis-aligned (in body space) box with given half-extents.
    Box { half_extents: Vector2<f32> },

    /// Circle centered on the body origin.
    Circle { radius: f32 },

    /// Y-aligned capsule.
    CapsuleY { radius: f32, half_height: f32 },

    /// Box with rounded corners.
    ///
    /// `border_radius` is added around the half-extents.
    RoundBox {
        half_extents: Vector2<f32>,
        border_radius: f32,
    },
}

impl ShapeDef {
    fn to_builder(self) -> ColliderBuilder {
        match self {
            ShapeDef::Box { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            }
            ShapeDef::Circle { radius } => ColliderBuilder::ball(radius),
            ShapeDef::CapsuleY {
                radius,
                half_height,
            } => ColliderBuilder::capsule_y(half_height, radius),
            ShapeDef::RoundBox {
                half_extents,
                border_radius,
            } => ColliderBuilder::round_cuboid(half_extents.x, half_extents.y, border_radius),
        }
    }
}

/// Shape plus material for the single fixture attached to a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixtureDef {
    pub shape: ShapeDef,
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
    /// Sensors report overlaps but generate no contact response.
    pub is_sensor: bool,
}

impl FixtureDef {
    /// A fixture with the default material.
    pub fn new(shape: ShapeDef) -> Self {
        Self {
            shape,
            restitution: DEFAULT_RESTITUTION,
            friction: DEFAULT_FRICTION,
            density: DEFAULT_DENSITY,
            is_sensor: false,
        }
    }

    pub(crate) fn to_collider(&self) -> Collider {
        self.shape
            .to_builder()
            .restitution(self.restitution)
            .friction(self.friction)
            .density(self.density)
            .sensor(self.is_sensor)
            .build()
    }
}

/// Optional material overrides for the simple box/circle constructors.
///
/// Unset fields fall back to [`DEFAULT_RESTITUTION`], [`DEFAULT_FRICTION`],
/// [`DEFAULT_DENSITY`] and a static body.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyProperties {
    pub restitution: Option<f32>,
    pub friction: Option<f32>,
    pub density: Option<f32>,
    pub is_static: Option<bool>,
}

impl BodyProperties {
    /// Dynamic body with default material.
    pub fn dynamic() -> Self {
        Self {
            is_static: Some(false),
            ..Self::default()
        }
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = Some(restitution);
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = Some(friction);
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = Some(density);
        self
    }

    pub(crate) fn kind(&self) -> BodyKind {
        if self.is_static.unwrap_or(true) {
            BodyKind::Static
        } else {
            BodyKind::Dynamic
        }
    }

    /// Resolve every material field against the defaults.
    pub(crate) fn fixture(&self, shape: ShapeDef) -> FixtureDef {
        FixtureDef {
            shape,
            restitution: self.restitution.unwrap_or(DEFAULT_RESTITUTION),
            friction: self.friction.unwrap_or(DEFAULT_FRICTION),
            density: self.density.unwrap_or(DEFAULT_DENSITY),
            is_sensor: false,
        }
    }
}
