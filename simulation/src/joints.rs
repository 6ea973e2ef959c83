//! Joint definitions.
//!
//! Anchors are in each body's local frame, in meters. No pixel conversion is applied.

use nalgebra::{Point2, Unit, Vector2};
use rapier2d::prelude::*;

use crate::handles::BodyHandle;

/// Constraint type and its parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JointKind {
    /// Rigidly locks the two bodies together.
    Fixed,
    /// Free rotation around the anchors (hinge).
    Revolute,
    /// Translation along `axis` (local to body A) only.
    Prismatic { axis: Vector2<f32> },
    /// Soft distance constraint.
    Spring {
        rest_length: f32,
        stiffness: f32,
        damping: f32,
    },
    /// Anchors may not separate further than `max_distance`.
    Rope { max_distance: f32 },
}

/// A joint request: two endpoint bodies plus the constraint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointDef {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub kind: JointKind,
    pub anchor_a: Point2<f32>,
    pub anchor_b: Point2<f32>,
    /// Whether the two connected bodies still collide with each other.
    pub collide_connected: bool,
}

impl JointDef {
    /// Joint with both anchors at the body origins.
    pub fn new(body_a: BodyHandle, body_b: BodyHandle, kind: JointKind) -> Self {
        Self {
            body_a,
            body_b,
            kind,
            anchor_a: Point2::origin(),
            anchor_b: Point2::origin(),
            collide_connected: false,
        }
    }

    pub fn with_anchors(mut self, anchor_a: Point2<f32>, anchor_b: Point2<f32>) -> Self {
        self.anchor_a = anchor_a;
        self.anchor_b = anchor_b;
        self
    }

    pub(crate) fn to_generic(&self) -> GenericJoint {
        let mut joint: GenericJoint = match self.kind {
            JointKind::Fixed => FixedJointBuilder::new()
                .local_anchor1(self.anchor_a)
                .local_anchor2(self.anchor_b)
                .build()
                .into(),
            JointKind::Revolute => RevoluteJointBuilder::new()
                .local_anchor1(self.anchor_a)
                .local_anchor2(self.anchor_b)
                .build()
                .into(),
            JointKind::Prismatic { axis } => PrismaticJointBuilder::new(Unit::new_normalize(axis))
                .local_anchor1(self.anchor_a)
                .local_anchor2(self.anchor_b)
                .build()
                .into(),
            JointKind::Spring {
                rest_length,
                stiffness,
                damping,
            } => SpringJointBuilder::new(rest_length, stiffness, damping)
                .local_anchor1(self.anchor_a)
                .local_anchor2(self.anchor_b)
                .build()
                .into(),
            JointKind::Rope { max_distance } => RopeJointBuilder::new(max_distance)
                .local_anchor1(self.anchor_a)
                .local_anchor2(self.anchor_b)
                .build()
                .into(),
        };
        joint.set_contacts_enabled(self.collide_connected);
        joint
    }
}
