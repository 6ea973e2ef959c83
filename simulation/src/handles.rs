//! Handles returned to callers.
//!
//! These wrap rapier's generational arena indices. The world owns every body and joint;
//! callers only hold these copyable keys. A removed handle never aliases a newer object
//! because the generation differs, so stale use is detected and reported as
//! [`crate::SimulationError`] instead of touching the wrong object.

use rapier2d::prelude::{ImpulseJointHandle, RigidBodyHandle};

/// A rigid body living in a [`crate::Simulation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub(crate) RigidBodyHandle);

impl BodyHandle {
    /// The underlying rapier handle, for callers that need engine-level access.
    #[inline]
    pub fn raw(self) -> RigidBodyHandle {
        self.0
    }
}

/// A joint living in a [`crate::Simulation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct JointHandle(pub(crate) ImpulseJointHandle);

impl JointHandle {
    #[inline]
    pub fn raw(self) -> ImpulseJointHandle {
        self.0
    }
}
