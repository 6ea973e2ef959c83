//! The simulation world: a rapier2d world plus pixel scaling and a fixed-step clock.
//!
//! Model
//! - One [`Simulation`] owns every rapier structure (body/collider/joint sets, broadphase,
//!   narrowphase, solver state). Callers only see [`BodyHandle`]/[`JointHandle`].
//! - The frame loop calls [`Simulation::step`] exactly once per frame. The step size is
//!   always `1 / target_frame_rate`; the elapsed time the loop passes in is ignored so
//!   the solver sees a constant timestep.
//! - Pixel-space input only enters through the `add_simple_*` constructors (and the
//!   explicit conversion helpers). Everything else is engine space (meters).
//!
//! Broadphase
//! - rapier indexes new colliders during the next step, so a body created this frame is
//!   not yet in the BVH. Queries chain those pending colliders after the BVH candidates
//!   so a body is queryable as soon as `add_body` returns.

use nalgebra::{Point2, Vector2};
use rapier2d::parry::bounding_volume::{Aabb, BoundingVolume};
use rapier2d::prelude::*;

use crate::config::SimulationConfig;
use crate::constants::{DEFAULT_GRAVITY, DEFAULT_INTEGRATIONS, DEFAULT_TARGET_FRAME_RATE};
use crate::error::{ConfigError, SimulationError};
use crate::handles::{BodyHandle, JointHandle};
use crate::joints::JointDef;
use crate::query::{Rect, point_region};
use crate::scale::{Scale, ViewportSize};
use crate::shapes::{BodyDef, BodyProperties, FixtureDef, ShapeDef};

pub struct Simulation {
    name: String,
    gravity: Vector2<f32>,
    scale: Scale,
    integrations: u32,
    target_frame_rate: f32,

    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,

    /// Colliders inserted since the last step (not yet in the broadphase BVH).
    unindexed: Vec<ColliderHandle>,
}

impl Simulation {
    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Create an empty world.
    ///
    /// - `gravity` defaults to `(0, 10)` (m/s^2, +Y down).
    /// - The scale is `max(viewport.width, viewport.height) / WORLD_METERS`.
    /// - Bodies may sleep at rest unless their [`BodyDef`] says otherwise.
    pub fn new(
        name: impl Into<String>,
        viewport: ViewportSize,
        gravity: Option<Vector2<f32>>,
    ) -> Self {
        let name = name.into();
        let gravity = gravity.unwrap_or_else(|| Vector2::from(DEFAULT_GRAVITY));
        let scale = Scale::from_viewport(viewport);

        log::info!(
            "creating simulation `{}`: viewport {}x{}, scale {} px/m, gravity ({}, {})",
            name,
            viewport.width,
            viewport.height,
            scale.get(),
            gravity.x,
            gravity.y
        );

        let mut simulation = Self {
            name,
            gravity,
            scale,
            integrations: DEFAULT_INTEGRATIONS,
            target_frame_rate: DEFAULT_TARGET_FRAME_RATE,
            integration_parameters: IntegrationParameters {
                dt: 1.0 / DEFAULT_TARGET_FRAME_RATE,
                ..IntegrationParameters::default()
            },
            physics_pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            unindexed: Vec::new(),
        };
        simulation.apply_integrations();
        simulation
    }

    /// Validate `config` and build a world from it.
    pub fn from_config(config: &SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut simulation = Self::new(
            config.name.clone(),
            config.viewport_size(),
            Some(Vector2::from(config.gravity)),
        );
        simulation.set_integrations(Some(config.integrations));
        simulation.set_target_frame_rate(config.target_frame_rate);
        Ok(simulation)
    }

    /// Tear the world down.
    ///
    /// Every body, fixture and joint goes with it; handles obtained from this world are
    /// meaningless afterwards. Dropping the simulation is equivalent, this just makes the
    /// teardown visible in the log.
    pub fn destroy(self) {
        log::info!(
            "destroying simulation `{}` ({} bodies, {} joints)",
            self.name,
            self.bodies.len(),
            self.impulse_joints.len()
        );
    }

    /// Advance the world by one fixed step of `1 / target_frame_rate` seconds.
    ///
    /// `elapsed` is the frame loop's measured delta. It is deliberately not used: a
    /// constant step keeps the solver stable when frame times jitter.
    ///
    /// Forces added with [`Simulation::apply_force`] are cleared afterwards, so continuous
    /// forces must be re-applied every frame.
    pub fn step(&mut self, elapsed: f32) {
        let dt = self.timestep();
        log::trace!(
            "step `{}`: dt {} (elapsed {} ignored), {} iterations",
            self.name,
            dt,
            elapsed,
            self.integrations
        );

        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
        self.unindexed.clear();

        for (_, body) in self.bodies.iter_mut() {
            body.reset_forces(false);
            body.reset_torques(false);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gravity(&self) -> Vector2<f32> {
        self.gravity
    }

    /// Fixed timestep used by [`Simulation::step`], in seconds.
    pub fn timestep(&self) -> f32 {
        1.0 / self.target_frame_rate
    }

    pub fn target_frame_rate(&self) -> f32 {
        self.target_frame_rate
    }

    /// Set the frame rate the timestep is derived from.
    ///
    /// Non-positive or non-finite rates fall back to [`DEFAULT_TARGET_FRAME_RATE`].
    pub fn set_target_frame_rate(&mut self, frames_per_second: f32) {
        self.target_frame_rate = if frames_per_second.is_finite() && frames_per_second > 0.0 {
            frames_per_second
        } else {
            log::warn!(
                "invalid target frame rate {}, using {}",
                frames_per_second,
                DEFAULT_TARGET_FRAME_RATE
            );
            DEFAULT_TARGET_FRAME_RATE
        };
    }

    /// Solver iterations per step.
    pub fn integrations(&self) -> u32 {
        self.integrations
    }

    /// Set the solver iterations per step. `None` and `Some(0)` restore the default.
    ///
    /// More iterations give stiffer stacks and joints at a linear cost per step.
    pub fn set_integrations(&mut self, integrations: Option<u32>) {
        self.integrations = match integrations {
            Some(n) if n > 0 => n,
            _ => DEFAULT_INTEGRATIONS,
        };
        self.apply_integrations();
    }

    fn apply_integrations(&mut self) {
        self.integration_parameters.num_solver_iterations = self.integrations as usize;
    }

    // ---------------------------------------------------------------------
    // Scale
    // ---------------------------------------------------------------------

    /// Pixels per meter.
    pub fn scale(&self) -> f32 {
        self.scale.get()
    }

    /// Replace the pixels-per-meter factor.
    ///
    /// Not validated, and existing bodies keep their engine-space size; only later
    /// conversions see the new value.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = Scale(scale);
    }

    pub fn to_meters(&self, pixels: Vector2<f32>) -> Vector2<f32> {
        self.scale.vector_to_meters(pixels)
    }

    pub fn to_pixels(&self, meters: Vector2<f32>) -> Vector2<f32> {
        self.scale.vector_to_pixels(meters)
    }

    // ---------------------------------------------------------------------
    // Bodies and joints
    // ---------------------------------------------------------------------

    /// Create a body and attach one fixture to it.
    pub fn add_body(&mut self, body: &BodyDef, fixture: &FixtureDef) -> BodyHandle {
        let body_handle = self.bodies.insert(body.to_rigid_body());
        let collider_handle =
            self.colliders
                .insert_with_parent(fixture.to_collider(), body_handle, &mut self.bodies);
        self.unindexed.push(collider_handle);

        log::debug!(
            "`{}`: added {:?} body {:?} with collider {:?}",
            self.name,
            body.kind,
            body_handle,
            collider_handle
        );
        BodyHandle(body_handle)
    }

    /// Destroy a body together with its fixtures and every joint attached to it.
    pub fn remove_body(&mut self, body: BodyHandle) -> Result<(), SimulationError> {
        let removed = self.bodies.remove(
            body.0,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        if removed.is_none() {
            log::warn!("`{}`: remove_body on unknown body {:?}", self.name, body);
            return Err(SimulationError::UnknownBody(body));
        }

        self.unindexed.retain(|h| self.colliders.contains(*h));
        log::debug!("`{}`: removed body {:?}", self.name, body);
        Ok(())
    }

    /// Connect two bodies. Both must still exist.
    pub fn add_joint(&mut self, joint: &JointDef) -> Result<JointHandle, SimulationError> {
        for body in [joint.body_a, joint.body_b] {
            if !self.bodies.contains(body.0) {
                log::warn!("`{}`: add_joint with unknown body {:?}", self.name, body);
                return Err(SimulationError::UnknownBody(body));
            }
        }

        let handle =
            self.impulse_joints
                .insert(joint.body_a.0, joint.body_b.0, joint.to_generic(), true);
        log::debug!(
            "`{}`: added {:?} joint {:?} between {:?} and {:?}",
            self.name,
            joint.kind,
            handle,
            joint.body_a,
            joint.body_b
        );
        Ok(JointHandle(handle))
    }

    pub fn remove_joint(&mut self, joint: JointHandle) -> Result<(), SimulationError> {
        if self.impulse_joints.remove(joint.0, true).is_none() {
            log::warn!("`{}`: remove_joint on unknown joint {:?}", self.name, joint);
            return Err(SimulationError::UnknownJoint(joint));
        }
        log::debug!("`{}`: removed joint {:?}", self.name, joint);
        Ok(())
    }

    /// Read-only view of the engine body.
    pub fn body(&self, body: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(body.0)
    }

    /// Fixtures attached to `body` (empty if the body is gone).
    pub fn colliders_of(&self, body: BodyHandle) -> impl Iterator<Item = &Collider> {
        self.bodies
            .get(body.0)
            .into_iter()
            .flat_map(|rb| rb.colliders().iter())
            .filter_map(move |handle| self.colliders.get(*handle))
    }

    /// Body origin in pixels.
    pub fn body_position_px(&self, body: BodyHandle) -> Option<Point2<f32>> {
        let rb = self.bodies.get(body.0)?;
        Some(Point2::from(self.scale.vector_to_pixels(*rb.translation())))
    }

    /// Add a force (engine units) for the next step only.
    pub fn apply_force(
        &mut self,
        body: BodyHandle,
        force: Vector2<f32>,
    ) -> Result<(), SimulationError> {
        let rb = self
            .bodies
            .get_mut(body.0)
            .ok_or(SimulationError::UnknownBody(body))?;
        rb.add_force(force, true);
        Ok(())
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn joint_count(&self) -> usize {
        self.impulse_joints.len()
    }

    // ---------------------------------------------------------------------
    // Spatial queries
    // ---------------------------------------------------------------------

    /// Every non-static body with a fixture overlapping `rect`.
    ///
    /// `rect` is engine space with `w`/`h` as the absolute upper bound (see [`Rect`]).
    /// Overlap is broadphase-conservative and a body is listed once per overlapping
    /// fixture.
    pub fn bodies_in_area(&self, rect: &Rect) -> Vec<BodyHandle> {
        let pipeline = self.query_pipeline();
        self.candidates(&pipeline, rect.to_aabb())
            .filter_map(|collider| self.non_static_parent(collider))
            .map(BodyHandle)
            .collect()
    }

    /// The first non-static body whose shape contains `point` (engine space).
    ///
    /// If several bodies overlap the point, which one is returned depends on the
    /// broadphase order.
    pub fn body_at_point(&self, point: Point2<f32>) -> Option<BodyHandle> {
        let pipeline = self.query_pipeline();
        self.candidates(&pipeline, point_region(point))
            .find_map(|collider| {
                let parent = self.non_static_parent(collider)?;
                collider
                    .shape()
                    .contains_point(collider.position(), &point)
                    .then_some(BodyHandle(parent))
            })
    }

    fn query_pipeline(&self) -> QueryPipeline<'_> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            QueryFilter::default(),
        )
    }

    /// Colliders whose bounds may overlap `region`: BVH hits, then colliders added since
    /// the last step.
    fn candidates<'a>(
        &'a self,
        pipeline: &'a QueryPipeline<'a>,
        region: Aabb,
    ) -> impl Iterator<Item = &'a Collider> + 'a {
        let indexed = pipeline
            .intersect_aabb_conservative(region)
            // A pending collider can reuse the slot of one removed since the last step.
            .filter(move |(handle, _)| !self.unindexed.contains(handle))
            .map(|(_, collider)| collider);

        let pending = self
            .unindexed
            .iter()
            .filter_map(move |handle| self.colliders.get(*handle))
            .filter(move |collider| collider.compute_aabb().intersects(&region));

        indexed.chain(pending)
    }

    fn non_static_parent(&self, collider: &Collider) -> Option<RigidBodyHandle> {
        let parent = collider.parent()?;
        let body = self.bodies.get(parent)?;
        (!body.is_fixed()).then_some(parent)
    }

    // ---------------------------------------------------------------------
    // Convenience constructors (pixel space)
    // ---------------------------------------------------------------------

    /// Box body from pixel-space position and full width/height.
    pub fn add_simple_box_body(
        &mut self,
        position: Vector2<f32>,
        extents: Vector2<f32>,
        properties: &BodyProperties,
    ) -> BodyHandle {
        let half_extents = self.scale.vector_to_meters(extents) / 2.0;
        let body = BodyDef::new(properties.kind(), self.scale.vector_to_meters(position));
        let fixture = properties.fixture(ShapeDef::Box { half_extents });
        self.add_body(&body, &fixture)
    }

    /// Circle body from pixel-space position and radius.
    pub fn add_simple_circle_body(
        &mut self,
        position: Vector2<f32>,
        radius: f32,
        properties: &BodyProperties,
    ) -> BodyHandle {
        let radius = self.scale.to_meters(radius);
        let body = BodyDef::new(properties.kind(), self.scale.vector_to_meters(position));
        let fixture = properties.fixture(ShapeDef::Circle { radius });
        self.add_body(&body, &fixture)
    }
}
