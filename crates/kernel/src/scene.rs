use crate::body::{Body, BodyDesc, BodyHandle, MotionState};
use crate::debug_draw::{BackendBridge, DebugDraw};
use crate::error::SceneError;
use crate::shape::{ShapeDesc, ShapeId, ShapeRegistry};
use glam::{Quat, Vec3};
use rapier3d::dynamics::{
    CCDSolver, ImpulseJointSet, IntegrationParameters, IslandManager, MassProperties,
    MultibodyJointSet, RigidBody, RigidBodyBuilder, RigidBodySet,
};
use rapier3d::geometry::{ColliderBuilder, ColliderSet, DefaultBroadPhase, NarrowPhase, SharedShape};
use rapier3d::pipeline::{DebugRenderPipeline, DebugRenderStyle, PhysicsPipeline};
use rapier3d::math::{Point, Real, Vector};
use std::num::NonZeroUsize;
use wirebox_common::{Pose, config};

/// Fixed-step parameters. The step never looks at wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepConfig {
    /// Seconds advanced per step.
    pub dt: f32,
    pub solver_iterations: usize,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            dt: config::FIXED_TIMESTEP,
            solver_iterations: config::SOLVER_ITERATIONS,
        }
    }
}

/// The simulated world: backend state, shape registry and body slots.
///
/// All mutation goes through explicit operations. Renderers read the scene
/// through [`Scene::debug_draw`] and [`Scene::pose`]; they never mutate it.
pub struct Scene {
    gravity: Vec3,
    config: StepConfig,
    tick: u64,
    shapes: ShapeRegistry,
    bodies: Vec<Option<Body>>,

    integration: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    rigid_bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl Scene {
    /// Create an empty scene stepping with the default fixed timestep.
    pub fn new(gravity: Vec3) -> Self {
        Self::with_config(gravity, StepConfig::default())
    }

    pub fn with_config(gravity: Vec3, config: StepConfig) -> Self {
        let mut integration = IntegrationParameters::default();
        integration.dt = config.dt;
        integration.num_solver_iterations =
            NonZeroUsize::new(config.solver_iterations).unwrap_or(NonZeroUsize::MIN);

        Self {
            gravity,
            config,
            tick: 0,
            shapes: ShapeRegistry::new(),
            bodies: Vec::new(),
            integration,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    pub fn config(&self) -> StepConfig {
        self.config
    }

    /// Number of steps taken so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Replace the global gravity vector and wake every dynamic body so
    /// sleeping bodies feel the new field.
    pub fn set_gravity(&mut self, gravity: Vec3) {
        if self.gravity == gravity {
            return;
        }
        self.gravity = gravity;
        for body in self.bodies.iter().flatten() {
            if body.is_static() {
                continue;
            }
            if let Some(rb) = self.rigid_bodies.get_mut(body.rigid_body) {
                rb.wake_up(true);
            }
        }
        tracing::debug!(x = gravity.x, y = gravity.y, z = gravity.z, "gravity changed");
    }

    pub fn shapes(&self) -> &ShapeRegistry {
        &self.shapes
    }

    pub fn add_shape(&mut self, desc: ShapeDesc) -> ShapeId {
        self.shapes.insert(desc)
    }

    /// Register a body with the backend.
    ///
    /// Dynamic bodies get their local inertia from the shape and mass before
    /// the backend body is built. They are kept in the XY plane: translation
    /// along Z and rotation about X and Y are locked.
    pub fn add_body(&mut self, desc: BodyDesc) -> Result<BodyHandle, SceneError> {
        if !desc.mass.is_finite() || desc.mass < 0.0 {
            return Err(SceneError::InvalidMass(desc.mass));
        }
        let shape_desc = *self
            .shapes
            .desc(desc.shape)
            .ok_or(SceneError::UnknownShape(desc.shape))?;
        let shared: SharedShape = self
            .shapes
            .shared(desc.shape)
            .ok_or(SceneError::UnknownShape(desc.shape))?
            .clone();

        let is_dynamic = desc.mass != 0.0;
        let local_inertia = if is_dynamic {
            shape_desc.local_inertia(desc.mass)
        } else {
            Vec3::ZERO
        };

        let builder = if is_dynamic {
            RigidBodyBuilder::dynamic().additional_mass_properties(MassProperties::new(
                Point::origin(),
                desc.mass,
                to_na(local_inertia),
            ))
            .enabled_translations(true, true, false)
            .enabled_rotations(false, false, true)
        } else {
            RigidBodyBuilder::fixed()
        };
        let p = desc.pose.position;
        let r = desc.pose.rotation.to_scaled_axis();
        let rigid_body = builder
            .translation(to_na(p))
            .rotation(to_na(r))
            .build();
        let rb_handle = self.rigid_bodies.insert(rigid_body);

        // Mass comes from the body; the collider only contributes geometry.
        let collider = ColliderBuilder::new(shared).density(0.0).build();
        let collider_handle =
            self.colliders
                .insert_with_parent(collider, rb_handle, &mut self.rigid_bodies);

        let handle = BodyHandle(self.bodies.len());
        tracing::debug!(
            label = %desc.label,
            mass = desc.mass,
            shape = desc.shape.0,
            body = handle.0,
            "registered body"
        );
        self.bodies.push(Some(Body {
            label: desc.label,
            mass: desc.mass,
            shape: desc.shape,
            local_inertia,
            motion: MotionState::new(desc.pose),
            rigid_body: rb_handle,
            collider: collider_handle,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
        }));
        Ok(handle)
    }

    /// Remove a body and its collider from the backend. Its shape stays in
    /// the registry.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<Body, SceneError> {
        let body = self
            .bodies
            .get_mut(handle.0)
            .and_then(Option::take)
            .ok_or(SceneError::UnknownBody(handle))?;
        self.rigid_bodies.remove(
            body.rigid_body,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        tracing::debug!(label = %body.label, body = handle.0, "removed body");
        Ok(body)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.0).and_then(Option::as_ref)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.as_ref().map(|b| (BodyHandle(i), b)))
    }

    pub fn body_count(&self) -> usize {
        self.bodies.iter().flatten().count()
    }

    /// Current pose as mirrored by the body's motion state.
    pub fn pose(&self, handle: BodyHandle) -> Option<Pose> {
        self.body(handle).map(|b| b.motion.world_transform())
    }

    pub fn linear_velocity(&self, handle: BodyHandle) -> Option<Vec3> {
        let rb = self.rigid_body(handle)?;
        let v = rb.linvel();
        Some(Vec3::new(v.x, v.y, v.z))
    }

    pub fn angular_velocity(&self, handle: BodyHandle) -> Option<Vec3> {
        let rb = self.rigid_body(handle)?;
        let w = rb.angvel();
        Some(Vec3::new(w.x, w.y, w.z))
    }

    pub fn accumulated_force(&self, handle: BodyHandle) -> Option<Vec3> {
        self.body(handle).map(Body::accumulated_force)
    }

    pub fn accumulated_torque(&self, handle: BodyHandle) -> Option<Vec3> {
        self.body(handle).map(Body::accumulated_torque)
    }

    /// Backend shape attached to the body's collider.
    pub fn collider_shape(&self, handle: BodyHandle) -> Option<&SharedShape> {
        let body = self.body(handle)?;
        self.colliders.get(body.collider).map(|c| c.shared_shape())
    }

    /// Add a force through the body's center of mass. Forces accumulate
    /// until [`Scene::clear_forces`].
    pub fn apply_force(&mut self, handle: BodyHandle, force: Vec3) -> Result<(), SceneError> {
        let body = self
            .bodies
            .get_mut(handle.0)
            .and_then(Option::as_mut)
            .ok_or(SceneError::UnknownBody(handle))?;
        if body.is_static() {
            return Ok(());
        }
        body.force += force;
        if let Some(rb) = self.rigid_bodies.get_mut(body.rigid_body) {
            rb.add_force(to_na(force), true);
        }
        Ok(())
    }

    pub fn apply_torque(&mut self, handle: BodyHandle, torque: Vec3) -> Result<(), SceneError> {
        let body = self
            .bodies
            .get_mut(handle.0)
            .and_then(Option::as_mut)
            .ok_or(SceneError::UnknownBody(handle))?;
        if body.is_static() {
            return Ok(());
        }
        body.torque += torque;
        if let Some(rb) = self.rigid_bodies.get_mut(body.rigid_body) {
            rb.add_torque(to_na(torque), true);
        }
        Ok(())
    }

    /// Advance by exactly one fixed step, then refresh motion states.
    pub fn step(&mut self) {
        let g = self.gravity;
        self.pipeline.step(
            &to_na(g),
            &self.integration,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
        self.tick += 1;
        self.sync_motion_states();
        tracing::trace!(tick = self.tick, "stepped");
    }

    /// Reset accumulated forces and torques on every body.
    pub fn clear_forces(&mut self) {
        for body in self.bodies.iter_mut().flatten() {
            body.force = Vec3::ZERO;
            body.torque = Vec3::ZERO;
            if let Some(rb) = self.rigid_bodies.get_mut(body.rigid_body) {
                rb.reset_forces(false);
                rb.reset_torques(false);
            }
        }
    }

    /// Emit debug geometry through `drawer`, filtered by its flags.
    /// Returns the number of lines emitted.
    pub fn debug_draw<D: DebugDraw + ?Sized>(&self, drawer: &mut D) -> usize {
        let flags = drawer.debug_flags();
        if flags.is_empty() {
            return 0;
        }
        let mut pipeline =
            DebugRenderPipeline::new(DebugRenderStyle::default(), flags.to_render_mode());
        let mut bridge = BackendBridge::new(drawer);
        pipeline.render(
            &mut bridge,
            &self.rigid_bodies,
            &self.colliders,
            &self.impulse_joints,
            &self.multibody_joints,
            &self.narrow_phase,
        );
        bridge.lines
    }

    /// Trace the world position of every collider attached to a rigid body.
    /// Colliders without a parent body are skipped. Returns how many were
    /// reported.
    pub fn log_positions(&self) -> usize {
        let mut reported = 0;
        for (_, collider) in self.colliders.iter() {
            let Some(parent) = collider.parent() else {
                continue;
            };
            let Some(rb) = self.rigid_bodies.get(parent) else {
                continue;
            };
            let t = rb.translation();
            tracing::trace!(x = t.x, y = t.y, z = t.z, "world pos");
            reported += 1;
        }
        reported
    }

    fn rigid_body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        let body = self.body(handle)?;
        self.rigid_bodies.get(body.rigid_body)
    }

    fn sync_motion_states(&mut self) {
        for body in self.bodies.iter_mut().flatten() {
            if body.is_static() {
                continue;
            }
            if let Some(rb) = self.rigid_bodies.get(body.rigid_body) {
                body.motion.set_world_transform(pose_of(rb));
            }
        }
    }
}

fn to_na(v: Vec3) -> Vector<Real> {
    Vector::new(v.x, v.y, v.z)
}

fn pose_of(rb: &RigidBody) -> Pose {
    let t = rb.translation();
    let r = rb.rotation();
    Pose::new(
        Vec3::new(t.x, t.y, t.z),
        Quat::from_xyzw(r.i, r.j, r.k, r.w),
    )
}
