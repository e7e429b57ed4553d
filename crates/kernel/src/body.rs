use crate::shape::ShapeId;
use glam::Vec3;
use rapier3d::dynamics::RigidBodyHandle;
use rapier3d::geometry::ColliderHandle;
use wirebox_common::Pose;

/// Slot index of a body inside a [`Scene`](crate::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub usize);

/// Everything needed to register a body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    pub label: String,
    /// Zero makes the body static: the backend never integrates it.
    pub mass: f32,
    pub shape: ShapeId,
    pub pose: Pose,
}

impl BodyDesc {
    pub fn fixed(label: impl Into<String>, shape: ShapeId, pose: Pose) -> Self {
        Self {
            label: label.into(),
            mass: 0.0,
            shape,
            pose,
        }
    }

    pub fn dynamic(label: impl Into<String>, shape: ShapeId, mass: f32, pose: Pose) -> Self {
        Self {
            label: label.into(),
            mass,
            shape,
            pose,
        }
    }
}

/// Mirror of a body's pose for readers outside the backend.
///
/// Written by the scene after each step for bodies the backend moved; read by
/// anything that wants a transform without touching backend types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    pose: Pose,
}

impl MotionState {
    pub fn new(pose: Pose) -> Self {
        Self { pose }
    }

    pub fn world_transform(&self) -> Pose {
        self.pose
    }

    pub fn set_world_transform(&mut self, pose: Pose) {
        self.pose = pose;
    }
}

/// A registered body. Owned by the scene; references its shape by id.
#[derive(Debug, Clone)]
pub struct Body {
    pub(crate) label: String,
    pub(crate) mass: f32,
    pub(crate) shape: ShapeId,
    pub(crate) local_inertia: Vec3,
    pub(crate) motion: MotionState,
    pub(crate) rigid_body: RigidBodyHandle,
    pub(crate) collider: ColliderHandle,
    pub(crate) force: Vec3,
    pub(crate) torque: Vec3,
}

impl Body {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn is_static(&self) -> bool {
        self.mass == 0.0
    }

    pub fn shape(&self) -> ShapeId {
        self.shape
    }

    pub fn local_inertia(&self) -> Vec3 {
        self.local_inertia
    }

    pub fn motion_state(&self) -> &MotionState {
        &self.motion
    }

    /// Force accumulated since the last clear.
    pub fn accumulated_force(&self) -> Vec3 {
        self.force
    }

    /// Torque accumulated since the last clear.
    pub fn accumulated_torque(&self) -> Vec3 {
        self.torque
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_desc_has_zero_mass() {
        let d = BodyDesc::fixed("ground", ShapeId(0), Pose::default());
        assert_eq!(d.mass, 0.0);
        assert_eq!(d.label, "ground");
    }

    #[test]
    fn motion_state_round_trips_pose() {
        let mut ms = MotionState::new(Pose::default());
        let moved = Pose::from_position(Vec3::new(1.0, 2.0, 0.0));
        ms.set_world_transform(moved);
        assert_eq!(ms.world_transform(), moved);
    }
}
