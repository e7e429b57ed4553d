use crate::action::Action;
use crate::keyboard::{Key, KeyboardState};
use glam::Vec3;
use wirebox_common::config;

/// Translates held keys into actions for one frame.
///
/// Arrows push the body, Q/E twist it about Z, W/S/A/D point gravity
/// up/down/left/right. Y grows downwards, so "up" is negative Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputMapper {
    /// Force per second of held arrow key. Torque uses half.
    pub force_magnitude: f32,
    /// Length of the gravity vector chosen by W/S/A/D.
    pub gravity_magnitude: f32,
}

impl Default for InputMapper {
    fn default() -> Self {
        Self {
            force_magnitude: config::FORCE_MAGNITUDE,
            gravity_magnitude: config::GRAVITY_SWITCH_MAGNITUDE,
        }
    }
}

impl InputMapper {
    pub fn new(force_magnitude: f32, gravity_magnitude: f32) -> Self {
        Self {
            force_magnitude,
            gravity_magnitude,
        }
    }

    /// Actions for the current frame, in evaluation order.
    ///
    /// Keys are checked as Left, Right, Up, Down, Q, E, W, S, A, D. Forces
    /// and torques add up; when several gravity keys are held the last one in
    /// that order wins once the actions are applied.
    pub fn map(&self, keys: &KeyboardState, frame_time: f32) -> Vec<Action> {
        let push = self.force_magnitude * frame_time;
        let twist = self.force_magnitude / 2.0 * frame_time;
        let g = self.gravity_magnitude;

        let bindings = [
            (Key::Left, Action::ApplyForce(Vec3::new(-push, 0.0, 0.0))),
            (Key::Right, Action::ApplyForce(Vec3::new(push, 0.0, 0.0))),
            (Key::Up, Action::ApplyForce(Vec3::new(0.0, -push, 0.0))),
            (Key::Down, Action::ApplyForce(Vec3::new(0.0, push, 0.0))),
            (Key::Q, Action::ApplyTorque(Vec3::new(0.0, 0.0, twist))),
            (Key::E, Action::ApplyTorque(Vec3::new(0.0, 0.0, -twist))),
            (Key::W, Action::SetGravity(Vec3::new(0.0, -g, 0.0))),
            (Key::S, Action::SetGravity(Vec3::new(0.0, g, 0.0))),
            (Key::A, Action::SetGravity(Vec3::new(-g, 0.0, 0.0))),
            (Key::D, Action::SetGravity(Vec3::new(g, 0.0, 0.0))),
        ];

        let actions: Vec<Action> = bindings
            .into_iter()
            .filter(|(key, _)| keys.is_down(*key))
            .map(|(_, action)| action)
            .collect();
        if !actions.is_empty() {
            tracing::trace!(count = actions.len(), frame_time, "mapped input");
        }
        actions
    }
}
