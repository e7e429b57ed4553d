use glam::Vec3;

/// A simulation command produced by the input mapper for one frame.
///
/// Forces and torques target the controlled body; gravity is global.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Add a force through the body's center of mass.
    ApplyForce(Vec3),
    /// Add a torque to the body.
    ApplyTorque(Vec3),
    /// Replace the world's gravity vector.
    SetGravity(Vec3),
}

impl Action {
    /// Sum of every force in `actions`.
    pub fn net_force(actions: &[Action]) -> Vec3 {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::ApplyForce(f) => Some(*f),
                _ => None,
            })
            .sum()
    }

    /// Sum of every torque in `actions`.
    pub fn net_torque(actions: &[Action]) -> Vec3 {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::ApplyTorque(t) => Some(*t),
                _ => None,
            })
            .sum()
    }

    /// Gravity that results from applying `actions` in order, if any of them
    /// sets it.
    pub fn final_gravity(actions: &[Action]) -> Option<Vec3> {
        actions.iter().rev().find_map(|a| match a {
            Action::SetGravity(g) => Some(*g),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_force_sums_forces_only() {
        let actions = [
            Action::ApplyForce(Vec3::new(1.0, 0.0, 0.0)),
            Action::ApplyTorque(Vec3::Z),
            Action::ApplyForce(Vec3::new(0.0, 2.0, 0.0)),
        ];
        assert_eq!(Action::net_force(&actions), Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(Action::net_torque(&actions), Vec3::Z);
    }

    #[test]
    fn final_gravity_is_last_write() {
        let actions = [
            Action::SetGravity(Vec3::X),
            Action::ApplyForce(Vec3::Y),
            Action::SetGravity(Vec3::NEG_Y),
        ];
        assert_eq!(Action::final_gravity(&actions), Some(Vec3::NEG_Y));
        assert_eq!(Action::final_gravity(&[]), None);
    }
}
