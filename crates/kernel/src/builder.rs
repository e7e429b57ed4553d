//! The fixed demo scene: a box of four static walls with one ball inside.

use crate::body::{BodyDesc, BodyHandle};
use crate::error::SceneError;
use crate::scene::Scene;
use crate::shape::{ShapeDesc, ShapeId};
use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;
use wirebox_common::{Pose, WorldDimensions, config};

/// Handles of everything [`build_scene`] created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneLayout {
    pub ground: BodyHandle,
    pub left_wall: BodyHandle,
    pub right_wall: BodyHandle,
    pub ceiling: BodyHandle,
    pub ball: BodyHandle,
    /// Box shared by the ground, both walls and the ceiling.
    pub boundary_shape: ShapeId,
    pub ball_shape: ShapeId,
}

impl SceneLayout {
    pub fn boundaries(&self) -> [BodyHandle; 4] {
        [self.ground, self.left_wall, self.right_wall, self.ceiling]
    }
}

/// Populate a scene sized to `dims`.
///
/// Ground sits on the bottom edge, the ceiling on the top edge, the walls on
/// the left and right edges. All four are the same thin box; the walls are
/// rotated a quarter turn about Z.
pub fn build_scene(
    dims: &WorldDimensions,
    gravity: Vec3,
) -> Result<(Scene, SceneLayout), SceneError> {
    let mut scene = Scene::new(gravity);
    let width = dims.width_m();
    let height = dims.height_m();

    let boundary_shape = scene.add_shape(ShapeDesc::Cuboid {
        half_extents: Vec3::new(width / 2.0, config::WALL_THICKNESS, config::WALL_HALF_DEPTH),
    });
    let upright = Quat::from_rotation_z(FRAC_PI_2);

    let ground = scene.add_body(BodyDesc::fixed(
        "ground",
        boundary_shape,
        Pose::from_position(Vec3::new(width / 2.0, height, 0.0)),
    ))?;
    let left_wall = scene.add_body(BodyDesc::fixed(
        "left_wall",
        boundary_shape,
        Pose::new(Vec3::new(0.0, height / 2.0, 0.0), upright),
    ))?;
    let right_wall = scene.add_body(BodyDesc::fixed(
        "right_wall",
        boundary_shape,
        Pose::new(Vec3::new(width, height / 2.0, 0.0), upright),
    ))?;
    let ceiling = scene.add_body(BodyDesc::fixed(
        "ceiling",
        boundary_shape,
        Pose::from_position(Vec3::new(width / 2.0, 0.0, 0.0)),
    ))?;

    let ball_shape = scene.add_shape(ShapeDesc::Ball {
        radius: config::BALL_RADIUS,
    });
    let ball = scene.add_body(BodyDesc::dynamic(
        "ball",
        ball_shape,
        config::BALL_MASS,
        Pose::from_position(config::BALL_START),
    ))?;

    tracing::info!(
        bodies = scene.body_count(),
        shapes = scene.shapes().len(),
        width_m = width,
        height_m = height,
        "scene built"
    );

    Ok((
        scene,
        SceneLayout {
            ground,
            left_wall,
            right_wall,
            ceiling,
            ball,
            boundary_shape,
            ball_shape,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn demo() -> (Scene, SceneLayout) {
        build_scene(&WorldDimensions::default(), config::DEFAULT_GRAVITY).unwrap()
    }

    #[test]
    fn builds_five_bodies_from_two_shapes() {
        let (scene, _) = demo();
        assert_eq!(scene.body_count(), 5);
        assert_eq!(scene.shapes().len(), 2);
    }

    #[test]
    fn boundaries_share_one_shape() {
        let (scene, layout) = demo();
        let reference = scene.collider_shape(layout.ground).unwrap().clone();
        for handle in layout.boundaries() {
            let body = scene.body(handle).unwrap();
            assert!(body.is_static());
            assert_eq!(body.shape(), layout.boundary_shape);
            let shape = scene.collider_shape(handle).unwrap();
            assert!(Arc::ptr_eq(&shape.0, &reference.0));
        }
        let registry_shape = scene.shapes().shared(layout.boundary_shape).unwrap();
        assert!(Arc::ptr_eq(&registry_shape.0, &reference.0));
    }

    #[test]
    fn ball_is_the_only_dynamic_body() {
        let (scene, layout) = demo();
        let dynamic: Vec<_> = scene
            .bodies()
            .filter(|(_, b)| !b.is_static())
            .map(|(h, _)| h)
            .collect();
        assert_eq!(dynamic, vec![layout.ball]);
        let ball = scene.body(layout.ball).unwrap();
        assert_eq!(ball.mass(), config::BALL_MASS);
        assert_eq!(ball.shape(), layout.ball_shape);
        assert!((ball.local_inertia() - Vec3::splat(0.4)).length() < 1e-6);
    }

    #[test]
    fn boundaries_sit_on_the_edges() {
        let dims = WorldDimensions::default();
        let (scene, layout) = demo();
        let pos = |h| scene.pose(h).unwrap().position;
        assert_eq!(pos(layout.ground), Vec3::new(dims.width_m() / 2.0, dims.height_m(), 0.0));
        assert_eq!(pos(layout.ceiling), Vec3::new(dims.width_m() / 2.0, 0.0, 0.0));
        assert_eq!(pos(layout.left_wall).x, 0.0);
        assert_eq!(pos(layout.right_wall).x, dims.width_m());
        let wall_rot = scene.pose(layout.left_wall).unwrap().rotation;
        let along = wall_rot * Vec3::X;
        assert!((along - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn static_bodies_never_move() {
        let (mut scene, layout) = demo();
        let before: Vec<_> = layout
            .boundaries()
            .iter()
            .map(|h| scene.pose(*h).unwrap())
            .collect();
        for i in 0..240 {
            if i == 120 {
                scene.set_gravity(Vec3::new(-2.0, 0.0, 0.0));
            }
            scene.step();
            scene.clear_forces();
        }
        let after: Vec<_> = layout
            .boundaries()
            .iter()
            .map(|h| scene.pose(*h).unwrap())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn ball_stays_inside_the_box() {
        let dims = WorldDimensions::default();
        let (mut scene, layout) = demo();
        for _ in 0..600 {
            scene.step();
            scene.clear_forces();
        }
        let p = scene.pose(layout.ball).unwrap().position;
        assert!(p.x > 0.0 && p.x < dims.width_m());
        assert!(p.y > 0.0 && p.y < dims.height_m());
    }
}
