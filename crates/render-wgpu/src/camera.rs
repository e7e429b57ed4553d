use glam::{Mat4, Vec3};
use wirebox_common::WorldDimensions;

/// Orthographic view of the simulated region.
///
/// Physics space has +Y pointing down the screen, so the top edge of the
/// window is `y = 0` and the bottom edge is `y = height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenCamera {
    /// Visible width in meters.
    pub width: f32,
    /// Visible height in meters.
    pub height: f32,
    pub near: f32,
    pub far: f32,
}

impl ScreenCamera {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            near: -100.0,
            far: 100.0,
        }
    }

    pub fn from_dimensions(dims: &WorldDimensions) -> Self {
        Self::new(dims.width_m(), dims.height_m())
    }

    pub fn view_projection(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.width, self.height, 0.0, self.near, self.far)
    }

    /// Normalized device coordinates of a physics-space point.
    pub fn project(&self, point: Vec3) -> Vec3 {
        self.view_projection().project_point3(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_left_maps_to_upper_left_corner() {
        let cam = ScreenCamera::new(20.0, 15.0);
        let ndc = cam.project(Vec3::ZERO);
        assert!((ndc.x + 1.0).abs() < 1e-5);
        assert!((ndc.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn bottom_right_maps_to_lower_right_corner() {
        let cam = ScreenCamera::new(20.0, 15.0);
        let ndc = cam.project(Vec3::new(20.0, 15.0, 0.0));
        assert!((ndc.x - 1.0).abs() < 1e-5);
        assert!((ndc.y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn scene_depth_stays_inside_clip_range() {
        let cam = ScreenCamera::new(20.0, 15.0);
        for z in [-1.0, 0.0, 1.0] {
            let ndc = cam.project(Vec3::new(10.0, 7.5, z));
            assert!((0.0..=1.0).contains(&ndc.z));
        }
    }

    #[test]
    fn built_from_window_dimensions() {
        let cam = ScreenCamera::from_dimensions(&WorldDimensions::default());
        assert!((cam.width - 20.0).abs() < 1e-5);
        assert!((cam.height - 15.0).abs() < 1e-5);
        assert!(!cam.view_projection().col(0).x.is_nan());
    }
}
