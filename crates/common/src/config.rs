//! Compile-time configuration.
//!
//! The physics world uses screen orientation: +X to the right, +Y downwards.
//! Positive gravity along Y therefore pulls bodies towards the bottom of the
//! window.

use crate::types::Color;
use glam::Vec3;

pub const WINDOW_TITLE: &str = "wirebox";
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
/// Requested color depth. Informational: the surface format decides the real one.
pub const COLOR_DEPTH: u32 = 32;
pub const VSYNC: bool = true;

/// Pixel to physics-unit (meter) scale.
pub const METERS_PER_PIXEL: f32 = 1.0 / 40.0;

/// Fixed simulation increment in seconds.
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
pub const SOLVER_ITERATIONS: usize = 10;

pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, 1.0, 0.0);
/// Magnitude of the gravity vector selected by W/S/A/D.
pub const GRAVITY_SWITCH_MAGNITUDE: f32 = 2.0;
/// Force magnitude per second of held key; torque uses half of it.
pub const FORCE_MAGNITUDE: f32 = 500.0;

pub const WALL_THICKNESS: f32 = 0.2;
pub const WALL_HALF_DEPTH: f32 = 1.0;

pub const BALL_RADIUS: f32 = 1.0;
pub const BALL_MASS: f32 = 1.0;
pub const BALL_START: Vec3 = Vec3::new(5.0, 5.0, 0.0);

pub const BACKGROUND: Color = Color::from_rgb8(50, 50, 50);

/// Size of the simulated region, in pixels, plus the scale to physics units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldDimensions {
    pub width_px: u32,
    pub height_px: u32,
    pub meters_per_pixel: f32,
}

impl Default for WorldDimensions {
    fn default() -> Self {
        Self {
            width_px: WINDOW_WIDTH,
            height_px: WINDOW_HEIGHT,
            meters_per_pixel: METERS_PER_PIXEL,
        }
    }
}

impl WorldDimensions {
    pub fn width_m(&self) -> f32 {
        self.width_px as f32 * self.meters_per_pixel
    }

    pub fn height_m(&self) -> f32 {
        self.height_px as f32 * self.meters_per_pixel
    }

    pub fn to_pixels(&self, meters: f32) -> f32 {
        meters / self.meters_per_pixel
    }
}
