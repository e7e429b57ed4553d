//! wgpu render backend for the debug wireframe.
//!
//! Draws the scene's debug lines with a single `LineList` pipeline through an
//! orthographic camera that maps physics meters onto the window, origin at
//! the top-left corner.
//!
//! # Invariants
//! - Renderer never mutates the scene.
//! - Simulation rate is independent of presentation; vsync only paces frames.

mod camera;
mod context;
mod gpu;
mod shaders;
mod target;

pub use camera::ScreenCamera;
pub use context::{GpuContext, GpuInitError};
pub use gpu::WgpuRenderer;
pub use target::WgpuTarget;
