//! Scene kernel: owns the physics backend, the shape registry and every body.
//!
//! # Invariants
//! - Every body references exactly one shape from the scene's registry.
//! - Shapes outlive the bodies that reference them; removing a body never
//!   releases its shape.
//! - The simulation advances by a fixed timestep, independent of frame time.
//! - Gravity is scene state, changed only through [`Scene::set_gravity`].

pub mod body;
pub mod builder;
pub mod debug_draw;
pub mod error;
pub mod scene;
pub mod shape;

pub use body::{Body, BodyDesc, BodyHandle, MotionState};
pub use builder::{SceneLayout, build_scene};
pub use debug_draw::{DebugDraw, DebugFlags};
pub use error::SceneError;
pub use scene::{Scene, StepConfig};
pub use shape::{ShapeDesc, ShapeId, ShapeRegistry};
