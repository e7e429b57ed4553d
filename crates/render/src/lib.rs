//! Rendering adapter: renderer-agnostic frame targets.
//!
//! # Invariants
//! - Renderers never mutate the scene; they only receive its debug geometry.
//! - A frame is always clear, debug draw, present, in that order.

mod batch;
mod renderer;

pub use batch::{Line, LineBatch};
pub use renderer::{DebugTextRenderer, FrameTarget, RenderError, render_frame};
