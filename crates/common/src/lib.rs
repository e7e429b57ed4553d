//! Shared types and compile-time configuration for the wirebox workspace.
//!
//! Everything here is plain data: no backend types leak through this crate.

pub mod config;
pub mod time;
pub mod types;

pub use config::WorldDimensions;
pub use time::{FrameClock, FrameTime};
pub use types::{Color, Pose};
