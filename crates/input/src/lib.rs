//! Input mapping: platform-neutral keys, held-key state and the per-frame
//! translation of that state into simulation actions.
//!
//! # Invariants
//! - The simulation consumes [`Action`]s, never raw window events.
//! - Mapping is a pure function of the keyboard snapshot and frame time.

pub mod action;
pub mod keyboard;
pub mod mapper;

pub use action::Action;
pub use keyboard::{FrameContext, Key, KeyboardState};
pub use mapper::InputMapper;
