//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Platforms translate their native events into `event::Event`s; this module
//! folds those into per-frame readouts.

mod state;
mod types;

pub use state::InputState;
pub use types::{ButtonState, Key, Modifiers, MouseButton};
