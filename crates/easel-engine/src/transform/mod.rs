//! Transform stack.
//!
//! The current coordinate frame is a 4x4 matrix. Every translate/rotate/scale
//! post-multiplies it, so operations compose in call order: the last call is
//! the one applied to a primitive's local coordinates first.

mod stack;

pub use stack::{Transform, TransformStack};

/// Degrees to radians, for the rotate calls.
pub fn radians(degrees: f32) -> f32 {
    degrees.to_radians()
}
