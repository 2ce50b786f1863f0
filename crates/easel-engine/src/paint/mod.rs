//! Paint model.
//!
//! Scope:
//! - `Rgba8`: straight-alpha bytes as written by sketches
//! - `Color`: linear premultiplied floats as consumed by renderers
//! - `DrawState`: current fill/stroke and the pass-skipping rule

pub mod color;
mod rgba;
mod state;

pub use color::Color;
pub use rgba::Rgba8;
pub use state::{DrawState, Pass};
