//! Primitive renderers.

mod common;

pub mod solid;

pub use solid::SolidRenderer;
