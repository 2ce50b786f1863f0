//! GPU rendering subsystem.
//!
//! Draw commands are expanded on the CPU into a `MeshBatch` (already
//! transformed, in window pixels) and uploaded once per frame by
//! `SolidRenderer`.
//!
//! Convention:
//! - Geometry is in logical pixels, top-left origin, +Y down.
//! - The camera uniform maps pixels to clip space for the window's mode.

mod camera;
mod ctx;
mod mesh;
pub mod shapes;

pub use camera::{OPENGL_TO_WGPU_MATRIX, view_projection};
pub use ctx::{RenderCtx, RenderTarget};
pub use mesh::{MeshBatch, Segment, Vertex};
