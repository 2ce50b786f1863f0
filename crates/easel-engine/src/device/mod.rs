//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - configuring the Surface and switching its present mode for vsync
//! - keeping a depth buffer matched to the surface size
//! - acquiring frames for the renderer

mod depth;
mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use depth::{DEPTH_FORMAT, DepthBuffer};
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
