//! Easel engine crate.
//!
//! A small creative-coding runtime: open a window in `setup`, draw in
//! `update`, and let the runtime pace frames, dispatch input events and
//! shut everything down.
//!
//! ```no_run
//! use easel_engine::{RuntimeConfig, radians, run_desktop};
//!
//! let status = run_desktop(
//!     RuntimeConfig::default(),
//!     |ctx| {
//!         ctx.create_window_3d("spin", 640, 480);
//!     },
//!     |ctx| {
//!         ctx.background(200);
//!         ctx.translate(ctx.width() as f32 / 2.0, ctx.height() as f32 / 2.0, 0.0);
//!         ctx.rotate_y(radians(ctx.frame_count() as f32));
//!         ctx.cube(120.0);
//!     },
//! );
//! std::process::exit(status.code());
//! ```

pub mod core;
pub mod device;
pub mod event;
pub mod input;
pub mod logging;
pub mod paint;
pub mod platform;
pub mod render;
pub mod time;
pub mod transform;
pub mod window;

#[cfg(test)]
mod testing;

pub use crate::core::{Ctx, ExitStatus, RuntimeConfig, run};
pub use event::{Event, EventKind};
pub use input::{Key, MouseButton};
pub use paint::Rgba8;
pub use platform::{Platform, WindowMode};
pub use transform::radians;
pub use window::{WinitPlatform, run_desktop};
