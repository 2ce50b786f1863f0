//! Desktop backend.
//!
//! Owns the `winit` event loop and window, wires them to the GPU layer and
//! implements [`Platform`] for the runtime.

mod platform;
mod translate;

pub use platform::WinitPlatform;
pub use translate::translate_window_event;

use crate::core::{Ctx, ExitStatus, RuntimeConfig, run};
use crate::device::GpuInit;

/// Runs a sketch on the desktop backend.
///
/// Equivalent to [`run`] with a [`WinitPlatform`] whose initial present mode
/// follows `config.vsync`.
pub fn run_desktop<S, U>(config: RuntimeConfig, setup: S, update: U) -> ExitStatus
where
    S: FnOnce(&mut Ctx),
    U: FnMut(&mut Ctx),
{
    let gpu_init = GpuInit {
        vsync: config.vsync,
        ..GpuInit::default()
    };
    run(WinitPlatform::new(gpu_init), config, setup, update)
}
