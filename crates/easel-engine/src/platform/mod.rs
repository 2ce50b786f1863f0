//! Platform seam.
//!
//! Everything the runtime needs from the outside world goes through
//! [`Platform`]: subsystem init/teardown, window creation, the event queue,
//! drawing and presentation, and the time source. The desktop implementation
//! lives in [`crate::window`]; tests use a recording stub.

mod types;

pub use types::{DrawCmd, Shape, WindowConfig, WindowInfo, WindowMode};

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::event::Event;
use crate::paint::Rgba8;

/// Windowing, event and presentation backend driven by the runtime.
///
/// All calls happen on the loop thread. The runtime guarantees:
/// - `init` is called once, before anything else
/// - `create_window` is called at most once successfully
/// - `teardown` is called exactly once, even when `init` failed
pub trait Platform {
    /// Brings up the platform subsystem. An error here is fatal for the run.
    fn init(&mut self) -> Result<()>;

    /// Opens the window and its graphics context.
    fn create_window(&mut self, config: &WindowConfig) -> Result<WindowInfo>;

    /// Enables or disables display-synchronized presentation.
    fn set_vsync(&mut self, enabled: bool) -> Result<()>;

    /// Gives the platform a chance to fill its event queue. Called once per frame
    /// before `poll_event` is drained.
    fn pump_events(&mut self) {}

    /// Pops the next pending event, in delivery order.
    fn poll_event(&mut self) -> Option<Event>;

    /// Discards everything drawn so far this frame and fills with `color`.
    fn clear(&mut self, color: Rgba8);

    /// Records one pass of one primitive.
    fn draw(&mut self, cmd: &DrawCmd);

    /// Displays the completed frame.
    fn present(&mut self);

    /// Releases the window, graphics context and subsystem.
    fn teardown(&mut self);

    /// Monotonic time source for frame pacing.
    fn now(&self) -> Instant {
        Instant::now()
    }

    /// Bounded wait used while the next frame is not due.
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
