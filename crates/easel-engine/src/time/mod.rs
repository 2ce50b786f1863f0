//! Time subsystem.
//!
//! Frame pacing and the rolling frame-rate estimate, decoupled from the runtime.
//! Intended usage:
//! - `start()` once when the loop begins
//! - `should_advance()` to gate each iteration, `advance()` once per frame

mod frame_clock;

pub use frame_clock::{DEFAULT_TARGET_FPS, FrameClock, FrameTime, IDLE_WAIT, SAMPLE_WINDOW};
