//! Runtime core.
//!
//! Scope:
//! - `Ctx`: the per-run context handed to setup, update and handlers
//! - `run`: the lifecycle controller (init, setup, loop, teardown)
//! - `RuntimeConfig`, `ExitStatus` and the lifecycle state machine

mod config;
mod ctx;
mod once;
mod runtime;
mod state;

pub use config::RuntimeConfig;
pub use ctx::{Ctx, Handler};
pub use once::OnceFlag;
pub use runtime::run;
pub use state::{ExitStatus, LifecycleState, RunState};
