//! Event dispatch.
//!
//! Platform events are drained once per frame and routed to at most one user
//! handler per `EventKind`. `Event::Quit` always stops the loop, whether or not
//! a user handler is installed for it.

mod dispatch;
mod registry;
mod types;

pub(crate) use dispatch::poll_and_dispatch;
pub use registry::HandlerRegistry;
pub use types::{Event, EventKind};
