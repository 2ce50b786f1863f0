use crate::input::{ButtonState, Key, Modifiers, MouseButton};

/// Platform-agnostic events delivered to the runtime.
///
/// Platforms translate their native window/input events into these.
/// Coordinates are logical pixels with a top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The platform asked the process to terminate (window closed, signal, ...).
    Quit,

    /// The drawable area changed size.
    Resized { width: u32, height: u32 },

    /// Window focus change.
    Focused(bool),

    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: ButtonState,
        /// True when the event is a key-repeat.
        repeat: bool,
    },

    MouseMoved { x: f32, y: f32 },

    /// Pointer left the window surface.
    MouseLeft,

    MouseButton { button: MouseButton, state: ButtonState },

    MouseWheel { dx: f32, dy: f32 },

    /// Committed text input.
    Text(String),
}

/// Tag used to look up handlers. One per `Event` variant.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EventKind {
    Quit,
    Resized,
    Focused,
    ModifiersChanged,
    Key,
    MouseMoved,
    MouseLeft,
    MouseButton,
    MouseWheel,
    Text,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Quit => EventKind::Quit,
            Event::Resized { .. } => EventKind::Resized,
            Event::Focused(_) => EventKind::Focused,
            Event::ModifiersChanged(_) => EventKind::ModifiersChanged,
            Event::Key { .. } => EventKind::Key,
            Event::MouseMoved { .. } => EventKind::MouseMoved,
            Event::MouseLeft => EventKind::MouseLeft,
            Event::MouseButton { .. } => EventKind::MouseButton,
            Event::MouseWheel { .. } => EventKind::MouseWheel,
            Event::Text(_) => EventKind::Text,
        }
    }
}
