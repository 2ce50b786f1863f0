use std::collections::HashMap;

use super::types::EventKind;

struct Slot<H> {
    handler: Option<H>,
    generation: u64,
    // Handler is lent out to a running dispatch.
    in_flight: bool,
}

impl<H> Slot<H> {
    fn occupied(&self) -> bool {
        self.handler.is_some() || self.in_flight
    }
}

/// Mapping from event kind to at most one handler. Last registration wins.
///
/// Dispatch takes a handler out of its slot for the duration of the call and
/// hands it back afterwards. A handler that registers or clears its own kind
/// while running bumps the slot generation, so the stale handler is dropped
/// instead of overwriting the new state.
pub struct HandlerRegistry<H> {
    slots: HashMap<EventKind, Slot<H>>,
    next_generation: u64,
}

/// Handler lent out by `HandlerRegistry::take`.
pub(crate) struct Lent<H> {
    pub(crate) handler: H,
    generation: u64,
}

impl<H> HandlerRegistry<H> {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            next_generation: 0,
        }
    }

    /// Installs `handler` for `kind`. Returns true if a previous handler was replaced.
    pub fn register(&mut self, kind: EventKind, handler: H) -> bool {
        let generation = self.bump();
        let previous = self.slots.insert(
            kind,
            Slot {
                handler: Some(handler),
                generation,
                in_flight: false,
            },
        );
        previous.is_some_and(|s| s.occupied())
    }

    /// Clears the handler for `kind`. Returns true if one was installed.
    pub fn unregister(&mut self, kind: EventKind) -> bool {
        self.slots.remove(&kind).is_some()
    }

    /// Whether a handler is installed for `kind`, including one that is
    /// currently running.
    pub fn contains(&self, kind: EventKind) -> bool {
        self.slots.get(&kind).is_some_and(Slot::occupied)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Takes the handler for `kind` out of its slot.
    pub(crate) fn take(&mut self, kind: EventKind) -> Option<Lent<H>> {
        let slot = self.slots.get_mut(&kind)?;
        let handler = slot.handler.take()?;
        slot.in_flight = true;
        Some(Lent {
            handler,
            generation: slot.generation,
        })
    }

    /// Returns a lent handler to its slot unless the slot changed meanwhile.
    pub(crate) fn restore(&mut self, kind: EventKind, lent: Lent<H>) {
        if let Some(slot) = self.slots.get_mut(&kind) {
            if slot.generation == lent.generation && slot.handler.is_none() {
                slot.handler = Some(lent.handler);
                slot.in_flight = false;
            }
        }
    }

    fn bump(&mut self) -> u64 {
        self.next_generation = self.next_generation.wrapping_add(1);
        self.next_generation
    }
}

impl<H> Default for HandlerRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}
