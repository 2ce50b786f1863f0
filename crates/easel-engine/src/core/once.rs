/// One-time action guard.
///
/// Consolidates the "do this at most once" flags of a run. The flag is set
/// only when the guarded action completes, so a failed attempt can be retried.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub struct OnceFlag {
    done: bool,
}

impl OnceFlag {
    pub const fn new() -> Self {
        Self { done: false }
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Marks the action as done. Returns true only the first time.
    pub fn mark(&mut self) -> bool {
        !std::mem::replace(&mut self.done, true)
    }

    /// Runs `f` unless the action already happened. Returns whether `f` ran.
    pub fn run_once(&mut self, f: impl FnOnce()) -> bool {
        if self.done {
            return false;
        }
        self.done = true;
        f();
        true
    }
}
