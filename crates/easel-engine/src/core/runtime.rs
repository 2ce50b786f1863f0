use std::cell::Cell;

use crate::event::poll_and_dispatch;
use crate::platform::Platform;
use crate::time::IDLE_WAIT;

use super::config::RuntimeConfig;
use super::ctx::Ctx;
use super::state::{ExitStatus, LifecycleState};

thread_local! {
    static ACTIVE: Cell<bool> = const { Cell::new(false) };
}

/// Marks this thread as hosting a run; released on drop (including unwinds).
struct ActiveRun;

impl ActiveRun {
    fn acquire() -> Option<Self> {
        let already = ACTIVE.with(|a| a.replace(true));
        (!already).then_some(ActiveRun)
    }
}

impl Drop for ActiveRun {
    fn drop(&mut self) {
        ACTIVE.with(|a| a.set(false));
    }
}

/// Runs a sketch until it quits.
///
/// `setup` runs once after the platform initialized; it is expected to open a
/// window. `update` then runs once per frame until [`Ctx::request_quit`] is
/// called or the platform delivers [`Event::Quit`](crate::event::Event::Quit).
///
/// Only one run may be active per thread; a nested call returns
/// [`ExitStatus::AlreadyRunning`] without touching `platform`.
pub fn run<P, S, U>(platform: P, config: RuntimeConfig, setup: S, update: U) -> ExitStatus
where
    P: Platform + 'static,
    S: FnOnce(&mut Ctx),
    U: FnMut(&mut Ctx),
{
    let Some(_active) = ActiveRun::acquire() else {
        log::warn!("run() called while a run is already active on this thread; ignored");
        return ExitStatus::AlreadyRunning;
    };

    let mut runtime = Runtime::new(Box::new(platform), config);
    runtime.execute(setup, update)
}

/// Lifecycle controller: owns the context and drives the state machine.
pub(crate) struct Runtime {
    ctx: Ctx,
    state: LifecycleState,
}

impl Runtime {
    pub(crate) fn new(platform: Box<dyn Platform>, config: RuntimeConfig) -> Self {
        Self {
            ctx: Ctx::new(platform, &config),
            state: LifecycleState::NotStarted,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> LifecycleState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn ctx(&self) -> &Ctx {
        &self.ctx
    }

    fn transition(&mut self, next: LifecycleState) {
        log::debug!("lifecycle: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    pub(crate) fn execute<S, U>(&mut self, setup: S, mut update: U) -> ExitStatus
    where
        S: FnOnce(&mut Ctx),
        U: FnMut(&mut Ctx),
    {
        if self.state != LifecycleState::NotStarted {
            log::warn!("runtime already started; ignoring second execute");
            return ExitStatus::AlreadyRunning;
        }
        self.transition(LifecycleState::Setup);

        // Without the subsystem a window cannot exist, so setup is skipped too.
        if let Err(e) = self.ctx.initialize() {
            log::error!("platform initialization failed: {e:#}");
            self.shutdown();
            return ExitStatus::InitFailed;
        }

        setup(&mut self.ctx);
        if !self.ctx.has_window() {
            log::warn!("setup() returned without creating a window; drawing calls will be ignored");
        }

        self.transition(LifecycleState::Running);
        let start = self.ctx.platform.now();
        self.ctx.clock.start(start);

        while self.ctx.is_running() {
            self.step(&mut update);
        }

        log::info!("stopped after {} frames", self.ctx.frame_count());
        self.shutdown();
        ExitStatus::Normal
    }

    /// One loop iteration: gate, drain events, advance, update, present.
    fn step<U>(&mut self, update: &mut U)
    where
        U: FnMut(&mut Ctx),
    {
        let now = self.ctx.platform.now();
        if !self.ctx.clock.should_advance(now) {
            self.ctx.platform.sleep(IDLE_WAIT);
            return;
        }

        self.ctx.begin_frame();
        poll_and_dispatch(&mut self.ctx);

        // A quit seen during dispatch skips this frame; it is not counted.
        if !self.ctx.is_running() {
            return;
        }

        self.ctx.commit_frame(now);
        update(&mut self.ctx);
        self.ctx.platform.present();
    }

    fn shutdown(&mut self) {
        if self.state == LifecycleState::Stopped {
            return;
        }
        self.transition(LifecycleState::ShuttingDown);
        self.ctx.shutdown();
        self.transition(LifecycleState::Stopped);
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        // Covers unwinding out of a user callback.
        self.shutdown();
    }
}
