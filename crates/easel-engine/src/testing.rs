//! Recording platform stub for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Result, bail};

use crate::event::Event;
use crate::paint::Rgba8;
use crate::platform::{DrawCmd, Platform, WindowConfig, WindowInfo};

/// Everything the stub observed.
#[derive(Debug, Default)]
pub(crate) struct Record {
    pub init_calls: usize,
    pub teardown_calls: usize,
    pub present_calls: usize,
    pub pump_calls: usize,
    pub windows: Vec<WindowConfig>,
    pub vsync: Vec<bool>,
    pub clears: Vec<Rgba8>,
    pub draws: Vec<DrawCmd>,
    pub slept: Duration,
}

/// Platform with synthetic time and scripted per-frame events.
///
/// Each `pump_events` call moves the next scripted batch into the queue.
/// `sleep` advances the synthetic clock instead of blocking.
pub(crate) struct StubPlatform {
    record: Rc<RefCell<Record>>,
    frames: VecDeque<Vec<Event>>,
    queue: VecDeque<Event>,
    now: Cell<Instant>,
    fail_init: bool,
    failing_windows: usize,
}

impl StubPlatform {
    pub fn new() -> Self {
        Self {
            record: Rc::new(RefCell::new(Record::default())),
            frames: VecDeque::new(),
            queue: VecDeque::new(),
            now: Cell::new(Instant::now()),
            fail_init: false,
            failing_windows: 0,
        }
    }

    pub fn record(&self) -> Rc<RefCell<Record>> {
        Rc::clone(&self.record)
    }

    /// Appends a batch of events delivered on the next unused pump.
    pub fn with_frame(mut self, events: Vec<Event>) -> Self {
        self.frames.push_back(events);
        self
    }

    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    /// Makes the next `n` window creations fail.
    pub fn failing_windows(mut self, n: usize) -> Self {
        self.failing_windows = n;
        self
    }
}

impl Platform for StubPlatform {
    fn init(&mut self) -> Result<()> {
        self.record.borrow_mut().init_calls += 1;
        if self.fail_init {
            bail!("stub subsystem unavailable");
        }
        Ok(())
    }

    fn create_window(&mut self, config: &WindowConfig) -> Result<WindowInfo> {
        if self.failing_windows > 0 {
            self.failing_windows -= 1;
            bail!("stub window refused");
        }
        self.record.borrow_mut().windows.push(config.clone());
        Ok(WindowInfo {
            width: config.width,
            height: config.height,
            mode: config.mode,
        })
    }

    fn set_vsync(&mut self, enabled: bool) -> Result<()> {
        self.record.borrow_mut().vsync.push(enabled);
        Ok(())
    }

    fn pump_events(&mut self) {
        self.record.borrow_mut().pump_calls += 1;
        if let Some(batch) = self.frames.pop_front() {
            self.queue.extend(batch);
        }
    }

    fn poll_event(&mut self) -> Option<Event> {
        self.queue.pop_front()
    }

    fn clear(&mut self, color: Rgba8) {
        self.record.borrow_mut().clears.push(color);
    }

    fn draw(&mut self, cmd: &DrawCmd) {
        self.record.borrow_mut().draws.push(*cmd);
    }

    fn present(&mut self) {
        self.record.borrow_mut().present_calls += 1;
    }

    fn teardown(&mut self) {
        self.record.borrow_mut().teardown_calls += 1;
    }

    fn now(&self) -> Instant {
        self.now.get()
    }

    fn sleep(&mut self, duration: Duration) {
        self.now.set(self.now.get() + duration);
        self.record.borrow_mut().slept += duration;
    }
}
