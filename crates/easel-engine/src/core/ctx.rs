use std::collections::HashSet;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::event::{Event, EventKind, HandlerRegistry};
use crate::input::{InputState, Key, Modifiers, MouseButton};
use crate::paint::{DrawState, Rgba8};
use crate::platform::{DrawCmd, Platform, Shape, WindowConfig, WindowInfo, WindowMode};
use crate::time::{FrameClock, FrameTime};
use crate::transform::{Transform, TransformStack};

use super::config::RuntimeConfig;
use super::state::RunState;

/// Event handler installed with [`Ctx::on`].
pub type Handler = Box<dyn FnMut(&mut Ctx, &Event)>;

/// Misuse categories reported once per run.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
enum Violation {
    NoWindow,
    Needs3d,
    EmptyPop,
    UnbalancedPush,
    ZeroFps,
}

/// Per-run context passed to setup, update and event handlers.
///
/// Owns all mutable state of a run: the platform, frame clock, input readouts,
/// transform stack, draw state and handler registry. Nothing here is global;
/// callbacks reach it only through the `&mut Ctx` they are given.
///
/// Misuse (drawing without a window, 3D calls in a 2D window, unmatched `pop`)
/// is logged once per kind and otherwise ignored.
pub struct Ctx {
    pub(crate) platform: Box<dyn Platform>,
    pub(crate) run: RunState,
    pub(crate) window: Option<WindowInfo>,

    vsync_requested: bool,
    vsync_active: bool,

    pub(crate) clock: FrameClock,
    pub(crate) time: Option<FrameTime>,
    pub(crate) input: InputState,
    pub(crate) transform: TransformStack,
    pub(crate) draw: DrawState,
    pub(crate) handlers: HandlerRegistry<Handler>,

    reported: HashSet<Violation>,
}

impl Ctx {
    pub(crate) fn new(platform: Box<dyn Platform>, config: &RuntimeConfig) -> Self {
        let mut clock = FrameClock::new();
        if !clock.set_target_fps(config.target_fps) {
            log::warn!("target_fps of 0 is invalid; keeping {}", clock.target_fps());
        }

        Self {
            platform,
            run: RunState::default(),
            window: None,
            vsync_requested: config.vsync,
            vsync_active: false,
            clock,
            time: None,
            input: InputState::default(),
            transform: TransformStack::new(),
            draw: DrawState::default(),
            handlers: HandlerRegistry::new(),
            reported: HashSet::new(),
        }
    }

    // ── lifecycle plumbing ────────────────────────────────────────────────

    /// Initializes the platform once and arms the run flag.
    pub(crate) fn initialize(&mut self) -> Result<()> {
        if self.run.initialized.is_done() {
            return Ok(());
        }
        self.platform.init()?;
        self.run.initialized.mark();
        self.run.running = true;
        Ok(())
    }

    /// Resets the transform stack for a new frame.
    pub(crate) fn begin_frame(&mut self) {
        let leaked = self.transform.begin_frame();
        if leaked > 0 {
            log::debug!("previous frame left {leaked} unmatched push()");
            self.report(
                Violation::UnbalancedPush,
                "update() returned with unmatched push(); the transform stack is reset every frame",
            );
        }
    }

    /// Counts the frame on the clock. Called once events have been handled
    /// and the loop is still running.
    pub(crate) fn commit_frame(&mut self, now: Instant) {
        self.time = Some(self.clock.advance(now));
    }

    /// Stops the loop and tears the platform down. Only the first call does work.
    pub(crate) fn shutdown(&mut self) -> bool {
        self.run.running = false;
        let platform = &mut self.platform;
        self.run.torn_down.run_once(|| platform.teardown())
    }

    pub(crate) fn apply_resize(&mut self, width: u32, height: u32) {
        if let Some(window) = self.window.as_mut() {
            window.width = width;
            window.height = height;
        }
    }

    fn report(&mut self, kind: Violation, message: &str) {
        if self.reported.insert(kind) {
            log::warn!("{message}");
        }
    }

    fn require_window(&mut self, op: &str) -> bool {
        if self.window.is_some() {
            return true;
        }
        log::debug!("{op} ignored: no window");
        self.report(
            Violation::NoWindow,
            "drawing requires a window; call create_window() in setup",
        );
        false
    }

    fn require_3d(&mut self, op: &str) -> bool {
        if self.is_mode_3d() {
            return true;
        }
        log::debug!("{op} ignored: no 3D context");
        self.report(
            Violation::Needs3d,
            "3D operation ignored; call create_window_3d() to enable rotation about x/y, depth and boxes",
        );
        false
    }

    // ── window ────────────────────────────────────────────────────────────

    /// Opens a 2D window. Only the first successful call has an effect.
    pub fn create_window(&mut self, title: &str, width: u32, height: u32) -> bool {
        self.open_window(WindowConfig::new(title, width, height, WindowMode::TwoD))
    }

    /// Opens a window with a 3D context. Only the first successful call has an effect.
    pub fn create_window_3d(&mut self, title: &str, width: u32, height: u32) -> bool {
        self.open_window(WindowConfig::new(title, width, height, WindowMode::ThreeD))
    }

    /// Opens a window from a full config. Returns true if this call created it.
    pub fn open_window(&mut self, config: WindowConfig) -> bool {
        if self.run.window_created.is_done() {
            log::debug!("window already created; ignoring request for {:?}", config.title);
            return false;
        }

        match self.platform.create_window(&config) {
            Ok(info) => {
                self.run.window_created.mark();
                self.window = Some(info);
                log::info!(
                    "window {:?} opened ({}x{}, {:?})",
                    config.title,
                    info.width,
                    info.height,
                    info.mode
                );
                self.apply_vsync();
                true
            }
            Err(e) => {
                log::error!("failed to create window: {e:#}");
                false
            }
        }
    }

    pub fn has_window(&self) -> bool {
        self.window.is_some()
    }

    pub fn is_mode_3d(&self) -> bool {
        self.window.is_some_and(|w| w.mode.is_3d())
    }

    /// Drawable width in logical pixels, `0` without a window.
    pub fn width(&self) -> u32 {
        self.window.map_or(0, |w| w.width)
    }

    /// Drawable height in logical pixels, `0` without a window.
    pub fn height(&self) -> u32 {
        self.window.map_or(0, |w| w.height)
    }

    // ── pacing ────────────────────────────────────────────────────────────

    /// Requests display-synchronized presentation.
    ///
    /// While vsync is on the frame clock stops capping, so the display alone
    /// paces the loop. Before a window exists the request is remembered and
    /// applied when the window opens.
    pub fn set_vsync(&mut self, enabled: bool) {
        if self.vsync_requested == enabled {
            return;
        }
        self.vsync_requested = enabled;
        self.apply_vsync();
    }

    pub fn vsync(&self) -> bool {
        self.vsync_active
    }

    fn apply_vsync(&mut self) {
        if self.window.is_none() || self.vsync_active == self.vsync_requested {
            return;
        }
        match self.platform.set_vsync(self.vsync_requested) {
            Ok(()) => {
                self.vsync_active = self.vsync_requested;
                self.clock.set_uncapped(self.vsync_active);
            }
            Err(e) => {
                log::warn!("failed to switch vsync to {}: {e:#}", self.vsync_requested);
                self.vsync_requested = self.vsync_active;
            }
        }
    }

    /// Changes the frame cap used while vsync is off.
    pub fn set_target_fps(&mut self, fps: u32) {
        if !self.clock.set_target_fps(fps) {
            self.report(Violation::ZeroFps, "set_target_fps(0) ignored");
        }
    }

    /// Blocks the loop thread for `ms` milliseconds.
    pub fn delay(&mut self, ms: u64) {
        self.platform.sleep(Duration::from_millis(ms));
    }

    // ── frame readouts ────────────────────────────────────────────────────

    /// Milliseconds since the previous frame, `0` before the first frame.
    pub fn frame_delta_ms(&self) -> f32 {
        self.time.map_or(0.0, |t| t.delta_ms())
    }

    /// Frames started so far; the first update sees `1`.
    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }

    /// Estimated frames per second.
    pub fn frame_rate(&self) -> f32 {
        self.clock.frame_rate()
    }

    pub fn frame_time(&self) -> Option<FrameTime> {
        self.time
    }

    // ── input readouts ────────────────────────────────────────────────────

    pub fn mouse_x(&self) -> f32 {
        self.input.mouse_x
    }

    pub fn mouse_y(&self) -> f32 {
        self.input.mouse_y
    }

    pub fn pmouse_x(&self) -> f32 {
        self.input.pmouse_x
    }

    pub fn pmouse_y(&self) -> f32 {
        self.input.pmouse_y
    }

    pub fn wheel_delta(&self) -> f32 {
        self.input.wheel_delta
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.input.key_down(key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.input.button_down(button)
    }

    pub fn modifiers(&self) -> Modifiers {
        self.input.modifiers
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    // ── draw state ────────────────────────────────────────────────────────

    /// Sets the fill color: `u8` gray, `(gray, a)`, `(r, g, b)`, `(r, g, b, a)`.
    pub fn fill(&mut self, color: impl Into<Rgba8>) {
        self.draw.set_fill(color);
    }

    /// Sets the stroke color. Accepts the same shorthands as [`Ctx::fill`].
    pub fn stroke(&mut self, color: impl Into<Rgba8>) {
        self.draw.set_stroke(color);
    }

    pub fn no_fill(&mut self) {
        self.draw.fill = self.draw.fill.with_alpha(0);
    }

    pub fn no_stroke(&mut self) {
        self.draw.stroke = self.draw.stroke.with_alpha(0);
    }

    pub fn fill_color(&self) -> Rgba8 {
        self.draw.fill
    }

    pub fn stroke_color(&self) -> Rgba8 {
        self.draw.stroke
    }

    // ── transform ─────────────────────────────────────────────────────────

    pub fn push(&mut self) {
        self.transform.push();
    }

    /// Restores the transform saved by the matching [`Ctx::push`].
    pub fn pop(&mut self) {
        if !self.transform.pop() {
            log::debug!("pop() on empty transform stack");
            self.report(Violation::EmptyPop, "pop() without a matching push(); ignored");
        }
    }

    /// Moves the coordinate origin. Without a 3D window `dz` is ignored.
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        let dz = if dz != 0.0 && !self.require_3d("translate z") { 0.0 } else { dz };
        self.transform.translate(dx, dy, dz);
    }

    pub fn rotate_x(&mut self, angle: f32) {
        if self.require_3d("rotate_x") {
            self.transform.rotate_x(angle);
        }
    }

    pub fn rotate_y(&mut self, angle: f32) {
        if self.require_3d("rotate_y") {
            self.transform.rotate_y(angle);
        }
    }

    /// Rotation in the screen plane; valid in both 2D and 3D windows.
    pub fn rotate_z(&mut self, angle: f32) {
        self.transform.rotate_z(angle);
    }

    /// Alias of [`Ctx::rotate_z`].
    pub fn rotate(&mut self, angle: f32) {
        self.rotate_z(angle);
    }

    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) {
        self.transform.scale(sx, sy, sz);
    }

    pub fn reset_matrix(&mut self) {
        self.transform.reset();
    }

    pub fn transform_depth(&self) -> usize {
        self.transform.depth()
    }

    pub fn current_transform(&self) -> &Transform {
        self.transform.current()
    }

    // ── primitives ────────────────────────────────────────────────────────

    /// Clears the frame to `color`.
    pub fn background(&mut self, color: impl Into<Rgba8>) {
        if self.require_window("background") {
            self.platform.clear(color.into());
        }
    }

    /// Box centered on the current origin. Requires a 3D window.
    pub fn draw_box(&mut self, w: f32, h: f32, d: f32) {
        if self.require_window("box") && self.require_3d("box") {
            self.draw_shape(Shape::Box { w, h, d });
        }
    }

    pub fn cube(&mut self, size: f32) {
        self.draw_box(size, size, size);
    }

    /// Rectangle with its top-left corner at `(x, y)` in the current frame.
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        if self.require_window("rect") {
            self.draw_shape(Shape::Rect { x, y, w, h });
        }
    }

    fn draw_shape(&mut self, shape: Shape) {
        let transform = *self.transform.current();
        for (pass, color) in self.draw.passes() {
            self.platform.draw(&DrawCmd {
                pass,
                shape,
                transform,
                color,
            });
        }
    }

    // ── control ───────────────────────────────────────────────────────────

    /// Stops the loop at the next safe point. The current update still finishes
    /// and its frame is presented.
    pub fn request_quit(&mut self) {
        if self.run.running {
            log::debug!("quit requested");
        }
        self.run.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.run.is_running()
    }

    /// Installs the handler for `kind`, replacing any previous one.
    pub fn on<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&mut Ctx, &Event) + 'static,
    {
        if self.handlers.register(kind, Box::new(handler)) {
            log::debug!("replaced handler for {kind:?}");
        }
    }

    /// Removes the handler for `kind`. Returns true if one was installed.
    pub fn off(&mut self, kind: EventKind) -> bool {
        self.handlers.unregister(kind)
    }

    /// Whether a handler is installed for `kind`. True from inside that
    /// handler while it runs.
    pub fn has_handler(&self, kind: EventKind) -> bool {
        self.handlers.contains(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::poll_and_dispatch;
    use crate::paint::Pass;
    use crate::testing::StubPlatform;

    use std::cell::RefCell;
    use std::rc::Rc;

    fn ctx_with(stub: StubPlatform) -> Ctx {
        let mut ctx = Ctx::new(Box::new(stub), &RuntimeConfig::default());
        ctx.initialize().unwrap();
        ctx
    }

    // ── primitives ────────────────────────────────────────────────────────

    #[test]
    fn box_issues_fill_then_stroke() {
        let stub = StubPlatform::new();
        let rec = stub.record();
        let mut ctx = ctx_with(stub);
        ctx.create_window_3d("t", 100, 100);

        ctx.draw_box(1.0, 2.0, 3.0);

        let passes: Vec<Pass> = rec.borrow().draws.iter().map(|c| c.pass).collect();
        assert_eq!(passes, vec![Pass::Fill, Pass::Stroke]);
        assert_eq!(rec.borrow().draws[0].shape, Shape::Box { w: 1.0, h: 2.0, d: 3.0 });
    }

    #[test]
    fn zero_alpha_fill_skips_fill_pass() {
        let stub = StubPlatform::new();
        let rec = stub.record();
        let mut ctx = ctx_with(stub);
        ctx.create_window_3d("t", 100, 100);

        ctx.fill((255, 0, 0, 0));
        ctx.stroke(10);
        ctx.cube(5.0);

        let draws = &rec.borrow().draws;
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].pass, Pass::Stroke);
        assert_eq!(draws[0].color, Rgba8::gray(10));
    }

    #[test]
    fn zero_alpha_stroke_skips_stroke_pass() {
        let stub = StubPlatform::new();
        let rec = stub.record();
        let mut ctx = ctx_with(stub);
        ctx.create_window("t", 100, 100);

        ctx.stroke((0, 0, 0, 0));
        ctx.fill(255);
        ctx.rect(0.0, 0.0, 10.0, 10.0);

        let draws = &rec.borrow().draws;
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].pass, Pass::Fill);
    }

    #[test]
    fn invisible_fill_and_stroke_draw_nothing() {
        let stub = StubPlatform::new();
        let rec = stub.record();
        let mut ctx = ctx_with(stub);
        ctx.create_window_3d("t", 100, 100);

        ctx.no_fill();
        ctx.no_stroke();
        ctx.cube(5.0);
        ctx.rect(0.0, 0.0, 1.0, 1.0);

        assert!(rec.borrow().draws.is_empty());
    }

    #[test]
    fn drawing_without_window_is_ignored() {
        let stub = StubPlatform::new();
        let rec = stub.record();
        let mut ctx = ctx_with(stub);

        ctx.background(0);
        ctx.rect(0.0, 0.0, 1.0, 1.0);
        ctx.cube(1.0);

        assert!(rec.borrow().draws.is_empty());
        assert!(rec.borrow().clears.is_empty());
    }

    #[test]
    fn box_requires_3d_window() {
        let stub = StubPlatform::new();
        let rec = stub.record();
        let mut ctx = ctx_with(stub);
        ctx.create_window("flat", 100, 100);

        ctx.cube(1.0);
        assert!(rec.borrow().draws.is_empty());
    }

    #[test]
    fn draw_carries_current_transform() {
        let stub = StubPlatform::new();
        let rec = stub.record();
        let mut ctx = ctx_with(stub);
        ctx.create_window_3d("t", 100, 100);

        ctx.translate(5.0, 6.0, 7.0);
        ctx.cube(1.0);

        assert_eq!(rec.borrow().draws[0].transform, *ctx.current_transform());
    }

    // ── transform policy ──────────────────────────────────────────────────

    #[test]
    fn empty_pop_leaves_other_state_untouched() {
        let stub = StubPlatform::new();
        let mut ctx = ctx_with(stub);
        ctx.create_window_3d("t", 100, 100);
        ctx.fill((1, 2, 3));
        ctx.stroke((4, 5, 6, 7));
        ctx.input.apply_event(&Event::MouseMoved { x: 3.0, y: 4.0 });
        ctx.translate(1.0, 1.0, 1.0);
        let transform = *ctx.current_transform();

        ctx.pop();

        assert_eq!(ctx.fill_color(), Rgba8::rgb(1, 2, 3));
        assert_eq!(ctx.stroke_color(), Rgba8::rgba(4, 5, 6, 7));
        assert_eq!((ctx.mouse_x(), ctx.mouse_y()), (3.0, 4.0));
        assert!(ctx.is_running());
        assert!(ctx.has_window());
        assert_eq!(*ctx.current_transform(), transform);
        assert_eq!(ctx.transform_depth(), 0);
    }

    #[test]
    fn flat_window_ignores_3d_rotations_and_depth() {
        let stub = StubPlatform::new();
        let mut ctx = ctx_with(stub);
        ctx.create_window("flat", 100, 100);

        ctx.rotate_x(1.0);
        ctx.rotate_y(1.0);
        assert_eq!(*ctx.current_transform(), Transform::from_scale(1.0));

        ctx.translate(2.0, 3.0, 9.0);
        let mut expected = TransformStack::new();
        expected.translate(2.0, 3.0, 0.0);
        assert_eq!(ctx.current_transform(), expected.current());

        ctx.rotate_z(0.5);
        expected.rotate_z(0.5);
        assert_eq!(ctx.current_transform(), expected.current());
    }

    // ── window / vsync ────────────────────────────────────────────────────

    #[test]
    fn second_window_is_ignored() {
        let stub = StubPlatform::new();
        let rec = stub.record();
        let mut ctx = ctx_with(stub);

        assert!(ctx.create_window_3d("first", 640, 480));
        assert!(!ctx.create_window("second", 10, 10));

        assert_eq!(rec.borrow().windows.len(), 1);
        assert_eq!((ctx.width(), ctx.height()), (640, 480));
        assert!(ctx.is_mode_3d());
    }

    #[test]
    fn failed_window_can_be_retried() {
        let stub = StubPlatform::new().failing_windows(1);
        let rec = stub.record();
        let mut ctx = ctx_with(stub);

        assert!(!ctx.create_window("a", 10, 10));
        assert!(!ctx.has_window());
        assert!(ctx.create_window("b", 10, 10));
        assert_eq!(rec.borrow().windows.len(), 1);
    }

    #[test]
    fn vsync_before_window_is_applied_on_creation() {
        let stub = StubPlatform::new();
        let rec = stub.record();
        let mut ctx = ctx_with(stub);

        ctx.set_vsync(true);
        assert!(rec.borrow().vsync.is_empty());
        assert!(!ctx.clock.is_uncapped());

        ctx.create_window("t", 10, 10);
        assert_eq!(rec.borrow().vsync, vec![true]);
        assert!(ctx.vsync());
        assert!(ctx.clock.is_uncapped());

        // Redundant request is a no-op.
        ctx.set_vsync(true);
        assert_eq!(rec.borrow().vsync, vec![true]);

        ctx.set_vsync(false);
        assert_eq!(rec.borrow().vsync, vec![true, false]);
        assert!(!ctx.clock.is_uncapped());
    }

    // ── events ────────────────────────────────────────────────────────────

    #[test]
    fn later_registration_replaces_earlier() {
        let stub = StubPlatform::new().with_frame(vec![Event::Key {
            key: Key::Space,
            state: crate::input::ButtonState::Pressed,
            repeat: false,
        }]);
        let mut ctx = ctx_with(stub);

        let hits = Rc::new(RefCell::new(Vec::new()));
        let h1 = Rc::clone(&hits);
        ctx.on(EventKind::Key, move |_, _| h1.borrow_mut().push("first"));
        let h2 = Rc::clone(&hits);
        ctx.on(EventKind::Key, move |_, _| h2.borrow_mut().push("second"));

        poll_and_dispatch(&mut ctx);
        assert_eq!(*hits.borrow(), vec!["second"]);
    }

    #[test]
    fn handlers_run_in_delivery_order_and_unknown_kinds_are_skipped() {
        let stub = StubPlatform::new().with_frame(vec![
            Event::MouseMoved { x: 1.0, y: 1.0 },
            Event::Text("a".into()),
            Event::MouseMoved { x: 2.0, y: 2.0 },
        ]);
        let mut ctx = ctx_with(stub);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        ctx.on(EventKind::MouseMoved, move |ctx, _| s.borrow_mut().push(ctx.mouse_x()));

        assert_eq!(poll_and_dispatch(&mut ctx), 3);
        assert_eq!(*seen.borrow(), vec![1.0, 2.0]);
    }

    #[test]
    fn handler_may_replace_itself() {
        let stub = StubPlatform::new()
            .with_frame(vec![Event::Text("x".into()), Event::Text("y".into())]);
        let mut ctx = ctx_with(stub);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let s1 = Rc::clone(&seen);
        ctx.on(EventKind::Text, move |ctx, _| {
            s1.borrow_mut().push("old");
            let s2 = Rc::clone(&s1);
            ctx.on(EventKind::Text, move |_, _| s2.borrow_mut().push("new"));
        });

        poll_and_dispatch(&mut ctx);
        assert_eq!(*seen.borrow(), vec!["old", "new"]);
    }

    #[test]
    fn quit_runs_user_handler_then_stops() {
        let stub = StubPlatform::new().with_frame(vec![Event::Quit]);
        let mut ctx = ctx_with(stub);

        let running_in_handler = Rc::new(RefCell::new(None));
        let r = Rc::clone(&running_in_handler);
        ctx.on(EventKind::Quit, move |ctx, _| *r.borrow_mut() = Some(ctx.is_running()));

        poll_and_dispatch(&mut ctx);
        assert_eq!(*running_in_handler.borrow(), Some(true));
        assert!(!ctx.is_running());
    }

    #[test]
    fn quit_without_handler_still_stops() {
        let stub = StubPlatform::new().with_frame(vec![Event::Quit]);
        let mut ctx = ctx_with(stub);
        poll_and_dispatch(&mut ctx);
        assert!(!ctx.is_running());
    }

    #[test]
    fn resize_updates_size_readouts() {
        let stub = StubPlatform::new().with_frame(vec![Event::Resized { width: 300, height: 200 }]);
        let mut ctx = ctx_with(stub);
        ctx.create_window("t", 100, 100);

        poll_and_dispatch(&mut ctx);
        assert_eq!((ctx.width(), ctx.height()), (300, 200));
    }

    #[test]
    fn resize_handler_sees_new_size() {
        let stub = StubPlatform::new().with_frame(vec![Event::Resized { width: 300, height: 200 }]);
        let mut ctx = ctx_with(stub);
        ctx.create_window("t", 100, 100);

        let seen = Rc::new(RefCell::new(None));
        let s = Rc::clone(&seen);
        ctx.on(EventKind::Resized, move |ctx, _| {
            *s.borrow_mut() = Some((ctx.width(), ctx.height()));
        });

        poll_and_dispatch(&mut ctx);
        assert_eq!(*seen.borrow(), Some((300, 200)));
    }

    #[test]
    fn running_handler_is_still_reported_installed() {
        let stub = StubPlatform::new().with_frame(vec![Event::Focused(true)]);
        let mut ctx = ctx_with(stub);

        let seen = Rc::new(RefCell::new(None));
        let s = Rc::clone(&seen);
        ctx.on(EventKind::Focused, move |ctx, _| {
            *s.borrow_mut() = Some(ctx.has_handler(EventKind::Focused));
        });

        poll_and_dispatch(&mut ctx);
        assert_eq!(*seen.borrow(), Some(true));
        assert!(ctx.has_handler(EventKind::Focused));
    }

    // ── shutdown ──────────────────────────────────────────────────────────

    #[test]
    fn shutdown_tears_down_once() {
        let stub = StubPlatform::new();
        let rec = stub.record();
        let mut ctx = ctx_with(stub);

        assert!(ctx.shutdown());
        assert!(!ctx.shutdown());
        assert_eq!(rec.borrow().teardown_calls, 1);
        assert!(!ctx.is_running());
    }
}
