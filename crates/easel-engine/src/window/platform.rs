use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::event::Event;
use crate::paint::Rgba8;
use crate::platform::{DrawCmd, Platform, WindowConfig, WindowInfo};
use crate::render::shapes::SolidRenderer;
use crate::render::{MeshBatch, RenderCtx, RenderTarget, view_projection};

use super::translate::{to_logical_size, translate_window_event};

/// Pump iterations `create_window` waits for the window to appear.
const CREATE_ATTEMPTS: usize = 64;

/// Background before the first `background()` call.
const DEFAULT_BACKGROUND: Rgba8 = Rgba8::gray(204);

thread_local! {
    // winit allows one event loop per process; keep it for later runs.
    static EVENT_LOOP: RefCell<Option<EventLoop<()>>> = const { RefCell::new(None) };
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// Desktop platform on winit + wgpu.
///
/// The event loop is pumped once per frame instead of owning the thread, so
/// the runtime keeps control of pacing. Drawing is recorded into a
/// `MeshBatch` and rendered on `present`.
pub struct WinitPlatform {
    event_loop: Option<EventLoop<()>>,
    exited: bool,
    pump: PumpState,
}

impl WinitPlatform {
    pub fn new(gpu_init: GpuInit) -> Self {
        Self {
            event_loop: None,
            exited: false,
            pump: PumpState::new(gpu_init),
        }
    }

    /// Runs one non-blocking event loop iteration.
    fn pump_once(&mut self) -> Option<i32> {
        let event_loop = self.event_loop.as_mut()?;
        if self.exited {
            return None;
        }
        match event_loop.pump_app_events(Some(Duration::ZERO), &mut self.pump) {
            PumpStatus::Continue => None,
            PumpStatus::Exit(code) => {
                self.exited = true;
                Some(code)
            }
        }
    }
}

impl Default for WinitPlatform {
    fn default() -> Self {
        Self::new(GpuInit::default())
    }
}

impl Platform for WinitPlatform {
    fn init(&mut self) -> Result<()> {
        let event_loop = match EVENT_LOOP.with(|slot| slot.borrow_mut().take()) {
            Some(event_loop) => event_loop,
            None => EventLoop::new().context("failed to create winit EventLoop")?,
        };
        event_loop.set_control_flow(ControlFlow::Poll);

        self.event_loop = Some(event_loop);
        self.exited = false;
        log::debug!("winit event loop ready");
        Ok(())
    }

    fn create_window(&mut self, config: &WindowConfig) -> Result<WindowInfo> {
        if self.event_loop.is_none() {
            bail!("platform not initialized");
        }

        self.pump.pending = Some(config.clone());
        for _ in 0..CREATE_ATTEMPTS {
            if let Some(code) = self.pump_once() {
                self.pump.pending = None;
                bail!("event loop exited with code {code} before the window opened");
            }
            if let Some(err) = self.pump.creation_error.take() {
                return Err(err);
            }
            if let (None, Some(info)) = (&self.pump.pending, self.pump.info) {
                log::debug!("winit window ready, scale factor {}", self.pump.scale);
                return Ok(info);
            }
        }

        self.pump.pending = None;
        bail!("window did not open after {CREATE_ATTEMPTS} event loop iterations")
    }

    fn set_vsync(&mut self, enabled: bool) -> Result<()> {
        let Some(entry) = self.pump.entry.as_mut() else {
            bail!("no window to configure");
        };
        entry.with_gpu_mut(|gpu| gpu.set_vsync(enabled));
        Ok(())
    }

    fn pump_events(&mut self) {
        if let Some(code) = self.pump_once() {
            log::debug!("event loop exited with code {code}");
            self.pump.events.push_back(Event::Quit);
        }
    }

    fn poll_event(&mut self) -> Option<Event> {
        self.pump.events.pop_front()
    }

    fn clear(&mut self, color: Rgba8) {
        self.pump.batch.clear(color);
    }

    fn draw(&mut self, cmd: &DrawCmd) {
        self.pump.batch.push(cmd);
    }

    fn present(&mut self) {
        self.pump.render();
    }

    fn teardown(&mut self) {
        self.pump.entry = None;
        self.pump.info = None;
        self.pump.events.clear();

        if let Some(event_loop) = self.event_loop.take() {
            if !self.exited {
                EVENT_LOOP.with(|slot| *slot.borrow_mut() = Some(event_loop));
            }
        }
        log::debug!("winit platform torn down");
    }
}

/// Event loop side of the platform. Receives winit callbacks during a pump.
struct PumpState {
    gpu_init: GpuInit,

    pending: Option<WindowConfig>,
    creation_error: Option<anyhow::Error>,

    entry: Option<WindowEntry>,
    info: Option<WindowInfo>,
    scale: f64,

    events: VecDeque<Event>,
    scratch: Vec<Event>,

    batch: MeshBatch,
    renderer: SolidRenderer,
    fatal_reported: bool,
}

impl PumpState {
    fn new(gpu_init: GpuInit) -> Self {
        Self {
            gpu_init,
            pending: None,
            creation_error: None,
            entry: None,
            info: None,
            scale: 1.0,
            events: VecDeque::new(),
            scratch: Vec::new(),
            batch: MeshBatch::new(DEFAULT_BACKGROUND),
            renderer: SolidRenderer::new(),
            fatal_reported: false,
        }
    }

    fn create_pending(&mut self, event_loop: &ActiveEventLoop) {
        let Some(config) = self.pending.take() else {
            return;
        };

        match self.build_entry(event_loop, &config) {
            Ok((entry, scale)) => {
                let size = entry.with_window(|w| w.inner_size());
                let (width, height) = to_logical_size(scale, size);
                self.info = Some(WindowInfo {
                    width,
                    height,
                    mode: config.mode,
                });
                self.scale = scale;
                self.entry = Some(entry);
            }
            Err(e) => self.creation_error = Some(e),
        }
    }

    fn build_entry(
        &self,
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<(WindowEntry, f64)> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64));

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;
        let scale = window.scale_factor();
        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        Ok((entry, scale))
    }

    fn render(&mut self) {
        let Self {
            entry,
            info,
            batch,
            renderer,
            events,
            fatal_reported,
            ..
        } = self;

        let (Some(entry), Some(info)) = (entry.as_mut(), info.as_ref()) else {
            batch.reset();
            return;
        };

        let view_proj = view_projection(info.width as f32, info.height as f32, info.mode);

        entry.with_gpu_mut(|gpu| {
            let size = gpu.size();
            if size.width == 0 || size.height == 0 {
                return;
            }

            let mut frame = match gpu.begin_frame() {
                Ok(frame) => frame,
                Err(err) => {
                    match gpu.handle_surface_error(err) {
                        SurfaceErrorAction::Fatal if !*fatal_reported => {
                            log::error!("surface out of memory; stopping");
                            *fatal_reported = true;
                            events.push_back(Event::Quit);
                        }
                        action => log::debug!("frame skipped: {action:?}"),
                    }
                    return;
                }
            };

            {
                let ctx = RenderCtx::new(gpu.device(), gpu.queue(), gpu.surface_format(), view_proj);
                let mut target = RenderTarget::new(&mut frame.encoder, &frame.view, gpu.depth_view());
                renderer.render(&ctx, &mut target, batch);
            }

            gpu.submit(frame);
        });

        batch.reset();
    }

    fn resize_surface(&mut self) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        let size = entry.with_window(|w| w.inner_size());
        entry.with_gpu_mut(|gpu| gpu.resize(size));

        let (width, height) = to_logical_size(self.scale, size);
        if let Some(info) = self.info.as_mut() {
            info.width = width;
            info.height = height;
        }
    }
}

impl ApplicationHandler for PumpState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Some platforms only deliver `resumed` once; later requests land here.
        self.create_pending(event_loop);
    }

    fn window_event(&mut self, _: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let ours = self
            .entry
            .as_ref()
            .is_some_and(|e| e.with_window(|w| w.id()) == window_id);
        if !ours {
            return;
        }

        match &event {
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale = *scale_factor;
                self.resize_surface();
                if let Some(info) = self.info {
                    self.events.push_back(Event::Resized {
                        width: info.width,
                        height: info.height,
                    });
                }
                return;
            }
            WindowEvent::Resized(_) => self.resize_surface(),
            _ => {}
        }

        translate_window_event(self.scale, &event, &mut self.scratch);
        self.events.extend(self.scratch.drain(..));
    }
}
