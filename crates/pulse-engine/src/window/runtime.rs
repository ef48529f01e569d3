use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::LayoutSize;
use crate::device::{Gpu, GpuInit, PresentError};
use crate::host::Host;
use crate::render::RenderRoutine;
use crate::schedule::{FrameSource, TickOutcome};
use crate::surface::PixelSurface;
use crate::time::FrameClock;
use crate::track::LayoutOutcome;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "pulse".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point for the native runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `host` until the window closes.
    ///
    /// GPU acquisition failure is fatal and returned as the error.
    pub fn run<R>(initial: RuntimeConfig, gpu_init: GpuInit, host: Host<PixelSurface, R>) -> Result<()>
    where
        R: RenderRoutine<PixelSurface> + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(initial, gpu_init, host);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// Redraw requests are the native stand-in for animation frames.
struct WindowFrames<'a> {
    window: &'a Window,
    clock: &'a FrameClock,
}

impl FrameSource for WindowFrames<'_> {
    fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    fn request_frame(&mut self) -> Result<()> {
        self.window.request_redraw();
        Ok(())
    }
}

struct AppState<R>
where
    R: RenderRoutine<PixelSurface> + 'static,
{
    initial: RuntimeConfig,
    gpu_init: GpuInit,
    host: Host<PixelSurface, R>,

    window: Option<WindowEntry>,
    fatal: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<R> AppState<R>
where
    R: RenderRoutine<PixelSurface> + 'static,
{
    fn new(initial: RuntimeConfig, gpu_init: GpuInit, host: Host<PixelSurface, R>) -> Self {
        Self {
            initial,
            gpu_init,
            host,
            window: None,
            fatal: None,
            exit_requested: false,
        }
    }

    fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowId> {
        let attrs = Window::default_attributes()
            .with_title(self.initial.title.clone())
            .with_inner_size(self.initial.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let id = window.id();
        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()?;

        entry.with_gpu(|gpu| log::info!("surface format: {:?}", gpu.surface_format()));
        self.window = Some(entry);
        Ok(id)
    }

    /// Starts the frame loop, then reports the initial window size as the
    /// first layout observation.
    fn start(&mut self) {
        let (host, window) = (&mut self.host, &mut self.window);
        let Some(entry) = window.as_mut() else {
            return;
        };

        let initial_size = entry.with_mut(|fields| {
            let mut frames = WindowFrames { window: fields.window, clock: fields.clock };
            if let Err(e) = host.start(&mut frames) {
                log::error!("first frame failed: {e:#}");
            }
            fields.window.inner_size()
        });

        self.observe_layout(initial_size);
    }

    /// Window resize: reconfigure the swapchain, then let the host resize its
    /// surface and render once.
    fn observe_layout(&mut self, size: PhysicalSize<u32>) {
        let (host, window) = (&mut self.host, &mut self.window);
        let Some(entry) = window.as_mut() else {
            return;
        };

        let mut fatal = false;
        entry.with_mut(|fields| {
            fields.gpu.resize(size);

            let observed = LayoutSize::new(f64::from(size.width), f64::from(size.height));
            match host.on_layout_change(observed, fields.clock.now_ms()) {
                Ok(LayoutOutcome::Applied { .. }) => {
                    fatal = present(fields.window, fields.gpu, host.surface());
                }
                Ok(LayoutOutcome::Ignored) => {}
                Err(e) => log::error!("render failed during resize: {e:#}"),
            }
        });

        if fatal {
            self.fail(anyhow::anyhow!("GPU surface failure while presenting"));
        }
    }

    fn redraw(&mut self) {
        let (host, window) = (&mut self.host, &mut self.window);
        let Some(entry) = window.as_mut() else {
            return;
        };

        let mut fatal = false;
        entry.with_mut(|fields| {
            let ft = fields.clock.tick();
            log::trace!("frame {} dt={:.2}ms", ft.frame_index, ft.dt_ms);

            let mut frames = WindowFrames { window: fields.window, clock: fields.clock };
            match host.tick(&mut frames, ft.timestamp_ms) {
                Ok(TickOutcome::Rendered) => {
                    fatal = present(fields.window, fields.gpu, host.surface());
                }
                Ok(TickOutcome::Suppressed | TickOutcome::Stopped) => {}
                Err(e) => log::error!("render failed on frame {}: {e:#}", ft.frame_index),
            }
        });

        if fatal {
            self.fail(anyhow::anyhow!("GPU surface failure while presenting"));
        }
    }

    fn fail(&mut self, err: anyhow::Error) {
        log::error!("{err:#}");
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        self.host.stop();
        self.request_exit();
    }
}

/// Presents the pixel surface. Returns `true` on a fatal surface error.
fn present(window: &Window, gpu: &mut Gpu<'_>, pixels: &PixelSurface) -> bool {
    window.pre_present_notify();
    match gpu.present(pixels) {
        Ok(()) => false,
        Err(PresentError::Fatal) => true,
        Err(PresentError::Reconfigured | PresentError::Dropped) => false,
    }
}

impl<R> ApplicationHandler for AppState<R>
where
    R: RenderRoutine<PixelSurface> + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(e.context("failed to create initial window"));
            event_loop.exit();
            return;
        }

        self.start();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Ticks re-request their own redraw; nothing to poll.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.host.stop();
                self.window = None;
                self.request_exit();
            }

            WindowEvent::Resized(new_size) => self.observe_layout(new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = self
                    .window
                    .as_ref()
                    .map(|entry| entry.with_window(|w| w.inner_size()));
                if let Some(size) = new_size {
                    self.observe_layout(size);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => {}
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }
}
