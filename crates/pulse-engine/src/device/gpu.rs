use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::surface::{PixelSurface, RenderSurface};

use super::blit::Blitter;
use super::GpuInit;

/// Why a frame did not reach the screen.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PresentError {
    /// Swapchain was lost or outdated and has been reconfigured.
    Reconfigured,
    /// Transient acquisition failure; only this frame is lost.
    Dropped,
    /// Out of memory. The runtime shuts down.
    Fatal,
}

/// wgpu device, queue and window swapchain.
///
/// Creation is the fatal-on-failure resource acquisition of the native host:
/// no adapter, no device or no surface format means the host does not start.
pub struct Gpu<'w> {
    /// Bound to the window; the window must outlive this value.
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    blitter: Blitter,
}

impl<'w> Gpu<'w> {
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter can present to this window")?;

        let info = adapter.get_info();
        log::info!("gpu adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("pulse device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = pick_format(&caps.formats, init.prefer_srgb)
            .context("surface reports no supported formats")?;
        let alpha_mode = init
            .alpha_mode
            .filter(|m| caps.alpha_modes.contains(m))
            .or_else(|| caps.alpha_modes.first().copied())
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            blitter: Blitter::new(init.smooth_upscale),
        })
    }

    #[inline]
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Swapchain size in physical pixels.
    #[inline]
    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.config.width, self.config.height)
    }

    /// Follows the window's drawable size. A minimized (0x0) window keeps the
    /// previous configuration, which wgpu would otherwise reject.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        if size == self.size() {
            return;
        }

        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Shows `pixels` stretched over the whole window.
    ///
    /// An empty pixel surface presents nothing.
    pub fn present(&mut self, pixels: &PixelSurface) -> std::result::Result<(), PresentError> {
        if pixels.size().is_empty() {
            return Ok(());
        }

        self.blitter.upload(&self.device, &self.queue, pixels);

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(err) => return Err(self.recover(err)),
        };
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("pulse present encoder"),
        });
        self.blitter
            .draw(&self.device, self.config.format, &mut encoder, &view);

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn recover(&mut self, err: wgpu::SurfaceError) -> PresentError {
        log::warn!("surface error: {err:?}");
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                self.surface.configure(&self.device, &self.config);
                PresentError::Reconfigured
            }
            wgpu::SurfaceError::OutOfMemory => PresentError::Fatal,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => PresentError::Dropped,
        }
    }
}

/// First sRGB format the surface supports when `prefer_srgb`, else the
/// surface's own preference.
fn pick_format(formats: &[wgpu::TextureFormat], prefer_srgb: bool) -> Option<wgpu::TextureFormat> {
    if prefer_srgb {
        if let Some(srgb) = formats.iter().copied().find(|f| f.is_srgb()) {
            return Some(srgb);
        }
    }
    formats.first().copied()
}
