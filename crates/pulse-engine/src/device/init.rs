/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB swapchain format. Pixel surfaces hold sRGB-encoded
    /// bytes, so this keeps colors identical to a browser canvas.
    pub prefer_srgb: bool,

    /// Present mode. FIFO paces presentation to the display refresh, which is
    /// what the frame loop expects from its redraw requests.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference; falls back to a supported mode.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency (hint).
    pub desired_maximum_frame_latency: u32,

    /// Filter used when a downscaled surface is stretched over the window.
    /// `false` gives hard pixel edges, like `image-rendering: pixelated`.
    pub smooth_upscale: bool,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
            smooth_upscale: false,
        }
    }
}
