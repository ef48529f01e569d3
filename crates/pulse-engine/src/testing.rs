//! Test doubles shared by the unit tests.

use crate::coords::SurfaceSize;
use crate::schedule::FrameSource;
use crate::surface::{PixelSurface, RenderSurface, Rgba8};

/// Arguments of one render call.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderCall {
    pub width: f64,
    pub height: f64,
    pub timestamp_ms: f64,
}

impl RenderCall {
    pub fn new(width: f64, height: f64, timestamp_ms: f64) -> Self {
        Self { width, height, timestamp_ms }
    }
}

/// Surface as the routine saw it on entry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SurfaceSeen {
    pub size: SurfaceSize,
    pub was_clear: bool,
}

/// Records every call and then paints the first pixel, so a later call can
/// tell whether the surface was cleared in between.
#[derive(Debug, Default)]
pub struct Recorder {
    calls: Vec<RenderCall>,
    surfaces: Vec<SurfaceSeen>,
}

impl Recorder {
    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    pub fn surfaces(&self) -> &[SurfaceSeen] {
        &self.surfaces
    }
}

impl crate::render::RenderRoutine<PixelSurface> for Recorder {
    fn render(
        &mut self,
        surface: &mut PixelSurface,
        width: f64,
        height: f64,
        timestamp_ms: f64,
    ) -> anyhow::Result<()> {
        self.calls.push(RenderCall::new(width, height, timestamp_ms));
        self.surfaces.push(SurfaceSeen {
            size: surface.size(),
            was_clear: surface.pixels().iter().all(|p| *p == Rgba8::TRANSPARENT),
        });
        surface.put(0, 0, Rgba8::opaque(255, 255, 255));
        Ok(())
    }
}

/// Fails every call.
#[derive(Debug, Default)]
pub struct FailingRoutine {
    pub attempts: u64,
}

impl crate::render::RenderRoutine<PixelSurface> for FailingRoutine {
    fn render(&mut self, _: &mut PixelSurface, _: f64, _: f64, _: f64) -> anyhow::Result<()> {
        self.attempts += 1;
        anyhow::bail!("render exploded")
    }
}

/// Frame source driven by hand.
#[derive(Debug, Default)]
pub struct ManualFrames {
    pub now_ms: f64,
    pub requests: u64,
    pub refuse: bool,
}

impl ManualFrames {
    pub fn at(now_ms: f64) -> Self {
        Self { now_ms, ..Self::default() }
    }
}

impl FrameSource for ManualFrames {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn request_frame(&mut self) -> anyhow::Result<()> {
        if self.refuse {
            return Err(crate::HostError::frame_request("display gone").into());
        }
        self.requests += 1;
        Ok(())
    }
}
