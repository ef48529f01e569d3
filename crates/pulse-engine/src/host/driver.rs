use crate::config::HostConfig;
use crate::coords::{LayoutSize, ViewportState};
use crate::render::RenderRoutine;
use crate::schedule::{FrameScheduler, FrameSource, FrameStats, LoopState, SchedulerPhase, TickOutcome};
use crate::surface::RenderSurface;
use crate::track::{LayoutOutcome, ViewportTracker};

use super::{ReadyModule, Stage};

/// The assembled harness: one stage, one tracker, one frame loop.
///
/// Platform front-ends forward their layout callbacks to
/// [`on_layout_change`](Self::on_layout_change) /
/// [`on_layout_batch`](Self::on_layout_batch) and their refresh callbacks to
/// [`tick`](Self::tick). Both must be delivered on the same thread.
pub struct Host<S, R> {
    stage: Stage<S, R>,
    tracker: ViewportTracker,
    scheduler: FrameScheduler,
}

impl<S, R> Host<S, R>
where
    S: RenderSurface,
    R: RenderRoutine<S>,
{
    /// Synchronous phase of startup; `module` proves the async phase is done.
    pub fn new(module: ReadyModule<R>, surface: S, config: &HostConfig) -> Self {
        Self {
            stage: Stage::new(surface, module.into_inner()),
            tracker: ViewportTracker::new(config.downscale),
            scheduler: FrameScheduler::new(),
        }
    }

    pub fn start<F: FrameSource + ?Sized>(&mut self, frames: &mut F) -> anyhow::Result<()> {
        self.scheduler.start(&mut self.stage, frames)
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn tick<F: FrameSource + ?Sized>(
        &mut self,
        frames: &mut F,
        timestamp_ms: f64,
    ) -> anyhow::Result<TickOutcome> {
        self.scheduler.tick(&mut self.stage, frames, timestamp_ms)
    }

    pub fn on_layout_change(
        &mut self,
        observed: LayoutSize,
        now_ms: f64,
    ) -> anyhow::Result<LayoutOutcome> {
        self.tracker.on_layout_change(&mut self.stage, observed, now_ms)
    }

    pub fn on_layout_batch<I>(&mut self, batch: I, now_ms: f64) -> anyhow::Result<usize>
    where
        I: IntoIterator<Item = LayoutSize>,
    {
        self.tracker.on_layout_batch(&mut self.stage, batch, now_ms)
    }

    #[inline]
    pub fn viewport(&self) -> ViewportState {
        self.stage.viewport()
    }

    #[inline]
    pub fn phase(&self) -> SchedulerPhase {
        self.stage.phase()
    }

    #[inline]
    pub fn loop_state(&self) -> LoopState {
        self.scheduler.loop_state()
    }

    #[inline]
    pub fn stats(&self) -> FrameStats {
        self.scheduler.stats()
    }

    #[inline]
    pub fn render_calls(&self) -> u64 {
        self.stage.render_calls()
    }

    #[inline]
    pub fn surface(&self) -> &S {
        self.stage.surface()
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut S {
        self.stage.surface_mut()
    }

    #[inline]
    pub fn routine(&self) -> &R {
        self.stage.routine()
    }
}
