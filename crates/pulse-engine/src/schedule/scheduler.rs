use crate::coords::ViewportState;
use crate::host::Stage;
use crate::render::RenderRoutine;
use crate::surface::RenderSurface;

use super::FrameSource;

/// Render gating derived from the viewport state.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SchedulerPhase {
    /// No layout measurement yet; ticks do not render.
    AwaitingFirstMeasurement,
    /// Every tick renders.
    Steady,
}

impl SchedulerPhase {
    /// The tracker never stores a degenerate resolution, so once `Steady` is
    /// reached it is never left. A region that is hidden afterwards keeps
    /// rendering at its last good resolution.
    #[inline]
    pub fn of(viewport: ViewportState) -> Self {
        if viewport.is_valid() {
            Self::Steady
        } else {
            Self::AwaitingFirstMeasurement
        }
    }
}

/// Loop lifecycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LoopState {
    #[default]
    Idle,
    Running,
    Stopped,
}

/// What a single tick did.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TickOutcome {
    /// Next tick requested, render issued.
    Rendered,
    /// Next tick requested, render skipped (no measurement yet).
    Suppressed,
    /// Loop is not running; nothing requested, nothing rendered.
    Stopped,
}

/// Tick counters.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    /// Ticks processed while running.
    pub ticks: u64,
    /// Ticks that issued a render call (including ones whose render failed).
    pub rendered: u64,
    /// Ticks skipped for lack of a measurement.
    pub suppressed: u64,
}

/// Drives the per-refresh render loop.
///
/// The loop is explicit: [`start`](Self::start) issues the first tick
/// synchronously and every tick re-requests the next one from the
/// [`FrameSource`]. [`stop`](Self::stop) ends it at the next tick.
///
/// At most one frame request is outstanding at any time. A restart before the
/// previous chain's request has fired adopts that request instead of issuing
/// a second one.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    state: LoopState,
    frame_pending: bool,
    last_phase: Option<SchedulerPhase>,
    stats: FrameStats,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn loop_state(&self) -> LoopState {
        self.state
    }

    #[inline]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Starts the loop and runs the first tick at `frames.now_ms()`.
    ///
    /// Starting a running loop does nothing; a second chain of ticks would
    /// double the render rate.
    pub fn start<S, R, F>(&mut self, stage: &mut Stage<S, R>, frames: &mut F) -> anyhow::Result<()>
    where
        S: RenderSurface,
        R: RenderRoutine<S>,
        F: FrameSource + ?Sized,
    {
        if self.state == LoopState::Running {
            log::warn!("frame loop already running; start ignored");
            return Ok(());
        }

        self.state = LoopState::Running;
        log::debug!("frame loop started");
        let now = frames.now_ms();
        self.step(stage, frames, now).map(|_| ())
    }

    /// Stops the loop. The next tick neither renders nor reschedules.
    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            log::debug!("frame loop stopped after {} ticks", self.stats.ticks);
        }
        self.state = LoopState::Stopped;
    }

    /// Handles one refresh callback delivered for an earlier request.
    ///
    /// The next tick is requested before the render call, so an error from
    /// the render routine propagates out of this tick while the loop carries
    /// on with the next one.
    pub fn tick<S, R, F>(
        &mut self,
        stage: &mut Stage<S, R>,
        frames: &mut F,
        timestamp_ms: f64,
    ) -> anyhow::Result<TickOutcome>
    where
        S: RenderSurface,
        R: RenderRoutine<S>,
        F: FrameSource + ?Sized,
    {
        self.frame_pending = false;
        self.step(stage, frames, timestamp_ms)
    }

    fn step<S, R, F>(
        &mut self,
        stage: &mut Stage<S, R>,
        frames: &mut F,
        timestamp_ms: f64,
    ) -> anyhow::Result<TickOutcome>
    where
        S: RenderSurface,
        R: RenderRoutine<S>,
        F: FrameSource + ?Sized,
    {
        if self.state != LoopState::Running {
            return Ok(TickOutcome::Stopped);
        }

        if !self.frame_pending {
            frames.request_frame()?;
            self.frame_pending = true;
        }
        self.stats.ticks += 1;

        let phase = stage.phase();
        if self.last_phase != Some(phase) {
            if phase == SchedulerPhase::Steady {
                let ViewportState { width, height } = stage.viewport();
                log::info!("first measurement received; rendering at {width}x{height}");
            }
            self.last_phase = Some(phase);
        }

        match phase {
            SchedulerPhase::AwaitingFirstMeasurement => {
                self.stats.suppressed += 1;
                Ok(TickOutcome::Suppressed)
            }
            SchedulerPhase::Steady => {
                self.stats.rendered += 1;
                stage.render(timestamp_ms)?;
                Ok(TickOutcome::Rendered)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DownscaleFactor;
    use crate::coords::LayoutSize;
    use crate::surface::PixelSurface;
    use crate::testing::{FailingRoutine, ManualFrames, Recorder, RenderCall};
    use crate::track::ViewportTracker;

    fn stage() -> Stage<PixelSurface, Recorder> {
        Stage::new(PixelSurface::default(), Recorder::default())
    }

    fn measure<R: RenderRoutine<PixelSurface>>(stage: &mut Stage<PixelSurface, R>, w: f64, h: f64) {
        let _ = ViewportTracker::new(DownscaleFactor::NONE).on_layout_change(stage, LayoutSize::new(w, h), 0.0);
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn start_runs_first_tick_at_current_time() {
        let mut stage = stage();
        measure(&mut stage, 40.0, 30.0);
        let mut frames = ManualFrames::at(16.0);
        let mut scheduler = FrameScheduler::new();

        scheduler.start(&mut stage, &mut frames).unwrap();

        assert_eq!(scheduler.loop_state(), LoopState::Running);
        assert_eq!(frames.requests, 1);
        assert_eq!(stage.routine().calls().last(), Some(&RenderCall::new(40.0, 30.0, 16.0)));
    }

    #[test]
    fn tick_before_start_does_nothing() {
        let mut stage = stage();
        let mut frames = ManualFrames::default();
        let mut scheduler = FrameScheduler::new();

        assert_eq!(scheduler.tick(&mut stage, &mut frames, 1.0).unwrap(), TickOutcome::Stopped);
        assert_eq!(frames.requests, 0);
    }

    #[test]
    fn start_while_running_is_ignored() {
        let mut stage = stage();
        let mut frames = ManualFrames::default();
        let mut scheduler = FrameScheduler::new();

        scheduler.start(&mut stage, &mut frames).unwrap();
        scheduler.start(&mut stage, &mut frames).unwrap();

        assert_eq!(frames.requests, 1);
        assert_eq!(scheduler.stats().ticks, 1);
    }

    #[test]
    fn stop_ends_the_loop() {
        let mut stage = stage();
        measure(&mut stage, 10.0, 10.0);
        let mut frames = ManualFrames::default();
        let mut scheduler = FrameScheduler::new();
        scheduler.start(&mut stage, &mut frames).unwrap();
        let renders = stage.render_calls();

        scheduler.stop();
        let outcome = scheduler.tick(&mut stage, &mut frames, 32.0).unwrap();

        assert_eq!(outcome, TickOutcome::Stopped);
        assert_eq!(scheduler.loop_state(), LoopState::Stopped);
        assert_eq!(frames.requests, 1);
        assert_eq!(stage.render_calls(), renders);
    }

    #[test]
    fn stopped_loop_can_restart() {
        let mut stage = stage();
        let mut frames = ManualFrames::default();
        let mut scheduler = FrameScheduler::new();
        scheduler.start(&mut stage, &mut frames).unwrap();
        scheduler.stop();
        assert_eq!(scheduler.tick(&mut stage, &mut frames, 16.0).unwrap(), TickOutcome::Stopped);

        scheduler.start(&mut stage, &mut frames).unwrap();

        assert_eq!(scheduler.loop_state(), LoopState::Running);
        assert_eq!(frames.requests, 2);
    }

    #[test]
    fn restart_before_pending_frame_keeps_one_chain() {
        let mut stage = stage();
        measure(&mut stage, 10.0, 10.0);
        let mut frames = ManualFrames::default();
        let mut scheduler = FrameScheduler::new();
        scheduler.start(&mut stage, &mut frames).unwrap();
        scheduler.stop();
        scheduler.start(&mut stage, &mut frames).unwrap();

        // The first chain's request is adopted, not duplicated.
        assert_eq!(frames.requests, 1);

        let before = stage.render_calls();
        for refresh in 1..=3 {
            let delivered = frames.requests;
            let outcome = scheduler.tick(&mut stage, &mut frames, f64::from(refresh) * 16.0).unwrap();
            assert_eq!(outcome, TickOutcome::Rendered);
            assert_eq!(frames.requests, delivered + 1);
        }
        assert_eq!(stage.render_calls() - before, 3);
    }

    // ── gating ────────────────────────────────────────────────────────────

    #[test]
    fn ticks_before_measurement_are_suppressed_but_rescheduled() {
        let mut stage = stage();
        let mut frames = ManualFrames::default();
        let mut scheduler = FrameScheduler::new();
        scheduler.start(&mut stage, &mut frames).unwrap();

        for t in 1..=10 {
            let outcome = scheduler.tick(&mut stage, &mut frames, f64::from(t) * 16.0).unwrap();
            assert_eq!(outcome, TickOutcome::Suppressed);
        }

        assert_eq!(stage.render_calls(), 0);
        assert_eq!(frames.requests, 11);
        assert_eq!(
            scheduler.stats(),
            FrameStats { ticks: 11, rendered: 0, suppressed: 11 }
        );
    }

    #[test]
    fn ticks_after_measurement_render_latest_resolution() {
        let mut stage = stage();
        let mut frames = ManualFrames::default();
        let mut scheduler = FrameScheduler::new();
        scheduler.start(&mut stage, &mut frames).unwrap();

        measure(&mut stage, 100.0, 50.0);
        scheduler.tick(&mut stage, &mut frames, 16.0).unwrap();
        measure(&mut stage, 120.0, 60.0);
        scheduler.tick(&mut stage, &mut frames, 32.0).unwrap();

        assert_eq!(
            stage.routine().calls(),
            vec![
                RenderCall::new(100.0, 50.0, 0.0),
                RenderCall::new(100.0, 50.0, 16.0),
                RenderCall::new(120.0, 60.0, 0.0),
                RenderCall::new(120.0, 60.0, 32.0),
            ]
        );
    }

    #[test]
    fn hidden_region_keeps_last_resolution() {
        let mut stage = stage();
        let mut frames = ManualFrames::default();
        let mut scheduler = FrameScheduler::new();
        measure(&mut stage, 64.0, 48.0);
        scheduler.start(&mut stage, &mut frames).unwrap();

        measure(&mut stage, 0.0, 0.0);
        let outcome = scheduler.tick(&mut stage, &mut frames, 16.0).unwrap();

        assert_eq!(outcome, TickOutcome::Rendered);
        assert_eq!(stage.phase(), SchedulerPhase::Steady);
        assert_eq!(stage.routine().calls().last(), Some(&RenderCall::new(64.0, 48.0, 16.0)));
    }

    #[test]
    fn phase_follows_the_viewport() {
        assert_eq!(
            SchedulerPhase::of(ViewportState::UNMEASURED),
            SchedulerPhase::AwaitingFirstMeasurement
        );
        assert_eq!(SchedulerPhase::of(ViewportState::new(1.0, 1.0)), SchedulerPhase::Steady);
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn render_failure_still_reschedules() {
        let mut stage = Stage::new(PixelSurface::default(), FailingRoutine::default());
        measure(&mut stage, 10.0, 10.0);
        let mut frames = ManualFrames::default();
        let mut scheduler = FrameScheduler::new();

        assert!(scheduler.start(&mut stage, &mut frames).is_err());
        assert_eq!(frames.requests, 1);
        assert_eq!(scheduler.loop_state(), LoopState::Running);

        assert!(scheduler.tick(&mut stage, &mut frames, 16.0).is_err());
        assert_eq!(frames.requests, 2);
        assert_eq!(stage.routine().attempts, 3);
        assert_eq!(scheduler.stats().rendered, 2);
    }

    #[test]
    fn refused_frame_request_skips_the_render() {
        let mut stage = stage();
        measure(&mut stage, 10.0, 10.0);
        let mut frames = ManualFrames { refuse: true, ..ManualFrames::default() };
        let mut scheduler = FrameScheduler::new();

        let err = scheduler.start(&mut stage, &mut frames).unwrap_err();

        assert_eq!(
            err.downcast_ref::<crate::HostError>(),
            Some(&crate::HostError::frame_request("display gone"))
        );
        assert_eq!(stage.render_calls(), 1);
    }
}
