use crate::coords::{SurfaceSize, ViewportState};
use crate::render::RenderRoutine;
use crate::schedule::SchedulerPhase;
use crate::surface::RenderSurface;

/// State shared by the layout callback and the frame callback.
///
/// Threading invariant: both callbacks are delivered on one logical thread and
/// the host event queue serializes them, so nothing in here is synchronized.
/// A port that delivers either callback from another thread must put the
/// stage behind a mutex rather than share it as-is.
pub struct Stage<S, R> {
    viewport: ViewportState,
    surface: S,
    routine: R,
    render_calls: u64,
}

impl<S, R> Stage<S, R>
where
    S: RenderSurface,
    R: RenderRoutine<S>,
{
    pub(crate) fn new(surface: S, routine: R) -> Self {
        Self {
            viewport: ViewportState::UNMEASURED,
            surface,
            routine,
            render_calls: 0,
        }
    }

    #[inline]
    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    #[inline]
    pub fn phase(&self) -> SchedulerPhase {
        SchedulerPhase::of(self.viewport)
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[inline]
    pub fn routine(&self) -> &R {
        &self.routine
    }

    /// Number of render calls issued so far, from either callback site.
    #[inline]
    pub fn render_calls(&self) -> u64 {
        self.render_calls
    }

    /// Stores a new resolution and resizes the surface to match.
    ///
    /// The surface is cleared by the resize; callers render afterwards.
    pub(crate) fn apply_viewport(&mut self, viewport: ViewportState) -> SurfaceSize {
        self.viewport = viewport;
        let size = SurfaceSize::from_viewport(viewport);
        self.surface.resize(size);
        size
    }

    /// Issues one render call at the current resolution.
    pub(crate) fn render(&mut self, timestamp_ms: f64) -> anyhow::Result<()> {
        let ViewportState { width, height } = self.viewport;
        self.render_calls += 1;
        self.routine.render(&mut self.surface, width, height, timestamp_ms)
    }
}
