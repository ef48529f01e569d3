use crate::config::DownscaleFactor;
use crate::coords::{LayoutSize, SurfaceSize, ViewportState};
use crate::host::Stage;
use crate::render::RenderRoutine;
use crate::surface::RenderSurface;

/// Result of feeding one layout observation to the tracker.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LayoutOutcome {
    /// Resolution stored, surface resized, one render issued.
    Applied {
        viewport: ViewportState,
        surface: SurfaceSize,
    },
    /// Degenerate resolution; nothing changed and nothing rendered.
    Ignored,
}

/// Derives the render resolution from observed layout sizes.
#[derive(Debug, Copy, Clone, Default)]
pub struct ViewportTracker {
    factor: DownscaleFactor,
}

impl ViewportTracker {
    pub fn new(factor: DownscaleFactor) -> Self {
        Self { factor }
    }

    #[inline]
    pub fn factor(&self) -> DownscaleFactor {
        self.factor
    }

    /// Render resolution for an observed size: `(W / f, H / f)`, unrounded.
    #[inline]
    pub fn resolve(&self, observed: LayoutSize) -> ViewportState {
        ViewportState::downscaled(observed, self.factor.as_f64())
    }

    /// Applies one layout observation.
    ///
    /// Order matters: the state is written and the surface resized (which
    /// clears it) before the immediate render call. Render errors propagate.
    pub fn on_layout_change<S, R>(
        &self,
        stage: &mut Stage<S, R>,
        observed: LayoutSize,
        now_ms: f64,
    ) -> anyhow::Result<LayoutOutcome>
    where
        S: RenderSurface,
        R: RenderRoutine<S>,
    {
        let viewport = self.resolve(observed);
        if !viewport.is_valid() {
            // Hidden or collapsed region: keep the last good resolution.
            log::trace!(
                "ignoring degenerate layout {}x{} (render {}x{})",
                observed.width,
                observed.height,
                viewport.width,
                viewport.height
            );
            return Ok(LayoutOutcome::Ignored);
        }

        let surface = stage.apply_viewport(viewport);
        log::debug!(
            "layout {}x{} -> render {}x{} (surface {}x{}, downscale {})",
            observed.width,
            observed.height,
            viewport.width,
            viewport.height,
            surface.width,
            surface.height,
            self.factor.get()
        );

        stage.render(now_ms)?;
        Ok(LayoutOutcome::Applied { viewport, surface })
    }

    /// Applies every observation of a batch in order.
    ///
    /// Each entry renders on its own; the last applied entry wins. Returns the
    /// number of applied entries. A render error stops the batch.
    pub fn on_layout_batch<S, R, I>(
        &self,
        stage: &mut Stage<S, R>,
        batch: I,
        now_ms: f64,
    ) -> anyhow::Result<usize>
    where
        S: RenderSurface,
        R: RenderRoutine<S>,
        I: IntoIterator<Item = LayoutSize>,
    {
        let mut applied = 0;
        for observed in batch {
            if let LayoutOutcome::Applied { .. } = self.on_layout_change(stage, observed, now_ms)? {
                applied += 1;
            }
        }
        Ok(applied)
    }
}
