/// Render entry point invoked by the tracker and the frame loop.
///
/// `width`/`height` are the exact viewport resolution and may be fractional;
/// the surface backing size is the truncated value. Implementations must
/// tolerate being called at arbitrary frequency. Errors are not caught by the
/// host and propagate out of the callback that issued the call.
pub trait RenderRoutine<S: ?Sized> {
    fn render(&mut self, surface: &mut S, width: f64, height: f64, timestamp_ms: f64)
        -> anyhow::Result<()>;
}

impl<S, F> RenderRoutine<S> for F
where
    S: ?Sized,
    F: FnMut(&mut S, f64, f64, f64) -> anyhow::Result<()>,
{
    #[inline]
    fn render(&mut self, surface: &mut S, width: f64, height: f64, timestamp_ms: f64)
        -> anyhow::Result<()> {
        self(surface, width, height, timestamp_ms)
    }
}
