/// Frame-timing source: a monotonic clock plus one-shot refresh callbacks.
///
/// Native hosts back this with `Window::request_redraw`, browsers with
/// `requestAnimationFrame`. Tests drive it by hand.
pub trait FrameSource {
    /// Current high-resolution timestamp in milliseconds.
    fn now_ms(&self) -> f64;

    /// Requests exactly one future tick.
    fn request_frame(&mut self) -> anyhow::Result<()>;
}
