/// Failures the host surfaces as errors.
///
/// Render-routine failures are not represented here; they pass through
/// untouched as whatever error the routine produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// Downscale factor was zero or not a positive integer.
    #[error("invalid downscale factor `{value}`: expected a positive integer")]
    InvalidDownscale { value: String },
    /// The drawing surface or its context could not be obtained.
    #[error("render surface unavailable: {reason}")]
    SurfaceUnavailable { reason: String },
    /// The async load phase of the render module failed.
    #[error("render module failed to load: {reason}")]
    ModuleLoad { reason: String },
    /// The frame-timing source refused to schedule the next tick.
    #[error("failed to request next frame: {reason}")]
    FrameRequest { reason: String },
}

impl HostError {
    pub fn surface_unavailable(reason: impl Into<String>) -> Self {
        Self::SurfaceUnavailable { reason: reason.into() }
    }

    pub fn frame_request(reason: impl Into<String>) -> Self {
        Self::FrameRequest { reason: reason.into() }
    }
}
