//! Render surfaces.
//!
//! A surface is the drawing target handed to the render routine on every
//! call. Its backing size follows the viewport; resizing is destructive.

mod pixel;

pub use pixel::{PixelSurface, Rgba8};

use crate::coords::SurfaceSize;

/// Drawing target owned by the host.
pub trait RenderSurface {
    /// Current backing pixel dimensions.
    fn size(&self) -> SurfaceSize;

    /// Changes the backing pixel dimensions.
    ///
    /// Previously drawn content is discarded, even when `size` equals the
    /// current size.
    fn resize(&mut self, size: SurfaceSize);
}
