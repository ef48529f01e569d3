//! Native presenter.
//!
//! Binds a `wgpu` swapchain to the window and shows the CPU `PixelSurface`
//! on it: the pixels are uploaded to a texture each frame and stretched over
//! the whole swapchain image, the way a browser scales a small canvas up to
//! its layout box.

mod blit;
mod gpu;
mod init;

pub use gpu::{Gpu, PresentError};
pub use init::GpuInit;
