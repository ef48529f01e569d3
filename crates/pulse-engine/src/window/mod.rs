//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window. The window's inner size is the
//! observed layout region, redraw requests are the frame-timing source, and
//! the GPU layer presents whatever the render routine painted.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
