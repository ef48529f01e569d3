//! Browser bridge for pulse-engine.
//!
//! `ResizeObserver` is the layout observation source, `requestAnimationFrame`
//! the frame-timing source, a `<canvas>` 2D context the render surface, and a
//! JS function `render(ctx, width, height, timestampMs)` the render routine.
//!
//! ```js
//! import init, { launch } from "./pkg/pulse_web.js";
//! await init();
//! const host = await launch("canvas", import("./renderer.js"), 3);
//! ```

mod options;

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod frames;
#[cfg(target_arch = "wasm32")]
mod launch;
#[cfg(target_arch = "wasm32")]
mod logging;
#[cfg(target_arch = "wasm32")]
mod routine;

pub use options::downscale_from_js;

#[cfg(target_arch = "wasm32")]
pub use launch::{launch, WebHost};
