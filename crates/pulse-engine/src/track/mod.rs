//! Viewport tracking.
//!
//! Turns layout observations into a render resolution, keeps the surface
//! backing size in step with it, and issues the resize-triggered render.

mod tracker;

pub use tracker::{LayoutOutcome, ViewportTracker};
