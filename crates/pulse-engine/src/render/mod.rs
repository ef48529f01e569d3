//! The external render entry point.
//!
//! The host treats rendering as opaque: one call paints one frame for a
//! surface, a resolution and a timestamp. What gets painted is not the host's
//! concern.

mod routine;

pub use routine::RenderRoutine;
