//! Size types shared by the tracker, the scheduler and the surfaces.
//!
//! Two spaces are involved:
//! - layout space: fractional content-box sizes reported by the host
//! - surface space: whole backing pixels of a drawing surface
//!
//! `ViewportState` sits between them and keeps the exact fractional value.

mod size;
mod viewport;

pub use size::{LayoutSize, SurfaceSize};
pub use viewport::ViewportState;
