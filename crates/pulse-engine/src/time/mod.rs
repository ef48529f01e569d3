//! Time subsystem.
//!
//! Native hosts have no `performance.now()`; `FrameClock` supplies the same
//! thing: a monotonic millisecond timestamp measured from clock creation.
//! Intended usage:
//! - one `FrameClock` per window
//! - `now_ms()` for resize-triggered renders
//! - `tick()` once per refresh callback

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
