//! Frame loop.
//!
//! One tick per display refresh. Each tick re-requests the next one before it
//! renders, so a failing render costs a frame, never the loop.

mod frame_source;
mod scheduler;

pub use frame_source::FrameSource;
pub use scheduler::{FrameScheduler, FrameStats, LoopState, SchedulerPhase, TickOutcome};
