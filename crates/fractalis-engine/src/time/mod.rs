//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `FrameClock` per window
//! - call `tick()` once per presented frame to obtain `FrameTime`
//! - feed `FrameTime` to `FrameStats` for periodic frame-rate logging

mod frame_clock;
mod frame_stats;

pub use frame_clock::{FrameClock, FrameTime};
pub use frame_stats::FrameStats;
