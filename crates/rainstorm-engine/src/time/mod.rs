//! Time subsystem.
//!
//! Frame timing utilities decoupled from the platform so they can be driven
//! by a simulated clock:
//! - `FrameClock::tick_at` once per frame yields the frame's `FrameTime`
//! - `FpsCounter::record` produces a frame rate at most once per second

mod fps;
mod frame_clock;

pub use fps::{format_significant, fps_title, FpsCounter};
pub use frame_clock::{FrameClock, FrameTime};
