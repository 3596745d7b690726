//! Time subsystem.
//!
//! Provides frame timing without coupling to a window runtime.
//! Intended usage:
//! - one `FrameClock` per UI loop
//! - call `tick()` once per frame (or `tick_at()` when driving simulated time)
//!   and pass `FrameTime::now` to the widget layer

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
