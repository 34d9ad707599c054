//! Frame timing.
//!
//! Engines tick one `FrameClock` per rendered frame; the host signal decides
//! when that happens, the clock only measures it.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
