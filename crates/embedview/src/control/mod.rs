//! Host surface control.
//!
//! Coordinates three clocks it does not own: the host window lifetime, the
//! host frame signal and the engine's initialize/resize/render/teardown
//! sequence. All hooks arrive on the host thread through `&mut self`.

mod gate;
mod surface;

pub use surface::HostSurfaceControl;
