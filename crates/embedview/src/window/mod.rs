//! winit host.
//!
//! Owns the winit `EventLoop` and window and plays the host role for one
//! [`crate::control::HostSurfaceControl`].

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, WindowHost};
