//! Embeds a native rendering engine in a host window and drives it from the
//! host's frame signal.
//!
//! [`control::HostSurfaceControl`] is the core: it owns an [`engine::Engine`],
//! subscribes to frames through a [`host::Host`], and never lets a render or
//! resize reach the engine outside the window's valid lifetime.
//! [`device::WgpuEngine`] and [`window::Runtime`] are ready-made engine and
//! host implementations.

pub mod control;
pub mod coords;
pub mod device;
pub mod engine;
pub mod host;
pub mod time;
pub mod window;

pub mod logging;
