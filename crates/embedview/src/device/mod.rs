//! wgpu-backed engine.
//!
//! This module is responsible for:
//! - creating the wgpu instance, adapter, device and queue from a native handle
//! - configuring the surface (swapchain) on resize
//! - acquiring, clearing and presenting one back buffer per render call

mod engine;
mod error;
mod init;
mod surface;

pub use engine::WgpuEngine;
pub use error::SurfaceErrorAction;
pub use init::GpuInit;
