//! Engine contract.
//!
//! An engine is the opaque native renderer a control drives. The control owns
//! it exclusively and guarantees the call order:
//! - `initialize` exactly once, before anything else
//! - `resize` and `render` any number of times, never concurrently
//! - no calls at all once teardown has begun
//!
//! Teardown is `Drop`. An engine is dropped by its control after the frame
//! subscription is gone, so no further call can reach it.

use anyhow::Result;

use crate::coords::PhysicalSize;
use crate::host::NativeHandle;

/// Four-call contract between a control and a native renderer.
pub trait Engine {
    /// Binds the engine to a native window.
    ///
    /// `handle` stays valid until this engine is dropped. Calling this twice
    /// is a contract violation; implementations should return an error.
    fn initialize(&mut self, handle: &NativeHandle) -> Result<()>;

    /// Resizes the render target. Takes effect before the next `render`.
    ///
    /// `size` is never empty.
    fn resize(&mut self, size: PhysicalSize) -> Result<()>;

    /// Draws and presents exactly one frame into the current render target.
    fn render(&mut self) -> Result<()>;
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn initialize(&mut self, handle: &NativeHandle) -> Result<()> {
        (**self).initialize(handle)
    }

    fn resize(&mut self, size: PhysicalSize) -> Result<()> {
        (**self).resize(size)
    }

    fn render(&mut self) -> Result<()> {
        (**self).render()
    }
}
