//! Host boundary.
//!
//! A host is whatever owns the native window and the composition clock: a
//! winit event loop (see [`crate::window`]), a GUI toolkit, a plugin host.
//! The control talks to it only through [`Host`], during its lifecycle hooks.

mod frames;
mod handle;

pub use frames::{FrameDispatcher, FrameSubscription};
pub use handle::NativeHandle;

/// Services a host offers to an embedded control.
///
/// All methods are called on the host's own thread from inside a lifecycle
/// hook. `unsubscribe_frames` must take effect before it returns.
pub trait Host {
    /// Registers for per-frame notifications.
    fn subscribe_frames(&mut self) -> FrameSubscription;

    /// Deregisters a subscription obtained from `subscribe_frames`.
    fn unsubscribe_frames(&mut self, subscription: FrameSubscription);

    /// Current DPI scale of the surface the control is presented on.
    ///
    /// `None` (or a non-positive value) when the control is not associated with
    /// a renderable surface.
    fn dpi_scale(&self) -> Option<f64>;
}
