use raw_window_handle::{
    HandleError, HasDisplayHandle, HasWindowHandle, RawDisplayHandle, RawWindowHandle,
};

/// Native window + display handle pair supplied by the host at attach time.
///
/// The handles are plain values; they do not keep the native window alive.
/// The host guarantees validity from attach until detach begins, and the
/// control only hands them to an engine inside that interval.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct NativeHandle {
    window: RawWindowHandle,
    display: RawDisplayHandle,
}

impl NativeHandle {
    pub const fn new(window: RawWindowHandle, display: RawDisplayHandle) -> Self {
        Self { window, display }
    }

    /// Captures the raw handles of a live window.
    pub fn from_window<W>(window: &W) -> Result<Self, HandleError>
    where
        W: HasWindowHandle + HasDisplayHandle + ?Sized,
    {
        Ok(Self {
            window: window.window_handle()?.as_raw(),
            display: window.display_handle()?.as_raw(),
        })
    }

    #[inline]
    pub fn raw_window(&self) -> RawWindowHandle {
        self.window
    }

    #[inline]
    pub fn raw_display(&self) -> RawDisplayHandle {
        self.display
    }
}
