use raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle,
};

use crate::coords::PhysicalSize;
use crate::host::NativeHandle;

/// Borrowed view of a [`NativeHandle`] that wgpu can create a surface from.
pub(crate) struct SurfaceTarget<'a>(pub(crate) &'a NativeHandle);

impl HasWindowHandle for SurfaceTarget<'_> {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        // SAFETY: the host keeps the native window alive until the owning
        // control detaches, and detach drops the engine (and its surface) first.
        Ok(unsafe { WindowHandle::borrow_raw(self.0.raw_window()) })
    }
}

impl HasDisplayHandle for SurfaceTarget<'_> {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        // SAFETY: as above; the display connection outlives every window on it.
        Ok(unsafe { DisplayHandle::borrow_raw(self.0.raw_display()) })
    }
}

pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        if let Some(f) = preferred.into_iter().find(|f| formats.contains(f)) {
            return Some(f);
        }
    }

    formats.first().copied()
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Rejects sizes the device cannot back with a 2D texture.
///
/// wgpu reports an oversized `configure` through the uncaptured-error
/// handler, which panics by default.
pub(crate) fn check_surface_size(size: PhysicalSize, max_dimension: u32) -> anyhow::Result<()> {
    anyhow::ensure!(
        size.width <= max_dimension && size.height <= max_dimension,
        "surface size {}x{} exceeds the device limit of {max_dimension} px per side",
        size.width,
        size.height,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, TextureFormat};

    // ── choose_surface_format ─────────────────────────────────────────────

    #[test]
    fn srgb_preferred_when_available() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Rgba8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats, true),
            Some(TextureFormat::Rgba8UnormSrgb)
        );
    }

    #[test]
    fn first_format_without_srgb_preference() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Rgba8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats, false),
            Some(TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn no_formats_no_choice() {
        assert_eq!(choose_surface_format(&[], true), None);
    }

    // ── choose_alpha_mode ─────────────────────────────────────────────────

    #[test]
    fn supported_request_is_honored() {
        let modes = [CompositeAlphaMode::Opaque, CompositeAlphaMode::PreMultiplied];
        assert_eq!(
            choose_alpha_mode(&modes, Some(CompositeAlphaMode::PreMultiplied)),
            CompositeAlphaMode::PreMultiplied
        );
    }

    #[test]
    fn unsupported_request_falls_back_to_first() {
        let modes = [CompositeAlphaMode::Opaque];
        assert_eq!(
            choose_alpha_mode(&modes, Some(CompositeAlphaMode::PostMultiplied)),
            CompositeAlphaMode::Opaque
        );
    }

    #[test]
    fn empty_support_is_auto() {
        assert_eq!(choose_alpha_mode(&[], None), CompositeAlphaMode::Auto);
    }

    // ── check_surface_size ────────────────────────────────────────────────

    #[test]
    fn size_at_limit_is_accepted() {
        assert!(check_surface_size(PhysicalSize::new(8192, 8192), 8192).is_ok());
        assert!(check_surface_size(PhysicalSize::new(1, 1), 8192).is_ok());
    }

    #[test]
    fn wide_size_is_rejected() {
        let err = check_surface_size(PhysicalSize::new(12000, 2000), 8192).unwrap_err();
        assert!(err.to_string().contains("12000x2000"));
    }

    #[test]
    fn tall_size_is_rejected() {
        assert!(check_surface_size(PhysicalSize::new(2, u32::MAX), 8192).is_err());
        assert!(check_surface_size(PhysicalSize::new(u32::MAX, 2), 8192).is_err());
    }
}
