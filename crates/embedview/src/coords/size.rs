/// Size in logical (DPI-independent) units, as reported by the host layout.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LogicalSize {
    pub width: f64,
    pub height: f64,
}

impl LogicalSize {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Converts to physical pixels using `scale`.
    ///
    /// Each axis is rounded to the nearest pixel. Returns `None` when either
    /// rounded dimension is zero, negative, non-finite or does not fit in `u32`;
    /// such sizes are never forwarded to an engine.
    pub fn to_physical(self, scale: DpiScale) -> Option<PhysicalSize> {
        let width = to_pixels(self.width * scale.get())?;
        let height = to_pixels(self.height * scale.get())?;
        Some(PhysicalSize { width, height })
    }
}

/// Render-target size in physical pixels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl PhysicalSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Ratio between logical units and physical pixels.
///
/// Always finite and strictly positive. Hosts report the scale as an
/// `Option<f64>`; absent, zero, negative and non-finite reports do not
/// produce a `DpiScale`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DpiScale(f64);

impl DpiScale {
    pub const IDENTITY: Self = Self(1.0);

    pub fn new(scale: f64) -> Option<Self> {
        (scale.is_finite() && scale > 0.0).then_some(Self(scale))
    }

    /// Validates a host report.
    pub fn from_host(reported: Option<f64>) -> Option<Self> {
        reported.and_then(Self::new)
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

fn to_pixels(value: f64) -> Option<u32> {
    let rounded = value.round();
    if !rounded.is_finite() || rounded < 1.0 || rounded > f64::from(u32::MAX) {
        return None;
    }
    Some(rounded as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(s: f64) -> DpiScale {
        DpiScale::new(s).unwrap()
    }

    // ── DpiScale ──────────────────────────────────────────────────────────

    #[test]
    fn dpi_scale_rejects_degenerate_reports() {
        assert!(DpiScale::from_host(None).is_none());
        assert!(DpiScale::from_host(Some(0.0)).is_none());
        assert!(DpiScale::from_host(Some(-1.5)).is_none());
        assert!(DpiScale::from_host(Some(f64::NAN)).is_none());
        assert!(DpiScale::from_host(Some(f64::INFINITY)).is_none());
    }

    #[test]
    fn dpi_scale_accepts_positive() {
        assert_eq!(DpiScale::from_host(Some(1.25)).map(DpiScale::get), Some(1.25));
    }

    // ── to_physical ───────────────────────────────────────────────────────

    #[test]
    fn identity_scale_keeps_size() {
        let p = LogicalSize::new(800.0, 600.0).to_physical(DpiScale::IDENTITY);
        assert_eq!(p, Some(PhysicalSize::new(800, 600)));
    }

    #[test]
    fn fractional_scale_rounds_to_nearest() {
        // 333 * 1.5 = 499.5 rounds up; 101 * 1.5 = 151.5 rounds up.
        let p = LogicalSize::new(333.0, 101.0).to_physical(scale(1.5));
        assert_eq!(p, Some(PhysicalSize::new(500, 152)));

        // 100.2 * 1.25 = 125.25 rounds down.
        let p = LogicalSize::new(100.2, 10.0).to_physical(scale(1.25));
        assert_eq!(p, Some(PhysicalSize::new(125, 13)));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(LogicalSize::new(0.0, 600.0).to_physical(scale(2.0)).is_none());
        assert!(LogicalSize::new(800.0, 0.2).to_physical(scale(1.0)).is_none());
    }

    #[test]
    fn negative_dimension_is_rejected() {
        assert!(LogicalSize::new(-10.0, 600.0).to_physical(scale(1.0)).is_none());
    }

    #[test]
    fn overflowing_dimension_is_rejected() {
        assert!(LogicalSize::new(1e12, 10.0).to_physical(scale(1.0)).is_none());
    }

    #[test]
    fn physical_is_empty() {
        assert!(PhysicalSize::new(0, 10).is_empty());
        assert!(!PhysicalSize::new(1, 1).is_empty());
    }
}
