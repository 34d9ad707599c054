/// Configuration for [`super::WgpuEngine`].
///
/// Everything here is read once, when the engine is initialized against a
/// native window.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when the surface offers one.
    pub prefer_srgb: bool,

    /// Swap behavior. FIFO is available everywhere and paces presentation to
    /// the display, which matches a host-driven frame signal.
    pub present_mode: wgpu::PresentMode,

    /// Requested alpha mode. Falls back to the first supported mode.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub power_preference: wgpu::PowerPreference,

    pub required_features: wgpu::Features,

    pub required_limits: wgpu::Limits,

    /// Hint only; support depends on platform and backend.
    pub desired_maximum_frame_latency: u32,

    /// Base color the back buffer is cleared to.
    pub clear_color: wgpu::Color,

    /// Pulse the clear color over time so presented frames are visible.
    pub animate: bool,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            power_preference: wgpu::PowerPreference::HighPerformance,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
            clear_color: wgpu::Color {
                r: 0.032,
                g: 0.032,
                b: 0.032,
                a: 1.0,
            },
            animate: true,
        }
    }
}
