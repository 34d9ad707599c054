use anyhow::{Context, Result};

use crate::coords::PhysicalSize;
use crate::engine::Engine;
use crate::host::NativeHandle;
use crate::time::{FrameClock, FrameTime};

use super::surface::{check_surface_size, choose_alpha_mode, choose_surface_format, SurfaceTarget};
use super::{GpuInit, SurfaceErrorAction};

/// Seconds per clear-color pulse.
const PULSE_PERIOD: f64 = 4.0;

/// [`Engine`] backed by wgpu.
///
/// Construction is cheap and touches no GPU state; everything is created in
/// `initialize`. The surface stays unconfigured until the first resize, and
/// frames rendered before that are skipped.
pub struct WgpuEngine {
    init: GpuInit,
    clock: FrameClock,
    gpu: Option<GpuState>,
}

/// GPU objects bound to one native window.
struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    configured: bool,
}

impl WgpuEngine {
    pub fn new(init: GpuInit) -> Self {
        Self {
            init,
            clock: FrameClock::new(),
            gpu: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.gpu.is_some()
    }

    /// Current render-target size, once a resize has configured the surface.
    pub fn size(&self) -> Option<PhysicalSize> {
        self.gpu
            .as_ref()
            .filter(|gpu| gpu.configured)
            .map(|gpu| PhysicalSize::new(gpu.config.width, gpu.config.height))
    }

    /// Frames rendered since initialization, skipped ones included.
    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }
}

impl Default for WgpuEngine {
    fn default() -> Self {
        Self::new(GpuInit::default())
    }
}

impl Engine for WgpuEngine {
    fn initialize(&mut self, handle: &NativeHandle) -> Result<()> {
        anyhow::ensure!(self.gpu.is_none(), "wgpu engine is already initialized");

        self.gpu = Some(pollster::block_on(GpuState::new(handle, &self.init))?);
        self.clock.reset();
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize) -> Result<()> {
        let gpu = self.gpu.as_mut().context("resize before initialize")?;
        gpu.resize(size)
    }

    fn render(&mut self) -> Result<()> {
        let gpu = self.gpu.as_mut().context("render before initialize")?;
        let time = self.clock.tick();

        if !gpu.configured {
            log::trace!("frame {} skipped: surface not sized yet", time.frame_index);
            return Ok(());
        }

        let clear = if self.init.animate {
            pulse(self.init.clear_color, &time)
        } else {
            self.init.clear_color
        };
        gpu.draw(clear)
    }
}

impl GpuState {
    async fn new(handle: &NativeHandle, init: &GpuInit) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // SAFETY: see `SurfaceTarget`. The surface lives in this `GpuState`,
        // which is dropped with the engine before the host frees the window.
        let surface = unsafe {
            let target = wgpu::SurfaceTargetUnsafe::from_window(&SurfaceTarget(handle))
                .context("native handle rejected")?;
            instance.create_surface_unsafe(target)
        }
        .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let info = adapter.get_info();
        log::info!("using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("embedview device"),
                required_features: init.required_features,
                required_limits: init.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let format = choose_surface_format(&caps.formats, init.prefer_srgb)
            .context("surface reports no supported formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: 1,
            height: 1,
            present_mode: init.present_mode,
            alpha_mode: choose_alpha_mode(&caps.alpha_modes, init.alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        Ok(Self {
            surface,
            device,
            queue,
            config,
            configured: false,
        })
    }

    fn resize(&mut self, size: PhysicalSize) -> Result<()> {
        // wgpu rejects 0x0 configurations.
        if size.is_empty() {
            return Ok(());
        }
        check_surface_size(size, self.device.limits().max_texture_dimension_2d)?;

        self.config.width = size.width;
        self.config.height = size.height;
        self.surface.configure(&self.device, &self.config);
        self.configured = true;
        Ok(())
    }

    fn draw(&mut self, clear: wgpu::Color) -> Result<()> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(err) => {
                return match SurfaceErrorAction::from(&err) {
                    SurfaceErrorAction::Reconfigured => {
                        self.surface.configure(&self.device, &self.config);
                        Ok(())
                    }
                    SurfaceErrorAction::SkipFrame => {
                        log::debug!("frame skipped: {err}");
                        Ok(())
                    }
                    SurfaceErrorAction::Fatal => {
                        Err(anyhow::Error::new(err).context("failed to acquire back buffer"))
                    }
                };
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("embedview frame encoder"),
            });

        {
            let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("embedview clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        frame.present();
        Ok(())
    }
}

/// Brightens `base` along a cosine wave; equal to `base` at `elapsed == 0`.
fn pulse(base: wgpu::Color, time: &FrameTime) -> wgpu::Color {
    let phase = time.elapsed.as_secs_f64() * std::f64::consts::TAU / PULSE_PERIOD;
    let k = 0.5 - 0.5 * phase.cos();
    let lift = |c: f64| (c + (1.0 - c) * 0.2 * k).clamp(0.0, 1.0);

    wgpu::Color {
        r: lift(base.r),
        g: lift(base.g),
        b: lift(base.b),
        a: base.a,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(secs: f64) -> FrameTime {
        FrameTime {
            dt: 0.0,
            elapsed: Duration::from_secs_f64(secs),
            frame_index: 0,
        }
    }

    const BASE: wgpu::Color = wgpu::Color {
        r: 0.1,
        g: 0.2,
        b: 0.3,
        a: 0.9,
    };

    // ── pulse ─────────────────────────────────────────────────────────────

    #[test]
    fn pulse_starts_at_base() {
        assert_eq!(pulse(BASE, &at(0.0)), BASE);
    }

    #[test]
    fn pulse_peaks_at_half_period() {
        let c = pulse(BASE, &at(PULSE_PERIOD / 2.0));
        assert!((c.r - 0.28).abs() < 1e-9);
        assert!(c.g > BASE.g && c.b > BASE.b);
        assert_eq!(c.a, BASE.a);
    }

    #[test]
    fn pulse_stays_in_range() {
        let white = wgpu::Color::WHITE;
        for i in 0..16 {
            let c = pulse(white, &at(i as f64 * 0.37));
            assert!(c.r <= 1.0 && c.g <= 1.0 && c.b <= 1.0);
        }
    }

    // ── contract ──────────────────────────────────────────────────────────

    #[test]
    fn calls_before_initialize_are_errors() {
        let mut engine = WgpuEngine::default();
        assert!(engine.resize(PhysicalSize::new(10, 10)).is_err());
        assert!(engine.render().is_err());
        assert!(!engine.is_initialized());
        assert_eq!(engine.size(), None);
        assert_eq!(engine.frame_count(), 0);
    }
}
