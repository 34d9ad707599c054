use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::control::HostSurfaceControl;
use crate::coords::LogicalSize;
use crate::engine::Engine;
use crate::host::{FrameDispatcher, FrameSubscription, Host, NativeHandle};

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "embedview".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point: hosts one engine in one winit window until it is closed.
pub struct Runtime;

impl Runtime {
    /// Runs the event loop on the calling thread.
    ///
    /// `factory` builds a fresh engine for every attach cycle. Errors
    /// propagated by the control (failed initialization, engine failures)
    /// stop the loop and are returned.
    pub fn run<E, F>(config: RuntimeConfig, factory: F) -> Result<()>
    where
        E: Engine + 'static,
        F: FnMut() -> E + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = HostState::new(config, HostSurfaceControl::new(factory));

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// A winit window acting as the control's host.
///
/// Frames are composed on `RedrawRequested`; the window's scale factor is
/// the DPI scale.
pub struct WindowHost {
    window: Window,
    frames: FrameDispatcher,
}

impl WindowHost {
    fn new(window: Window) -> Self {
        Self {
            window,
            frames: FrameDispatcher::new(),
        }
    }

    fn logical_size(&self) -> LogicalSize {
        let size = self
            .window
            .inner_size()
            .to_logical::<f64>(self.window.scale_factor());
        LogicalSize::new(size.width, size.height)
    }
}

impl Host for WindowHost {
    fn subscribe_frames(&mut self) -> FrameSubscription {
        let sub = self.frames.subscribe();
        self.window.request_redraw();
        sub
    }

    fn unsubscribe_frames(&mut self, subscription: FrameSubscription) {
        self.frames.unsubscribe(subscription);
    }

    fn dpi_scale(&self) -> Option<f64> {
        Some(self.window.scale_factor())
    }
}

struct HostState<E, F> {
    // Declared before `host`: on drop the engine goes before the window.
    control: HostSurfaceControl<E, F>,
    host: Option<WindowHost>,
    config: RuntimeConfig,
    failure: Option<anyhow::Error>,
}

impl<E, F> HostState<E, F>
where
    E: Engine + 'static,
    F: FnMut() -> E + 'static,
{
    fn new(config: RuntimeConfig, control: HostSurfaceControl<E, F>) -> Self {
        Self {
            control,
            host: None,
            config,
            failure: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let size = self.config.initial_size;
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(size.width, size.height));

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        self.host = Some(WindowHost::new(window));
        Ok(())
    }

    fn attach(&mut self) -> Result<()> {
        let Some(host) = self.host.as_mut() else {
            return Ok(());
        };

        let handle = NativeHandle::from_window(&host.window)
            .context("window exposes no native handle")?;
        self.control.on_attach(host, handle)?;

        // The host reports its current size right after attach.
        let size = host.logical_size();
        self.control.on_resize(&*host, size)
    }

    fn detach(&mut self) {
        if let Some(host) = self.host.as_mut() {
            self.control.on_detach(host);
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.detach();
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        event_loop.exit();
    }

    fn on_window_event(&mut self, event_loop: &ActiveEventLoop, event: &WindowEvent) -> Result<()> {
        let Some(host) = self.host.as_mut() else {
            return Ok(());
        };

        match event {
            WindowEvent::CloseRequested => {
                self.control.on_detach(host);
                self.host = None;
                event_loop.exit();
            }

            WindowEvent::Resized(_) => {
                let size = host.logical_size();
                self.control.on_resize(&*host, size)?;
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                self.control.on_dpi_changed(&*host)?;
            }

            WindowEvent::RedrawRequested => {
                if host.frames.delivers_to(self.control.subscription()) {
                    host.window.pre_present_notify();
                    self.control.on_frame_notification()?;
                }
            }

            _ => {}
        }

        Ok(())
    }
}

impl<E, F> ApplicationHandler for HostState<E, F>
where
    E: Engine + 'static,
    F: FnMut() -> E + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.host.is_none() {
            if let Err(err) = self.create_window(event_loop) {
                self.fail(event_loop, err);
                return;
            }
        }

        if !self.control.is_attached() {
            if let Err(err) = self.attach() {
                self.fail(event_loop, err);
            }
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        // Some platforms (Android) destroy the native surface while suspended.
        self.detach();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous composition while a subscriber exists.
        if let Some(host) = self.host.as_ref() {
            if host.frames.has_subscribers() {
                host.window.request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.host.as_ref().is_none_or(|h| h.window.id() != window_id) {
            return;
        }

        if let Err(err) = self.on_window_event(event_loop, &event) {
            self.fail(event_loop, err);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.detach();
    }
}
