use anyhow::{Context, Result};

use crate::coords::{DpiScale, LogicalSize, PhysicalSize};
use crate::engine::Engine;
use crate::host::{FrameSubscription, Host, NativeHandle};

use super::gate::RenderGate;

/// Embeddable visual element that drives an [`Engine`] from host events.
///
/// The host calls the `on_*` hooks; the control never calls itself. Between
/// `on_attach` and `on_detach` the control owns exactly one initialized
/// engine and one frame subscription. Outside that interval it owns neither,
/// and no engine call can be made.
///
/// Engines are built on attach by `factory`, so one control can go through
/// several attach/detach cycles (e.g. suspend/resume on mobile) with a fresh
/// engine each time.
pub struct HostSurfaceControl<E, F> {
    factory: F,
    engine: Option<E>,
    gate: RenderGate,
    subscription: Option<FrameSubscription>,

    /// Last logical size seen while attached; re-scaled on DPI changes.
    last_logical: Option<LogicalSize>,

    /// Last size forwarded to the engine.
    last_physical: Option<PhysicalSize>,
}

impl<E, F> HostSurfaceControl<E, F>
where
    E: Engine,
    F: FnMut() -> E,
{
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            engine: None,
            gate: RenderGate::default(),
            subscription: None,
            last_logical: None,
            last_physical: None,
        }
    }

    /// Host created the native window.
    ///
    /// Builds and initializes the engine, opens the render gate and
    /// subscribes to frame notifications. If initialization fails the engine
    /// is released, the gate stays closed and the error is returned.
    pub fn on_attach<H>(&mut self, host: &mut H, handle: NativeHandle) -> Result<()>
    where
        H: Host + ?Sized,
    {
        anyhow::ensure!(self.engine.is_none(), "control is already attached");

        let mut engine = (self.factory)();
        engine
            .initialize(&handle)
            .context("engine initialization failed")?;

        self.engine = Some(engine);
        self.gate.open();
        self.subscription = Some(host.subscribe_frames());

        log::debug!("control attached to {:?}", handle.raw_window());
        Ok(())
    }

    /// Host is tearing the surface down.
    ///
    /// Closes the gate, unsubscribes, then releases the engine, in that order
    /// and before returning. A detached control ignores the call.
    pub fn on_detach<H>(&mut self, host: &mut H)
    where
        H: Host + ?Sized,
    {
        self.gate.close();

        if let Some(subscription) = self.subscription.take() {
            host.unsubscribe_frames(subscription);
        }

        if let Some(engine) = self.engine.take() {
            drop(engine);
            log::debug!("control detached, engine released");
        }

        self.last_logical = None;
        self.last_physical = None;
    }

    /// Host allocated a new logical area to the control.
    ///
    /// The DPI scale is queried from `host` on every call. A degenerate scale
    /// or size leaves the engine at its previous size.
    pub fn on_resize<H>(&mut self, host: &H, logical: LogicalSize) -> Result<()>
    where
        H: Host + ?Sized,
    {
        let Some(engine) = self.engine.as_mut() else {
            log::trace!("resize to {logical:?} ignored: control is not attached");
            return Ok(());
        };

        self.last_logical = Some(logical);
        if let Some(size) = forward_resize(engine, host.dpi_scale(), logical)? {
            self.last_physical = Some(size);
        }
        Ok(())
    }

    /// Host moved the control to a surface with a different DPI scale.
    ///
    /// Re-issues the last logical size under the new scale. Nothing happens
    /// if no logical size has been seen since attach.
    pub fn on_dpi_changed<H>(&mut self, host: &H) -> Result<()>
    where
        H: Host + ?Sized,
    {
        let (Some(engine), Some(logical)) = (self.engine.as_mut(), self.last_logical) else {
            return Ok(());
        };

        if let Some(size) = forward_resize(engine, host.dpi_scale(), logical)? {
            self.last_physical = Some(size);
        }
        Ok(())
    }

    /// Host composed a frame. Renders once if the gate is open.
    pub fn on_frame_notification(&mut self) -> Result<()> {
        if !self.gate.is_open() {
            log::trace!("frame notification dropped: rendering not permitted");
            return Ok(());
        }

        match self.engine.as_mut() {
            Some(engine) => engine.render().context("engine render failed"),
            None => Ok(()),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.engine.is_some()
    }

    pub fn rendering_permitted(&self) -> bool {
        self.gate.is_open()
    }

    pub fn subscription(&self) -> Option<FrameSubscription> {
        self.subscription
    }

    /// Last size forwarded to the engine during the current attach cycle.
    pub fn physical_size(&self) -> Option<PhysicalSize> {
        self.last_physical
    }

    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }
}

impl<E, F> Drop for HostSurfaceControl<E, F> {
    fn drop(&mut self) {
        self.gate.close();
        if self.engine.take().is_some() {
            log::warn!("control dropped while attached; engine released without detach");
        }
    }
}

fn forward_resize<E>(
    engine: &mut E,
    reported_scale: Option<f64>,
    logical: LogicalSize,
) -> Result<Option<PhysicalSize>>
where
    E: Engine + ?Sized,
{
    let Some(scale) = DpiScale::from_host(reported_scale) else {
        log::trace!("resize to {logical:?} dropped: no usable DPI scale ({reported_scale:?})");
        return Ok(None);
    };

    let Some(size) = logical.to_physical(scale) else {
        log::trace!("resize to {logical:?} dropped: degenerate physical size");
        return Ok(None);
    };

    engine
        .resize(size)
        .with_context(|| format!("engine resize to {}x{} failed", size.width, size.height))?;
    Ok(Some(size))
}
