/// Decides whether a frame notification may reach the engine.
///
/// Open only between a successful engine initialization and the start of
/// detach. A plain `bool` suffices: every read and write happens through the
/// owning control's `&mut self` on the host thread.
#[derive(Debug, Default)]
pub(crate) struct RenderGate {
    open: bool,
}

impl RenderGate {
    #[inline]
    pub(crate) fn open(&mut self) {
        self.open = true;
    }

    #[inline]
    pub(crate) fn close(&mut self) {
        self.open = false;
    }

    #[inline]
    pub(crate) fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        assert!(!RenderGate::default().is_open());
    }

    #[test]
    fn open_then_close() {
        let mut gate = RenderGate::default();
        gate.open();
        assert!(gate.is_open());
        gate.close();
        assert!(!gate.is_open());
    }
}
