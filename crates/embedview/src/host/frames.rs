/// Token identifying one frame-notification subscription.
///
/// Returned by [`super::Host::subscribe_frames`] and handed back to
/// [`super::Host::unsubscribe_frames`] to deregister.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FrameSubscription(u64);

impl FrameSubscription {
    #[inline]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Host-side registry of frame-notification subscribers.
///
/// Hosts embed one of these and consult it before delivering a frame.
/// Removal is immediate: once `unsubscribe` returns, `is_subscribed` is false
/// and the next delivery skips the token.
#[derive(Debug, Default)]
pub struct FrameDispatcher {
    next_id: u64,
    active: Vec<FrameSubscription>,
}

impl FrameDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> FrameSubscription {
        let sub = FrameSubscription(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.active.push(sub);
        sub
    }

    /// Returns `false` if the token was not registered.
    pub fn unsubscribe(&mut self, sub: FrameSubscription) -> bool {
        let before = self.active.len();
        self.active.retain(|s| *s != sub);
        self.active.len() != before
    }

    pub fn is_subscribed(&self, sub: FrameSubscription) -> bool {
        self.active.contains(&sub)
    }

    /// Whether a frame composed now should reach the holder of `subscription`.
    pub fn delivers_to(&self, subscription: Option<FrameSubscription>) -> bool {
        subscription.is_some_and(|s| self.is_subscribed(s))
    }

    pub fn has_subscribers(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_issues_distinct_tokens() {
        let mut d = FrameDispatcher::new();
        let a = d.subscribe();
        let b = d.subscribe();
        assert_ne!(a, b);
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn unsubscribe_removes_only_that_token() {
        let mut d = FrameDispatcher::new();
        let a = d.subscribe();
        let b = d.subscribe();

        assert!(d.unsubscribe(a));
        assert!(!d.is_subscribed(a));
        assert!(d.is_subscribed(b));
        assert!(d.has_subscribers());
    }

    #[test]
    fn unsubscribe_twice_reports_missing() {
        let mut d = FrameDispatcher::new();
        let a = d.subscribe();
        assert!(d.unsubscribe(a));
        assert!(!d.unsubscribe(a));
        assert!(d.is_empty());
    }

    #[test]
    fn tokens_are_not_reused_after_removal() {
        let mut d = FrameDispatcher::new();
        let a = d.subscribe();
        d.unsubscribe(a);
        let b = d.subscribe();
        assert_ne!(a, b);
        assert!(!d.is_subscribed(a));
    }

    #[test]
    fn delivers_only_to_live_subscriptions() {
        let mut d = FrameDispatcher::new();
        let a = d.subscribe();
        let b = d.subscribe();

        assert!(d.delivers_to(Some(a)));
        d.unsubscribe(a);
        assert!(!d.delivers_to(Some(a)));
        assert!(d.delivers_to(Some(b)));
    }

    #[test]
    fn no_subscription_gets_no_frames() {
        let mut d = FrameDispatcher::new();
        d.subscribe();
        assert!(!d.delivers_to(None));
    }
}
