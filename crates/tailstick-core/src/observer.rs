//! Push-based fan-out of the live scroll position.

/// Handle returned by `subscribe`; pass back to `unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback invoked with the latest scroll offset.
pub type ScrollObserver = Box<dyn FnMut(f64)>;

/// Registry of scroll-position observers.
///
/// Observers are invoked in registration order; removal is idempotent.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<(SubscriptionId, ScrollObserver)>,
    next_id: u64,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: ScrollObserver) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Remove an observer; unknown or already-removed ids are a no-op.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.observers.retain(|(observer_id, _)| *observer_id != id);
    }

    /// Invoke every observer in registration order.
    pub fn notify(&mut self, scroll_top: f64) {
        for (_, observer) in &mut self.observers {
            observer(scroll_top);
        }
    }

    /// Invoke a single observer (replay-on-subscribe).
    pub fn notify_one(&mut self, id: SubscriptionId, scroll_top: f64) {
        if let Some((_, observer)) = self
            .observers
            .iter_mut()
            .find(|(observer_id, _)| *observer_id == id)
        {
            observer(scroll_top);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
