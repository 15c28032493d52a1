//! Debounce filter for raw scroll notifications.

use std::time::{Duration, Instant};

/// A scroll notification admitted by the filter.
///
/// `timestamp` is the coarse arrival time of the raw notification, not the
/// time it was admitted. Trailing-edge delivery keeps the raw stamp so the
/// engine's ignore window can reject artifacts of an already-completed
/// programmatic scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSample {
    pub timestamp: Instant,
}

/// Coalesces raw scroll notifications at the debounce interval.
///
/// A notification arriving at least one interval after the last admitted one
/// passes through immediately (leading edge). Anything denser is stashed —
/// latest stamp wins — and released by `poll` once the interval has elapsed
/// (trailing edge).
#[derive(Debug, Clone)]
pub struct ScrollEventFilter {
    debounce: Duration,
    last_admitted: Option<Instant>,
    pending: Option<Instant>,
}

impl ScrollEventFilter {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            last_admitted: None,
            pending: None,
        }
    }

    /// Feed a raw notification; returns the sample if admitted immediately.
    pub fn notify(&mut self, now: Instant) -> Option<ScrollSample> {
        match self.last_admitted {
            Some(last) if now.saturating_duration_since(last) < self.debounce => {
                self.pending = Some(now);
                None
            }
            _ => {
                self.last_admitted = Some(now);
                self.pending = None;
                Some(ScrollSample { timestamp: now })
            }
        }
    }

    /// Release a stashed notification once the debounce interval has passed.
    ///
    /// Call once per host tick. The released sample still carries the raw
    /// notification's timestamp.
    pub fn poll(&mut self, now: Instant) -> Option<ScrollSample> {
        let timestamp = self.pending?;
        let due = self
            .last_admitted
            .map_or(true, |last| now.saturating_duration_since(last) >= self.debounce);
        if !due {
            return None;
        }
        self.pending = None;
        self.last_admitted = Some(now);
        Some(ScrollSample { timestamp })
    }

    /// True when a stashed notification is waiting for release.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop all stashed state (on attach/detach).
    pub fn reset(&mut self) {
        self.last_admitted = None;
        self.pending = None;
    }
}
