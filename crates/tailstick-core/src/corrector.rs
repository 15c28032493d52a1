//! Periodic drift check, independent of scroll events.

use std::time::{Duration, Instant};

/// Outcome of one corrector check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectorVerdict {
    /// Nothing to do this check.
    Hold,
    /// Sticky drift persisted past the dwell threshold; issue a re-stick.
    Correct,
    /// Container no longer overflows; stickiness returns to the default.
    ForceSticky,
}

/// Recurring check that catches "sticky but not at end" drift and shrunken
/// containers, regardless of whether any scroll event fired.
///
/// The dwell threshold filters the two-step "set offset, then notify"
/// sequence some hosts produce mid-gesture: drift must persist across two
/// consecutive checks spanning the threshold before a correction fires.
/// This is a tuning heuristic, not a correctness bound.
#[derive(Debug, Clone)]
pub struct PeriodicCorrector {
    interval: Duration,
    decision_delay: Duration,
    next_due: Option<Instant>,
    not_at_end_since: Option<Instant>,
}

impl PeriodicCorrector {
    pub fn new(interval: Duration, decision_delay: Duration) -> Self {
        Self {
            interval,
            decision_delay,
            next_due: None,
            not_at_end_since: None,
        }
    }

    /// Start the schedule; the first check is due immediately.
    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now);
        self.not_at_end_since = None;
    }

    /// Stop the schedule and clear the dwell timer.
    pub fn disarm(&mut self) {
        self.next_due = None;
        self.not_at_end_since = None;
    }

    /// True when armed and a check is due; consumes the slot and schedules
    /// the next one.
    pub fn due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Evaluate one check against the engine's current condition.
    pub fn assess(
        &mut self,
        now: Instant,
        sticky: bool,
        at_end: bool,
        animating: bool,
        fits: bool,
    ) -> CorrectorVerdict {
        if sticky {
            if at_end {
                self.not_at_end_since = None;
                return CorrectorVerdict::Hold;
            }
            match self.not_at_end_since {
                None => {
                    self.not_at_end_since = Some(now);
                    CorrectorVerdict::Hold
                }
                Some(since) if now.saturating_duration_since(since) > self.decision_delay => {
                    self.not_at_end_since = None;
                    if animating {
                        // An in-flight animation is already heading there;
                        // correcting now would fight it.
                        CorrectorVerdict::Hold
                    } else {
                        CorrectorVerdict::Correct
                    }
                }
                Some(_) => CorrectorVerdict::Hold,
            }
        } else if fits {
            CorrectorVerdict::ForceSticky
        } else {
            CorrectorVerdict::Hold
        }
    }
}
