//! Scroll animation controller.
//!
//! Drives a time-boxed eased interpolation toward a fixed offset or toward
//! the mode-relative end. An end target is re-resolved on every step, so an
//! in-flight animation keeps chasing a transcript that grows under it.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::easing::EasingType;
use crate::region::ScrollMetrics;
use crate::timing::{is_complete, lerp, progress};
use crate::view::{end_offset, Mode, NEAR_END_THRESHOLD};

/// Where a scroll operation is headed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollTarget {
    /// A fixed offset.
    Offset(f64),
    /// The mode-relative end of content, re-resolved at every evaluation.
    End,
}

impl ScrollTarget {
    /// Resolve to a concrete offset under the given geometry.
    pub fn resolve(&self, mode: Mode, metrics: &ScrollMetrics) -> f64 {
        match *self {
            ScrollTarget::Offset(offset) => offset,
            ScrollTarget::End => end_offset(mode, metrics),
        }
    }

    /// True when this target points at the end under the given geometry.
    ///
    /// A fixed offset counts as end-directed when it lands within the
    /// boundary threshold of the end offset computed from `metrics`; callers
    /// evaluate this at call time, per sample, and at completion, each
    /// against the geometry current at that instant.
    pub fn is_end(&self, mode: Mode, metrics: &ScrollMetrics) -> bool {
        match *self {
            ScrollTarget::End => true,
            ScrollTarget::Offset(offset) => {
                (offset - end_offset(mode, metrics)).abs() < NEAR_END_THRESHOLD
            }
        }
    }
}

/// How a scroll operation moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    /// Animate toward the target.
    #[default]
    Smooth,
    /// Set the offset in one jump.
    Discrete,
}

/// Active animation state.
#[derive(Debug, Clone, Copy)]
struct ActiveAnimation {
    /// Animation start time.
    start: Instant,
    /// Starting scroll offset.
    from: f64,
    /// Target, kept unresolved so an end target can track content growth.
    target: ScrollTarget,
}

/// One frame of an active animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationStep {
    /// Offset to apply this frame.
    pub position: f64,
    /// The animation's target.
    pub target: ScrollTarget,
    /// True on the final frame; the animation has been cleared.
    pub done: bool,
}

/// Scroll animation controller.
///
/// At most one animation is active at a time; starting a new one replaces
/// the old (the engine fires the superseded animation's completion first).
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    duration: Duration,
    easing: EasingType,
}

impl ScrollAnimator {
    pub fn new(duration: Duration, easing: EasingType) -> Self {
        Self {
            animation: None,
            duration,
            easing,
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Target of the in-flight animation, if any.
    pub fn target(&self) -> Option<ScrollTarget> {
        self.animation.map(|animation| animation.target)
    }

    /// Begin an animation from `from` toward `target`, replacing any
    /// animation in flight.
    pub fn start(&mut self, from: f64, target: ScrollTarget, now: Instant) {
        self.animation = Some(ActiveAnimation {
            start: now,
            from,
            target,
        });
    }

    /// Drop the in-flight animation without stepping it to completion.
    /// Returns the abandoned target so the caller can run its completion.
    pub fn cancel(&mut self) -> Option<ScrollTarget> {
        self.animation.take().map(|animation| animation.target)
    }

    /// Advance the animation one frame under the given geometry.
    ///
    /// Returns `None` when idle. On the final frame the position is the
    /// target as resolved right now, so an end target lands on the live end
    /// even if content grew since the animation started.
    pub fn step(&mut self, now: Instant, mode: Mode, metrics: &ScrollMetrics) -> Option<AnimationStep> {
        let animation = self.animation?;
        let to = animation.target.resolve(mode, metrics);

        if is_complete(animation.start, now, self.duration) {
            self.animation = None;
            return Some(AnimationStep {
                position: to,
                target: animation.target,
                done: true,
            });
        }

        let t = progress(animation.start, now, self.duration);
        let position = lerp(animation.from, to, self.easing.apply(t));
        Some(AnimationStep {
            position,
            target: animation.target,
            done: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn metrics(offset_height: f64, scroll_height: f64, scroll_top: f64) -> ScrollMetrics {
        ScrollMetrics {
            offset_height,
            scroll_height,
            scroll_top,
        }
    }

    #[test]
    fn test_idle_animator_steps_to_none() {
        let mut animator = ScrollAnimator::new(ms(150), EasingType::Cubic);
        let m = metrics(200.0, 1000.0, 0.0);
        assert_eq!(animator.step(Instant::now(), Mode::Bottom, &m), None);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_fixed_target_completes_at_duration() {
        let mut animator = ScrollAnimator::new(ms(100), EasingType::Linear);
        let t0 = Instant::now();
        let m = metrics(200.0, 1000.0, 0.0);

        animator.start(0.0, ScrollTarget::Offset(400.0), t0);

        let mid = animator.step(t0 + ms(50), Mode::Bottom, &m).unwrap();
        assert!(!mid.done);
        assert!((mid.position - 200.0).abs() < 0.001);

        let end = animator.step(t0 + ms(100), Mode::Bottom, &m).unwrap();
        assert!(end.done);
        assert_eq!(end.position, 400.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_end_target_tracks_growing_content() {
        let mut animator = ScrollAnimator::new(ms(100), EasingType::Linear);
        let t0 = Instant::now();

        animator.start(800.0, ScrollTarget::End, t0);

        // Content grows mid-flight; the interpolation re-resolves.
        let grown = metrics(200.0, 1200.0, 800.0);
        let mid = animator.step(t0 + ms(50), Mode::Bottom, &grown).unwrap();
        assert!((mid.position - 900.0).abs() < 0.001);

        let end = animator.step(t0 + ms(100), Mode::Bottom, &grown).unwrap();
        assert!(end.done);
        assert_eq!(end.position, 1000.0);
    }

    #[test]
    fn test_end_target_resolves_to_zero_in_top_mode() {
        let mut animator = ScrollAnimator::new(ms(100), EasingType::Linear);
        let t0 = Instant::now();
        let m = metrics(200.0, 1000.0, 500.0);

        animator.start(500.0, ScrollTarget::End, t0);
        let end = animator.step(t0 + ms(100), Mode::Top, &m).unwrap();
        assert_eq!(end.position, 0.0);
    }

    #[test]
    fn test_start_replaces_in_flight_animation() {
        let mut animator = ScrollAnimator::new(ms(100), EasingType::Linear);
        let t0 = Instant::now();
        let m = metrics(200.0, 1000.0, 0.0);

        animator.start(0.0, ScrollTarget::Offset(400.0), t0);
        animator.start(100.0, ScrollTarget::Offset(700.0), t0 + ms(50));

        // The replacement restarts the clock from its own start time.
        let step = animator.step(t0 + ms(100), Mode::Bottom, &m).unwrap();
        assert!(!step.done);
        assert!((step.position - 400.0).abs() < 0.001);
        assert_eq!(animator.target(), Some(ScrollTarget::Offset(700.0)));
    }

    #[test]
    fn test_cancel_returns_abandoned_target() {
        let mut animator = ScrollAnimator::new(ms(100), EasingType::Cubic);
        animator.start(0.0, ScrollTarget::End, Instant::now());
        assert_eq!(animator.cancel(), Some(ScrollTarget::End));
        assert_eq!(animator.cancel(), None);
    }

    #[test]
    fn test_is_end_for_fixed_offsets() {
        let m = metrics(200.0, 1000.0, 0.0);
        assert!(ScrollTarget::End.is_end(Mode::Bottom, &m));
        assert!(ScrollTarget::Offset(800.0).is_end(Mode::Bottom, &m));
        assert!(ScrollTarget::Offset(799.5).is_end(Mode::Bottom, &m));
        assert!(!ScrollTarget::Offset(700.0).is_end(Mode::Bottom, &m));
        assert!(ScrollTarget::Offset(0.0).is_end(Mode::Top, &m));
        assert!(!ScrollTarget::Offset(800.0).is_end(Mode::Top, &m));
    }

    #[test]
    fn test_zero_duration_completes_on_first_step() {
        let mut animator = ScrollAnimator::new(Duration::ZERO, EasingType::Cubic);
        let t0 = Instant::now();
        let m = metrics(200.0, 1000.0, 0.0);

        animator.start(0.0, ScrollTarget::End, t0);
        let step = animator.step(t0, Mode::Bottom, &m).unwrap();
        assert!(step.done);
        assert_eq!(step.position, 800.0);
    }
}
