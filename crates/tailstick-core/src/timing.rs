//! Time calculation utilities for scroll animations.
//!
//! Pure functions over host-supplied instants; the engine never reads a
//! clock of its own.

use std::time::{Duration, Instant};

/// Animation progress in [0, 1] at `now`.
#[inline]
pub fn progress(start: Instant, now: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// True once the animation duration has fully elapsed at `now`.
#[inline]
pub fn is_complete(start: Instant, now: Instant, duration: Duration) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two offsets.
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Instant::now();
        assert!((progress(start, start, Duration::ZERO) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_midway() {
        let start = Instant::now();
        let now = start + Duration::from_millis(50);
        let p = progress(start, now, Duration::from_millis(100));
        assert!((p - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_progress_clamps_before_start() {
        let now = Instant::now();
        let start = now + Duration::from_millis(10);
        assert_eq!(progress(start, now, Duration::from_millis(100)), 0.0);
        assert!(!is_complete(start, now, Duration::from_millis(100)));
    }

    #[test]
    fn test_is_complete_at_exact_duration() {
        let start = Instant::now();
        let duration = Duration::from_millis(100);
        assert!(is_complete(start, start + duration, duration));
        assert!(!is_complete(start, start + duration / 2, duration));
    }
}
