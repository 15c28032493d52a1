//! Pure boundary-flag computation from region geometry.

use serde::{Deserialize, Serialize};

use crate::region::ScrollMetrics;

/// Distance within which a position counts as touching a boundary.
/// Tolerates sub-unit rounding from fractional layouts.
pub const NEAR_END_THRESHOLD: f64 = 1.0;

/// Which geometric boundary is "the end" of the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Content is appended at the bottom; the end is the bottom edge.
    #[default]
    Bottom,
    /// Content is appended at the top; the end is the top edge.
    Top,
}

/// Boundary flags for the current geometry.
///
/// Always derived fresh from (mode, metrics); never mutated independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub at_top: bool,
    pub at_bottom: bool,
    pub at_start: bool,
    pub at_end: bool,
}

/// Compute boundary flags for the given geometry.
pub fn compute_view_state(mode: Mode, metrics: &ScrollMetrics) -> ViewState {
    let at_bottom =
        metrics.scroll_height - metrics.scroll_top - metrics.offset_height < NEAR_END_THRESHOLD;
    let at_top = metrics.scroll_top < NEAR_END_THRESHOLD;

    let (at_end, at_start) = match mode {
        Mode::Top => (at_top, at_bottom),
        Mode::Bottom => (at_bottom, at_top),
    };

    ViewState {
        at_top,
        at_bottom,
        at_start,
        at_end,
    }
}

/// Offset of the mode-relative end under the given geometry.
#[inline]
pub fn end_offset(mode: Mode, metrics: &ScrollMetrics) -> f64 {
    match mode {
        Mode::Top => 0.0,
        Mode::Bottom => metrics.max_scroll_top(),
    }
}

/// Offset of the mode-relative start (the boundary opposite the end).
#[inline]
pub fn start_offset(mode: Mode, metrics: &ScrollMetrics) -> f64 {
    match mode {
        Mode::Top => metrics.max_scroll_top(),
        Mode::Bottom => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn metrics(offset_height: f64, scroll_height: f64, scroll_top: f64) -> ScrollMetrics {
        ScrollMetrics {
            offset_height,
            scroll_height,
            scroll_top,
        }
    }

    #[test]
    fn test_at_end_at_exact_bottom() {
        let view = compute_view_state(Mode::Bottom, &metrics(200.0, 1000.0, 800.0));
        assert!(view.at_bottom);
        assert!(view.at_end);
        assert!(!view.at_top);
        assert!(!view.at_start);
    }

    #[test]
    fn test_sub_unit_tolerance() {
        // 0.5 units away from the bottom still counts as at-bottom.
        let view = compute_view_state(Mode::Bottom, &metrics(200.0, 1000.0, 799.5));
        assert!(view.at_bottom);

        let view = compute_view_state(Mode::Bottom, &metrics(200.0, 1000.0, 799.0));
        assert!(!view.at_bottom);
    }

    #[test]
    fn test_top_mode_remaps_end_and_start() {
        let view = compute_view_state(Mode::Top, &metrics(200.0, 1000.0, 0.0));
        assert!(view.at_top);
        assert!(view.at_end);
        assert!(!view.at_start);

        let view = compute_view_state(Mode::Top, &metrics(200.0, 1000.0, 800.0));
        assert!(view.at_bottom);
        assert!(view.at_start);
        assert!(!view.at_end);
    }

    #[test]
    fn test_non_overflowing_is_at_both_boundaries() {
        let view = compute_view_state(Mode::Bottom, &metrics(500.0, 300.0, 0.0));
        assert!(view.at_top && view.at_bottom);
        assert!(view.at_start && view.at_end);
    }

    #[test]
    fn test_end_offset_per_mode() {
        let m = metrics(200.0, 1000.0, 100.0);
        assert_eq!(end_offset(Mode::Bottom, &m), 800.0);
        assert_eq!(end_offset(Mode::Top, &m), 0.0);
        assert_eq!(start_offset(Mode::Bottom, &m), 0.0);
        assert_eq!(start_offset(Mode::Top, &m), 800.0);

        // End of a non-overflowing region is offset zero, never negative.
        let small = metrics(500.0, 300.0, 0.0);
        assert_eq!(end_offset(Mode::Bottom, &small), 0.0);
    }

    proptest! {
        #[test]
        fn boundary_flags_match_raw_geometry(
            offset_height in 0.0f64..2000.0,
            scroll_height in 0.0f64..10_000.0,
            scroll_top in 0.0f64..10_000.0,
        ) {
            let m = metrics(offset_height, scroll_height, scroll_top);
            let view = compute_view_state(Mode::Bottom, &m);

            prop_assert_eq!(
                view.at_bottom,
                scroll_height - scroll_top - offset_height < NEAR_END_THRESHOLD
            );
            prop_assert_eq!(view.at_top, scroll_top < NEAR_END_THRESHOLD);
            prop_assert_eq!(view.at_end, view.at_bottom);
            prop_assert_eq!(view.at_start, view.at_top);
        }

        #[test]
        fn top_mode_is_the_exact_remap(
            offset_height in 0.0f64..2000.0,
            scroll_height in 0.0f64..10_000.0,
            scroll_top in 0.0f64..10_000.0,
        ) {
            let m = metrics(offset_height, scroll_height, scroll_top);
            let bottom = compute_view_state(Mode::Bottom, &m);
            let top = compute_view_state(Mode::Top, &m);

            prop_assert_eq!(top.at_top, bottom.at_top);
            prop_assert_eq!(top.at_bottom, bottom.at_bottom);
            prop_assert_eq!(top.at_end, bottom.at_start);
            prop_assert_eq!(top.at_start, bottom.at_end);
        }
    }
}
