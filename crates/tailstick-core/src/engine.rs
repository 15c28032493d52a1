//! The sticky-scroll state machine.
//!
//! `StickyScroll` owns the one attached region and every piece of mutable
//! tracking state: the sticky flag, the geometry baseline, the ignore
//! window, the scroll anchor, the animator, the event filter, and the
//! corrector schedule. Hosts forward raw scroll/resize/mutation
//! notifications through `on_scroll` and drive the engine with `tick` once
//! per frame; everything else is derived.
//!
//! There is no reliable way to tell whether a scroll notification was caused
//! by a user gesture, a programmatic scroll, or a layout change. The engine
//! classifies on a best-effort basis: samples whose geometry differs from
//! the baseline are treated as layout-induced, samples inside the ignore
//! window are debounced artifacts of a completed programmatic scroll, and
//! everything else is taken as the user (or the engine itself) moving the
//! offset.

use std::time::Instant;

use tracing::{debug, warn};

use crate::animator::{ScrollAnimator, ScrollBehavior, ScrollTarget};
use crate::config::StickyConfig;
use crate::corrector::{CorrectorVerdict, PeriodicCorrector};
use crate::filter::{ScrollEventFilter, ScrollSample};
use crate::observer::{ObserverRegistry, ScrollObserver, SubscriptionId};
use crate::region::{ScrollMetrics, ScrollRegion};
use crate::view::{compute_view_state, start_offset, Mode, NEAR_END_THRESHOLD};

/// Decides how far a drift correction travels, given the current metrics.
/// The returned delta is clamped to `[0, max_value]`.
pub type Scroller = Box<dyn Fn(&ScrollerMetrics) -> f64>;

/// Inputs handed to the injectable scroller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollerMetrics {
    /// Distance already grown since the anchor of the current correction.
    pub min_value: f64,
    /// Remaining distance to the true end; the delta is clamped to this.
    pub max_value: f64,
    pub offset_height: f64,
    pub scroll_height: f64,
    pub scroll_top: f64,
}

/// Read-only snapshot of the engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSnapshot {
    pub at_top: bool,
    pub at_bottom: bool,
    pub at_start: bool,
    pub at_end: bool,
    /// True while the region auto-follows newly appended content.
    pub sticky: bool,
    pub animating: bool,
    pub animating_to_end: bool,
    pub mode: Mode,
}

/// Last geometry observed by an admitted sample; a mismatch marks the next
/// sample as layout-induced rather than a user gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
struct GeometryBaseline {
    offset_height: f64,
    scroll_height: f64,
}

/// The sticky-scroll engine for one tracked region.
pub struct StickyScroll<R: ScrollRegion> {
    config: StickyConfig,
    region: Option<R>,
    sticky: bool,
    animator: ScrollAnimator,
    filter: ScrollEventFilter,
    corrector: PeriodicCorrector,
    observers: ObserverRegistry,
    baseline: Option<GeometryBaseline>,
    /// Samples stamped at or before this instant are debounced artifacts of
    /// a completed programmatic scroll and are dropped outright.
    ignore_before: Option<Instant>,
    /// Offset captured when the corrector last anchored a correction.
    animate_from: f64,
    scroller: Scroller,
    /// The discrete initial scroll fires once per engine, at the first
    /// attach, and is never reapplied.
    initial_discrete_done: bool,
}

fn default_scroller(_metrics: &ScrollerMetrics) -> f64 {
    // Full catch-up to the live end.
    f64::INFINITY
}

impl<R: ScrollRegion> StickyScroll<R> {
    pub fn new(config: StickyConfig) -> Self {
        let animator = ScrollAnimator::new(config.animation.duration(), config.animation.easing);
        let filter = ScrollEventFilter::new(config.debounce());
        let corrector = PeriodicCorrector::new(config.check_interval(), config.decision_delay());

        Self {
            config,
            region: None,
            sticky: true,
            animator,
            filter,
            corrector,
            observers: ObserverRegistry::new(),
            baseline: None,
            ignore_before: None,
            animate_from: 0.0,
            scroller: Box::new(default_scroller),
            initial_discrete_done: false,
        }
    }

    /// Replace the drift scroller. The default always requests a full
    /// catch-up to the live end.
    pub fn with_scroller(mut self, scroller: Scroller) -> Self {
        self.scroller = scroller;
        self
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn config(&self) -> &StickyConfig {
        &self.config
    }

    pub fn is_attached(&self) -> bool {
        self.region.is_some()
    }

    pub fn region(&self) -> Option<&R> {
        self.region.as_ref()
    }

    /// Host-side access for content/viewport mutations. Forward a scroll
    /// notification afterwards so the change gets classified.
    pub fn region_mut(&mut self) -> Option<&mut R> {
        self.region.as_mut()
    }

    /// Track a region. Resets all per-region state, restores the default
    /// stickiness, and arms the corrector; any previously attached region is
    /// detached first.
    pub fn attach(&mut self, region: R, now: Instant) {
        if self.region.is_some() {
            self.detach();
        }

        let metrics = region.metrics();
        self.region = Some(region);
        self.baseline = Some(GeometryBaseline {
            offset_height: metrics.offset_height,
            scroll_height: metrics.scroll_height,
        });
        self.ignore_before = None;
        self.animate_from = 0.0;
        self.sticky = true;
        self.filter.reset();
        self.corrector.arm(now);

        if self.config.initial_scroll_behavior == ScrollBehavior::Discrete
            && !self.initial_discrete_done
        {
            self.initial_discrete_done = true;
            let end = ScrollTarget::End.resolve(self.config.mode, &metrics);
            if let Some(region) = self.region.as_mut() {
                region.set_scroll_top(end);
            }
            if self.config.debug {
                debug!(scroll_top = end, "initial discrete scroll to the end");
            }
        }
    }

    /// Stop tracking and return the region. All timers and per-region state
    /// are released; an in-flight animation is dropped without completing.
    pub fn detach(&mut self) -> Option<R> {
        let region = self.region.take();
        self.baseline = None;
        self.ignore_before = None;
        self.animate_from = 0.0;
        self.sticky = true;
        self.animator.cancel();
        self.filter.reset();
        self.corrector.disarm();
        region
    }

    /// Forward a raw scroll/resize/mutation notification from the host.
    ///
    /// A no-op before a region is attached.
    pub fn on_scroll(&mut self, now: Instant) {
        if self.region.is_none() {
            return;
        }
        if let Some(sample) = self.filter.notify(now) {
            self.handle_sample(sample, now);
        }
    }

    /// Advance the engine one frame: release debounced notifications, step
    /// the animation, and run the periodic check.
    pub fn tick(&mut self, now: Instant) {
        if self.region.is_none() {
            return;
        }

        if let Some(sample) = self.filter.poll(now) {
            self.handle_sample(sample, now);
        }

        self.step_animation(now);
        self.run_corrector(now);
    }

    /// Scroll to a fixed offset or the mode-relative end. Returns
    /// immediately; completion is observable through `snapshot`.
    ///
    /// A non-finite offset is an advisory warning with no state change; with
    /// no region attached this is silently a no-op (callers retry after
    /// attach).
    pub fn scroll_to(&mut self, target: ScrollTarget, behavior: ScrollBehavior, now: Instant) {
        if let ScrollTarget::Offset(offset) = target {
            if !offset.is_finite() {
                warn!(offset, "scroll_to target must be a finite offset or ScrollTarget::End");
                return;
            }
        }
        let metrics = match self.region.as_ref() {
            Some(region) => region.metrics(),
            None => return,
        };
        let mode = self.config.mode;

        if self.config.debug {
            debug!(?target, ?behavior, scroll_top = metrics.scroll_top, "scroll_to");
        }

        // Supersede any in-flight animation, firing its completion exactly
        // once per animation lifecycle.
        if let Some(superseded) = self.animator.cancel() {
            self.complete(superseded, now);
        }

        match behavior {
            ScrollBehavior::Discrete => {
                let resolved = target.resolve(mode, &metrics);
                if let Some(region) = self.region.as_mut() {
                    region.set_scroll_top(resolved);
                }
                // The jump is programmatic: swallow its trailing
                // notifications and judge stickiness by the destination.
                self.ignore_before = Some(now);
                if !target.is_end(mode, &metrics) {
                    self.set_sticky(false, "discrete jump landed off the end");
                }
            }
            ScrollBehavior::Smooth => {
                let from = metrics.scroll_top;
                let resolved = target.resolve(mode, &metrics);
                if (resolved - from).abs() < NEAR_END_THRESHOLD {
                    // Nothing to travel; complete on the spot like a
                    // zero-length animation.
                    self.complete(target, now);
                } else {
                    self.animator.start(from, target, now);
                }
            }
        }

        // An end-directed request reclaims stickiness immediately, before
        // any animation proceeds.
        if target.is_end(mode, &metrics) {
            self.set_sticky(true, "end-directed scroll requested");
        }
    }

    /// Scroll to the physical bottom of the content.
    pub fn scroll_to_bottom(&mut self, behavior: ScrollBehavior, now: Instant) {
        let target = match self.config.mode {
            Mode::Bottom => ScrollTarget::End,
            // Under Top mode the bottom is not followed; a fixed offset
            // resolved at call time is exact.
            Mode::Top => match self.current_metrics() {
                Some(metrics) => ScrollTarget::Offset(metrics.max_scroll_top()),
                None => return,
            },
        };
        self.scroll_to(target, behavior, now);
    }

    /// Scroll to the physical top of the content.
    pub fn scroll_to_top(&mut self, behavior: ScrollBehavior, now: Instant) {
        let target = match self.config.mode {
            Mode::Top => ScrollTarget::End,
            Mode::Bottom => ScrollTarget::Offset(0.0),
        };
        self.scroll_to(target, behavior, now);
    }

    /// Scroll to the mode-relative end: the boundary new content approaches.
    pub fn scroll_to_end(&mut self, behavior: ScrollBehavior, now: Instant) {
        self.scroll_to(ScrollTarget::End, behavior, now);
    }

    /// Scroll to the mode-relative start: the boundary opposite the end.
    pub fn scroll_to_start(&mut self, behavior: ScrollBehavior, now: Instant) {
        let target = match self.current_metrics() {
            Some(metrics) => ScrollTarget::Offset(start_offset(self.config.mode, &metrics)),
            None => return,
        };
        self.scroll_to(target, behavior, now);
    }

    /// Current state, computed fresh from the live geometry.
    pub fn snapshot(&self) -> ScrollSnapshot {
        let mode = self.config.mode;
        match self.region.as_ref() {
            Some(region) => {
                let metrics = region.metrics();
                let view = compute_view_state(mode, &metrics);
                let animating = self.animator.is_animating();
                let animating_to_end = self
                    .animator
                    .target()
                    .map_or(false, |target| target.is_end(mode, &metrics));
                ScrollSnapshot {
                    at_top: view.at_top,
                    at_bottom: view.at_bottom,
                    at_start: view.at_start,
                    at_end: view.at_end,
                    sticky: self.sticky,
                    animating,
                    animating_to_end,
                    mode,
                }
            }
            // Detached: the defaults the engine starts from.
            None => ScrollSnapshot {
                at_top: true,
                at_bottom: true,
                at_start: false,
                at_end: true,
                sticky: self.sticky,
                animating: false,
                animating_to_end: false,
                mode,
            },
        }
    }

    /// Register a scroll-position observer. When a region is attached the
    /// observer is immediately replayed the current offset.
    pub fn observe_scroll_position(&mut self, observer: impl FnMut(f64) + 'static) -> SubscriptionId {
        let id = self.observers.subscribe(Box::new(observer) as ScrollObserver);
        if let Some(region) = self.region.as_ref() {
            let scroll_top = region.metrics().scroll_top;
            self.observers.notify_one(id, scroll_top);
        }
        id
    }

    /// Drop an observer; unknown or already-removed ids are a no-op.
    pub fn unobserve_scroll_position(&mut self, id: SubscriptionId) {
        self.observers.unsubscribe(id);
    }

    fn current_metrics(&self) -> Option<ScrollMetrics> {
        self.region.as_ref().map(|region| region.metrics())
    }

    /// Process one admitted sample.
    fn handle_sample(&mut self, sample: ScrollSample, now: Instant) {
        if let Some(marker) = self.ignore_before {
            if sample.timestamp <= marker {
                // Debounced artifact of an already-completed programmatic
                // scroll; reacting would corrupt the settled state.
                return;
            }
        }

        let metrics = match self.region.as_ref() {
            Some(region) => region.metrics(),
            None => return,
        };
        let view = compute_view_state(self.config.mode, &metrics);

        let geometry_changed = self.baseline.map_or(true, |baseline| {
            baseline.offset_height != metrics.offset_height
                || baseline.scroll_height != metrics.scroll_height
        });
        self.baseline = Some(GeometryBaseline {
            offset_height: metrics.offset_height,
            scroll_height: metrics.scroll_height,
        });

        if !geometry_changed {
            // Stable geometry means the offset itself moved: a user or
            // programmatic scroll. Sticky iff heading to the end or already
            // there.
            let heading_to_end = self
                .animator
                .target()
                .map_or(false, |target| target.is_end(self.config.mode, &metrics));
            self.set_sticky(heading_to_end || view.at_end, "scroll with stable geometry");
        } else if self.sticky {
            // Layout-induced scroll (content growth or viewport resize),
            // not a user gesture: keep following the moved end.
            if self.config.debug {
                debug!(
                    offset_height = metrics.offset_height,
                    scroll_height = metrics.scroll_height,
                    "geometry changed while sticky, re-targeting the end"
                );
            }
            self.restick(now);
        } else if metrics.fits() {
            // A container that shrank to fit resets to the default follow
            // behavior.
            self.set_sticky(true, "container no longer overflows");
        }

        // Observers see the offset as it stands after any re-stick.
        let scroll_top = self
            .current_metrics()
            .map_or(metrics.scroll_top, |current| current.scroll_top);
        self.observers.notify(scroll_top);
    }

    /// Advance the in-flight animation and feed the write back through the
    /// classifier like a native scroll notification. The final frame's
    /// notification lands inside the ignore window and is dropped.
    fn step_animation(&mut self, now: Instant) {
        let Some(region) = self.region.as_mut() else {
            return;
        };
        let metrics = region.metrics();
        let Some(step) = self.animator.step(now, self.config.mode, &metrics) else {
            return;
        };
        region.set_scroll_top(step.position);
        if step.done {
            self.complete(step.target, now);
        }
        self.on_scroll(now);
    }

    /// The completion transition. Runs exactly once per animation lifecycle:
    /// natural end, supersede, or zero-length scroll.
    fn complete(&mut self, target: ScrollTarget, now: Instant) {
        self.ignore_before = Some(now);

        let landed_at_end = match self.region.as_ref() {
            Some(region) => target.is_end(self.config.mode, &region.metrics()),
            None => false,
        };
        if self.config.debug {
            debug!(?target, landed_at_end, "animation completed");
        }
        if !landed_at_end {
            // The caller asked to land somewhere other than the end, so
            // auto-follow stops. Without this, a scroller capping the
            // travel distance would be re-issued on every check.
            self.set_sticky(false, "animation landed off the end");
        }
    }

    fn run_corrector(&mut self, now: Instant) {
        if !self.corrector.due(now) {
            return;
        }
        let metrics = match self.region.as_ref() {
            Some(region) => region.metrics(),
            None => return,
        };
        let view = compute_view_state(self.config.mode, &metrics);
        let verdict = self.corrector.assess(
            now,
            self.sticky,
            view.at_end,
            self.animator.is_animating(),
            metrics.fits(),
        );

        match verdict {
            CorrectorVerdict::Hold => {}
            CorrectorVerdict::Correct => {
                self.animate_from = metrics.scroll_top;
                if self.config.debug {
                    debug!(
                        scroll_top = metrics.scroll_top,
                        "sticky but not at the end past the dwell threshold, correcting"
                    );
                }
                self.restick(now);
            }
            CorrectorVerdict::ForceSticky => {
                self.set_sticky(true, "container no longer overflows");
            }
        }
    }

    /// Re-target the animator at the (possibly moved) end, letting the
    /// injectable scroller cap how far this correction travels.
    fn restick(&mut self, now: Instant) {
        let metrics = match self.region.as_ref() {
            Some(region) => region.metrics(),
            None => return,
        };

        let max_value = match self.config.mode {
            // Top's end is offset zero; the downward delta is always zero.
            Mode::Top => 0.0,
            Mode::Bottom => {
                (metrics.scroll_height - metrics.offset_height - metrics.scroll_top).max(0.0)
            }
        };
        let min_value = (self.animate_from - metrics.scroll_top).max(0.0);

        let raw = (self.scroller)(&ScrollerMetrics {
            min_value,
            max_value,
            offset_height: metrics.offset_height,
            scroll_height: metrics.scroll_height,
            scroll_top: metrics.scroll_top,
        });
        let delta = if raw.is_nan() {
            max_value
        } else {
            raw.clamp(0.0, max_value)
        };

        let target = if delta >= max_value {
            // Full catch-up targets the live end, so stickiness survives
            // content appended while the correction is still in flight.
            ScrollTarget::End
        } else {
            ScrollTarget::Offset(metrics.scroll_top + delta)
        };

        if self.config.debug {
            debug!(?target, max_value, min_value, delta, "re-stick correction");
        }

        self.scroll_to(target, ScrollBehavior::Smooth, now);
    }

    fn set_sticky(&mut self, sticky: bool, reason: &'static str) {
        if self.sticky != sticky {
            self.sticky = sticky;
            if self.config.debug {
                debug!(sticky, reason, "stickiness changed");
            }
        }
    }
}
