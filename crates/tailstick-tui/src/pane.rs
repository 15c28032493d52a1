//! Wires a transcript region into the sticky-scroll engine.

use std::time::Instant;

use ratatui::widgets::Paragraph;

use tailstick_core::{ScrollBehavior, ScrollSnapshot, StickyConfig, StickyScroll};

use crate::viewport::TranscriptRegion;

/// A transcript pane that follows appended content until the user scrolls
/// away, and resumes following once they return to the end.
///
/// Every mutation of the region is forwarded to the engine as a scroll
/// notification, playing the role a native scroll event plays in a browser
/// host; `tick` must be called once per frame.
pub struct FollowPane {
    engine: StickyScroll<TranscriptRegion>,
}

impl FollowPane {
    pub fn new(config: StickyConfig, viewport_rows: u16, now: Instant) -> Self {
        let mut engine = StickyScroll::new(config);
        engine.attach(TranscriptRegion::new(viewport_rows), now);
        Self { engine }
    }

    /// User-initiated scroll: move the offset, then report it so the engine
    /// can classify the gesture.
    pub fn scroll_by(&mut self, rows: i32, now: Instant) {
        if let Some(region) = self.engine.region_mut() {
            region.scroll_by(rows);
        }
        self.engine.on_scroll(now);
    }

    /// Content growth, reported as a layout notification; the engine keeps
    /// following the end while sticky.
    pub fn append_rows(&mut self, rows: usize, now: Instant) {
        if let Some(region) = self.engine.region_mut() {
            region.append_rows(rows);
        }
        self.engine.on_scroll(now);
    }

    /// Content rewrap (e.g. width change): replace the row count outright.
    pub fn set_content_rows(&mut self, rows: usize, now: Instant) {
        if let Some(region) = self.engine.region_mut() {
            region.set_content_rows(rows);
        }
        self.engine.on_scroll(now);
    }

    /// Viewport resize.
    pub fn resize(&mut self, viewport_rows: u16, now: Instant) {
        if let Some(region) = self.engine.region_mut() {
            region.set_viewport_rows(viewport_rows);
        }
        self.engine.on_scroll(now);
    }

    /// Advance animations, debounced deliveries, and the periodic check.
    pub fn tick(&mut self, now: Instant) {
        self.engine.tick(now);
    }

    pub fn scroll_to_end(&mut self, behavior: ScrollBehavior, now: Instant) {
        self.engine.scroll_to_end(behavior, now);
    }

    pub fn scroll_to_start(&mut self, behavior: ScrollBehavior, now: Instant) {
        self.engine.scroll_to_start(behavior, now);
    }

    pub fn snapshot(&self) -> ScrollSnapshot {
        self.engine.snapshot()
    }

    /// Row offset for rendering the transcript.
    pub fn render_offset(&self) -> u16 {
        self.engine
            .region()
            .map_or(0, |region| region.render_offset())
    }

    /// Apply the current offset to a transcript paragraph.
    pub fn scrolled<'a>(&self, paragraph: Paragraph<'a>) -> Paragraph<'a> {
        paragraph.scroll((self.render_offset(), 0))
    }

    pub fn engine(&self) -> &StickyScroll<TranscriptRegion> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut StickyScroll<TranscriptRegion> {
        &mut self.engine
    }
}
