//! Line-based scroll region backing a transcript pane.

use tailstick_core::{ScrollMetrics, ScrollRegion};

/// A scrollable transcript measured in terminal rows.
///
/// The offset is kept fractional so smooth animations can land between
/// rows; rendering rounds through `render_offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranscriptRegion {
    viewport_rows: u16,
    content_rows: usize,
    scroll_top: f64,
}

impl TranscriptRegion {
    pub fn new(viewport_rows: u16) -> Self {
        Self {
            viewport_rows,
            content_rows: 0,
            scroll_top: 0.0,
        }
    }

    pub fn viewport_rows(&self) -> u16 {
        self.viewport_rows
    }

    pub fn content_rows(&self) -> usize {
        self.content_rows
    }

    /// Append rows at the bottom of the transcript.
    pub fn append_rows(&mut self, rows: usize) {
        self.content_rows += rows;
    }

    /// Replace the content length (e.g. after a rewrap).
    pub fn set_content_rows(&mut self, rows: usize) {
        self.content_rows = rows;
        self.clamp_offset();
    }

    pub fn set_viewport_rows(&mut self, rows: u16) {
        self.viewport_rows = rows;
        self.clamp_offset();
    }

    /// Move the offset by a row delta (user wheel or keys).
    pub fn scroll_by(&mut self, delta: i32) {
        self.scroll_top = (self.scroll_top + delta as f64).clamp(0.0, self.max_scroll());
    }

    /// Row offset for `Paragraph::scroll`.
    pub fn render_offset(&self) -> u16 {
        self.scroll_top.round().clamp(0.0, u16::MAX as f64) as u16
    }

    fn max_scroll(&self) -> f64 {
        (self.content_rows as f64 - self.viewport_rows as f64).max(0.0)
    }

    fn clamp_offset(&mut self) {
        self.scroll_top = self.scroll_top.clamp(0.0, self.max_scroll());
    }
}

impl ScrollRegion for TranscriptRegion {
    fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            offset_height: self.viewport_rows as f64,
            scroll_height: self.content_rows as f64,
            scroll_top: self.scroll_top,
        }
    }

    fn set_scroll_top(&mut self, scroll_top: f64) {
        self.scroll_top = scroll_top.clamp(0.0, self.max_scroll());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_in_rows() {
        let mut region = TranscriptRegion::new(10);
        region.append_rows(30);

        let metrics = region.metrics();
        assert_eq!(metrics.offset_height, 10.0);
        assert_eq!(metrics.scroll_height, 30.0);
        assert_eq!(metrics.scroll_top, 0.0);
        assert_eq!(metrics.max_scroll_top(), 20.0);
    }

    #[test]
    fn test_scroll_by_clamps_to_content() {
        let mut region = TranscriptRegion::new(10);
        region.append_rows(30);

        region.scroll_by(100);
        assert_eq!(region.metrics().scroll_top, 20.0);
        region.scroll_by(-100);
        assert_eq!(region.metrics().scroll_top, 0.0);
    }

    #[test]
    fn test_set_scroll_top_clamps() {
        let mut region = TranscriptRegion::new(10);
        region.append_rows(30);

        region.set_scroll_top(1000.0);
        assert_eq!(region.metrics().scroll_top, 20.0);
        region.set_scroll_top(-3.0);
        assert_eq!(region.metrics().scroll_top, 0.0);
    }

    #[test]
    fn test_shrinking_content_pulls_offset_back() {
        let mut region = TranscriptRegion::new(10);
        region.append_rows(30);
        region.set_scroll_top(20.0);

        region.set_content_rows(15);
        assert_eq!(region.metrics().scroll_top, 5.0);

        region.set_viewport_rows(20);
        assert_eq!(region.metrics().scroll_top, 0.0);
    }

    #[test]
    fn test_render_offset_rounds() {
        let mut region = TranscriptRegion::new(10);
        region.append_rows(30);
        region.set_scroll_top(12.6);
        assert_eq!(region.render_offset(), 13);
    }
}
