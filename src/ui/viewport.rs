//! Scroll state for the rendered document view.

use std::ops::Range;

/// The window of rendered lines currently on screen.
///
/// `height` counts document rows only; the status and toast bars are
/// outside it.
///
/// # Example
///
/// ```
/// use brdwiz::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(80, 20, 50);
/// vp.page_down();
/// assert_eq!(vp.visible_range(), 20..40);
/// vp.go_to_bottom();
/// assert_eq!(vp.visible_range(), 30..50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    pub const fn new(width: u16, height: u16, total_lines: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_lines,
        }
    }

    /// First visible line.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// Lines on screen, clamped to the document.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + usize::from(self.height)).min(self.total_lines);
        self.offset.min(end)..end
    }

    /// How far through the document the view is, 0 to 100.
    pub fn scroll_percent(&self) -> u8 {
        let max_offset = self.max_offset();
        if max_offset == 0 {
            return 100;
        }
        let percent = self.offset.min(max_offset) * 100 / max_offset;
        u8::try_from(percent).unwrap_or(100)
    }

    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = self.offset.saturating_add(n).min(self.max_offset());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(usize::from(self.height));
    }

    pub const fn half_page_up(&mut self) {
        self.scroll_up(self.height as usize / 2);
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down(usize::from(self.height) / 2);
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Put `line` at the top of the view, as far as the document allows.
    pub fn go_to_line(&mut self, line: usize) {
        self.offset = line.min(self.max_offset());
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the document length after an edit.
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_viewport_starts_at_top() {
        let vp = Viewport::new(80, 20, 100);
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.visible_range(), 0..20);
        assert!(!vp.can_scroll_up());
        assert!(vp.can_scroll_down());
    }

    #[test]
    fn test_short_document_does_not_scroll() {
        let mut vp = Viewport::new(80, 20, 7);
        vp.scroll_down(5);
        assert_eq!(vp.offset(), 0);
        assert_eq!(vp.visible_range(), 0..7);
        assert_eq!(vp.scroll_percent(), 100);
    }

    #[test]
    fn test_scroll_down_clamps_to_last_page() {
        let mut vp = Viewport::new(80, 20, 100);
        vp.scroll_down(1_000);
        assert_eq!(vp.offset(), 80);
        assert!(!vp.can_scroll_down());
    }

    #[test]
    fn test_scroll_up_clamps_to_zero() {
        let mut vp = Viewport::new(80, 20, 100);
        vp.scroll_down(10);
        vp.scroll_up(100);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_page_and_half_page_moves() {
        let mut vp = Viewport::new(80, 20, 100);
        vp.page_down();
        assert_eq!(vp.offset(), 20);
        vp.half_page_down();
        assert_eq!(vp.offset(), 30);
        vp.half_page_up();
        assert_eq!(vp.offset(), 20);
        vp.page_up();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_go_to_line_clamps() {
        let mut vp = Viewport::new(80, 20, 100);
        vp.go_to_line(50);
        assert_eq!(vp.offset(), 50);
        vp.go_to_line(1_000);
        assert_eq!(vp.offset(), 80);
    }

    #[test]
    fn test_scroll_percent() {
        let mut vp = Viewport::new(80, 20, 100);
        assert_eq!(vp.scroll_percent(), 0);
        vp.go_to_line(40);
        assert_eq!(vp.scroll_percent(), 50);
        vp.go_to_bottom();
        assert_eq!(vp.scroll_percent(), 100);
    }

    #[test]
    fn test_shrinking_document_pulls_offset_back() {
        let mut vp = Viewport::new(80, 20, 100);
        vp.go_to_bottom();
        vp.set_total_lines(30);
        assert_eq!(vp.offset(), 10);
        assert_eq!(vp.visible_range(), 10..30);
    }

    #[test]
    fn test_growing_the_window_clamps_offset() {
        let mut vp = Viewport::new(80, 20, 100);
        vp.go_to_bottom();
        vp.resize(100, 60);
        assert_eq!(vp.offset(), 40);
        assert_eq!(vp.width(), 100);
        assert_eq!(vp.height(), 60);
    }
}
