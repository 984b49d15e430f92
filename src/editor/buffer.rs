use std::ops::Range;

use ropey::Rope;

/// The document text, backed by a rope.
///
/// All offsets are character offsets. The buffer tracks whether it has been
/// modified since it was loaded or last saved.
pub struct DocumentBuffer {
    rope: Rope,
    dirty: bool,
}

impl DocumentBuffer {
    /// Create a buffer holding `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            dirty: false,
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (e.g., after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Mark the buffer as modified, e.g. when writing it out failed.
    pub const fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total number of characters in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Content of a line without its line break.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx).to_string();
        let line = line.strip_suffix('\n').unwrap_or(&line);
        Some(line.strip_suffix('\r').unwrap_or(line).to_owned())
    }

    /// Length of a line in characters, without its line break.
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.chars().count())
    }

    /// Character offset of the first character of `line_idx`.
    pub fn line_start(&self, line_idx: usize) -> usize {
        self.rope
            .line_to_char(line_idx.min(self.rope.len_lines().saturating_sub(1)))
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Text in `range`, clamped to the buffer.
    pub fn slice(&self, range: Range<usize>) -> String {
        let range = self.clamp_range(range);
        self.rope.slice(range).to_string()
    }

    /// Replace `range` with `text`. Returns the offset just past the
    /// inserted text.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> usize {
        let range = self.clamp_range(range);
        let start = range.start;
        if range.is_empty() && text.is_empty() {
            return start;
        }
        if !range.is_empty() {
            self.rope.remove(range);
        }
        if !text.is_empty() {
            self.rope.insert(start, text);
        }
        self.dirty = true;
        start + text.chars().count()
    }

    /// Insert `text` at `offset`. Returns the offset just past it.
    pub fn insert(&mut self, offset: usize, text: &str) -> usize {
        self.replace(offset..offset, text)
    }

    /// Remove the characters in `range`. Returns `true` if anything went.
    pub fn remove(&mut self, range: Range<usize>) -> bool {
        let range = self.clamp_range(range);
        if range.is_empty() {
            return false;
        }
        self.replace(range, "");
        true
    }

    /// Character offset of `(line, col)`, clamped to the buffer.
    pub fn offset_of(&self, line: usize, col: usize) -> usize {
        let line = line.min(self.line_count().saturating_sub(1));
        self.rope.line_to_char(line) + col.min(self.line_len(line))
    }

    /// `(line, col)` of a character offset, clamped to the buffer.
    pub fn position_of(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        let col = offset - self.rope.line_to_char(line);
        (line, col.min(self.line_len(line)))
    }

    fn clamp_range(&self, range: Range<usize>) -> Range<usize> {
        let len = self.rope.len_chars();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        start..end
    }
}

impl Default for DocumentBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for DocumentBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = DocumentBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_from_text_trailing_newline() {
        let buf = DocumentBuffer::from_text("hello\n");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some(String::new()));
    }

    #[test]
    fn test_line_at_strips_crlf() {
        let buf = DocumentBuffer::from_text("a\r\nb");
        assert_eq!(buf.line_at(0), Some("a".to_string()));
        assert_eq!(buf.line_len(0), 1);
    }

    #[test]
    fn test_only_line_feed_breaks_lines() {
        let text = "a\rb\r\nc\u{2028}d\u{85}e\ne";
        let buf = DocumentBuffer::from_text(text);
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.line_count(), crate::format::line_count(text));
        assert_eq!(buf.line_at(0), Some("a\rb".to_string()));
        assert_eq!(buf.line_at(1), Some("c\u{2028}d\u{85}e".to_string()));
        assert_eq!(buf.line_len(1), 5);
        assert_eq!(buf.line_start(2), 11);
    }

    #[test]
    fn test_line_at_out_of_bounds_returns_none() {
        let buf = DocumentBuffer::from_text("hello");
        assert_eq!(buf.line_at(1), None);
    }

    #[test]
    fn test_line_len_counts_chars() {
        let buf = DocumentBuffer::from_text("café\nhi");
        assert_eq!(buf.line_len(0), 4);
        assert_eq!(buf.line_len(1), 2);
    }

    #[test]
    fn test_new_buffer_is_clean() {
        assert!(!DocumentBuffer::from_text("hello").is_dirty());
    }

    #[test]
    fn test_replace_marks_dirty_and_returns_end() {
        let mut buf = DocumentBuffer::from_text("hello world");
        let end = buf.replace(6..11, "there");
        assert_eq!(buf.text(), "hello there");
        assert_eq!(end, 11);
        assert!(buf.is_dirty());
    }

    #[test]
    fn test_empty_replace_stays_clean() {
        let mut buf = DocumentBuffer::from_text("hello");
        buf.replace(2..2, "");
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_mark_clean_and_dirty() {
        let mut buf = DocumentBuffer::from_text("hello");
        buf.insert(5, "!");
        buf.mark_clean();
        assert!(!buf.is_dirty());
        buf.mark_dirty();
        assert!(buf.is_dirty());
    }

    #[test]
    fn test_remove_clamps_range() {
        let mut buf = DocumentBuffer::from_text("abc");
        assert!(buf.remove(1..99));
        assert_eq!(buf.text(), "a");
        assert!(!buf.remove(5..9));
    }

    #[test]
    fn test_slice_multibyte() {
        let buf = DocumentBuffer::from_text("héllo wörld");
        assert_eq!(buf.slice(6..11), "wörld");
    }

    #[test]
    fn test_offset_and_position_agree() {
        let buf = DocumentBuffer::from_text("one\ntwo\nthree");
        assert_eq!(buf.offset_of(1, 2), 6);
        assert_eq!(buf.position_of(6), (1, 2));
        assert_eq!(buf.offset_of(9, 9), 13);
        assert_eq!(buf.position_of(99), (2, 5));
    }

    #[test]
    fn test_offset_of_clamps_column_to_line() {
        let buf = DocumentBuffer::from_text("hi\nthere");
        assert_eq!(buf.offset_of(0, 10), 2);
    }

    #[test]
    fn test_line_start() {
        let buf = DocumentBuffer::from_text("ab\ncd");
        assert_eq!(buf.line_start(1), 3);
        assert_eq!(buf.line_start(7), 3);
    }
}
