use super::buffer::DocumentBuffer;
use super::selection::{Selection, SelectionProvider};

/// Direction for caret movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A caret movement, as bound to the navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Step(Direction),
    LineStart,
    LineEnd,
    WordLeft,
    WordRight,
    BufferStart,
    BufferEnd,
}

/// The edit-mode text input: a caret and an optional selection anchor.
///
/// Positions are character offsets into a [`DocumentBuffer`]. The input does
/// not own the buffer, so every operation that needs line structure takes it
/// as an argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    caret: usize,
    anchor: Option<usize>,
    /// Remembered column for vertical movement (sticky column).
    col_memory: Option<usize>,
}

impl TextInput {
    /// An input with the caret at the start of the buffer.
    pub const fn new() -> Self {
        Self {
            caret: 0,
            anchor: None,
            col_memory: None,
        }
    }

    /// An input with the caret at `offset`.
    pub const fn at(offset: usize) -> Self {
        Self {
            caret: offset,
            anchor: None,
            col_memory: None,
        }
    }

    /// Current caret offset.
    pub const fn caret(&self) -> usize {
        self.caret
    }

    /// Selection anchor, if a selection is being extended.
    pub const fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    /// The selected range, if it is non-empty.
    pub fn selected(&self) -> Option<Selection> {
        let selection = self.current_selection();
        (!selection.is_empty()).then_some(selection)
    }

    /// Caret as `(line, col)`.
    pub fn cursor_position(&self, buf: &DocumentBuffer) -> (usize, usize) {
        buf.position_of(self.caret)
    }

    /// Keep the caret and anchor inside `buf`.
    pub fn clamp_to(&mut self, buf: &DocumentBuffer) {
        let len = buf.len_chars();
        self.caret = self.caret.min(len);
        self.anchor = self.anchor.map(|a| a.min(len));
    }

    // --- Movement ---

    /// Perform `motion`, extending the selection when `extend` is set.
    pub fn apply_motion(&mut self, buf: &DocumentBuffer, motion: Motion, extend: bool) {
        match motion {
            Motion::Step(direction) => self.move_caret(buf, direction, extend),
            Motion::LineStart => self.move_home(buf, extend),
            Motion::LineEnd => self.move_end(buf, extend),
            Motion::WordLeft => self.move_word_left(buf, extend),
            Motion::WordRight => self.move_word_right(buf, extend),
            Motion::BufferStart => self.move_to_start(extend),
            Motion::BufferEnd => self.move_to_end(buf, extend),
        }
    }

    /// Move the caret one step. With `extend`, the selection grows from the
    /// point where extension started; without it the selection is dropped.
    pub fn move_caret(&mut self, buf: &DocumentBuffer, direction: Direction, extend: bool) {
        self.begin_move(extend);
        let (line, col) = buf.position_of(self.caret);
        match direction {
            Direction::Left => {
                if col > 0 {
                    self.set_caret(buf.offset_of(line, col - 1));
                } else if line > 0 {
                    self.set_caret(buf.offset_of(line - 1, buf.line_len(line - 1)));
                }
            }
            Direction::Right => {
                if col < buf.line_len(line) {
                    self.set_caret(buf.offset_of(line, col + 1));
                } else if line + 1 < buf.line_count() {
                    self.set_caret(buf.line_start(line + 1));
                }
            }
            Direction::Up => {
                if line > 0 {
                    self.move_vertical(buf, line - 1, col);
                }
            }
            Direction::Down => {
                if line + 1 < buf.line_count() {
                    self.move_vertical(buf, line + 1, col);
                }
            }
        }
    }

    /// Move to the beginning of the line (Home).
    pub fn move_home(&mut self, buf: &DocumentBuffer, extend: bool) {
        self.begin_move(extend);
        let (line, _) = buf.position_of(self.caret);
        self.set_caret(buf.line_start(line));
    }

    /// Move to the end of the line (End).
    pub fn move_end(&mut self, buf: &DocumentBuffer, extend: bool) {
        self.begin_move(extend);
        let (line, _) = buf.position_of(self.caret);
        self.set_caret(buf.offset_of(line, buf.line_len(line)));
    }

    /// Move one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self, buf: &DocumentBuffer, extend: bool) {
        self.begin_move(extend);
        let (line, col) = buf.position_of(self.caret);
        if col == 0 {
            if line > 0 {
                self.set_caret(buf.offset_of(line - 1, buf.line_len(line - 1)));
            }
            return;
        }

        let chars: Vec<char> = buf.line_at(line).unwrap_or_default().chars().collect();
        let mut pos = col.min(chars.len());
        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && is_word_char(chars[pos - 1]) {
            pos -= 1;
        }
        if pos == col {
            // Punctuation run: step over it as one unit.
            while pos > 0 && !is_word_char(chars[pos - 1]) && !chars[pos - 1].is_whitespace() {
                pos -= 1;
            }
        }
        self.set_caret(buf.offset_of(line, pos));
    }

    /// Move one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self, buf: &DocumentBuffer, extend: bool) {
        self.begin_move(extend);
        let (line, col) = buf.position_of(self.caret);
        let line_len = buf.line_len(line);
        if col >= line_len {
            if line + 1 < buf.line_count() {
                self.set_caret(buf.line_start(line + 1));
            }
            return;
        }

        let chars: Vec<char> = buf.line_at(line).unwrap_or_default().chars().collect();
        let mut pos = col;
        while pos < chars.len() && is_word_char(chars[pos]) {
            pos += 1;
        }
        while pos < chars.len() && !is_word_char(chars[pos]) {
            pos += 1;
        }
        self.set_caret(buf.offset_of(line, pos));
    }

    /// Move to the start of the buffer (Ctrl+Home).
    pub fn move_to_start(&mut self, extend: bool) {
        self.begin_move(extend);
        self.set_caret(0);
    }

    /// Move to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self, buf: &DocumentBuffer, extend: bool) {
        self.begin_move(extend);
        self.set_caret(buf.len_chars());
    }

    /// Place the caret at `(line, col)`, clamped, dropping any selection.
    pub fn move_to(&mut self, buf: &DocumentBuffer, line: usize, col: usize) {
        self.begin_move(false);
        self.set_caret(buf.offset_of(line, col));
    }

    /// Select the whole buffer.
    pub fn select_all(&mut self, buf: &DocumentBuffer) {
        self.anchor = Some(0);
        self.set_caret(buf.len_chars());
    }

    // --- Editing ---

    /// Insert a string at the caret, replacing the selection.
    pub fn insert_str(&mut self, buf: &mut DocumentBuffer, text: &str) {
        let range = self.current_selection().clamped(buf.len_chars());
        if range.is_empty() && text.is_empty() {
            return;
        }
        let end = buf.replace(range.range(), text);
        self.anchor = None;
        self.set_caret(end);
    }

    /// Insert a character at the caret, replacing the selection.
    pub fn insert_char(&mut self, buf: &mut DocumentBuffer, ch: char) {
        let mut tmp = [0u8; 4];
        self.insert_str(buf, ch.encode_utf8(&mut tmp));
    }

    /// Split the line at the caret (Enter).
    pub fn split_line(&mut self, buf: &mut DocumentBuffer) {
        self.insert_str(buf, "\n");
    }

    /// Delete the selection, or the character before the caret (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_back(&mut self, buf: &mut DocumentBuffer) -> bool {
        if self.delete_selection(buf) {
            return true;
        }
        let (line, col) = buf.position_of(self.caret);
        let start = if col > 0 {
            buf.offset_of(line, col - 1)
        } else if line > 0 {
            buf.offset_of(line - 1, buf.line_len(line - 1))
        } else {
            return false;
        };
        let caret = buf.offset_of(line, col);
        buf.remove(start..caret);
        self.set_caret(start);
        true
    }

    /// Delete the selection, or the character at the caret (Delete).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self, buf: &mut DocumentBuffer) -> bool {
        if self.delete_selection(buf) {
            return true;
        }
        let (line, col) = buf.position_of(self.caret);
        let caret = buf.offset_of(line, col);
        let end = if col < buf.line_len(line) {
            caret + 1
        } else if line + 1 < buf.line_count() {
            buf.line_start(line + 1)
        } else {
            return false;
        };
        buf.remove(caret..end);
        self.set_caret(caret);
        true
    }

    // --- Private helpers ---

    fn current_selection(&self) -> Selection {
        Selection::new(self.anchor.unwrap_or(self.caret), self.caret)
    }

    fn delete_selection(&mut self, buf: &mut DocumentBuffer) -> bool {
        let Some(selection) = self.selected() else {
            self.anchor = None;
            return false;
        };
        let selection = selection.clamped(buf.len_chars());
        buf.remove(selection.range());
        self.anchor = None;
        self.set_caret(selection.start);
        true
    }

    const fn begin_move(&mut self, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.caret);
            }
        } else {
            self.anchor = None;
        }
    }

    const fn set_caret(&mut self, offset: usize) {
        self.caret = offset;
        self.col_memory = None;
    }

    fn move_vertical(&mut self, buf: &DocumentBuffer, target_line: usize, col: usize) {
        let wanted = self.col_memory.unwrap_or(col);
        self.caret = buf.offset_of(target_line, wanted);
        self.col_memory = Some(wanted);
    }
}

impl SelectionProvider for TextInput {
    fn selection(&self) -> Option<Selection> {
        Some(self.current_selection())
    }

    fn place_caret(&mut self, offset: usize) {
        self.anchor = None;
        self.set_caret(offset);
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(text: &str) -> (DocumentBuffer, TextInput) {
        (DocumentBuffer::from_text(text), TextInput::new())
    }

    // --- Insertion ---

    #[test]
    fn test_insert_char_at_start() {
        let (mut buf, mut input) = setup("hello");
        input.insert_char(&mut buf, 'H');
        assert_eq!(buf.text(), "Hhello");
        assert_eq!(input.cursor_position(&buf), (0, 1));
        assert!(buf.is_dirty());
    }

    #[test]
    fn test_insert_str_multiline_moves_caret_to_end() {
        let (mut buf, mut input) = setup("ab");
        input.move_to(&buf, 0, 1);
        input.insert_str(&mut buf, "x\ny");
        assert_eq!(buf.text(), "ax\nyb");
        assert_eq!(input.cursor_position(&buf), (1, 1));
    }

    #[test]
    fn test_insert_str_empty_is_noop() {
        let (mut buf, mut input) = setup("hello");
        input.insert_str(&mut buf, "");
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_typing_replaces_selection() {
        let (mut buf, mut input) = setup("hello world");
        input.move_to(&buf, 0, 6);
        input.move_end(&buf, true);
        input.insert_char(&mut buf, 'X');
        assert_eq!(buf.text(), "hello X");
        assert_eq!(input.selected(), None);
    }

    #[test]
    fn test_split_line_in_middle() {
        let (mut buf, mut input) = setup("hello world");
        input.move_to(&buf, 0, 5);
        input.split_line(&mut buf);
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some(" world".to_string()));
        assert_eq!(input.cursor_position(&buf), (1, 0));
    }

    // --- Deletion ---

    #[test]
    fn test_delete_back_at_start_is_noop() {
        let (mut buf, mut input) = setup("hello");
        assert!(!input.delete_back(&mut buf));
        assert!(!buf.is_dirty());
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let (mut buf, mut input) = setup("hello\nworld");
        input.move_to(&buf, 1, 0);
        assert!(input.delete_back(&mut buf));
        assert_eq!(buf.text(), "helloworld");
        assert_eq!(input.cursor_position(&buf), (0, 5));
    }

    #[test]
    fn test_delete_back_joins_crlf_lines() {
        let (mut buf, mut input) = setup("ab\r\ncd");
        input.move_to(&buf, 1, 0);
        input.delete_back(&mut buf);
        assert_eq!(buf.text(), "abcd");
    }

    #[test]
    fn test_delete_back_multibyte() {
        let (mut buf, mut input) = setup("café");
        input.move_end(&buf, false);
        input.delete_back(&mut buf);
        assert_eq!(buf.text(), "caf");
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let (mut buf, mut input) = setup("hello");
        input.move_end(&buf, false);
        assert!(!input.delete_forward(&mut buf));
    }

    #[test]
    fn test_delete_forward_joins_lines() {
        let (mut buf, mut input) = setup("hello\nworld");
        input.move_to(&buf, 0, 5);
        input.delete_forward(&mut buf);
        assert_eq!(buf.text(), "helloworld");
        assert_eq!(input.cursor_position(&buf), (0, 5));
    }

    #[test]
    fn test_delete_removes_selection() {
        let (mut buf, mut input) = setup("one two three");
        input.move_to(&buf, 0, 4);
        input.move_word_right(&buf, true);
        assert!(input.delete_forward(&mut buf));
        assert_eq!(buf.text(), "one three");
        assert_eq!(input.caret(), 4);
    }

    // --- Movement ---

    #[test]
    fn test_move_left_wraps_to_prev_line() {
        let (buf, mut input) = setup("hello\nworld");
        input.move_to(&buf, 1, 0);
        input.move_caret(&buf, Direction::Left, false);
        assert_eq!(input.cursor_position(&buf), (0, 5));
    }

    #[test]
    fn test_move_right_wraps_to_next_line() {
        let (buf, mut input) = setup("hello\nworld");
        input.move_to(&buf, 0, 5);
        input.move_caret(&buf, Direction::Right, false);
        assert_eq!(input.cursor_position(&buf), (1, 0));
    }

    #[test]
    fn test_move_right_at_end_is_noop() {
        let (buf, mut input) = setup("hi");
        input.move_to_end(&buf, false);
        input.move_caret(&buf, Direction::Right, false);
        assert_eq!(input.caret(), 2);
    }

    #[test]
    fn test_column_memory_across_short_line() {
        let (buf, mut input) = setup("hello\nhi\nworld");
        input.move_to(&buf, 0, 4);
        input.move_caret(&buf, Direction::Down, false);
        assert_eq!(input.cursor_position(&buf), (1, 2));
        input.move_caret(&buf, Direction::Down, false);
        assert_eq!(input.cursor_position(&buf), (2, 4));
    }

    #[test]
    fn test_move_up_at_first_line_is_noop() {
        let (buf, mut input) = setup("hello\nworld");
        input.move_to(&buf, 0, 3);
        input.move_caret(&buf, Direction::Up, false);
        assert_eq!(input.cursor_position(&buf), (0, 3));
    }

    #[test]
    fn test_home_and_end() {
        let (buf, mut input) = setup("one\ntwo words");
        input.move_to(&buf, 1, 3);
        input.move_home(&buf, false);
        assert_eq!(input.cursor_position(&buf), (1, 0));
        input.move_end(&buf, false);
        assert_eq!(input.cursor_position(&buf), (1, 9));
    }

    #[test]
    fn test_move_word_left_from_middle_of_word() {
        let (buf, mut input) = setup("hello world");
        input.move_to(&buf, 0, 8);
        input.move_word_left(&buf, false);
        assert_eq!(input.caret(), 6);
        input.move_word_left(&buf, false);
        assert_eq!(input.caret(), 0);
    }

    #[test]
    fn test_move_word_left_over_punctuation() {
        let (buf, mut input) = setup("a **b");
        input.move_to(&buf, 0, 4);
        input.move_word_left(&buf, false);
        assert_eq!(input.caret(), 2);
    }

    #[test]
    fn test_move_word_right_from_start() {
        let (buf, mut input) = setup("hello world");
        input.move_word_right(&buf, false);
        assert_eq!(input.caret(), 6);
    }

    #[test]
    fn test_move_word_right_at_end_of_line_wraps() {
        let (buf, mut input) = setup("hello\nworld");
        input.move_to(&buf, 0, 5);
        input.move_word_right(&buf, false);
        assert_eq!(input.cursor_position(&buf), (1, 0));
    }

    #[test]
    fn test_move_to_clamps() {
        let (buf, mut input) = setup("hello");
        input.move_to(&buf, 100, 100);
        assert_eq!(input.cursor_position(&buf), (0, 5));
    }

    // --- Selection ---

    #[test]
    fn test_shift_right_extends_selection() {
        let (buf, mut input) = setup("abcdef");
        input.move_to(&buf, 0, 1);
        input.move_caret(&buf, Direction::Right, true);
        input.move_caret(&buf, Direction::Right, true);
        assert_eq!(input.selected(), Some(Selection::new(1, 3)));
    }

    #[test]
    fn test_backwards_selection_is_normalized() {
        let (buf, mut input) = setup("abcdef");
        input.move_to(&buf, 0, 4);
        input.move_caret(&buf, Direction::Left, true);
        input.move_caret(&buf, Direction::Left, true);
        assert_eq!(input.selection(), Some(Selection::new(2, 4)));
    }

    #[test]
    fn test_plain_move_drops_selection() {
        let (buf, mut input) = setup("abcdef");
        input.select_all(&buf);
        input.move_caret(&buf, Direction::Left, false);
        assert_eq!(input.selected(), None);
    }

    #[test]
    fn test_apply_motion_extends_by_word() {
        let (buf, mut input) = setup("alpha beta");
        input.apply_motion(&buf, Motion::WordRight, true);
        assert_eq!(input.selected(), Some(Selection::new(0, 6)));
        input.apply_motion(&buf, Motion::BufferEnd, false);
        assert_eq!(input.selected(), None);
        assert_eq!(input.caret(), 10);
    }

    #[test]
    fn test_select_all() {
        let (buf, mut input) = setup("ab\ncd");
        input.select_all(&buf);
        assert_eq!(input.selection(), Some(Selection::new(0, 5)));
    }

    #[test]
    fn test_empty_selection_reports_caret() {
        let (buf, mut input) = setup("abc");
        input.move_to(&buf, 0, 2);
        assert_eq!(input.selection(), Some(Selection::caret(2)));
        assert_eq!(input.selected(), None);
    }

    #[test]
    fn test_place_caret_collapses_selection() {
        let (buf, mut input) = setup("abc");
        input.select_all(&buf);
        input.place_caret(1);
        assert_eq!(input.selection(), Some(Selection::caret(1)));
    }

    #[test]
    fn test_clamp_to_shrunk_buffer() {
        let mut input = TextInput::at(50);
        let buf = DocumentBuffer::from_text("short");
        input.clamp_to(&buf);
        assert_eq!(input.caret(), 5);
    }
}
