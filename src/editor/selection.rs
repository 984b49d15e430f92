use std::ops::Range;

use super::marker::FormatMarker;

/// A selection as character offsets into the buffer, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// Build a selection from two offsets in either order.
    pub const fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// An empty selection (a bare caret) at `offset`.
    pub const fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Clamp both ends to a buffer of `len` characters.
    pub fn clamped(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }

    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Where formatting commands read the selection from and put the caret back.
///
/// The terminal editor's text input implements this; tests and other hosts
/// can supply their own.
pub trait SelectionProvider {
    /// The current selection, or `None` when there is no input to read from.
    fn selection(&self) -> Option<Selection>;

    /// Collapse the selection to a caret at `offset`.
    fn place_caret(&mut self, offset: usize);
}

impl<P: SelectionProvider> SelectionProvider for Option<P> {
    fn selection(&self) -> Option<Selection> {
        self.as_ref().and_then(SelectionProvider::selection)
    }

    fn place_caret(&mut self, offset: usize) {
        if let Some(provider) = self {
            provider.place_caret(offset);
        }
    }
}

/// A fixed selection, for hosts that already know the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedSelection {
    pub selection: Selection,
    pub caret: Option<usize>,
}

impl FixedSelection {
    pub const fn new(start: usize, end: usize) -> Self {
        Self {
            selection: Selection::new(start, end),
            caret: None,
        }
    }
}

impl SelectionProvider for FixedSelection {
    fn selection(&self) -> Option<Selection> {
        Some(self.selection)
    }

    fn place_caret(&mut self, offset: usize) {
        self.caret = Some(offset);
        self.selection = Selection::caret(offset);
    }
}

/// The splice a formatting command performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatEdit {
    /// Character range being replaced.
    pub replaced: Selection,
    /// Text that replaces it.
    pub inserted: String,
    /// Caret position after the splice.
    pub caret: usize,
}

impl FormatEdit {
    /// Plan the edit for `marker` over `selected`, which starts at `start`.
    pub fn plan(marker: FormatMarker, selected: &str, start: usize) -> Self {
        let inserted = marker.wrap(selected);
        let caret = if selected.is_empty() {
            start + marker.caret_offset()
        } else {
            start + inserted.chars().count()
        };
        Self {
            replaced: Selection::new(start, start + selected.chars().count()),
            inserted,
            caret,
        }
    }
}

/// Result of [`apply_format`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedText {
    pub text: String,
    pub caret: usize,
}

/// Apply `marker` to `selection` of `text` and return the new text and caret.
///
/// Only the selected span is replaced; the rest of the text is untouched. No
/// nesting checks are made, so bolding bold text adds more asterisks.
pub fn apply_format(text: &str, marker: FormatMarker, selection: Selection) -> FormattedText {
    let selection = selection.clamped(text.chars().count());
    let start_byte = byte_offset(text, selection.start);
    let end_byte = byte_offset(text, selection.end);
    let edit = FormatEdit::plan(marker, &text[start_byte..end_byte], selection.start);

    let mut out = String::with_capacity(text.len() + edit.inserted.len());
    out.push_str(&text[..start_byte]);
    out.push_str(&edit.inserted);
    out.push_str(&text[end_byte..]);
    FormattedText {
        text: out,
        caret: edit.caret,
    }
}

fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte, _)| byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_splices_selection_only() {
        let result = apply_format("ab cde fg", FormatMarker::Bold, Selection::new(3, 6));
        assert_eq!(result.text, "ab **cde** fg");
        assert_eq!(result.caret, 10);
    }

    #[test]
    fn test_splice_is_exact_even_mid_word() {
        let result = apply_format("ab cde fg", FormatMarker::Bold, Selection::new(2, 5));
        assert_eq!(result.text, "ab** cd**e fg");
    }

    #[test]
    fn test_heading1_on_empty_buffer() {
        let result = apply_format("", FormatMarker::Heading1, Selection::caret(0));
        assert_eq!(result.text, "# ");
        assert_eq!(result.caret, 2);
    }

    #[test]
    fn test_empty_selection_caret_lands_inside_markers() {
        let result = apply_format("say ", FormatMarker::Bold, Selection::caret(4));
        assert_eq!(result.text, "say ****");
        assert_eq!(result.caret, 6);

        let result = apply_format("", FormatMarker::Heading2, Selection::caret(0));
        assert_eq!(result.caret, 3);
    }

    #[test]
    fn test_reversed_selection_is_normalized() {
        let result = apply_format("hello", FormatMarker::Italic, Selection::new(5, 0));
        assert_eq!(result.text, "_hello_");
        assert_eq!(result.caret, 7);
    }

    #[test]
    fn test_selection_past_end_is_clamped() {
        let result = apply_format("abc", FormatMarker::Bullet, Selection::new(1, 99));
        assert_eq!(result.text, "a* bc");
    }

    #[test]
    fn test_multibyte_offsets_are_characters() {
        let result = apply_format("héllo wörld", FormatMarker::Bold, Selection::new(6, 11));
        assert_eq!(result.text, "héllo **wörld**");
        assert_eq!(result.caret, 15);
    }

    #[test]
    fn test_no_smart_toggle() {
        let once = apply_format("x", FormatMarker::Bold, Selection::new(0, 1));
        let twice = apply_format(&once.text, FormatMarker::Bold, Selection::new(0, 5));
        assert_eq!(twice.text, "****x****");
    }

    #[test]
    fn test_option_provider_without_input_has_no_selection() {
        let provider: Option<FixedSelection> = None;
        assert_eq!(provider.selection(), None);
    }

    #[test]
    fn test_fixed_selection_records_caret() {
        let mut provider = FixedSelection::new(4, 1);
        assert_eq!(provider.selection(), Some(Selection::new(1, 4)));
        provider.place_caret(7);
        assert_eq!(provider.caret, Some(7));
        assert_eq!(provider.selection(), Some(Selection::caret(7)));
    }
}
