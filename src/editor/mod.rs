//! The inline BRD editor.
//!
//! [`BrdEditor`] owns the document buffer and switches between a read-only
//! formatted view and an edit surface. Formatting commands splice a fixed
//! marker template around the current selection; saving hands the buffer to
//! a host callback.

mod buffer;
mod input;
mod marker;
mod selection;

pub use buffer::DocumentBuffer;
pub use input::{Direction, Motion, TextInput};
pub use marker::{FormatMarker, MarkerParseError};
pub use selection::{
    FixedSelection, FormatEdit, FormattedText, Selection, SelectionProvider, apply_format,
};

use crate::export::ExportArtifact;
use crate::format;

/// Document buffer plus view/edit state.
///
/// The text input only exists in edit mode, so formatting commands in view
/// mode have no selection to read and do nothing.
#[derive(Debug, Default)]
pub struct BrdEditor {
    buffer: DocumentBuffer,
    input: Option<TextInput>,
}

impl BrdEditor {
    /// Create an editor in view mode holding `initial_content`.
    pub fn new(initial_content: &str) -> Self {
        Self {
            buffer: DocumentBuffer::from_text(initial_content),
            input: None,
        }
    }

    /// The full buffer text.
    pub fn content(&self) -> String {
        self.buffer.text()
    }

    pub const fn buffer(&self) -> &DocumentBuffer {
        &self.buffer
    }

    /// The text input, present only in edit mode.
    pub const fn input(&self) -> Option<&TextInput> {
        self.input.as_ref()
    }

    pub const fn is_edit_mode(&self) -> bool {
        self.input.is_some()
    }

    /// Whether the buffer changed since it was loaded or last saved.
    pub const fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Flag the buffer as unsaved, e.g. after a failed write.
    pub const fn mark_dirty(&mut self) {
        self.buffer.mark_dirty();
    }

    /// Run `f` with the text input and the buffer, if in edit mode.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut TextInput, &mut DocumentBuffer) -> R) -> Option<R> {
        let input = self.input.as_mut()?;
        Some(f(input, &mut self.buffer))
    }

    /// Flip between view and edit mode. The buffer is not touched.
    pub fn toggle_edit_mode(&mut self) {
        if self.is_edit_mode() {
            self.input = None;
        } else {
            self.input = Some(TextInput::new());
        }
        tracing::debug!(edit_mode = self.is_edit_mode(), "toggled edit mode");
    }

    /// Enter edit mode if not already there.
    pub fn enter_edit_mode(&mut self) {
        if !self.is_edit_mode() {
            self.toggle_edit_mode();
        }
    }

    /// Leave edit mode without saving.
    ///
    /// Edits made in this session stay in the buffer; nothing is rolled back.
    pub fn cancel(&mut self) {
        self.input = None;
    }

    /// Apply `marker` to the current selection of the text input.
    ///
    /// Returns the new caret offset, or `None` in view mode.
    pub fn apply_format(&mut self, marker: FormatMarker) -> Option<usize> {
        let mut input = self.input.take();
        let caret = self.apply_format_with(marker, &mut input);
        self.input = input;
        caret
    }

    /// Apply `marker` using `provider` for the selection and caret.
    ///
    /// A provider without a selection leaves the buffer unchanged.
    pub fn apply_format_with<P: SelectionProvider>(
        &mut self,
        marker: FormatMarker,
        provider: &mut P,
    ) -> Option<usize> {
        let selection = provider.selection()?.clamped(self.buffer.len_chars());
        let selected = self.buffer.slice(selection.range());
        let edit = FormatEdit::plan(marker, &selected, selection.start);
        self.buffer.replace(edit.replaced.range(), &edit.inserted);
        provider.place_caret(edit.caret);
        tracing::debug!(%marker, start = selection.start, end = selection.end, "applied format");
        Some(edit.caret)
    }

    /// Hand the buffer to `on_save`, mark it clean and leave edit mode.
    pub fn save(&mut self, on_save: impl FnOnce(&str)) {
        let content = self.buffer.text();
        on_save(&content);
        self.buffer.mark_clean();
        self.input = None;
        tracing::debug!(chars = content.chars().count(), "saved buffer");
    }

    /// Formatted fragments for view mode, one per line.
    pub fn rendered_lines(&self) -> Vec<String> {
        format::format_document(&self.buffer.text())
    }

    /// The standalone HTML export of the buffer.
    pub fn export_standalone_html(&self) -> ExportArtifact {
        ExportArtifact::from_content(&self.buffer.text())
    }
}
