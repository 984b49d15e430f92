use crate::app::{Model, ToastLevel};
use crate::editor::{FormatMarker, Motion};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Navigation
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Scroll up half page
    HalfPageUp,
    /// Scroll down half page
    HalfPageDown,
    /// Go to beginning of document
    GoToTop,
    /// Go to end of document
    GoToBottom,

    // Editor
    /// Switch between view and edit mode
    ToggleEditMode,
    /// Enter edit mode
    EnterEditMode,
    /// Leave edit mode without saving (edits are kept)
    CancelEdit,
    /// Hand the buffer to the host for writing and return to view mode
    Save,
    /// Wrap the selection in a format marker
    ApplyFormat(FormatMarker),
    /// Write the standalone HTML export
    Export,
    /// Copy the buffer to the clipboard
    CopyContent,
    /// Insert a character at the caret
    EditorInsertChar(char),
    /// Insert text at the caret (paste)
    EditorInsertStr(String),
    /// Delete the selection or the character before the caret (Backspace)
    EditorDeleteBack,
    /// Delete the selection or the character at the caret (Delete)
    EditorDeleteForward,
    /// Split line at the caret (Enter)
    EditorSplitLine,
    /// Move the caret, dropping the selection
    EditorMove(Motion),
    /// Move the caret, extending the selection
    EditorSelect(Motion),
    /// Select the whole buffer
    EditorSelectAll,
    /// Move the caret to (line, col), e.g. from a mouse click
    EditorMoveTo(usize, usize),
    /// Scroll the edit surface up by n lines
    EditorScrollUp(usize),
    /// Scroll the edit surface down by n lines
    EditorScrollDown(usize),

    // Overlays
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function: saves only queue the
/// content, and exports and clipboard writes are left to the event loop.
pub fn update(mut model: Model, msg: Message) -> Model {
    // Reset the quit confirmation on any action other than quit or save, so
    // Ctrl+S can still complete a pending quit.
    if !matches!(msg, Message::Quit | Message::Save) {
        model.quit_confirmed = false;
    }

    match msg {
        // Navigation
        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),
        Message::HalfPageUp => model.viewport.half_page_up(),
        Message::HalfPageDown => model.viewport.half_page_down(),
        Message::GoToTop => model.viewport.go_to_top(),
        Message::GoToBottom => model.viewport.go_to_bottom(),

        // Editor
        Message::ToggleEditMode => {
            if model.editor.is_edit_mode() {
                leave_edit_mode(&mut model);
            } else {
                enter_edit_mode(&mut model);
            }
        }
        Message::EnterEditMode => {
            if !model.editor.is_edit_mode() {
                enter_edit_mode(&mut model);
            }
        }
        Message::CancelEdit => {
            if model.editor.is_edit_mode() {
                leave_edit_mode(&mut model);
            }
        }
        Message::Save => {
            if model.editor.is_edit_mode() {
                let pending = &mut model.pending_save;
                model
                    .editor
                    .save(|content| *pending = Some(content.to_owned()));
                restore_view(&mut model);
            }
        }
        Message::ApplyFormat(marker) => {
            if model.editor.apply_format(marker).is_some() {
                model.ensure_caret_visible();
            }
        }
        Message::EditorInsertChar(ch) => {
            edit(&mut model, |input, buf| input.insert_char(buf, ch));
        }
        Message::EditorInsertStr(text) => {
            edit(&mut model, |input, buf| input.insert_str(buf, &text));
        }
        Message::EditorDeleteBack => {
            edit(&mut model, |input, buf| {
                input.delete_back(buf);
            });
        }
        Message::EditorDeleteForward => {
            edit(&mut model, |input, buf| {
                input.delete_forward(buf);
            });
        }
        Message::EditorSplitLine => {
            edit(&mut model, |input, buf| input.split_line(buf));
        }
        Message::EditorMove(motion) => {
            edit(&mut model, |input, buf| input.apply_motion(buf, motion, false));
        }
        Message::EditorSelect(motion) => {
            edit(&mut model, |input, buf| input.apply_motion(buf, motion, true));
        }
        Message::EditorSelectAll => {
            edit(&mut model, |input, buf| input.select_all(buf));
        }
        Message::EditorMoveTo(line, col) => {
            edit(&mut model, |input, buf| input.move_to(buf, line, col));
        }
        Message::EditorScrollUp(n) => {
            model.editor_scroll_offset = model.editor_scroll_offset.saturating_sub(n);
        }
        Message::EditorScrollDown(n) => {
            model.editor_scroll_offset =
                (model.editor_scroll_offset + n).min(model.max_editor_scroll());
        }

        // Export and CopyContent: handled in effects
        // Redraw: no state change needed
        Message::Export | Message::CopyContent | Message::Redraw => {}

        // Overlays
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }

        // Window
        Message::Resize(width, height) => {
            model.viewport.resize(width, height.saturating_sub(1));
            model.sync_viewport();
            model.ensure_caret_visible();
        }

        // Application
        Message::Quit => {
            if model.editor.is_dirty() && !model.quit_confirmed {
                let hint = if model.editor.is_edit_mode() {
                    "Unsaved changes! Press Ctrl+Q again to quit, or Ctrl+S to save"
                } else {
                    "Unsaved changes! Press q again to quit"
                };
                model.show_toast(ToastLevel::Warning, hint);
                model.quit_confirmed = true;
            } else {
                model.should_quit = true;
            }
        }
    }
    model
}

fn enter_edit_mode(model: &mut Model) {
    model.editor.enter_edit_mode();
    // Start the caret at the source line of the first row shown in view mode.
    let line = model.document_layout().line_of_row(model.viewport.offset());
    model.editor.edit(|input, buf| input.move_to(buf, line, 0));
    model.editor_scroll_offset = line.min(model.max_editor_scroll());
    model.ensure_caret_visible();
}

fn leave_edit_mode(model: &mut Model) {
    model.editor.cancel();
    restore_view(model);
}

/// Return the view-mode viewport to where the edit surface was scrolled.
fn restore_view(model: &mut Model) {
    let layout = model.document_layout();
    model.viewport.set_total_lines(layout.row_count());
    model
        .viewport
        .go_to_line(layout.row_of_line(model.editor_scroll_offset));
    model.editor_scroll_offset = 0;
    model.editor_col_offset = 0;
}

/// Run a text-input edit, then keep the caret on screen.
fn edit(
    model: &mut Model,
    f: impl FnOnce(&mut crate::editor::TextInput, &mut crate::editor::DocumentBuffer),
) {
    if model.editor.edit(f).is_some() {
        model.ensure_caret_visible();
    }
}
