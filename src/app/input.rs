use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;

use crate::app::{App, Message, Model};
use crate::editor::{Direction, FormatMarker, Motion};

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        &self,
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(*key, model),
            Event::Mouse(mouse) => self.handle_mouse(*mouse, model),
            Event::Paste(text) if model.editor.is_edit_mode() => {
                Some(Message::EditorInsertStr(text.replace("\r\n", "\n")))
            }
            Event::Resize(w, h) => {
                tracing::trace!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_mouse(&self, mouse: MouseEvent, model: &Model) -> Option<Message> {
        let _ = self;
        if model.help_visible {
            return None;
        }

        if model.editor.is_edit_mode() {
            return match mouse.kind {
                MouseEventKind::ScrollDown => Some(Message::EditorScrollDown(3)),
                MouseEventKind::ScrollUp => Some(Message::EditorScrollUp(3)),
                MouseEventKind::Down(MouseButton::Left) => editor_position_for_click(model, mouse)
                    .map(|(line, col)| Message::EditorMoveTo(line, col)),
                _ => None,
            };
        }

        match mouse.kind {
            MouseEventKind::ScrollDown if model.viewport.can_scroll_down() => {
                Some(Message::ScrollDown(3))
            }
            MouseEventKind::ScrollUp if model.viewport.can_scroll_up() => {
                Some(Message::ScrollUp(3))
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(&self, key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }
        if model.editor.is_edit_mode() {
            return self.handle_edit_key(key, model);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            // Navigation
            KeyCode::Char('j') | KeyCode::Down => {
                if model.viewport.can_scroll_down() {
                    Some(Message::ScrollDown(1))
                } else {
                    None
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if model.viewport.can_scroll_up() {
                    Some(Message::ScrollUp(1))
                } else {
                    None
                }
            }
            KeyCode::Char('d') if ctrl => {
                if model.viewport.can_scroll_down() {
                    Some(Message::HalfPageDown)
                } else {
                    None
                }
            }
            KeyCode::Char('u') if ctrl => {
                if model.viewport.can_scroll_up() {
                    Some(Message::HalfPageUp)
                } else {
                    None
                }
            }
            KeyCode::Char('c') if ctrl => Some(Message::Quit),
            KeyCode::Char(' ') | KeyCode::PageDown => {
                if model.viewport.can_scroll_down() {
                    Some(Message::PageDown)
                } else {
                    None
                }
            }
            KeyCode::Char('b') | KeyCode::PageUp => {
                if model.viewport.can_scroll_up() {
                    Some(Message::PageUp)
                } else {
                    None
                }
            }
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),

            // Document
            KeyCode::Char('e' | 'i') | KeyCode::Enter => Some(Message::EnterEditMode),
            KeyCode::Char('d') => Some(Message::Export),
            KeyCode::Char('y') => Some(Message::CopyContent),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),

            // Quit
            KeyCode::Char('q') => Some(Message::Quit),

            _ => None,
        }
    }

    fn handle_edit_key(&self, key: KeyEvent, model: &Model) -> Option<Message> {
        let _ = self;
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        if alt && let KeyCode::Char(c) = key.code {
            return format_shortcut(c).map(Message::ApplyFormat);
        }

        if ctrl {
            return match key.code {
                KeyCode::Char('s') => Some(Message::Save),
                KeyCode::Char('b') => Some(Message::ApplyFormat(FormatMarker::Bold)),
                KeyCode::Char('a') => Some(Message::EditorSelectAll),
                KeyCode::Char('e') => Some(Message::Export),
                KeyCode::Char('y') => Some(Message::CopyContent),
                KeyCode::Char('q' | 'c') => Some(Message::Quit),
                KeyCode::Left => Some(motion_message(Motion::WordLeft, shift)),
                KeyCode::Right => Some(motion_message(Motion::WordRight, shift)),
                KeyCode::Home => Some(motion_message(Motion::BufferStart, shift)),
                KeyCode::End => Some(motion_message(Motion::BufferEnd, shift)),
                _ => None,
            };
        }

        let page = model.editor_visible_rows().max(1);
        match key.code {
            KeyCode::Esc => Some(Message::CancelEdit),
            KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Enter => Some(Message::EditorSplitLine),
            KeyCode::Backspace => Some(Message::EditorDeleteBack),
            KeyCode::Delete => Some(Message::EditorDeleteForward),
            KeyCode::Tab => Some(Message::EditorInsertStr("  ".to_owned())),
            KeyCode::Left => Some(motion_message(Motion::Step(Direction::Left), shift)),
            KeyCode::Right => Some(motion_message(Motion::Step(Direction::Right), shift)),
            KeyCode::Up => Some(motion_message(Motion::Step(Direction::Up), shift)),
            KeyCode::Down => Some(motion_message(Motion::Step(Direction::Down), shift)),
            KeyCode::Home => Some(motion_message(Motion::LineStart, shift)),
            KeyCode::End => Some(motion_message(Motion::LineEnd, shift)),
            KeyCode::PageUp => Some(Message::EditorScrollUp(page)),
            KeyCode::PageDown => Some(Message::EditorScrollDown(page)),
            KeyCode::Char(c) => Some(Message::EditorInsertChar(c)),
            _ => None,
        }
    }

    pub(super) fn view(&self, model: &Model, frame: &mut Frame) {
        let _ = self;
        crate::ui::render(model, frame);
    }
}

/// Alt+key formatting shortcuts, matching the toolbar hints.
pub(super) fn format_shortcut(c: char) -> Option<FormatMarker> {
    crate::ui::MARKER_KEYS
        .iter()
        .find(|(_, key)| *key == c)
        .map(|(marker, _)| *marker)
}

const fn motion_message(motion: Motion, extend: bool) -> Message {
    if extend {
        Message::EditorSelect(motion)
    } else {
        Message::EditorMove(motion)
    }
}

/// Map a click on the edit surface to a buffer `(line, col)`.
fn editor_position_for_click(model: &Model, mouse: MouseEvent) -> Option<(usize, usize)> {
    let top = crate::ui::EDITOR_TOOLBAR_ROWS;
    if mouse.row < top {
        return None;
    }
    let rel_row = usize::from(mouse.row - top);
    if rel_row >= model.editor_visible_rows() {
        return None;
    }
    let buffer = model.editor.buffer();
    let line = model.editor_scroll_offset + rel_row;
    if line >= buffer.line_count() {
        return None;
    }
    let gutter = crate::ui::editor_gutter_width(buffer.line_count());
    let col = model.editor_col_offset + usize::from(mouse.column.saturating_sub(gutter));
    Some((line, col))
}
