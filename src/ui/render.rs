use std::ops::Range;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;
use crate::editor::{DocumentBuffer, Selection, TextInput};

use super::{DOCUMENT_LEFT_PADDING, EDITOR_TOOLBAR_ROWS, MARKER_KEYS, overlays, status, style};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();

    if model.editor.is_edit_mode() {
        render_editor(model, frame, area);
    } else {
        render_document(model, frame, area);
    }

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

/// Split `area` into body, optional toast row and status row.
fn footer_layout(model: &Model, area: Rect) -> (Rect, Option<Rect>, Rect) {
    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(toast_active);
    let body = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let toast = toast_active.then(|| Rect {
        y: area.y + area.height.saturating_sub(2),
        height: 1,
        ..area
    });
    let status = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };
    (body, toast, status)
}

fn render_document(model: &Model, frame: &mut Frame, area: Rect) {
    let (doc_outer_area, toast_area, status_area) = footer_layout(model, area);

    let layout = model.document_layout();
    let range = model.viewport.visible_range();
    let content = layout.rows().get(range).unwrap_or_default().to_vec();

    let doc_block = Block::default()
        .borders(Borders::NONE)
        .padding(Padding::left(DOCUMENT_LEFT_PADDING));
    frame.render_widget(Clear, doc_outer_area);
    frame.render_widget(Paragraph::new(content).block(doc_block), doc_outer_area);

    if let Some(toast_area) = toast_area {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(input) = model.editor.input() else {
        return;
    };
    let buf = model.editor.buffer();

    let (body, toast_area, status_area) = footer_layout(model, area);
    let toolbar_area = Rect {
        height: EDITOR_TOOLBAR_ROWS.min(body.height),
        ..body
    };
    let editor_area = Rect {
        y: body.y + toolbar_area.height,
        height: body.height.saturating_sub(toolbar_area.height),
        ..body
    };

    frame.render_widget(Paragraph::new(toolbar_line()).style(style::toolbar_style()), toolbar_area);

    let total_lines = buf.line_count();
    let gutter_digits = usize::from(line_number_width(total_lines));
    let start = model.editor_scroll_offset;
    let end = (start + usize::from(editor_area.height)).min(total_lines);
    let first_col = model.editor_col_offset;
    let cols = first_col..first_col + model.editor_text_width();

    let content: Vec<Line> = (start..end)
        .map(|line_idx| {
            let line_num = format!("{:>gutter_digits$} ", line_idx + 1);
            let mut spans = vec![Span::styled(line_num, style::gutter_style())];
            spans.extend(editor_line_spans(buf, input, line_idx, cols.clone()));
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Clear, editor_area);
    frame.render_widget(Paragraph::new(content), editor_area);

    if let Some(toast_area) = toast_area {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_editor_status_bar(model, frame, status_area);
}

fn toolbar_line() -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (idx, (marker, key)) in MARKER_KEYS.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" \u{2502} "));
        }
        spans.push(Span::raw(marker.label()));
        spans.push(Span::styled(format!(" Alt-{key}"), style::toolbar_key_style()));
    }
    Line::from(spans)
}

/// Raw text of one buffer line within the column window `cols`, with the
/// caret and selection highlighted.
fn editor_line_spans(
    buf: &DocumentBuffer,
    input: &TextInput,
    line_idx: usize,
    cols: Range<usize>,
) -> Vec<Span<'static>> {
    let line_text = buf.line_at(line_idx).unwrap_or_default();
    let line_start = buf.line_start(line_idx);
    let caret = input.caret();
    let selection = input.selected();

    let style_at = |offset: usize| {
        if offset == caret {
            style::caret_style()
        } else if selection.is_some_and(|sel: Selection| sel.range().contains(&offset)) {
            style::selection_style()
        } else {
            Style::default()
        }
    };

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    let line_len = line_text.chars().count();
    for (col, ch) in line_text.chars().enumerate().skip(cols.start).take(cols.len()) {
        let ch_style = style_at(line_start + col);
        if ch_style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = ch_style;
        run.push(ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    if caret == line_start + line_len && cols.contains(&line_len) {
        spans.push(Span::styled(" ", style::caret_style()));
    }
    spans
}

/// Digits needed for the largest line number.
pub const fn line_number_width(total_lines: usize) -> u16 {
    let mut width = 1;
    let mut rest = total_lines / 10;
    while rest > 0 {
        width += 1;
        rest /= 10;
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_number_width() {
        assert_eq!(line_number_width(0), 1);
        assert_eq!(line_number_width(9), 1);
        assert_eq!(line_number_width(10), 2);
        assert_eq!(line_number_width(999), 3);
        assert_eq!(line_number_width(1_000), 4);
    }

    #[test]
    fn test_caret_at_line_end_gets_a_cell() {
        let buf = DocumentBuffer::from_text("ab\ncd");
        let input = TextInput::at(2);
        let spans = editor_line_spans(&buf, &input, 0, 0..80);
        let last = spans.last().map(|span| span.content.to_string());
        assert_eq!(last.as_deref(), Some(" "));
        let other = editor_line_spans(&buf, &input, 1, 0..80);
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].content, "cd");
    }

    #[test]
    fn test_selection_is_split_into_its_own_span() {
        let buf = DocumentBuffer::from_text("hello world");
        let mut input = TextInput::at(0);
        input.move_word_right(&buf, true);
        let spans = editor_line_spans(&buf, &input, 0, 0..80);
        let texts: Vec<String> = spans.iter().map(|span| span.content.to_string()).collect();
        let joined: String = texts.concat();
        assert_eq!(joined, "hello world");
        assert!(spans.len() >= 2);
    }

    #[test]
    fn test_column_window_clips_line() {
        let buf = DocumentBuffer::from_text("abcdefghij");
        let input = TextInput::at(10);
        let spans = editor_line_spans(&buf, &input, 0, 6..11);
        let texts: Vec<String> = spans.iter().map(|span| span.content.to_string()).collect();
        assert_eq!(texts, vec!["ghij", " "]);
        assert_eq!(spans[1].style, style::caret_style());

        let hidden = editor_line_spans(&buf, &input, 0, 0..4);
        let texts: Vec<String> = hidden.iter().map(|span| span.content.to_string()).collect();
        assert_eq!(texts, vec!["abcd"]);
    }
}
