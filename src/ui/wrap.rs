//! Word wrapping of rendered document lines to the terminal width.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use super::fragment::fragment_to_line;

/// Formatted fragments laid out as screen rows.
///
/// The view-mode viewport scrolls over rows, not source lines; the layout
/// maps between the two when switching modes.
#[derive(Debug, Clone, Default)]
pub struct DocumentLayout {
    rows: Vec<Line<'static>>,
    /// First row of each source line.
    line_starts: Vec<usize>,
}

impl DocumentLayout {
    pub fn new(fragments: &[String], width: usize) -> Self {
        let mut rows = Vec::with_capacity(fragments.len());
        let mut line_starts = Vec::with_capacity(fragments.len());
        for html in fragments {
            line_starts.push(rows.len());
            rows.extend(wrap_line(fragment_to_line(html), width));
        }
        Self { rows, line_starts }
    }

    pub fn rows(&self) -> &[Line<'static>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// First row of source line `line`, clamped to the last line.
    pub fn row_of_line(&self, line: usize) -> usize {
        self.line_starts
            .get(line)
            .or_else(|| self.line_starts.last())
            .copied()
            .unwrap_or(0)
    }

    /// Source line that `row` belongs to.
    pub fn line_of_row(&self, row: usize) -> usize {
        self.line_starts
            .partition_point(|&start| start <= row)
            .saturating_sub(1)
    }
}

/// Break `line` into rows of at most `width` characters.
///
/// Breaks fall between words where possible; a word longer than a row is
/// split. Whitespace at the start of a continuation row is dropped. Every
/// row keeps the line's own style, so wrapped headings stay headings.
pub fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let line_style = line.style;
    let mut rows: Vec<Vec<Span<'static>>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut current_len = 0usize;
    let mut has_word = false;

    for token in line.spans.iter().flat_map(split_tokens) {
        let token_len = token.content.chars().count();
        let token_is_ws = token.content.chars().all(char::is_whitespace);

        if current_len + token_len > width && has_word {
            rows.push(take_row(&mut current));
            current_len = 0;
            has_word = false;
        }
        if token_is_ws && !has_word && !rows.is_empty() {
            continue;
        }

        if token_len > width.saturating_sub(current_len) {
            // Only an over-long word gets here; hard-break it.
            for ch in token.content.chars() {
                if current_len >= width {
                    rows.push(take_row(&mut current));
                    current_len = 0;
                }
                push_text(&mut current, ch.encode_utf8(&mut [0; 4]), token.style);
                current_len += 1;
            }
        } else {
            push_text(&mut current, &token.content, token.style);
            current_len += token_len;
        }
        has_word = has_word || !token_is_ws;
    }

    rows.push(current);
    rows.into_iter()
        .map(|spans| Line::from(spans).style(line_style))
        .collect()
}

/// Take the finished row, dropping the whitespace it ended on.
fn take_row(current: &mut Vec<Span<'static>>) -> Vec<Span<'static>> {
    let mut row = std::mem::take(current);
    while let Some(last) = row.last_mut() {
        let kept = last.content.trim_end().len();
        if kept > 0 {
            last.content.to_mut().truncate(kept);
            break;
        }
        row.pop();
    }
    row
}

fn push_text(spans: &mut Vec<Span<'static>>, text: &str, style: Style) {
    match spans.last_mut() {
        Some(last) if last.style == style => last.content.to_mut().push_str(text),
        _ => spans.push(Span::styled(text.to_owned(), style)),
    }
}

/// Split a span into alternating whitespace and word runs.
fn split_tokens(span: &Span<'static>) -> Vec<Span<'static>> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut in_ws: Option<bool> = None;

    for ch in span.content.chars() {
        let is_ws = ch.is_whitespace();
        if in_ws.is_some_and(|state| state != is_ws) {
            out.push(Span::styled(std::mem::take(&mut buf), span.style));
        }
        in_ws = Some(is_ws);
        buf.push(ch);
    }
    if !buf.is_empty() {
        out.push(Span::styled(buf, span.style));
    }
    out
}
