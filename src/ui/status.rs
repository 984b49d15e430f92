use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

fn file_name(model: &Model) -> String {
    model.file_path.file_name().map_or_else(
        || "untitled".to_string(),
        |s| s.to_string_lossy().to_string(),
    )
}

fn dirty_indicator(model: &Model) -> &'static str {
    if model.editor.is_dirty() {
        " [modified]"
    } else {
        ""
    }
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let line_info = format!(
        "Line {}/{}",
        model.viewport.offset() + 1,
        model.viewport.total_lines()
    );
    let status = format!(
        " {}{}  [{}%]  {}  e:edit  d:export  ?:help",
        file_name(model),
        dirty_indicator(model),
        model.viewport.scroll_percent(),
        line_info,
    );
    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_editor_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let cursor_info = model.editor.input().map_or_else(String::new, |input| {
        let (line, col) = input.cursor_position(model.editor.buffer());
        let selected = input
            .selected()
            .map_or_else(String::new, |sel| format!(" ({} selected)", sel.len()));
        format!("  Ln {}, Col {}{selected}", line + 1, col + 1)
    });

    let status = format!(
        " EDIT  {}{}{cursor_info}  Esc:view  Ctrl+S:save",
        file_name(model),
        dirty_indicator(model),
    );
    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::Magenta).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
