use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;
use crate::editor::FormatMarker;

const VIEW_KEYS: [(&str, &str); 9] = [
    ("j/k or Up/Down", "Scroll"),
    ("Space/PageDown", "Page down"),
    ("b/PageUp", "Page up"),
    ("Ctrl-d / Ctrl-u", "Half page"),
    ("g / G", "Top / bottom"),
    ("e / i / Enter", "Edit document"),
    ("d", "Export BRD_Document.html"),
    ("y", "Copy content"),
    ("q / Ctrl-c", "Quit"),
];

const EDIT_KEYS: [(&str, &str); 8] = [
    ("Esc", "Back to view (keeps edits)"),
    ("Ctrl-s", "Save"),
    ("Ctrl-e / Ctrl-y", "Export / copy"),
    ("Shift+arrows", "Select"),
    ("Ctrl-a", "Select all"),
    ("Ctrl+Left/Right", "Word movement"),
    ("Ctrl+Home/End", "Buffer start / end"),
    ("Ctrl-q", "Quit"),
];

/// Alt shortcut for each toolbar marker, in toolbar order.
pub const MARKER_KEYS: [(FormatMarker, char); 5] = [
    (FormatMarker::Bold, 'b'),
    (FormatMarker::Italic, 'i'),
    (FormatMarker::Heading1, '1'),
    (FormatMarker::Heading2, '2'),
    (FormatMarker::Bullet, 'l'),
];

fn key_line(key: &str, action: &str) -> Line<'static> {
    Line::raw(format!("  {key:<20}{action}"))
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = vec![Line::styled("View", section_style)];
    lines.extend(VIEW_KEYS.iter().map(|(key, action)| key_line(key, action)));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Edit", section_style));
    lines.extend(EDIT_KEYS.iter().map(|(key, action)| key_line(key, action)));
    lines.extend(
        MARKER_KEYS
            .iter()
            .map(|(marker, key)| key_line(&format!("Alt-{key}"), marker.label())),
    );
    lines.push(Line::raw(""));

    lines.push(Line::styled("Config", section_style));
    lines.push(Line::raw(format!("  Global: {global_cfg}")));
    lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title("Help")
        .title_bottom(Line::styled(
            " any key closes ",
            Style::default().fg(Color::Indexed(245)),
        ))
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
