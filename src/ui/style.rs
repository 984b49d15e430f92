//! Theming and color definitions.
//!
//! Styles use ANSI colors that follow the terminal palette. On light
//! backgrounds the bright heading colors are swapped for darker indexed ones.

use std::sync::{Mutex, OnceLock};

use ratatui::style::{Color, Modifier, Style};

/// Terminal background the palette is tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Dark,
    Light,
}

static BACKGROUND_OVERRIDE: OnceLock<Mutex<Option<Background>>> = OnceLock::new();

/// Force a background, or `None` to detect it from `COLORFGBG`.
pub fn set_background(mode: Option<Background>) {
    let lock = BACKGROUND_OVERRIDE.get_or_init(|| Mutex::new(None));
    if let Ok(mut guard) = lock.lock() {
        *guard = mode;
    }
}

/// The background in effect: the override if set, else `COLORFGBG`.
pub fn background() -> Background {
    let lock = BACKGROUND_OVERRIDE.get_or_init(|| Mutex::new(None));
    if let Ok(guard) = lock.lock()
        && let Some(mode) = *guard
    {
        return mode;
    }
    background_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn background_from_colorfgbg(colorfgbg: Option<&str>) -> Background {
    let Some(value) = colorfgbg else {
        return Background::Dark;
    };
    let bg_str = value.rsplit(';').next().unwrap_or(value);
    match bg_str.parse::<u8>() {
        Ok(bg) if bg >= 7 => Background::Light,
        _ => Background::Dark,
    }
}

/// Style for a rendered `<h1>`..`<h3>` line.
pub fn heading_style(level: u8) -> Style {
    heading_style_for(level, background())
}

fn heading_style_for(level: u8, bg: Background) -> Style {
    let light = bg == Background::Light;
    match level {
        1 => Style::default()
            .fg(if light { Color::Indexed(24) } else { Color::Cyan })
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        2 => Style::default()
            .fg(if light { Color::Indexed(22) } else { Color::Green })
            .add_modifier(Modifier::BOLD),
        _ => Style::default()
            .fg(if light { Color::Indexed(58) } else { Color::Yellow })
            .add_modifier(Modifier::BOLD),
    }
}

/// Style for the bullet glyph of a list item.
pub fn bullet_style() -> Style {
    let fg = match background() {
        Background::Light => Color::Indexed(90),
        Background::Dark => Color::Magenta,
    };
    Style::default().fg(fg)
}

pub fn strong_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

pub fn emphasis_style() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

pub fn gutter_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn caret_style() -> Style {
    Style::default().bg(Color::White).fg(Color::Black)
}

pub fn selection_style() -> Style {
    let bg = match background() {
        Background::Light => Color::Indexed(153),
        Background::Dark => Color::DarkGray,
    };
    Style::default().bg(bg)
}

pub fn toolbar_style() -> Style {
    Style::default().bg(Color::Blue).fg(Color::White)
}

pub fn toolbar_key_style() -> Style {
    toolbar_style().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}
