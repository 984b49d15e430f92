//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Theming and colors
//! - [`fragment`]: Formatter fragments as styled terminal lines
//! - [`wrap`]: Word wrapping of those lines into screen rows

pub mod fragment;
pub mod style;
pub mod viewport;
pub mod wrap;

mod overlays;
mod render;
mod status;

pub use overlays::MARKER_KEYS;
pub use render::{line_number_width, render};
pub use wrap::DocumentLayout;

pub const DOCUMENT_LEFT_PADDING: u16 = 2;

/// Rows above the text in edit mode.
pub const EDITOR_TOOLBAR_ROWS: u16 = 1;

/// Columns taken by the line-number gutter, including its trailing space.
pub const fn editor_gutter_width(line_count: usize) -> u16 {
    line_number_width(line_count) + 1
}
