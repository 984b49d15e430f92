// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. export::ExportError)
    clippy::module_name_repetitions
)]

//! # brdwiz
//!
//! A terminal viewer and editor for Business Requirements Documents written
//! in a small markdown subset.
//!
//! - Per-line formatting of `**bold**`, `_italic_`, `#` headings and `* `
//!   bullets into HTML fragments
//! - A rope-backed editor with toolbar formatting commands
//! - Standalone HTML export (`BRD_Document.html`)
//!
//! ## Architecture
//!
//! The terminal host uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`format`]: Line formatter
//! - [`editor`]: Document buffer, text input and formatting commands
//! - [`export`]: Standalone HTML export
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved default flags

pub mod app;
pub mod config;
pub mod editor;
pub mod export;
pub mod format;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{BrdEditor, FormatMarker, Selection, SelectionProvider};
    pub use crate::ui::viewport::Viewport;
}
