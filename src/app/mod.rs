//! The terminal host for the BRD editor.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! Saving, exporting and clipboard writes run as side effects after
//! `update`, and report their outcome as toasts.

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: PathBuf,
    start_in_edit: bool,
    export_dir: Option<PathBuf>,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application for the given BRD file.
    pub const fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            start_in_edit: false,
            export_dir: None,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Open the document straight into edit mode.
    pub const fn with_edit_mode(mut self, enabled: bool) -> Self {
        self.start_in_edit = enabled;
        self
    }

    /// Write exports here instead of next to the BRD file.
    pub fn with_export_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.export_dir = dir;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
