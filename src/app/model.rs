use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::editor::BrdEditor;
use crate::export;
use crate::ui::viewport::Viewport;
use crate::ui::{DOCUMENT_LEFT_PADDING, DocumentLayout, editor_gutter_width};

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The document and its view/edit state
    pub editor: BrdEditor,
    /// View-mode scroll position, in wrapped rows
    pub viewport: Viewport,
    /// Path of the BRD file being edited
    pub file_path: PathBuf,
    /// Directory exports are written to
    pub export_dir: PathBuf,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Whether help overlay is visible
    pub help_visible: bool,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Set after first quit attempt with unsaved changes; a second quit proceeds
    pub quit_confirmed: bool,
    /// First buffer line shown in edit mode
    pub editor_scroll_offset: usize,
    /// First buffer column shown in edit mode
    pub editor_col_offset: usize,
    /// Content handed over by a save, waiting to be written to disk
    pub(super) pending_save: Option<String>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("edit_mode", &self.editor.is_edit_mode())
            .field("dirty", &self.editor.is_dirty())
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model in view mode for `content` loaded from `file_path`.
    pub fn new(file_path: PathBuf, content: &str, terminal_size: (u16, u16)) -> Self {
        let export_dir = export::default_export_dir(&file_path);
        let mut model = Self {
            editor: BrdEditor::new(content),
            viewport: Viewport::new(terminal_size.0, terminal_size.1.saturating_sub(1), 0),
            file_path,
            export_dir,
            ..Self::default()
        };
        model.sync_viewport();
        model
    }

    /// The rendered document wrapped to the view width.
    pub fn document_layout(&self) -> DocumentLayout {
        let width = self.viewport.width().saturating_sub(DOCUMENT_LEFT_PADDING);
        DocumentLayout::new(&self.editor.rendered_lines(), usize::from(width))
    }

    /// Rows available to buffer lines in edit mode (below the toolbar).
    pub fn editor_visible_rows(&self) -> usize {
        usize::from(self.viewport.height().saturating_sub(1))
    }

    /// Columns available to buffer text in edit mode (right of the gutter).
    pub fn editor_text_width(&self) -> usize {
        let gutter = editor_gutter_width(self.editor.buffer().line_count());
        usize::from(self.viewport.width().saturating_sub(gutter))
    }

    /// Keep the view-mode row count in step with the buffer and width.
    pub(super) fn sync_viewport(&mut self) {
        let rows = self.document_layout().row_count();
        self.viewport.set_total_lines(rows);
    }

    /// Scroll the edit surface so the caret line is on screen.
    pub(super) fn ensure_caret_visible(&mut self) {
        let Some(input) = self.editor.input() else {
            return;
        };
        let (caret_line, caret_col) = input.cursor_position(self.editor.buffer());
        self.editor_scroll_offset =
            follow(self.editor_scroll_offset, caret_line, self.editor_visible_rows());
        self.editor_col_offset =
            follow(self.editor_col_offset, caret_col, self.editor_text_width());
    }

    pub(super) fn max_editor_scroll(&self) -> usize {
        self.editor.buffer().line_count().saturating_sub(1)
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Content from the last save that has not been written yet.
    pub fn pending_save(&self) -> Option<&str> {
        self.pending_save.as_deref()
    }
}

/// Smallest change to `offset` that keeps `target` inside a window of
/// `size` cells.
const fn follow(offset: usize, target: usize, size: usize) -> usize {
    if size == 0 || target < offset {
        target
    } else if target >= offset + size {
        target + 1 - size
    } else {
        offset
    }
}

impl Default for Model {
    fn default() -> Self {
        Self {
            editor: BrdEditor::default(),
            viewport: Viewport::new(80, 23, 1),
            file_path: PathBuf::new(),
            export_dir: PathBuf::from("."),
            config_global_path: None,
            config_local_path: None,
            help_visible: false,
            toast: None,
            should_quit: false,
            quit_confirmed: false,
            editor_scroll_offset: 0,
            editor_col_offset: 0,
            pending_save: None,
        }
    }
}
