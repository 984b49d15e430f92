use std::io::{Write, stdout};

use anyhow::{Context, Result};
use base64::Engine;

use crate::app::{App, Message, Model, ToastLevel};

impl App {
    pub(super) fn handle_message_side_effects(&self, model: &mut Model, msg: &Message) {
        let _ = self;
        match msg {
            Message::Save => write_pending_save(model),
            Message::Export => export_document(model),
            Message::CopyContent => copy_content(model),
            _ => {}
        }
    }
}

/// Write content queued by a save to the BRD file.
///
/// On failure the buffer is flagged unsaved again so the quit guard still
/// applies.
pub(super) fn write_pending_save(model: &mut Model) {
    let Some(content) = model.pending_save.take() else {
        return;
    };
    match std::fs::write(&model.file_path, &content)
        .with_context(|| format!("writing {}", model.file_path.display()))
    {
        Ok(()) => {
            tracing::info!(path = %model.file_path.display(), "saved document");
            model.show_toast(ToastLevel::Info, "BRD content updated");
            if model.quit_confirmed {
                model.should_quit = true;
            }
        }
        Err(err) => {
            tracing::warn!("save failed: {err:#}");
            model.editor.mark_dirty();
            model.quit_confirmed = false;
            model.show_toast(ToastLevel::Error, format!("Save failed: {err:#}"));
        }
    }
}

pub(super) fn export_document(model: &mut Model) {
    let artifact = model.editor.export_standalone_html();
    match artifact.write_to(&model.export_dir) {
        Ok(path) => model.show_toast(ToastLevel::Info, format!("Exported to {}", path.display())),
        Err(err) => {
            tracing::warn!("export failed: {err}");
            model.show_toast(ToastLevel::Error, format!("Export failed: {err}"));
        }
    }
}

fn copy_content(model: &mut Model) {
    match copy_to_clipboard(&model.editor.content()) {
        Ok(()) => model.show_toast(ToastLevel::Info, "BRD content copied to clipboard"),
        Err(err) => {
            tracing::warn!("clipboard write failed: {err:#}");
            model.show_toast(ToastLevel::Error, "Failed to copy to clipboard");
        }
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let osc = osc52_sequence(text);
    let mut out = stdout();
    out.write_all(osc.as_bytes())
        .and_then(|()| out.flush())
        .context("writing OSC 52 sequence")
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}
