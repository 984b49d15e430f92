//! Standalone HTML export.
//!
//! The export targets a printable document rather than the interactive
//! preview, so it runs its own whole-buffer pass instead of reusing
//! [`crate::format`]: no `&nbsp;` placeholder, no single-`*` emphasis, no
//! third heading level, and line breaks become `<br>` elements.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// File name of every exported document.
pub const EXPORT_FILE_NAME: &str = "BRD_Document.html";

/// MIME type of the exported payload.
pub const EXPORT_MIME: &str = "text/html";

const DOCUMENT_TITLE: &str = "BRD Document";

const STYLE_SHEET: &str = "\
body {
  font-family: Arial, sans-serif;
  line-height: 1.6;
  color: #000000;
  max-width: 800px;
  margin: 0 auto;
  padding: 20px;
}
h1, h2, h3, h4, h5, h6 {
  color: #000000;
  margin-top: 20px;
  margin-bottom: 10px;
}
h1 {
  font-size: 24px;
  border-bottom: 1px solid #000000;
  padding-bottom: 5px;
}
h2 {
  font-size: 20px;
}
strong {
  font-weight: bold;
}
em {
  font-style: italic;
}
li {
  margin: 5px 0;
  list-style-type: disc;
  margin-left: 20px;
}
";

static BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?R)\*\*(.+?)\*\*").expect("valid bold regex"));
static ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?R)_(.+?)_").expect("valid italic regex"));
static HEADING_1: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mR)^# (.+)$").expect("valid heading regex"));
static HEADING_2: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mR)^## (.+)$").expect("valid heading regex"));
static BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?mR)^\* (.+)$").expect("valid bullet regex"));

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A rendered export, ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub body: String,
}

impl ExportArtifact {
    /// Build the standalone document for `content`.
    pub fn from_content(content: &str) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME,
            mime: EXPORT_MIME,
            body: standalone_html(content),
        }
    }

    /// Write the artifact into `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] if the directory or file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(dir).map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(self.file_name);
        fs::write(&path, &self.body).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = self.body.len(), "wrote export");
        Ok(path)
    }
}

/// Directory exports of `file` go to when none is configured: the file's own
/// directory, or the working directory for bare file names.
pub fn default_export_dir(file: &Path) -> PathBuf {
    file.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Convert the whole buffer to the body markup of the export.
pub fn format_export_body(content: &str) -> String {
    let text = BOLD.replace_all(content, "<strong>${1}</strong>");
    let text = ITALIC.replace_all(&text, "<em>${1}</em>");
    let text = HEADING_1.replace_all(&text, "<h1>${1}</h1>");
    let text = HEADING_2.replace_all(&text, "<h2>${1}</h2>");
    let text = BULLET.replace_all(&text, "<li>${1}</li>");
    text.replace('\n', "<br>")
}

/// The complete export document for `content`.
pub fn standalone_html(content: &str) -> String {
    let body = format_export_body(content);
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{DOCUMENT_TITLE}</title>\n<style>\n{STYLE_SHEET}</style>\n</head>\n<body>\n<div class=\"document\">{body}</div>\n</body>\n</html>\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_heading_and_bullet_export() {
        assert_eq!(
            format_export_body("# Title\n* item"),
            "<h1>Title</h1><br><li>item</li>"
        );
    }

    #[test]
    fn test_export_wraps_document_scaffold() {
        let html = standalone_html("# Title\n* item");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>BRD Document</title>"));
        assert!(html.contains("list-style-type: disc;"));
        assert!(html.contains("<div class=\"document\"><h1>Title</h1><br><li>item</li></div>"));
        assert_eq!(html.matches("<h1>").count(), 1);
        assert_eq!(html.matches("<li>").count(), 1);
    }

    #[test]
    fn test_export_has_no_placeholder_for_blank_lines() {
        assert_eq!(format_export_body("a\n\nb"), "a<br><br>b");
    }

    #[test]
    fn test_export_leaves_single_star_alone() {
        assert_eq!(format_export_body("*soft*"), "*soft*");
    }

    #[test]
    fn test_export_has_no_third_heading_level() {
        assert_eq!(format_export_body("### Notes"), "### Notes");
    }

    #[test]
    fn test_export_inline_runs_across_buffer() {
        assert_eq!(
            format_export_body("**Goal**: _ship_\n## Plan"),
            "<strong>Goal</strong>: <em>ship</em><br><h2>Plan</h2>"
        );
    }

    #[test]
    fn test_bold_does_not_span_lines() {
        assert_eq!(format_export_body("**a\nb**"), "**a<br>b**");
    }

    #[test]
    fn test_crlf_line_breaks_stay_outside_tags() {
        assert_eq!(
            format_export_body("# Title\r\n* item\r\n**a\r\nb**"),
            "<h1>Title</h1>\r<br><li>item</li>\r<br>**a\r<br>b**"
        );
    }

    #[test]
    fn test_artifact_metadata() {
        let artifact = ExportArtifact::from_content("x");
        assert_eq!(artifact.file_name, "BRD_Document.html");
        assert_eq!(artifact.mime, "text/html");
    }

    #[test]
    fn test_write_to_creates_directory_and_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("exports");
        let artifact = ExportArtifact::from_content("# Title");

        let path = artifact.write_to(&target).unwrap();

        assert_eq!(path, target.join(EXPORT_FILE_NAME));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, artifact.body);
    }

    #[test]
    fn test_write_to_reports_io_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = ExportArtifact::from_content("x")
            .write_to(&blocker)
            .unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }

    #[test]
    fn test_default_export_dir() {
        assert_eq!(
            default_export_dir(Path::new("docs/brd.md")),
            PathBuf::from("docs")
        );
        assert_eq!(default_export_dir(Path::new("brd.md")), PathBuf::from("."));
    }
}
