//! Per-line markdown formatting for the document preview.
//!
//! A line of semi-markdown text is turned into an HTML fragment by running it
//! through an ordered list of pure passes (see [`LINE_PASSES`]). Each pass
//! sees the previous pass's output, so a heading can wrap text that the bold
//! pass already formatted.
//!
//! The formatter does not escape HTML. Input is trusted generated text, not a
//! security boundary.

mod passes;

use serde::Serialize;

pub use passes::{
    Pass, LINE_PASSES, bold_pass, bullet_pass, heading_pass, italic_pass, placeholder_pass,
};

/// Placeholder emitted for lines that format to nothing, so blank lines keep
/// their height in the rendered view.
pub const NBSP: &str = "&nbsp;";

/// Shown by [`preview_snippet`] when there is no text to preview.
pub const NO_PREVIEW: &str = "No preview available";

/// Default number of characters kept by [`preview_snippet`].
pub const DEFAULT_PREVIEW_CHARS: usize = 200;

/// One formatted line of a document, as emitted by `brdwiz render --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedLine {
    /// One-based source line number.
    pub line: usize,
    /// HTML fragment for the line.
    pub html: String,
}

/// Format a single line into an HTML fragment.
///
/// The input is expected to hold no line breaks; use [`format_document`] for
/// whole buffers. Never returns an empty string.
///
/// # Example
///
/// ```
/// use brdwiz::format::format_line;
///
/// assert_eq!(format_line("**Scope**"), "<strong>Scope</strong>");
/// assert_eq!(format_line(""), "&nbsp;");
/// ```
pub fn format_line(line: &str) -> String {
    LINE_PASSES
        .iter()
        .fold(line.to_owned(), |text, pass| (pass.apply)(&text))
}

/// Format every line of a buffer, one fragment per line.
///
/// Lines are split on `\n`; a trailing `\r` is dropped first.
pub fn format_document(text: &str) -> Vec<String> {
    source_lines(text).map(format_line).collect()
}

/// Like [`format_document`], keeping line numbers alongside the fragments.
pub fn render_lines(text: &str) -> Vec<RenderedLine> {
    source_lines(text)
        .enumerate()
        .map(|(idx, line)| RenderedLine {
            line: idx + 1,
            html: format_line(line),
        })
        .collect()
}

/// Number of lines [`format_document`] produces for `text`.
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// Short formatted preview of a document for listings.
///
/// Keeps the first `limit` characters, appends `...` and formats the result
/// as one block: line breaks are kept as they are and blank lines inside the
/// snippet stay blank instead of getting the [`NBSP`] placeholder.
/// Empty input yields [`NO_PREVIEW`].
pub fn preview_snippet(text: &str, limit: usize) -> String {
    if text.is_empty() {
        return NO_PREVIEW.to_owned();
    }
    let mut snippet: String = text.chars().take(limit).collect();
    snippet.push_str("...");
    snippet
        .split('\n')
        .map(|line| {
            let (body, cr) = line
                .strip_suffix('\r')
                .map_or((line, ""), |body| (body, "\r"));
            if body.is_empty() {
                cr.to_owned()
            } else {
                format_line(body) + cr
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn source_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}
