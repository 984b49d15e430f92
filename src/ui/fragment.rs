//! Turns formatter HTML fragments into styled terminal lines.
//!
//! Only the tags the line formatter emits are understood: `strong`, `em`,
//! `h1`..`h3` and `li`. Anything else that looks like a tag is kept as
//! literal text.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::format::NBSP;

use super::style;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Strong,
    Em,
    Heading(u8),
    ListItem,
}

/// Parse the inside of `<...>` into a known tag and whether it closes.
fn parse_tag(raw: &str) -> Option<(Tag, bool)> {
    let (closing, body) = match raw.strip_prefix('/') {
        Some(body) => (true, body),
        None => (false, raw),
    };
    let tag = match body.split_whitespace().next()? {
        "strong" => Tag::Strong,
        "em" => Tag::Em,
        "h1" => Tag::Heading(1),
        "h2" => Tag::Heading(2),
        "h3" => Tag::Heading(3),
        "li" => Tag::ListItem,
        _ => return None,
    };
    Some((tag, closing))
}

#[derive(Debug, Default)]
struct Walker {
    spans: Vec<Span<'static>>,
    text: String,
    strong: usize,
    em: usize,
    heading: Option<u8>,
    list_item: bool,
}

impl Walker {
    fn inline_style(&self) -> Style {
        let mut style = Style::default();
        if self.strong > 0 {
            style = style.patch(style::strong_style());
        }
        if self.em > 0 {
            style = style.patch(style::emphasis_style());
        }
        style
    }

    fn flush(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.text).replace(NBSP, " ");
        let style = self.inline_style();
        self.spans.push(Span::styled(text, style));
    }

    fn apply(&mut self, tag: Tag, closing: bool) {
        self.flush();
        match (tag, closing) {
            (Tag::Strong, false) => self.strong += 1,
            (Tag::Strong, true) => self.strong = self.strong.saturating_sub(1),
            (Tag::Em, false) => self.em += 1,
            (Tag::Em, true) => self.em = self.em.saturating_sub(1),
            (Tag::Heading(level), false) => self.heading = Some(level),
            (Tag::Heading(_), true) => {}
            (Tag::ListItem, false) => {
                self.list_item = true;
                self.spans.push(Span::raw("  "));
            }
            (Tag::ListItem, true) => {}
        }
    }

    fn finish(mut self) -> Line<'static> {
        self.flush();
        let mut spans = self.spans;
        if self.list_item {
            style_bullet_glyph(&mut spans);
        }
        let line = Line::from(spans);
        match self.heading {
            Some(level) => line.style(style::heading_style(level)),
            None => line,
        }
    }
}

/// Split a leading `• ` off a list item so the glyph gets its own color.
fn style_bullet_glyph(spans: &mut Vec<Span<'static>>) {
    let Some(idx) = spans.iter().position(|span| !span.content.trim().is_empty()) else {
        return;
    };
    let Some(rest) = spans[idx].content.strip_prefix('•') else {
        return;
    };
    let rest = rest.to_owned();
    let style = spans[idx].style;
    spans[idx] = Span::styled("•", style.patch(style::bullet_style()));
    if !rest.is_empty() {
        spans.insert(idx + 1, Span::styled(rest, style));
    }
}

/// Convert one formatted fragment into a terminal line.
///
/// The blank-line placeholder becomes an empty line.
pub fn fragment_to_line(html: &str) -> Line<'static> {
    if html == NBSP {
        return Line::default();
    }
    let mut walker = Walker::default();
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        walker.text.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let parsed = after
            .find('>')
            .and_then(|close| parse_tag(&after[..close]).map(|tag| (close, tag)));
        match parsed {
            Some((close, (tag, closing))) => {
                walker.apply(tag, closing);
                rest = &after[close + 1..];
            }
            None => {
                walker.text.push('<');
                rest = after;
            }
        }
    }
    walker.text.push_str(rest);
    walker.finish()
}
