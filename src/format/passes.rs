//! The individual formatting passes, in the order [`LINE_PASSES`] runs them.

use super::NBSP;

/// A named `&str -> String` rewrite step.
#[derive(Debug, Clone, Copy)]
pub struct Pass {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

/// The per-line pipeline. Order matters: inline passes run before the
/// whole-line passes so headings and bullets wrap already formatted text.
pub const LINE_PASSES: [Pass; 5] = [
    Pass {
        name: "bold",
        apply: bold_pass,
    },
    Pass {
        name: "italic",
        apply: italic_pass,
    },
    Pass {
        name: "heading",
        apply: heading_pass,
    },
    Pass {
        name: "bullet",
        apply: bullet_pass,
    },
    Pass {
        name: "placeholder",
        apply: placeholder_pass,
    },
];

/// A delimiter that opens and closes an inline run.
struct Delimiter {
    marker: &'static str,
    /// Decides whether the marker may open a run, given the text after it.
    opens: fn(&str) -> bool,
}

const fn always(_: &str) -> bool {
    true
}

fn followed_by_non_space(after: &str) -> bool {
    after.chars().next().is_some_and(|c| !c.is_whitespace())
}

const BOLD_DELIMITERS: [Delimiter; 2] = [
    Delimiter {
        marker: "**",
        opens: always,
    },
    Delimiter {
        marker: "__",
        opens: always,
    },
];

// `*` only opens an emphasis run when text follows directly, which keeps
// `* item` bullets and `a * b * c` literal.
const ITALIC_DELIMITERS: [Delimiter; 2] = [
    Delimiter {
        marker: "_",
        opens: always,
    },
    Delimiter {
        marker: "*",
        opens: followed_by_non_space,
    },
];

const HEADINGS: [(&str, &str); 3] = [
    ("# ", r#"<h1 class="text-2xl font-bold my-2">"#),
    ("## ", r#"<h2 class="text-xl font-bold my-2">"#),
    ("### ", r#"<h3 class="text-lg font-bold my-2">"#),
];

const BULLET_OPEN: &str = r#"<li class="ml-4">• "#;

/// `**text**` and `__text__` become `<strong>text</strong>`.
pub fn bold_pass(line: &str) -> String {
    wrap_runs(line, &BOLD_DELIMITERS, "strong")
}

/// `_text_` and `*text*` become `<em>text</em>`.
pub fn italic_pass(line: &str) -> String {
    wrap_runs(line, &ITALIC_DELIMITERS, "em")
}

/// `# `, `## ` and `### ` lines become heading elements.
pub fn heading_pass(line: &str) -> String {
    for (level, (prefix, open)) in HEADINGS.iter().enumerate() {
        if let Some(rest) = line.strip_prefix(prefix)
            && !rest.is_empty()
        {
            return format!("{open}{rest}</h{}>", level + 1);
        }
    }
    line.to_owned()
}

/// `* ` lines become list items with a visible bullet glyph.
pub fn bullet_pass(line: &str) -> String {
    match line.strip_prefix("* ") {
        Some(rest) if !rest.is_empty() => format!("{BULLET_OPEN}{rest}</li>"),
        _ => line.to_owned(),
    }
}

/// Empty output becomes [`NBSP`].
pub fn placeholder_pass(line: &str) -> String {
    if line.is_empty() {
        NBSP.to_owned()
    } else {
        line.to_owned()
    }
}

/// Wrap every `marker body marker` run in `<tag>`, scanning left to right.
///
/// A run needs a non-empty body and closes at the nearest matching marker.
/// Delimiters are tried in order at each position; a marker with no closing
/// partner is copied through literally.
fn wrap_runs(text: &str, delimiters: &[Delimiter], tag: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut rest = text;

    'scan: while let Some(ch) = rest.chars().next() {
        for delimiter in delimiters {
            let Some(after) = rest.strip_prefix(delimiter.marker) else {
                continue;
            };
            if !(delimiter.opens)(after) {
                continue;
            }
            let Some(first) = after.chars().next() else {
                continue;
            };
            let min_body = first.len_utf8();
            if let Some(rel) = after[min_body..].find(delimiter.marker) {
                let body_len = min_body + rel;
                out.push('<');
                out.push_str(tag);
                out.push('>');
                out.push_str(&after[..body_len]);
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
                rest = &after[body_len + delimiter.marker.len()..];
                continue 'scan;
            }
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    out
}
