use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A formatting command the toolbar can apply to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatMarker {
    Bold,
    Italic,
    Heading1,
    Heading2,
    Bullet,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown format marker `{0}`")]
pub struct MarkerParseError(pub String);

impl FormatMarker {
    pub const ALL: [Self; 5] = [
        Self::Bold,
        Self::Italic,
        Self::Heading1,
        Self::Heading2,
        Self::Bullet,
    ];

    /// Text inserted before the selection.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Bold => "**",
            Self::Italic => "_",
            Self::Heading1 => "# ",
            Self::Heading2 => "## ",
            Self::Bullet => "* ",
        }
    }

    /// Text inserted after the selection.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Bold => "**",
            Self::Italic => "_",
            Self::Heading1 | Self::Heading2 | Self::Bullet => "",
        }
    }

    /// Where the caret lands, relative to the selection start, when nothing
    /// was selected: just inside the prefix.
    pub const fn caret_offset(self) -> usize {
        self.prefix().len()
    }

    /// Apply the template to `selected`.
    pub fn wrap(self, selected: &str) -> String {
        format!("{}{selected}{}", self.prefix(), self.suffix())
    }

    /// Short name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Heading1 => "h1",
            Self::Heading2 => "h2",
            Self::Bullet => "list",
        }
    }

    /// Toolbar label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Heading1 => "H1",
            Self::Heading2 => "H2",
            Self::Bullet => "List",
        }
    }
}

impl fmt::Display for FormatMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormatMarker {
    type Err = MarkerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bold" => Ok(Self::Bold),
            "italic" => Ok(Self::Italic),
            "h1" | "heading1" => Ok(Self::Heading1),
            "h2" | "heading2" => Ok(Self::Heading2),
            "list" | "bullet" => Ok(Self::Bullet),
            other => Err(MarkerParseError(other.to_owned())),
        }
    }
}
