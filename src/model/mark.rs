//! Inline decoration types.

use serde::Serialize;

/// An inline decoration attached to a text node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Mark {
    /// Bold text
    Strong,
    /// Italic text
    Em,
    /// Inline code
    Code,
    /// Strikethrough
    Strike,
    /// Underline
    Underline,
    /// Superscript
    Superscript,
    /// Subscript
    Subscript,
    /// Hyperlink; `href` is `None` when the source mark carried no target
    Link {
        /// Link target
        href: Option<String>,
    },
    /// A mark kind with no Markdown rendering (colors, alignment, ...)
    Other {
        /// Source mark name
        name: String,
    },
}

impl Mark {
    /// Create a link mark.
    pub fn link(href: impl Into<String>) -> Self {
        Mark::Link {
            href: Some(href.into()),
        }
    }

    /// Source name of the mark.
    pub fn name(&self) -> &str {
        match self {
            Mark::Strong => "strong",
            Mark::Em => "em",
            Mark::Code => "code",
            Mark::Strike => "strike",
            Mark::Underline => "underline",
            Mark::Superscript => "superscript",
            Mark::Subscript => "subscript",
            Mark::Link { .. } => "link",
            Mark::Other { name } => name,
        }
    }
}

/// The resolved set of decorations on a text run.
///
/// Building a style from marks discards their order: rendering always applies
/// decorations in a fixed sequence, see [`crate::render::apply_marks`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Inline code
    pub code: bool,

    /// Strikethrough text
    pub strikethrough: bool,

    /// Underlined text
    pub underline: bool,

    /// Superscript
    pub superscript: bool,

    /// Subscript
    pub subscript: bool,

    /// Link target, only set when the link mark had a non-empty href
    pub link: Option<String>,
}

impl TextStyle {
    /// Resolve a slice of marks into a style.
    pub fn from_marks(marks: &[Mark]) -> Self {
        let mut style = Self::default();
        for mark in marks {
            match mark {
                Mark::Strong => style.bold = true,
                Mark::Em => style.italic = true,
                Mark::Code => style.code = true,
                Mark::Strike => style.strikethrough = true,
                Mark::Underline => style.underline = true,
                Mark::Superscript => style.superscript = true,
                Mark::Subscript => style.subscript = true,
                Mark::Link { href } => {
                    if let Some(href) = href.as_deref().filter(|h| !h.trim().is_empty()) {
                        style.link = Some(href.to_string());
                    }
                }
                Mark::Other { .. } => {}
            }
        }
        style
    }
}
