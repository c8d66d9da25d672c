//! Inline decoration of text runs.
//!
//! Decorations are not commutative in Markdown: a link may wrap emphasis,
//! but emphasis wrapped around a finished link breaks it. Marks are
//! therefore applied by a fixed pipeline, innermost first, no matter in
//! which order the source listed them.

use crate::model::{Mark, TextStyle};

type Decorator = fn(String, &TextStyle) -> String;

/// Decoration order, innermost first. Link must stay last.
const PIPELINE: [Decorator; 8] = [
    bold,
    italic,
    code,
    strikethrough,
    underline,
    superscript,
    subscript,
    link,
];

/// Apply marks to a text run.
///
/// # Example
/// ```
/// use adfmd::model::Mark;
/// use adfmd::render::apply_marks;
///
/// let out = apply_marks("text", &[Mark::link("https://example.com"), Mark::Strong]);
/// assert_eq!(out, "[**text**](https://example.com)");
/// ```
pub fn apply_marks(text: &str, marks: &[Mark]) -> String {
    apply_style(text, &TextStyle::from_marks(marks))
}

/// Apply a resolved style to a text run.
///
/// Empty text stays empty so no bare delimiters are emitted.
pub fn apply_style(text: &str, style: &TextStyle) -> String {
    if text.is_empty() {
        return String::new();
    }
    PIPELINE
        .iter()
        .fold(text.to_string(), |acc, decorate| decorate(acc, style))
}

fn bold(text: String, style: &TextStyle) -> String {
    if style.bold {
        format!("**{}**", text)
    } else {
        text
    }
}

fn italic(text: String, style: &TextStyle) -> String {
    if style.italic {
        format!("*{}*", text)
    } else {
        text
    }
}

fn code(text: String, style: &TextStyle) -> String {
    if !style.code {
        return text;
    }
    let ticks = "`".repeat(max_backtick_run(&text) + 1);
    if ticks.len() > 1 || text.starts_with('`') || text.ends_with('`') {
        format!("{} {} {}", ticks, text, ticks)
    } else {
        format!("{}{}{}", ticks, text, ticks)
    }
}

fn strikethrough(text: String, style: &TextStyle) -> String {
    if style.strikethrough {
        format!("~~{}~~", text)
    } else {
        text
    }
}

// Plain Markdown has no underline; emphasis is the closest rendering.
fn underline(text: String, style: &TextStyle) -> String {
    if style.underline {
        format!("_{}_", text)
    } else {
        text
    }
}

fn superscript(text: String, style: &TextStyle) -> String {
    if style.superscript {
        format!("^{}^", text)
    } else {
        text
    }
}

fn subscript(text: String, style: &TextStyle) -> String {
    if style.subscript {
        format!("~{}~", text)
    } else {
        text
    }
}

fn link(text: String, style: &TextStyle) -> String {
    match &style.link {
        Some(href) => format!("[{}]({})", text, href),
        None => text,
    }
}

/// Length of the longest run of backticks in `content`.
pub(crate) fn max_backtick_run(content: &str) -> usize {
    let mut max_run = 0;
    let mut current_run = 0;

    for c in content.chars() {
        if c == '`' {
            current_run += 1;
            max_run = max_run.max(current_run);
        } else {
            current_run = 0;
        }
    }

    max_run
}
