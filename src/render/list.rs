//! List item composition and indentation.

/// Indentation applied per nesting level.
pub const LIST_INDENT: &str = "  ";

/// Marker of a plain list item.
pub const BULLET_MARKER: &str = "- ";

/// One rendered child of a list item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPart {
    /// Rendered Markdown
    pub text: String,
    /// Whether the child was itself a list
    pub nested_list: bool,
}

impl ItemPart {
    /// A paragraph or other non-list content.
    pub fn content(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            nested_list: false,
        }
    }

    /// A fully rendered nested list.
    pub fn list(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            nested_list: true,
        }
    }
}

/// Prefix every non-empty line with `indent`.
pub fn indent_lines(text: &str, indent: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build a list item from its rendered children.
///
/// The first line of the first non-list part follows the marker. Every
/// other line, including all lines of nested lists, is indented one level
/// so it stays inside the item. Returns an empty string when no part has
/// content.
pub fn compose_list_item(marker: &str, parts: &[ItemPart]) -> String {
    let mut parts = parts.iter().filter(|p| !p.text.is_empty());

    let Some(first) = parts.next() else {
        return String::new();
    };

    let mut out = String::from(marker);
    if first.nested_list {
        out.push('\n');
        out.push_str(&indent_lines(&first.text, LIST_INDENT));
    } else {
        let (head, rest) = match first.text.split_once('\n') {
            Some((head, rest)) => (head, Some(rest)),
            None => (first.text.as_str(), None),
        };
        out.push_str(head);
        if let Some(rest) = rest {
            out.push('\n');
            out.push_str(&indent_lines(rest, LIST_INDENT));
        }
    }

    for part in parts {
        out.push('\n');
        out.push_str(&indent_lines(&part.text, LIST_INDENT));
    }

    out
}

/// Join rendered items one per line, dropping empty ones.
pub fn join_items(items: &[String]) -> String {
    items
        .iter()
        .filter(|item| !item.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Rewrite each item's leading bullet into its 1-based ordinal.
///
/// Only the first marker of each item changes; nested list lines are
/// indented and keep their own markers. Empty items are dropped before
/// numbering.
pub fn number_items(items: &[String]) -> Vec<String> {
    items
        .iter()
        .filter(|item| !item.is_empty())
        .enumerate()
        .map(|(i, item)| {
            let body = item.strip_prefix(BULLET_MARKER).unwrap_or(item);
            format!("{}. {}", i + 1, body)
        })
        .collect()
}
