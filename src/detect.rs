//! Input classification for raw string content.
//!
//! Upstream APIs hand out document bodies either as JSON-encoded documents
//! or as text that was already rendered. This module decides which one a
//! string is.

use serde_json::Value;

/// What a raw input string contains.
#[derive(Debug, Clone, PartialEq)]
pub enum InputKind {
    /// The empty string
    Empty,
    /// Any JSON value, parsed
    Document(Value),
    /// JSON nested deeper than the reader accepts
    TooDeep,
    /// Anything else: returned to the caller unchanged
    Text,
}

/// Classify a raw input string.
///
/// Any input that parses as JSON counts as a document, including bare
/// scalars (`42`, `"text"`, `true`); those have no content and render as
/// an empty string. Malformed JSON is treated as pre-rendered text.
///
/// # Example
/// ```
/// use adfmd::detect::{detect_input, InputKind};
///
/// assert_eq!(detect_input(""), InputKind::Empty);
/// assert_eq!(detect_input("plain text"), InputKind::Text);
/// assert_eq!(detect_input("{not valid json"), InputKind::Text);
/// assert!(matches!(detect_input(r#"{"content":[]}"#), InputKind::Document(_)));
/// assert!(matches!(detect_input("42"), InputKind::Document(_)));
/// ```
pub fn detect_input(input: &str) -> InputKind {
    if input.is_empty() {
        return InputKind::Empty;
    }

    match serde_json::from_str::<Value>(input) {
        Ok(value) => InputKind::Document(value),
        Err(e) if is_recursion_limit(&e) => {
            log::warn!("Input JSON is nested too deeply to read ({})", e);
            InputKind::TooDeep
        }
        Err(e) => {
            log::debug!("Input is not JSON ({}), passing through", e);
            InputKind::Text
        }
    }
}

/// serde_json reports its nesting limit only through the message.
fn is_recursion_limit(error: &serde_json::Error) -> bool {
    error.to_string().starts_with("recursion limit exceeded")
}
