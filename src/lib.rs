//! # adfmd
//!
//! Structured rich-text document to Markdown conversion for Rust.
//!
//! This library takes JSON documents made of typed nodes (paragraphs,
//! headings, lists, tables, code blocks, media, mentions, cards, emoji,
//! status chips) and renders them as Markdown fragments.
//!
//! ## Quick Start
//!
//! ```
//! use serde_json::json;
//!
//! let doc = json!({
//!     "version": 1,
//!     "type": "doc",
//!     "content": [
//!         {"type": "heading", "attrs": {"level": 2}, "content": [
//!             {"type": "text", "text": "Release notes"}
//!         ]},
//!         {"type": "paragraph", "content": [
//!             {"type": "text", "text": "See"},
//!             {"type": "text", "text": "the docs", "marks": [
//!                 {"type": "link", "attrs": {"href": "https://example.com"}}
//!             ]}
//!         ]}
//!     ]
//! });
//!
//! let markdown = adfmd::to_markdown(&doc);
//! assert_eq!(markdown, "## Release notes\n\nSee [the docs](https://example.com)");
//! ```
//!
//! ## Error handling
//!
//! The top-level functions never fail. Non-JSON strings are returned
//! unchanged and documents without content render as an empty string.
//! Malformed nodes are skipped and nesting past the depth limit is cut off,
//! so the rest of the document still renders. Only an unexpected failure
//! while building or rendering the tree yields
//! [`CONVERSION_ERROR_SENTINEL`]. Callers who want typed errors can use
//! [`parser`] and [`render`] directly, or opt into [`Converter::strict`].

pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types
pub use detect::{detect_input, InputKind};
pub use error::{Error, Result};
pub use model::{Document, Mark, Media, MediaType, Node, NodeId, NodeKind, TextStyle};
pub use parser::{ErrorMode, ParseOptions};
pub use render::{RenderOptions, RenderResult, RenderStats};

use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};

/// Output substituted when a document cannot be converted.
pub const CONVERSION_ERROR_SENTINEL: &str = "[Content unavailable due to conversion error]";

/// Combined parsing and rendering options.
///
/// Unlike [`ParseOptions::default`], tree building here defaults to
/// [`ErrorMode::Lenient`].
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Tree building options
    pub parse: ParseOptions,

    /// Markdown rendering options
    pub render: RenderOptions,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::new().lenient(),
            render: RenderOptions::default(),
        }
    }
}

impl ConvertOptions {
    /// Create new conversion options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the parse options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Set the render options.
    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }
}

/// Convert a document value to Markdown.
///
/// `null` renders as an empty string, booleans and numbers are printed, and
/// strings are interpreted as described in [`to_markdown_str`].
pub fn to_markdown(input: &Value) -> String {
    to_markdown_with_options(input, &ConvertOptions::default())
}

/// Convert a document value to Markdown with custom options.
pub fn to_markdown_with_options(input: &Value, options: &ConvertOptions) -> String {
    convert_value(input, options).content
}

/// Convert a raw string to Markdown.
///
/// A string holding JSON is rendered as a document; JSON without a node
/// sequence (including bare scalars) renders as an empty string. Anything
/// else, including malformed JSON, is assumed to be pre-rendered and
/// returned unchanged. JSON nested too deeply to read yields
/// [`CONVERSION_ERROR_SENTINEL`].
///
/// # Example
///
/// ```
/// assert_eq!(adfmd::to_markdown_str(""), "");
/// assert_eq!(adfmd::to_markdown_str("plain text"), "plain text");
/// assert_eq!(adfmd::to_markdown_str("{not valid json"), "{not valid json");
/// assert_eq!(adfmd::to_markdown_str(r#"{"content": []}"#), "");
/// assert_eq!(adfmd::to_markdown_str("42"), "");
/// ```
pub fn to_markdown_str(input: &str) -> String {
    to_markdown_str_with_options(input, &ConvertOptions::default())
}

/// Convert a raw string to Markdown with custom options.
pub fn to_markdown_str_with_options(input: &str, options: &ConvertOptions) -> String {
    convert_text(input, options).content
}

fn convert_value(input: &Value, options: &ConvertOptions) -> RenderResult {
    match input {
        Value::Null => RenderResult::default(),
        Value::Bool(b) => RenderResult::content_only(b.to_string()),
        Value::Number(n) => RenderResult::content_only(n.to_string()),
        Value::String(s) => convert_text(s, options),
        Value::Array(_) | Value::Object(_) => guarded(|| try_convert(input, options)),
    }
}

fn convert_text(input: &str, options: &ConvertOptions) -> RenderResult {
    match detect_input(input) {
        InputKind::Empty => RenderResult::default(),
        InputKind::Text => RenderResult::content_only(input.to_string()),
        InputKind::TooDeep => sentinel(),
        InputKind::Document(value) => guarded(|| try_convert(&value, options)),
    }
}

fn try_convert(value: &Value, options: &ConvertOptions) -> Result<RenderResult> {
    let Some(doc) = parser::parse_value(value, &options.parse)? else {
        return Ok(RenderResult::default());
    };

    if options.render.collect_stats {
        render::to_markdown_with_stats(&doc, &options.render)
    } else {
        let content = render::to_markdown(&doc, &options.render)?;
        Ok(RenderResult::content_only(content))
    }
}

/// Run a conversion, turning errors and panics into the sentinel.
fn guarded<F>(convert: F) -> RenderResult
where
    F: FnOnce() -> Result<RenderResult>,
{
    match panic::catch_unwind(AssertUnwindSafe(convert)) {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            log::warn!("Document conversion failed: {}", e);
            sentinel()
        }
        Err(_) => {
            log::warn!("Document conversion panicked");
            sentinel()
        }
    }
}

fn sentinel() -> RenderResult {
    RenderResult::content_only(CONVERSION_ERROR_SENTINEL.to_string())
}

/// Builder for converting documents.
///
/// # Example
///
/// ```
/// use adfmd::Converter;
/// use serde_json::json;
///
/// let converter = Converter::new()
///     .with_attachment_scheme("https://files.example.com/");
///
/// let doc = json!({"content": [
///     {"type": "media", "attrs": {"type": "file", "id": "42"}},
///     null
/// ]});
/// assert_eq!(
///     converter.convert(&doc),
///     "![Attachment: 42](https://files.example.com/42)"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a new converter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter from existing options.
    pub fn with_options(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Enable strict parsing mode: a malformed node or excessive nesting
    /// fails the whole conversion.
    pub fn strict(mut self) -> Self {
        self.options.parse = self.options.parse.strict();
        self
    }

    /// Set the maximum node nesting depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.options.parse = self.options.parse.with_max_depth(depth);
        self
    }

    /// Set the URL prefix used for attachment references.
    pub fn with_attachment_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.options.render = self.options.render.with_attachment_scheme(scheme);
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.options.render = self.options.render.with_max_heading(level);
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.options.render = self.options.render.with_stats(collect);
        self
    }

    /// Get the current options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert a document value to Markdown.
    pub fn convert(&self, input: &Value) -> String {
        convert_value(input, &self.options).content
    }

    /// Convert a raw string to Markdown.
    pub fn convert_str(&self, input: &str) -> String {
        convert_text(input, &self.options).content
    }

    /// Convert a document value, returning statistics with the content.
    pub fn convert_with_stats(&self, input: &Value) -> RenderResult {
        let mut options = self.options.clone();
        options.render.collect_stats = true;
        convert_value(input, &options)
    }

    /// Convert a raw string, returning statistics with the content.
    pub fn convert_str_with_stats(&self, input: &str) -> RenderResult {
        let mut options = self.options.clone();
        options.render.collect_stats = true;
        convert_text(input, &options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_converter_builder() {
        let converter = Converter::new()
            .with_max_depth(16)
            .with_attachment_scheme("/files/")
            .with_stats(true);

        let options = converter.options();
        assert_eq!(options.parse.error_mode, ErrorMode::Lenient);
        assert_eq!(options.parse.max_depth, 16);
        assert_eq!(options.render.attachment_scheme, "/files/");
        assert!(options.render.collect_stats);

        let strict = Converter::new().strict();
        assert_eq!(strict.options().parse.error_mode, ErrorMode::Strict);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(to_markdown(&Value::Null), "");
        assert_eq!(to_markdown(&json!("")), "");
        assert_eq!(to_markdown(&json!({"content": []})), "");
        assert_eq!(to_markdown(&json!({"version": 1})), "");
        assert_eq!(to_markdown(&json!({"content": "text"})), "");
        assert_eq!(to_markdown(&json!([1, 2, 3])), "");
    }

    #[test]
    fn test_scalar_coercion() {
        assert_eq!(to_markdown(&json!(true)), "true");
        assert_eq!(to_markdown(&json!(false)), "false");
        assert_eq!(to_markdown(&json!(0)), "0");
        assert_eq!(to_markdown(&json!(1.5)), "1.5");
    }

    #[test]
    fn test_string_passthrough() {
        assert_eq!(to_markdown(&json!("plain text")), "plain text");
        assert_eq!(to_markdown_str("{not valid json"), "{not valid json");
    }

    #[test]
    fn test_json_scalar_strings_render_empty() {
        assert_eq!(to_markdown_str("42"), "");
        assert_eq!(to_markdown_str("true"), "");
        assert_eq!(to_markdown_str("\"quoted\""), "");
        assert_eq!(to_markdown_str("null"), "");
        assert_eq!(to_markdown(&json!("42")), "");
    }

    #[test]
    fn test_string_holding_document() {
        let input = r#"{"content":[{"type":"paragraph","content":[{"type":"text","text":"Hi"}]}]}"#;
        assert_eq!(to_markdown_str(input), "Hi");
        assert_eq!(to_markdown(&json!(input)), "Hi");
    }

    #[test]
    fn test_malformed_nodes_degrade_by_default() {
        let doc = json!({"content": [
            {"type": "paragraph", "content": [{"type": "text", "text": "kept"}]},
            null
        ]});

        assert_eq!(to_markdown(&doc), "kept");
        assert_eq!(Converter::new().strict().convert(&doc), CONVERSION_ERROR_SENTINEL);
    }

    #[test]
    fn test_broken_nested_content_keeps_siblings() {
        let doc = json!({"content": [
            {"type": "paragraph", "content": [{"type": "text", "text": "Important section"}]},
            {"type": "paragraph", "content": [{"type": "text", "text": "partial"}, null]},
            {"type": "paragraph", "content": "oops"}
        ]});

        assert_eq!(to_markdown(&doc), "Important section\n\npartial");
    }

    #[test]
    fn test_convert_with_stats() {
        let doc = json!({"content": [
            {"type": "paragraph", "content": [{"type": "text", "text": "one two"}]},
            "broken"
        ]});

        let result = Converter::new().convert_with_stats(&doc);
        assert_eq!(result.content, "one two");
        assert_eq!(result.stats.paragraph_count, 1);
        assert_eq!(result.stats.skipped_node_count, 1);
        assert_eq!(result.stats.word_count, 2);
    }

    #[test]
    fn test_guarded_catches_panics() {
        let result = guarded(|| panic!("boom"));
        assert_eq!(result.content, CONVERSION_ERROR_SENTINEL);
    }

    #[test]
    fn test_guarded_converts_errors() {
        let result = guarded(|| Err(Error::Render("bad tree".into())));
        assert_eq!(result.content, CONVERSION_ERROR_SENTINEL);
    }
}
