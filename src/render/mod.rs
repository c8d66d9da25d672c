//! Rendering module for converting documents to Markdown.

mod list;
mod markdown;
mod marks;
mod options;
mod result;
mod table;

pub use list::{compose_list_item, indent_lines, join_items, number_items, ItemPart};
pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use marks::{apply_marks, apply_style};
pub use options::{RenderOptions, DEFAULT_ATTACHMENT_SCHEME};
pub use result::{RenderResult, RenderStats};
pub use table::{normalize_cell, TableBuilder};
