//! Markdown rendering for structured documents.
//!
//! The renderer never recurses. Nodes sit in the document arena in
//! pre-order, so walking indices from last to first visits every child
//! before its parent. Each node's output is parked in a slot until the
//! parent consumes it.

use std::mem;

use url::Url;

use crate::error::{Error, Result};
use crate::model::{Document, Media, MediaType, NodeId, NodeKind};

use super::list::{compose_list_item, join_items, number_items, ItemPart, BULLET_MARKER};
use super::marks::{apply_marks, max_backtick_run};
use super::table::TableBuilder;
use super::{RenderOptions, RenderResult, RenderStats};

const DECISION_MARKER: &str = "- ✓ ";
const FALLBACK_EMOJI: &str = "🙂";
const FALLBACK_LINK_TEXT: &str = "Link";

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = MarkdownRenderer::new(options);
    renderer.render_with_stats(doc)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
    stats: RenderStats,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: RenderStats::new(),
        }
    }

    /// Render a document to Markdown.
    pub fn render(mut self, doc: &Document) -> Result<String> {
        self.render_internal(doc)
    }

    /// Render a document to Markdown with statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let content = self.render_internal(doc)?;

        self.stats.count_text(&content);
        self.stats.skipped_node_count += doc.skipped_count() as u32;

        Ok(RenderResult::new(content, self.stats))
    }

    fn render_internal(&mut self, doc: &Document) -> Result<String> {
        let mut walk = Walk::new(doc);

        for (id, node) in doc.iter().rev() {
            if self.options.collect_stats {
                self.record(&node.kind);
            }
            let fragment = self.render_node(&mut walk, id, &node.kind)?;
            walk.store(id, fragment);
        }

        Ok(walk.finish())
    }

    fn record(&mut self, kind: &NodeKind) {
        self.stats.node_count += 1;
        match kind {
            NodeKind::Paragraph => self.stats.paragraph_count += 1,
            NodeKind::Heading { .. } => self.stats.heading_count += 1,
            NodeKind::ListItem | NodeKind::TaskItem { .. } | NodeKind::DecisionItem => {
                self.stats.list_item_count += 1
            }
            NodeKind::Table => self.stats.table_count += 1,
            NodeKind::CodeBlock { .. } => self.stats.code_block_count += 1,
            NodeKind::Media(_) => self.stats.media_count += 1,
            NodeKind::Unknown { .. } => self.stats.unknown_node_count += 1,
            _ => {}
        }
    }

    fn render_node(&self, walk: &mut Walk<'_>, id: NodeId, kind: &NodeKind) -> Result<Fragment> {
        let text = match kind {
            NodeKind::Paragraph => join_inline(&walk.children(id)?),
            NodeKind::Heading { level } => self.heading(*level, &walk.children(id)?),
            NodeKind::BulletList | NodeKind::TaskList | NodeKind::DecisionList => {
                join_items(&outputs(walk.children(id)?))
            }
            NodeKind::OrderedList => number_items(&outputs(walk.children(id)?)).join("\n"),
            NodeKind::ListItem => compose_list_item(BULLET_MARKER, &item_parts(walk.children(id)?)),
            NodeKind::TaskItem { done } => {
                let marker = if *done { "- [x] " } else { "- [ ] " };
                compose_list_item(marker, &item_parts(walk.children(id)?))
            }
            NodeKind::DecisionItem => {
                compose_list_item(DECISION_MARKER, &item_parts(walk.children(id)?))
            }
            NodeKind::CodeBlock { language } => {
                code_block(language.as_deref(), &walk.children(id)?)
            }
            NodeKind::Blockquote => quote(&join_blocks(walk.children(id)?)),
            NodeKind::Rule => "---".to_string(),
            NodeKind::HardBreak => "\n".to_string(),
            NodeKind::Panel { panel_type } => {
                panel(panel_type.as_deref(), join_blocks(walk.children(id)?))
            }
            NodeKind::Expand { title } => expand(title.as_deref(), join_blocks(walk.children(id)?)),
            NodeKind::MediaGroup => media_group(&walk.children(id)?),
            NodeKind::Media(media) => self.media(media),
            NodeKind::Table => table(walk.rows(id)?),
            NodeKind::TableRow => return Ok(Fragment::Row(walk.cells(id)?)),
            NodeKind::TableCell { .. } => join_blocks(walk.children(id)?),
            NodeKind::Text { text, marks } => apply_marks(text, marks),
            NodeKind::Mention { id, text } => mention(text.as_deref().or(id.as_deref())),
            NodeKind::InlineCard { url } | NodeKind::BlockCard { url } => {
                card_link(url.as_deref())
            }
            NodeKind::Emoji {
                short_name,
                id,
                text,
            } => short_name
                .as_deref()
                .or(id.as_deref())
                .or(text.as_deref())
                .unwrap_or(FALLBACK_EMOJI)
                .to_string(),
            NodeKind::Date { timestamp } => timestamp.clone().unwrap_or_default(),
            NodeKind::Status { text } => text
                .as_deref()
                .map(|t| format!("[{}]", t))
                .unwrap_or_default(),
            NodeKind::Unknown { kind } => {
                log::debug!("Unrecognized node kind '{}', rendering its children", kind);
                join_blocks(walk.children(id)?)
            }
        };

        Ok(Fragment::Text(text))
    }

    fn heading(&self, level: u8, children: &[Child<'_>]) -> String {
        let level = level.min(self.options.max_heading_level).max(1);
        let content = join_inline(children).replace('\n', " ");
        format!("{} {}", "#".repeat(level as usize), content)
    }

    fn media(&self, media: &Media) -> String {
        match media.media_type {
            MediaType::File => match media.attachment_id() {
                Some(id) => {
                    let alt = media
                        .alt
                        .clone()
                        .unwrap_or_else(|| format!("Attachment: {}", id));
                    format!("![{}]({}{})", alt, self.options.attachment_scheme, id)
                }
                None => String::new(),
            },
            MediaType::External | MediaType::Link => match media.url.as_deref() {
                Some(url) if !url.is_empty() => format!("[External Media]({})", url),
                _ => String::new(),
            },
            _ => String::new(),
        }
    }
}

/// Rendered output of a node, held until its parent consumes it.
#[derive(Debug)]
enum Fragment {
    Text(String),
    /// Table rows keep their cells apart for the table normalizer.
    Row(Vec<String>),
}

impl Default for Fragment {
    fn default() -> Self {
        Fragment::Text(String::new())
    }
}

impl Fragment {
    fn into_text(self) -> String {
        match self {
            Fragment::Text(text) => text,
            Fragment::Row(cells) => cells.join(" | "),
        }
    }
}

/// A rendered child together with its kind.
struct Child<'a> {
    kind: &'a NodeKind,
    output: String,
}

/// Output slots for one bottom-up pass over a document.
struct Walk<'a> {
    doc: &'a Document,
    fragments: Vec<Fragment>,
}

impl<'a> Walk<'a> {
    fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            fragments: std::iter::repeat_with(Fragment::default)
                .take(doc.len())
                .collect(),
        }
    }

    fn store(&mut self, id: NodeId, fragment: Fragment) {
        if let Some(slot) = self.fragments.get_mut(id.index()) {
            *slot = fragment;
        }
    }

    /// Move a child's output out of its slot.
    fn take(&mut self, parent: NodeId, child: NodeId) -> Result<Fragment> {
        if child <= parent {
            return Err(Error::Render(format!(
                "node {} is not rendered before its parent {}",
                child.index(),
                parent.index()
            )));
        }
        self.fragments
            .get_mut(child.index())
            .map(mem::take)
            .ok_or_else(|| Error::Render(format!("node {} is outside the document", child.index())))
    }

    fn children(&mut self, id: NodeId) -> Result<Vec<Child<'a>>> {
        let doc = self.doc;
        doc.children(id)
            .iter()
            .map(|&child| {
                let kind = doc.kind(child).ok_or_else(|| {
                    Error::Render(format!("node {} is outside the document", child.index()))
                })?;
                let output = self.take(id, child)?.into_text();
                Ok(Child { kind, output })
            })
            .collect()
    }

    /// Rendered cells of a row; children that are not cells are ignored.
    fn cells(&mut self, row: NodeId) -> Result<Vec<String>> {
        Ok(self
            .children(row)?
            .into_iter()
            .filter(|child| matches!(child.kind, NodeKind::TableCell { .. }))
            .map(|child| child.output)
            .collect())
    }

    /// Cell lists of a table's rows; children that are not rows are ignored.
    fn rows(&mut self, table: NodeId) -> Result<Vec<Vec<String>>> {
        let doc = self.doc;
        let mut rows = Vec::new();
        for &child in doc.children(table) {
            if !matches!(doc.kind(child), Some(NodeKind::TableRow)) {
                continue;
            }
            match self.take(table, child)? {
                Fragment::Row(cells) => rows.push(cells),
                Fragment::Text(_) => rows.push(Vec::new()),
            }
        }
        Ok(rows)
    }

    /// Join the top-level outputs with blank lines.
    fn finish(mut self) -> String {
        let doc = self.doc;
        doc.roots()
            .iter()
            .filter_map(|root| self.fragments.get_mut(root.index()).map(mem::take))
            .map(Fragment::into_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn outputs(children: Vec<Child<'_>>) -> Vec<String> {
    children.into_iter().map(|child| child.output).collect()
}

/// Concatenate inline children.
///
/// Two adjacent text runs get a space between them unless the source text
/// already has whitespace at the seam.
fn join_inline(children: &[Child<'_>]) -> String {
    let mut out = String::new();
    let mut previous_text: Option<&str> = None;

    for child in children.iter().filter(|c| !c.output.is_empty()) {
        let raw = match child.kind {
            NodeKind::Text { text, .. } => Some(text.as_str()),
            _ => None,
        };
        if let (Some(previous), Some(current)) = (previous_text, raw) {
            if !previous.ends_with(char::is_whitespace) && !current.starts_with(char::is_whitespace)
            {
                out.push(' ');
            }
        }
        out.push_str(&child.output);
        previous_text = raw;
    }

    out
}

/// Join block children with blank lines, or concatenate when all children
/// are inline.
fn join_blocks(children: Vec<Child<'_>>) -> String {
    if children.iter().all(|child| child.kind.is_inline()) {
        return join_inline(&children);
    }
    children
        .into_iter()
        .map(|child| child.output)
        .filter(|output| !output.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Group a list item's children: runs of inline children form one part.
fn item_parts(children: Vec<Child<'_>>) -> Vec<ItemPart> {
    let mut parts = Vec::new();
    let mut inline_run: Vec<Child<'_>> = Vec::new();

    for child in children {
        if child.kind.is_inline() {
            inline_run.push(child);
            continue;
        }
        if !inline_run.is_empty() {
            parts.push(ItemPart::content(join_inline(&inline_run)));
            inline_run.clear();
        }
        if child.kind.is_list() {
            parts.push(ItemPart::list(child.output));
        } else {
            parts.push(ItemPart::content(child.output));
        }
    }
    if !inline_run.is_empty() {
        parts.push(ItemPart::content(join_inline(&inline_run)));
    }

    parts
}

fn code_block(language: Option<&str>, children: &[Child<'_>]) -> String {
    let mut code = String::new();
    for child in children {
        match child.kind {
            NodeKind::Text { text, .. } => code.push_str(text),
            NodeKind::HardBreak => code.push('\n'),
            _ => {}
        }
    }

    let fence = "`".repeat(fence_length(&code));
    format!("{}{}\n{}\n{}", fence, language.unwrap_or(""), code, fence)
}

/// Fence length that cannot be closed by a backtick run inside `code`.
fn fence_length(code: &str) -> usize {
    max_backtick_run(code).max(2) + 1
}

fn quote(body: &str) -> String {
    if body.is_empty() {
        return String::new();
    }
    body.split('\n')
        .map(|line| format!("> {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn panel(panel_type: Option<&str>, body: String) -> String {
    if body.is_empty() {
        return String::new();
    }
    let label = match panel_type {
        Some("info") => Some("Info"),
        Some("note") => Some("Note"),
        Some("warning") => Some("Warning"),
        Some("error") => Some("Error"),
        Some("success") => Some("Success"),
        _ => None,
    };
    match label {
        Some(label) => quote(&format!("**{}:** {}", label, body)),
        None => quote(&body),
    }
}

fn expand(title: Option<&str>, body: String) -> String {
    let mut out = title.map(|t| format!("**{}**", t)).unwrap_or_default();
    if !body.is_empty() {
        if !out.is_empty() {
            out.push_str("\n\n");
        }
        out.push_str(&body);
    }
    out
}

fn media_group(children: &[Child<'_>]) -> String {
    children
        .iter()
        .filter_map(|child| match child.kind {
            NodeKind::Media(media) => match media.media_type {
                MediaType::File => media
                    .attachment_id()
                    .map(|id| format!("[Attachment: {}]", id)),
                MediaType::Link => Some("[External Link]".to_string()),
                _ => None,
            },
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn table(rows: Vec<Vec<String>>) -> String {
    let mut builder = TableBuilder::new();
    for row in rows {
        builder.add_row(row);
    }
    builder.render()
}

fn mention(name: Option<&str>) -> String {
    let name = name.unwrap_or("unknown");
    format!("@{}", name.strip_prefix('@').unwrap_or(name))
}

fn card_link(url: Option<&str>) -> String {
    match url {
        Some(url) => format!("[{}]({})", card_label(url), url),
        None => format!("[{}]", FALLBACK_LINK_TEXT),
    }
}

/// Last non-empty path segment of a card URL.
fn card_label(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return FALLBACK_LINK_TEXT.to_string();
    };
    parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_LINK_TEXT.to_string())
}
