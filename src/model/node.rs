//! Node kinds and their typed payloads.

use super::{Mark, NodeId};
use serde::Serialize;

/// A node in the document arena.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// What the node is, with its kind-specific attributes
    pub kind: NodeKind,

    /// Child nodes in document order
    pub children: Vec<NodeId>,

    /// Nesting depth (top-level nodes are at depth 0)
    pub depth: usize,
}

impl Node {
    /// Create a node with no children.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            depth: 0,
        }
    }
}

/// The kind of a node.
///
/// Every kind of the document format the renderer understands has its own
/// variant; anything else is kept as [`NodeKind::Unknown`] so its children
/// can still be rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeKind {
    /// A paragraph of inline content
    Paragraph,

    /// A heading; `level` is always within 1..=6
    Heading {
        /// Heading level
        level: u8,
    },

    /// An unordered list
    BulletList,

    /// An ordered list
    OrderedList,

    /// An item of a bullet or ordered list
    ListItem,

    /// A fenced code block
    CodeBlock {
        /// Fence info string
        language: Option<String>,
    },

    /// A block quotation
    Blockquote,

    /// A horizontal rule
    Rule,

    /// A hard line break inside inline content
    HardBreak,

    /// A highlighted panel (info, note, warning, ...)
    Panel {
        /// Panel flavor
        panel_type: Option<String>,
    },

    /// A collapsible section
    Expand {
        /// Section title
        title: Option<String>,
    },

    /// A list of tasks
    TaskList,

    /// A task with a checkbox
    TaskItem {
        /// Whether the task is complete
        done: bool,
    },

    /// A list of decisions
    DecisionList,

    /// A recorded decision
    DecisionItem,

    /// A group of media attachments
    MediaGroup,

    /// A single media item
    Media(Media),

    /// A table
    Table,

    /// A table row
    TableRow,

    /// A table cell or header cell
    TableCell {
        /// Whether the source marked this as a header cell
        header: bool,
    },

    /// A leaf text run with its decorations
    Text {
        /// Literal text
        text: String,
        /// Decorations in source order
        marks: Vec<Mark>,
    },

    /// A user mention
    Mention {
        /// User identifier
        id: Option<String>,
        /// Display text, possibly starting with `@`
        text: Option<String>,
    },

    /// A smart link rendered inline
    InlineCard {
        /// Link target
        url: Option<String>,
    },

    /// A smart link rendered as a block or embed
    BlockCard {
        /// Link target
        url: Option<String>,
    },

    /// An emoji
    Emoji {
        /// Short name such as `:smile:`
        short_name: Option<String>,
        /// Emoji identifier
        id: Option<String>,
        /// Fallback glyph
        text: Option<String>,
    },

    /// A date chip; the timestamp is kept exactly as supplied
    Date {
        /// Raw timestamp
        timestamp: Option<String>,
    },

    /// A status lozenge
    Status {
        /// Status label
        text: Option<String>,
    },

    /// A node kind the renderer does not recognize
    Unknown {
        /// Source kind name, empty when the source had none
        kind: String,
    },
}

impl NodeKind {
    /// Create a text node kind without marks.
    pub fn text(text: impl Into<String>) -> Self {
        NodeKind::Text {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    /// Create a text node kind with marks.
    pub fn marked_text(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        NodeKind::Text {
            text: text.into(),
            marks,
        }
    }

    /// Create a heading kind, clamping the level to 1..=6.
    pub fn heading(level: i64) -> Self {
        NodeKind::Heading {
            level: level.clamp(1, 6) as u8,
        }
    }

    /// Source name of this kind.
    pub fn name(&self) -> &str {
        match self {
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading { .. } => "heading",
            NodeKind::BulletList => "bulletList",
            NodeKind::OrderedList => "orderedList",
            NodeKind::ListItem => "listItem",
            NodeKind::CodeBlock { .. } => "codeBlock",
            NodeKind::Blockquote => "blockquote",
            NodeKind::Rule => "rule",
            NodeKind::HardBreak => "hardBreak",
            NodeKind::Panel { .. } => "panel",
            NodeKind::Expand { .. } => "expand",
            NodeKind::TaskList => "taskList",
            NodeKind::TaskItem { .. } => "taskItem",
            NodeKind::DecisionList => "decisionList",
            NodeKind::DecisionItem => "decisionItem",
            NodeKind::MediaGroup => "mediaGroup",
            NodeKind::Media(_) => "media",
            NodeKind::Table => "table",
            NodeKind::TableRow => "tableRow",
            NodeKind::TableCell { header: true } => "tableHeader",
            NodeKind::TableCell { header: false } => "tableCell",
            NodeKind::Text { .. } => "text",
            NodeKind::Mention { .. } => "mention",
            NodeKind::InlineCard { .. } => "inlineCard",
            NodeKind::BlockCard { .. } => "blockCard",
            NodeKind::Emoji { .. } => "emoji",
            NodeKind::Date { .. } => "date",
            NodeKind::Status { .. } => "status",
            NodeKind::Unknown { kind } => kind,
        }
    }

    /// Check if this kind renders as a Markdown list.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            NodeKind::BulletList
                | NodeKind::OrderedList
                | NodeKind::TaskList
                | NodeKind::DecisionList
        )
    }

    /// Check if this kind is inline content (lives inside a paragraph).
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            NodeKind::Text { .. }
                | NodeKind::HardBreak
                | NodeKind::Mention { .. }
                | NodeKind::InlineCard { .. }
                | NodeKind::Emoji { .. }
                | NodeKind::Date { .. }
                | NodeKind::Status { .. }
        )
    }
}

/// Attributes of a media node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Media {
    /// Attachment identifier
    pub id: Option<String>,

    /// Where the media lives
    pub media_type: MediaType,

    /// Target URL for external media
    pub url: Option<String>,

    /// Alternative text
    pub alt: Option<String>,
}

impl Media {
    /// Create an attachment (file) media item.
    pub fn file(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            media_type: MediaType::File,
            ..Default::default()
        }
    }

    /// Create an external media item.
    pub fn external(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            media_type: MediaType::External,
            ..Default::default()
        }
    }

    /// Set the alternative text.
    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    /// Attachment id, if present and non-empty.
    pub fn attachment_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Storage type of a media item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// An uploaded attachment
    File,
    /// A link to another resource
    Link,
    /// Media hosted elsewhere
    External,
    /// Any other declared type
    Other(String),
    /// No type declared
    #[default]
    Unspecified,
}

impl MediaType {
    /// Parse a media type name.
    pub fn parse(name: &str) -> Self {
        match name {
            "file" => MediaType::File,
            "link" => MediaType::Link,
            "external" => MediaType::External,
            "" => MediaType::Unspecified,
            other => MediaType::Other(other.to_string()),
        }
    }
}
