//! Conversion of a JSON value into the document arena.
//!
//! The builder walks the JSON tree with an explicit work-stack, so input
//! nesting depth never translates into native stack depth.

use serde_json::{Map, Value};

use super::{ErrorMode, ParseOptions};
use crate::error::{Error, Result};
use crate::model::{Document, Mark, Media, MediaType, NodeId, NodeKind};

/// A node waiting to be converted.
struct Pending<'v> {
    value: &'v Value,
    parent: Option<NodeId>,
    /// Position inside the parent's `content` array
    position: usize,
}

/// Builds a [`Document`] from a JSON value.
pub struct TreeBuilder<'a> {
    options: &'a ParseOptions,
    // Side tables indexed by NodeId, used to report node paths.
    parents: Vec<Option<NodeId>>,
    positions: Vec<usize>,
}

impl<'a> TreeBuilder<'a> {
    /// Create a new builder.
    pub fn new(options: &'a ParseOptions) -> Self {
        Self {
            options,
            parents: Vec::new(),
            positions: Vec::new(),
        }
    }

    /// Build a document from a root value.
    ///
    /// Returns `Ok(None)` when the value is not an object or has no
    /// `content` array; such input renders as an empty string.
    pub fn build(mut self, root: &Value) -> Result<Option<Document>> {
        let Some(content) = root.get("content").and_then(Value::as_array) else {
            return Ok(None);
        };

        let mut doc = root
            .get("version")
            .and_then(Value::as_u64)
            .map(Document::with_version)
            .unwrap_or_default();

        let mut stack: Vec<Pending<'_>> = content
            .iter()
            .enumerate()
            .rev()
            .map(|(position, value)| Pending {
                value,
                parent: None,
                position,
            })
            .collect();

        while let Some(pending) = stack.pop() {
            let depth = pending
                .parent
                .and_then(|p| doc.node(p))
                .map(|p| p.depth + 1)
                .unwrap_or(0);

            if depth > self.options.max_depth {
                let path = self.path_of(pending.parent, pending.position);
                match self.options.error_mode {
                    ErrorMode::Strict => {
                        return Err(Error::DepthExceeded {
                            depth,
                            max: self.options.max_depth,
                        });
                    }
                    ErrorMode::Lenient => {
                        log::warn!(
                            "Dropping subtree at {} (depth {} exceeds {})",
                            path,
                            depth,
                            self.options.max_depth
                        );
                        doc.skipped += 1;
                        continue;
                    }
                }
            }

            let Some(map) = pending.value.as_object() else {
                let path = self.path_of(pending.parent, pending.position);
                let reason = format!("expected an object, found {}", describe(pending.value));
                self.reject(&mut doc, path, reason)?;
                continue;
            };

            let id = doc.push(pending.parent, node_kind(map));
            self.parents.push(pending.parent);
            self.positions.push(pending.position);

            match map.get("content") {
                None | Some(Value::Null) => {}
                Some(Value::Array(children)) => {
                    for (position, value) in children.iter().enumerate().rev() {
                        stack.push(Pending {
                            value,
                            parent: Some(id),
                            position,
                        });
                    }
                }
                Some(other) => {
                    let path = self.path_of(pending.parent, pending.position);
                    let reason = format!("content must be an array, found {}", describe(other));
                    self.reject(&mut doc, path, reason)?;
                }
            }
        }

        Ok(Some(doc))
    }

    /// Fail in strict mode, log and count the skip in lenient mode.
    fn reject(&self, doc: &mut Document, path: String, reason: String) -> Result<()> {
        match self.options.error_mode {
            ErrorMode::Strict => Err(Error::malformed(path, reason)),
            ErrorMode::Lenient => {
                log::warn!("Skipping malformed node at {}: {}", path, reason);
                doc.skipped += 1;
                Ok(())
            }
        }
    }

    /// Describe the location of a node as `content[i].content[j]...`.
    fn path_of(&self, parent: Option<NodeId>, position: usize) -> String {
        let mut segments = vec![position];
        let mut current = parent;
        while let Some(id) = current {
            segments.push(self.positions[id.index()]);
            current = self.parents[id.index()];
        }
        segments
            .iter()
            .rev()
            .map(|i| format!("content[{}]", i))
            .collect::<Vec<_>>()
            .join(".")
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read the typed kind of a node object.
fn node_kind(map: &Map<String, Value>) -> NodeKind {
    let kind = map.get("type").and_then(Value::as_str).unwrap_or("");
    let attrs = map.get("attrs").and_then(Value::as_object);

    match kind {
        "paragraph" => NodeKind::Paragraph,
        "heading" => NodeKind::heading(attr_number(attrs, "level").unwrap_or(1)),
        "bulletList" => NodeKind::BulletList,
        "orderedList" => NodeKind::OrderedList,
        "listItem" => NodeKind::ListItem,
        "codeBlock" => NodeKind::CodeBlock {
            language: attr_text(attrs, "language"),
        },
        "blockquote" => NodeKind::Blockquote,
        "rule" => NodeKind::Rule,
        "hardBreak" => NodeKind::HardBreak,
        "panel" => NodeKind::Panel {
            panel_type: attr_text(attrs, "panelType"),
        },
        "expand" | "nestedExpand" => NodeKind::Expand {
            title: attr_text(attrs, "title"),
        },
        "taskList" => NodeKind::TaskList,
        "taskItem" => NodeKind::TaskItem {
            done: attr_text(attrs, "state").is_some_and(|s| s.eq_ignore_ascii_case("done")),
        },
        "decisionList" => NodeKind::DecisionList,
        "decisionItem" => NodeKind::DecisionItem,
        "mediaGroup" => NodeKind::MediaGroup,
        "media" => NodeKind::Media(Media {
            id: attr_text(attrs, "id"),
            media_type: MediaType::parse(attr_text(attrs, "type").as_deref().unwrap_or("")),
            url: attr_text(attrs, "url"),
            alt: attr_text(attrs, "alt"),
        }),
        "table" => NodeKind::Table,
        "tableRow" => NodeKind::TableRow,
        "tableCell" => NodeKind::TableCell { header: false },
        "tableHeader" => NodeKind::TableCell { header: true },
        "text" => NodeKind::Text {
            text: map
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            marks: map.get("marks").map(parse_marks).unwrap_or_default(),
        },
        "mention" => NodeKind::Mention {
            id: attr_text(attrs, "id"),
            text: attr_text(attrs, "text").or_else(|| attr_text(attrs, "displayName")),
        },
        "inlineCard" => NodeKind::InlineCard {
            url: attr_text(attrs, "url"),
        },
        "blockCard" | "embedCard" => NodeKind::BlockCard {
            url: attr_text(attrs, "url"),
        },
        "emoji" => NodeKind::Emoji {
            short_name: attr_text(attrs, "shortName"),
            id: attr_text(attrs, "id"),
            text: attr_text(attrs, "text"),
        },
        "date" => NodeKind::Date {
            timestamp: attr_text(attrs, "timestamp"),
        },
        "status" => NodeKind::Status {
            text: attr_text(attrs, "text"),
        },
        other => NodeKind::Unknown {
            kind: other.to_string(),
        },
    }
}

/// Parse a `marks` array. Entries that are not objects are ignored.
fn parse_marks(value: &Value) -> Vec<Mark> {
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(Value::as_object)
        .map(|mark| {
            let name = mark.get("type").and_then(Value::as_str).unwrap_or("");
            let attrs = mark.get("attrs").and_then(Value::as_object);
            match name {
                "strong" | "bold" => Mark::Strong,
                "em" | "italic" => Mark::Em,
                "code" => Mark::Code,
                "strike" | "strikethrough" => Mark::Strike,
                "underline" => Mark::Underline,
                "superscript" | "sup" => Mark::Superscript,
                "subscript" | "sub" => Mark::Subscript,
                "subsup" => match attr_text(attrs, "type").as_deref() {
                    Some("sup") => Mark::Superscript,
                    Some("sub") => Mark::Subscript,
                    _ => Mark::Other {
                        name: name.to_string(),
                    },
                },
                "link" => Mark::Link {
                    href: attr_text(attrs, "href"),
                },
                other => Mark::Other {
                    name: other.to_string(),
                },
            }
        })
        .collect()
}

/// Read a string attribute; numbers and booleans are kept in their JSON
/// spelling, empty strings count as absent.
fn attr_text(attrs: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    match attrs?.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a numeric attribute, truncating fractions.
fn attr_number(attrs: Option<&Map<String, Value>>, key: &str) -> Option<i64> {
    let value = attrs?.get(key)?;
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite())
            .map(|f| f as i64)
    })
}
