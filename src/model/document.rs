//! Document-level types.

use super::{Node, NodeKind};
use serde::Serialize;
use std::collections::BTreeMap;

/// Index of a node inside a [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A structured rich-text document.
///
/// Nodes live in a flat arena and refer to their children by [`NodeId`].
/// Nodes are allocated in pre-order, so a child's index is always greater
/// than its parent's. Renderers rely on this to walk the tree bottom-up by
/// iterating indices in reverse, without recursion.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    /// Format version tag (not used for rendering)
    pub version: Option<u64>,

    nodes: Vec<Node>,

    roots: Vec<NodeId>,

    #[serde(skip)]
    pub(crate) skipped: usize,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with a version tag.
    pub fn with_version(version: u64) -> Self {
        Self {
            version: Some(version),
            ..Self::default()
        }
    }

    /// Append a node under `parent`, or as a top-level node when `parent`
    /// is `None`.
    ///
    /// A `parent` that does not belong to this document is treated as
    /// `None`.
    pub fn push(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = Node::new(kind);

        match parent.filter(|p| p.0 < self.nodes.len()) {
            Some(parent) => {
                let parent_node = &mut self.nodes[parent.0];
                node.depth = parent_node.depth + 1;
                parent_node.children.push(id);
            }
            None => self.roots.push(id),
        }

        self.nodes.push(node);
        id
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the kind of a node by id.
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(|n| &n.kind)
    }

    /// Get the children of a node (empty for unknown ids).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Top-level nodes in document order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the document has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes in document (pre-)order.
    pub fn iter(
        &self,
    ) -> impl DoubleEndedIterator<Item = (NodeId, &Node)> + ExactSizeIterator + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Number of source nodes dropped while building this document
    /// (lenient parsing only).
    pub fn skipped_count(&self) -> usize {
        self.skipped
    }

    /// Deepest nesting level in the document.
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Count nodes by source kind name.
    pub fn kind_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for node in &self.nodes {
            *counts.entry(node.kind.name().to_string()).or_insert(0) += 1;
        }
        counts
    }
}
